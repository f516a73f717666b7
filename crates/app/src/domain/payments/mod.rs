//! Payments

use async_trait::async_trait;
use mockall::automock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// How the buyer wants to pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Card payment
    Card,

    /// Direct bank transfer
    BankTransfer,
}

/// Result of asking the gateway to charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// The charge went through.
    Approved {
        /// Gateway-issued transaction reference
        transaction_id: String,
    },

    /// The gateway refused the charge; not an infrastructure failure.
    Declined {
        /// Gateway-provided reason, shown to the buyer
        message: String,
    },
}

/// Infrastructure failures talking to the gateway.
#[derive(Debug, Error)]
pub enum PaymentGatewayError {
    /// The gateway could not be reached or answered badly.
    #[error("payment gateway error: {0}")]
    Unreachable(String),
}

/// External payment collaborator.
#[automock]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Charge the given amount in minor units.
    async fn charge(
        &self,
        amount: u64,
        method: PaymentMethod,
    ) -> Result<PaymentOutcome, PaymentGatewayError>;
}

/// Gateway that approves every charge; used for in-memory wiring.
#[derive(Debug, Default)]
pub struct AlwaysApproveGateway;

#[async_trait]
impl PaymentGateway for AlwaysApproveGateway {
    async fn charge(
        &self,
        _amount: u64,
        _method: PaymentMethod,
    ) -> Result<PaymentOutcome, PaymentGatewayError> {
        Ok(PaymentOutcome::Approved {
            transaction_id: Uuid::now_v7().to_string(),
        })
    }
}
