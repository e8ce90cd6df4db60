use serde::{Deserialize, Serialize};

use crate::checkout::{Amount, Quote};

/// Outcome reported by the plan and email endpoints.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct StatusResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct EmailRequest {
    pub email: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSettings {
    pub client_id: String,
    pub environment: String,
    pub amount: String,
    pub currency: String,
    pub discount_applied: bool,
}

impl PaymentSettings {
    pub fn new(client_id: String, environment: String, quote: &Quote) -> Self {
        Self {
            client_id,
            environment,
            amount: Amount(quote.amount_cents).to_string(),
            currency: quote.currency.clone(),
            discount_applied: quote.discount_applied(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
