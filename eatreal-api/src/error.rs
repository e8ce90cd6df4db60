use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use eatreal_model::dto::{ErrorResponse, StatusResponse};

use crate::{generator::GenerationError, mailer::MailError};

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("{0} is not configured")]
    NotConfigured(&'static str),
    #[error("Failed to load PayPal configuration")]
    PaymentConfig,
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error("Failed to send email")]
    Mail(#[from] MailError),
    #[error("Not found")]
    NotFound,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        match self {
            ApiError::PaymentConfig => response.json(ErrorResponse {
                error: self.to_string(),
            }),
            _ => response.json(StatusResponse::failed(self.to_string())),
        }
    }
}
