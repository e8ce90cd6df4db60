use async_trait::async_trait;
use eatreal_model::{
    dto::{EmailRequest, PaymentSettings, StatusResponse},
    plan::PlanRequest,
};
use log::{debug, warn};

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("server unreachable")]
    CommunicationError,
    #[error("internal server error")]
    InternalServerError,
    #[error("invalid request")]
    RequestError,
    #[error("incorrect server response")]
    ResponseError,
    #[error("server reported failure: {0}")]
    Rejected(String),
}

type Result<T> = std::result::Result<T, Error>;

#[mockall::automock]
#[async_trait]
pub trait Client: Send + Sync {
    async fn generate_meal_plan(&self, request: &PlanRequest) -> Result<()>;
    async fn send_email(&self, email: &str) -> Result<()>;
    async fn get_payment_settings(&self, discount: Option<String>) -> Result<PaymentSettings>;
}

pub struct ClientImpl {
    url: String,
    client: reqwest::Client,
}

impl ClientImpl {
    fn new(url: String) -> Self {
        Self {
            url: url.trim_end_matches('/').to_owned(),
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{}", self.url, path)
    }
}

pub fn create(url: String) -> impl Client {
    ClientImpl::new(url)
}

fn check_status(resp: reqwest::Response) -> Result<reqwest::Response> {
    if resp.status().is_client_error() {
        Err(Error::RequestError)
    } else if resp.status().is_server_error() {
        Err(Error::InternalServerError)
    } else if !resp.status().is_success() {
        Err(Error::ResponseError)
    } else {
        Ok(resp)
    }
}

fn check_success(status: StatusResponse) -> Result<()> {
    if status.success {
        Ok(())
    } else {
        let reason = status.error.unwrap_or_else(|| "unknown error".to_owned());
        warn!("Server reported failure: {}", reason);
        Err(Error::Rejected(reason))
    }
}

/// Any JSON body counts as accepted unless it carries `"success": false`.
fn check_plan_reply(body: serde_json::Value) -> Result<()> {
    match body.get("success").and_then(serde_json::Value::as_bool) {
        Some(false) => {
            let reason = body
                .get("error")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("unknown error")
                .to_owned();
            warn!("Server reported failure: {}", reason);
            Err(Error::Rejected(reason))
        }
        _ => Ok(()),
    }
}

#[async_trait]
impl Client for ClientImpl {
    async fn generate_meal_plan(&self, request: &PlanRequest) -> Result<()> {
        debug!(
            "Submitting plan request for {} answers, prompt length {}",
            request.user_profile.len(),
            request.prompt.len()
        );
        self.client
            .post(self.endpoint("generate-meal-plan"))
            .json(request)
            .send()
            .await
            .map_err(|_| Error::CommunicationError)
            .and_then(check_status)?
            .json()
            .await
            .map_err(|_| Error::ResponseError)
            .and_then(check_plan_reply)
    }

    async fn send_email(&self, email: &str) -> Result<()> {
        self.client
            .post(self.endpoint("send-email"))
            .json(&EmailRequest {
                email: email.to_owned(),
            })
            .send()
            .await
            .map_err(|_| Error::CommunicationError)
            .and_then(check_status)?
            .json()
            .await
            .map_err(|_| Error::ResponseError)
            .and_then(check_success)
    }

    async fn get_payment_settings(&self, discount: Option<String>) -> Result<PaymentSettings> {
        let mut request = self.client.get(self.endpoint("get-paypal-config"));
        if let Some(code) = discount {
            request = request.query(&[("discount", code)]);
        }
        request
            .send()
            .await
            .map_err(|_| Error::CommunicationError)
            .and_then(check_status)?
            .json()
            .await
            .map_err(|_| Error::ResponseError)
    }
}
