use async_trait::async_trait;
use log::{error, info};
use serde::Serialize;

use crate::config::MailConfig;

const SENDER_NAME: &str = "EatReal";

#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum MailError {
    #[error("mail service unreachable")]
    CommunicationError,
    #[error("mail service returned status {0}")]
    StatusError(u16),
}

#[mockall::automock]
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &Message) -> Result<(), MailError>;
}

#[derive(Serialize)]
struct RelayRequest<'a> {
    from: String,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

/// Delivers mail through an HTTP relay that accepts
/// `{from, to, subject, html}` with a bearer key.
pub struct HttpMailer {
    config: MailConfig,
    client: reqwest::Client,
}

impl HttpMailer {
    pub fn new(config: MailConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, message: &Message) -> Result<(), MailError> {
        let resp = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&RelayRequest {
                from: format!("{} <{}>", SENDER_NAME, self.config.sender),
                to: &message.to,
                subject: &message.subject,
                html: &message.html,
            })
            .send()
            .await
            .map_err(|e| {
                error!("Email sending error: {}", e);
                MailError::CommunicationError
            })?;

        if resp.status().is_success() {
            info!("Email \"{}\" sent", message.subject);
            Ok(())
        } else {
            error!("Mail relay returned {}", resp.status());
            Err(MailError::StatusError(resp.status().as_u16()))
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn mailer(server: &MockServer) -> HttpMailer {
        HttpMailer::new(MailConfig {
            api_url: format!("{}/send", server.uri()),
            api_key: "mail-key".to_owned(),
            sender: "plans@eatreal.example".to_owned(),
        })
    }

    fn message() -> Message {
        Message {
            to: "jane@example.com".to_owned(),
            subject: "Your Personalized Nutrition Plan".to_owned(),
            html: "<p>hi</p>".to_owned(),
        }
    }

    #[tokio::test]
    async fn posts_message_to_relay() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/send"))
            .and(header("authorization", "Bearer mail-key"))
            .and(body_json(json!({
                "from": "EatReal <plans@eatreal.example>",
                "to": "jane@example.com",
                "subject": "Your Personalized Nutrition Plan",
                "html": "<p>hi</p>",
            })))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        assert_eq!(mailer(&server).send(&message()).await, Ok(()));
    }

    #[tokio::test]
    async fn relay_failure_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        assert_eq!(
            mailer(&server).send(&message()).await,
            Err(MailError::StatusError(503))
        );
    }
}
