use reqwest::Client;
use serde::Serialize;

use crate::config::MailConfig;
use crate::core::ports::mailer::{Mail, Mailer};
use crate::error::Error;

#[derive(Debug, Serialize)]
struct Address<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendRequest<'a> {
    sender: Address<'a>,
    to: Vec<Address<'a>>,
    subject: &'a str,
    html_content: &'a str,
}

/// Transactional mail through an HTTP relay (`POST` JSON, key in the `api-key` header).
pub struct RelayMailer {
    client: Client,
    config: MailConfig,
}

impl RelayMailer {
    pub fn new(config: MailConfig) -> Self {
        Self { client: Client::new(), config }
    }

    fn request<'a>(&'a self, mail: &'a Mail) -> SendRequest<'a> {
        SendRequest {
            sender: Address {
                email: &self.config.sender_email,
                name: Some(&self.config.sender_name),
            },
            to: vec![Address {
                email: &mail.to,
                name: mail.to_name.as_deref(),
            }],
            subject: &mail.subject,
            html_content: &mail.html,
        }
    }
}

impl Mailer for RelayMailer {
    async fn send(&self, mail: &Mail) -> Result<(), Error> {
        let resp = self
            .client
            .post(&self.config.relay_url)
            .header("api-key", &self.config.api_key)
            .json(&self.request(mail))
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Mail(format!("relay answered {}: {}", status, body)));
        }
        Ok(())
    }
}
