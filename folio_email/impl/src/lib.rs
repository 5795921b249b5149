use std::{sync::Arc, time::Duration};

use folio_email_contracts::{Email, EmailSendError, EmailService};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::http::HttpClient;

pub mod http;

/// Email delivery through the Resend HTTP API.
#[derive(Debug, Clone)]
pub struct ResendEmailServiceImpl {
    config: ResendEmailServiceConfig,
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct ResendEmailServiceConfig {
    pub api_url: Arc<Url>,
    pub timeout: Duration,
}

impl ResendEmailServiceImpl {
    pub fn new(config: ResendEmailServiceConfig) -> anyhow::Result<Self> {
        let client = HttpClient::new(config.timeout)?;
        Ok(Self { config, client })
    }
}

impl EmailService for ResendEmailServiceImpl {
    async fn send(&self, api_key: &str, email: Email) -> Result<Option<String>, EmailSendError> {
        let request = SendEmailRequest {
            from: &email.from,
            to: [&email.to],
            subject: &email.subject,
            html: &email.html,
        };

        let response = self
            .client
            .post((*self.config.api_url).clone())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|err| self.transport_error(err))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| self.transport_error(err))?;

        if !status.is_success() {
            let detail = serde_json::from_str::<serde_json::Value>(&body)
                .map(|value| value.to_string())
                .unwrap_or(body);
            debug!(%status, %detail, "email provider rejected email");
            return Err(EmailSendError::Rejected(detail));
        }

        match serde_json::from_str::<SendEmailResponse>(&body) {
            Ok(response) => Ok(response.id),
            Err(err) => {
                warn!(%status, %err, "failed to parse email provider response");
                Ok(None)
            }
        }
    }
}

impl ResendEmailServiceImpl {
    fn transport_error(&self, err: reqwest::Error) -> EmailSendError {
        let detail = if err.is_timeout() {
            format!("request timed out after {:?}", self.config.timeout)
        } else {
            format!("{:#}", anyhow::Error::from(err))
        };
        EmailSendError::Rejected(detail)
    }
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

#[derive(Deserialize)]
struct SendEmailResponse {
    id: Option<String>,
}
