//! Client side of the contact form: honeypot check, a single request to the
//! contact endpoint and interpretation of its response.

use std::collections::BTreeMap;

use endpoint::{ContactEndpoint, ContactPayload, EndpointResponse};
use tracing::{debug, warn};

pub mod endpoint;
pub mod form;

pub const SPAM_DETECTED: &str = "Spam detected.";
pub const TRY_AGAIN_LATER: &str = "Sending failed. Please try again later.";
pub const CHECK_FIELDS: &str = "Please check the highlighted fields.";
pub const NOT_SENT: &str = "Your message could not be sent.";
pub const SENT: &str = "Message sent.";

/// Raw values of the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFormFields {
    pub name: String,
    pub email: String,
    pub message: String,
    /// Honeypot field which is hidden from humans.
    pub company: String,
}

impl ContactFormFields {
    /// The honeypot is a heuristic: bots that skip hidden fields pass it.
    pub fn is_spam(&self) -> bool {
        !self.company.trim().is_empty()
    }
}

impl From<&ContactFormFields> for ContactPayload {
    fn from(value: &ContactFormFields) -> Self {
        Self {
            name: value.name.clone(),
            email: value.email.clone(),
            message: value.message.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
    pub ok: bool,
    pub message: String,
    pub field_errors: Option<BTreeMap<String, Vec<String>>>,
    pub id: Option<String>,
}

impl SubmissionResult {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            field_errors: None,
            id: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ContactSubmitter<Endpoint> {
    endpoint: Endpoint,
}

impl<Endpoint> ContactSubmitter<Endpoint>
where
    Endpoint: ContactEndpoint,
{
    pub fn new(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }

    /// Submit the form. Never retries; every call is an independent attempt.
    pub async fn submit(&self, fields: &ContactFormFields) -> SubmissionResult {
        if fields.is_spam() {
            debug!("honeypot field is filled, not sending");
            return SubmissionResult::failure(SPAM_DETECTED);
        }

        let response = match self.endpoint.post(&fields.into()).await {
            Ok(response) => response,
            Err(err) => {
                warn!("failed to reach contact endpoint: {err:#}");
                return SubmissionResult::failure(TRY_AGAIN_LATER);
            }
        };

        let EndpointResponse {
            success,
            body: Some(body),
        } = response
        else {
            warn!("contact endpoint returned an invalid response");
            return SubmissionResult::failure(TRY_AGAIN_LATER);
        };

        if !success || !body.ok {
            let message = body.msg.filter(|msg| !msg.is_empty()).unwrap_or_else(|| {
                match body.errors {
                    Some(_) => CHECK_FIELDS,
                    None => NOT_SENT,
                }
                .into()
            });
            return SubmissionResult {
                ok: false,
                message,
                field_errors: body.errors,
                id: None,
            };
        }

        SubmissionResult {
            ok: true,
            message: SENT.into(),
            field_errors: None,
            id: body.id,
        }
    }
}
