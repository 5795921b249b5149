use std::future::Future;

use folio_models::contact::ContactSubmission;
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Render the notification for a validated submission and deliver it to
    /// the site owner. Returns the provider's message id, if any.
    fn send_message(
        &self,
        submission: ContactSubmission,
    ) -> impl Future<Output = Result<Option<String>, ContactSendMessageError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactSendMessageError {
    #[error("missing configuration value {0}")]
    MissingConfig(ContactSecret),
    #[error("email provider error: {0}")]
    Provider(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Deployment secrets required to relay contact messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactSecret {
    ApiKey,
    Recipient,
    Sender,
}

impl ContactSecret {
    /// Name of the environment variable the secret is read from.
    pub const fn env_var(self) -> &'static str {
        match self {
            Self::ApiKey => "RESEND_API_KEY",
            Self::Recipient => "CONTACT_TO",
            Self::Sender => "CONTACT_FROM",
        }
    }
}

impl std::fmt::Display for ContactSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.env_var())
    }
}

#[cfg(feature = "mock")]
impl MockContactFeatureService {
    pub fn with_send_message(
        mut self,
        submission: ContactSubmission,
        result: Result<Option<String>, ContactSendMessageError>,
    ) -> Self {
        self.expect_send_message()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
