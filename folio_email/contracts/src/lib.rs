use std::future::Future;

use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait EmailService: Send + Sync + 'static {
    /// Deliver an email through the provider. Returns the identifier the
    /// provider assigned to the message, if it reported one.
    fn send(
        &self,
        api_key: &str,
        email: Email,
    ) -> impl Future<Output = Result<Option<String>, EmailSendError>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Error)]
pub enum EmailSendError {
    /// The provider could not be reached or refused the email. Contains the
    /// error details reported by the provider.
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockEmailService {
    pub fn with_send(
        mut self,
        api_key: String,
        email: Email,
        result: Result<Option<String>, EmailSendError>,
    ) -> Self {
        self.expect_send()
            .once()
            .with(
                mockall::predicate::eq(api_key),
                mockall::predicate::eq(email),
            )
            .return_once(move |_, _| Box::pin(std::future::ready(result)));
        self
    }
}
