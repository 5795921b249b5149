use folio_core_contact_contracts::{ContactFeatureService, ContactSecret, ContactSendMessageError};
use folio_email_contracts::{Email, EmailSendError, EmailService};
use folio_models::{contact::ContactSubmission, Sensitive};
use folio_templates_contracts::{ContactNotificationTemplate, TemplateService};
use tracing::{debug, error, warn};

#[derive(Debug, Clone)]
pub struct ContactFeatureServiceImpl<Email, Template> {
    pub email: Email,
    pub template: Template,
    pub config: ContactFeatureConfig,
}

/// Secrets are optional so that a misconfigured deployment still starts and
/// reports the missing value per request.
#[derive(Debug, Clone, Default)]
pub struct ContactFeatureConfig {
    pub api_key: Option<Sensitive<String>>,
    pub to: Option<String>,
    pub from: Option<String>,
}

impl ContactFeatureConfig {
    /// Returns the api key, recipient and sender, or the first one missing.
    fn secrets(&self) -> Result<(&str, &str, &str), ContactSendMessageError> {
        Ok((
            require(
                self.api_key.as_deref().map(String::as_str),
                ContactSecret::ApiKey,
            )?,
            require(self.to.as_deref(), ContactSecret::Recipient)?,
            require(self.from.as_deref(), ContactSecret::Sender)?,
        ))
    }
}

fn require(value: Option<&str>, secret: ContactSecret) -> Result<&str, ContactSendMessageError> {
    value
        .filter(|x| !x.is_empty())
        .ok_or(ContactSendMessageError::MissingConfig(secret))
}

impl<EmailS, TemplateS> ContactFeatureService for ContactFeatureServiceImpl<EmailS, TemplateS>
where
    EmailS: EmailService,
    TemplateS: TemplateService,
{
    async fn send_message(
        &self,
        submission: ContactSubmission,
    ) -> Result<Option<String>, ContactSendMessageError> {
        let (api_key, to, from) = self
            .config
            .secrets()
            .inspect_err(|err| error!("cannot relay contact message: {err}"))?;

        let html = self.template.render(&ContactNotificationTemplate::new(
            submission.name.as_str(),
            submission.email.as_str(),
            &submission.message,
        ))?;

        let email = Email {
            from: from.into(),
            to: to.into(),
            subject: format!("New portfolio message from {}", *submission.name),
            html,
        };

        match self.email.send(api_key, email).await {
            Ok(id) => {
                debug!(?id, "relayed contact message");
                Ok(id)
            }
            Err(EmailSendError::Rejected(detail)) => {
                warn!(%detail, "email provider failed to relay contact message");
                Err(ContactSendMessageError::Provider(detail))
            }
            Err(EmailSendError::Other(err)) => Err(err.into()),
        }
    }
}
