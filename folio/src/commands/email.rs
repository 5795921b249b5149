use anyhow::Context;
use clap::Subcommand;
use folio_config::Config;
use folio_email_contracts::{Email, EmailService};
use folio_models::email_address::EmailAddress;
use tracing::info;

use crate::environment;

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Test email deliverability
    Test { recipient: EmailAddress },
}

impl EmailCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            EmailCommand::Test { recipient } => test(config, recipient).await,
        }
    }
}

async fn test(config: Config, recipient: EmailAddress) -> anyhow::Result<()> {
    let api_key = config
        .email
        .api_key
        .as_deref()
        .filter(|x| !x.is_empty())
        .context("RESEND_API_KEY is not set")?;
    let from = config
        .contact
        .from
        .as_deref()
        .filter(|x| !x.is_empty())
        .context("CONTACT_FROM is not set")?;

    let email_service = environment::email(&config)?;

    let id = email_service
        .send(
            api_key,
            Email {
                from: from.into(),
                to: recipient.to_string(),
                subject: "Email Deliverability Test".into(),
                html: "<p>Email deliverability seems to be working!</p>".into(),
            },
        )
        .await
        .context("Failed to send email")?;

    info!(?id, "Sent test email to {recipient}");

    Ok(())
}
