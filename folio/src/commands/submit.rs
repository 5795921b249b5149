use anyhow::bail;
use clap::Args;
use folio_client::{form::ContactForm, ContactSubmitter, SubmissionResult};
use folio_config::Config;
use url::Url;

use crate::environment;

#[derive(Debug, Args)]
pub struct SubmitCommand {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub message: String,
    /// Value of the honeypot field
    #[arg(long, default_value = "")]
    pub company: String,
    /// Override the contact endpoint url
    #[arg(long)]
    pub endpoint: Option<Url>,
}

impl SubmitCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        let endpoint = environment::contact_endpoint(&config, self.endpoint)?;
        let form = ContactForm::new(ContactSubmitter::new(endpoint));
        form.update_fields(|fields| {
            fields.name = self.name;
            fields.email = self.email;
            fields.message = self.message;
            fields.company = self.company;
        });

        let Some(result) = form.submit().await else {
            bail!("Submission was not attempted");
        };

        print_result(&result);
        if !result.ok {
            bail!("{}", result.message);
        }

        Ok(())
    }
}

fn print_result(result: &SubmissionResult) {
    println!("{}", result.message);
    if let Some(id) = &result.id {
        println!("id: {id}");
    }
    for (field, errors) in result.field_errors.iter().flatten() {
        for error in errors {
            println!("  {field}: {error}");
        }
    }
}
