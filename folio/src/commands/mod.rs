use clap::{Parser, Subcommand};
use clap_complete::Shell;
use folio_config::Config;
use folio_utils::folio_version;

use self::{email::EmailCommand, submit::SubmitCommand};

pub mod email;
pub mod serve;
pub mod submit;

/// Portfolio contact form backend
#[derive(Debug, Parser)]
#[command(version = folio_version())]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the contact endpoint
    #[command(aliases(["run", "start", "s"]))]
    Serve,
    /// Send a message through a running contact endpoint
    Submit(SubmitCommand),
    /// Check delivery through the email provider
    #[command(aliases(["e"]))]
    Email {
        #[command(subcommand)]
        command: EmailCommand,
    },
    /// Load and validate the configuration
    CheckConfig {
        /// Also print the loaded configuration (secrets are redacted)
        #[arg(short, long)]
        verbose: bool,
    },
    /// Print shell completions
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Command {
    /// Run a command which needs the configuration.
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            Self::Serve => serve::serve(config).await,
            Self::Submit(command) => command.invoke(config).await,
            Self::Email { command } => command.invoke(config).await,
            Self::CheckConfig { verbose } => {
                if verbose {
                    println!("{config:#?}");
                }
                Ok(())
            }
            Self::Completion { .. } => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_submit() {
        let cli = Cli::try_parse_from([
            "folio",
            "submit",
            "--name",
            "Jo",
            "--email",
            "jo@example.com",
            "--message",
            "Hello there!",
            "--endpoint",
            "http://127.0.0.1:8000/api/contact",
        ])
        .unwrap();

        let Command::Submit(command) = cli.command else {
            panic!("expected submit command");
        };
        assert_eq!(command.company, "");
        assert_eq!(
            command.endpoint.unwrap().as_str(),
            "http://127.0.0.1:8000/api/contact"
        );
    }

    #[test]
    fn email_test_requires_valid_recipient() {
        assert!(Cli::try_parse_from(["folio", "email", "test", "not-an-address"]).is_err());
        assert!(Cli::try_parse_from(["folio", "email", "test", "jo@example.com"]).is_ok());
    }
}
