use std::{net::IpAddr, time::Duration};

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use folio_testing::resend;

/// Fake external services for local development
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run a fake Resend email API which accepts a single api key
    Resend(ResendArgs),
    /// Print shell completions
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Args)]
struct ResendArgs {
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,
    #[arg(long, default_value_t = 8001)]
    port: u16,
    #[arg(long, env = "RESEND_API_KEY", default_value = "re_test_key")]
    api_key: String,
    /// Delay every response by this many milliseconds
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    match Cli::parse().command {
        Command::Resend(args) => {
            let delay = Duration::from_millis(args.delay_ms);
            resend::start_server(args.host, args.port, &args.api_key, delay).await
        }
        Command::Completion { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "folio-testing", &mut std::io::stdout());
            Ok(())
        }
    }
}
