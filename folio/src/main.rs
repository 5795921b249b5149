use anyhow::Context;
use clap::{CommandFactory, Parser};
use folio::commands::{Cli, Command};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Command::Completion { shell } = cli.command {
        let mut command = Cli::command();
        clap_complete::generate(shell, &mut command, "folio", &mut std::io::stdout());
        return Ok(());
    }

    init_tracing();

    let config = folio_config::load().context("Failed to load config")?;
    cli.command.invoke(config).await
}

fn init_tracing() {
    let layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    #[cfg(tracing_pretty)]
    let layer = layer.pretty();

    tracing_subscriber::registry()
        .with(layer.with_filter(EnvFilter::from_default_env()))
        .init();
}
