//! Asylum CLI - command line front end for the asylum case visualizations.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "asylum-cli",
    version,
    about = "Asylum case visualization toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: asylum_cmd::Command,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("asylum-cli {}", env!("CARGO_PKG_VERSION"));
    asylum_cmd::run(cli.command).await
}
