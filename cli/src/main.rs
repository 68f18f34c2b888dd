mod commands;
mod config;
mod logging;
mod prompt;

use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = config::Cli::parse();
    logging::init();
    commands::run(cli).await
}
