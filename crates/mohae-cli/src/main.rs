use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mohae_cli::cli::{Cli, Commands};
use mohae_cli::commands::{self, serve::ServeOverrides};
use mohae_config::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Flags win over RUST_LOG
    let env_filter = match cli.level_override() {
        Some(level) => EnvFilter::default().add_directive(level.into()),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Serve {
            host,
            port,
            static_dir,
        } => {
            let config = AppConfig::load(cli.config.as_deref())?;
            let overrides = ServeOverrides {
                host,
                port,
                static_dir,
            };
            commands::serve::execute(config, overrides).await?
        }

        Commands::Options { lang } => commands::options::execute(lang).await?,

        Commands::Session { origin, current } => {
            commands::session::execute(origin, current).await?
        }
    }

    Ok(())
}
