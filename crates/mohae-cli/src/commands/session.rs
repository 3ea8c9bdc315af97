use anyhow::{Context, Result};
use colored::Colorize;
use mohae_widget::{ClientSecretSource, HttpClientSecretSource};

/// Fetch a client secret from a running server, the way the widget does
pub async fn execute(origin: String, current: Option<String>) -> Result<()> {
    let source = HttpClientSecretSource::for_origin(&origin);
    tracing::debug!("Requesting client secret from {}", source.endpoint());

    let secret = source
        .client_secret(current.as_deref())
        .await
        .with_context(|| format!("Session request to {} failed", source.endpoint()))?;

    println!("{} {}", "Client secret:".green().bold(), secret);
    Ok(())
}
