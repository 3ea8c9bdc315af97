use anyhow::{Context, Result};
use mohae_widget::{Language, WidgetOptions};

/// Print the widget options as JSON
pub async fn execute(lang: Option<String>) -> Result<()> {
    println!("{}", render(lang.as_deref())?);
    Ok(())
}

pub fn render(lang: Option<&str>) -> Result<String> {
    let language = Language::from_tag(lang);
    if let Some(tag) = lang {
        if tag != language.as_str() {
            tracing::warn!("Unsupported language '{}', using {}", tag, language);
        }
    }

    serde_json::to_string_pretty(&WidgetOptions::for_language(language))
        .context("Failed to serialize widget options")
}
