//! Options handed to the ChatKit widget
//!
//! Serializes to the JSON shape the widget expects. The client-secret
//! callback lives on [`WidgetControl`](crate::WidgetControl) rather than
//! here since it cannot cross a serialization boundary.

use crate::locale::{Language, StarterPrompt};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetOptions {
    pub locale: Language,
    pub header: HeaderOptions,
    pub history: HistoryOptions,
    pub start_screen: StartScreenOptions,
    pub composer: ComposerOptions,
    pub theme: ThemeOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderOptions {
    pub title: HeaderTitle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderTitle {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryOptions {
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StartScreenOptions {
    pub greeting: String,
    pub prompts: Vec<StarterPrompt>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComposerOptions {
    pub placeholder: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Radius {
    Pill,
    Round,
    Soft,
    Sharp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeOptions {
    pub color_scheme: ColorScheme,
    pub radius: Radius,
}

impl WidgetOptions {
    /// Options for `language`: light, rounded theme and no stored history,
    /// so every mount starts a fresh conversation.
    pub fn for_language(language: Language) -> Self {
        let copy = language.copy();
        Self {
            locale: language,
            header: HeaderOptions {
                title: HeaderTitle {
                    text: copy.header_title.to_string(),
                },
            },
            history: HistoryOptions { enabled: false },
            start_screen: StartScreenOptions {
                greeting: copy.greeting.to_string(),
                prompts: copy.prompts.to_vec(),
            },
            composer: ComposerOptions {
                placeholder: copy.placeholder.to_string(),
            },
            theme: ThemeOptions {
                color_scheme: ColorScheme::Light,
                radius: Radius::Round,
            },
        }
    }
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self::for_language(Language::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::{ENGLISH, KOREAN};
    use serde_json::json;

    #[test]
    fn korean_options_use_only_korean_copy() {
        let options = WidgetOptions::for_language(Language::Ko);
        assert_eq!(options.header.title.text, KOREAN.header_title);
        assert_eq!(options.start_screen.greeting, KOREAN.greeting);
        assert_eq!(options.composer.placeholder, KOREAN.placeholder);
        assert_eq!(options.start_screen.prompts, KOREAN.prompts.to_vec());
    }

    #[test]
    fn default_options_are_english() {
        let options = WidgetOptions::default();
        assert_eq!(options.start_screen.greeting, ENGLISH.greeting);
        assert_eq!(options.composer.placeholder, ENGLISH.placeholder);
        assert_eq!(options.start_screen.prompts, ENGLISH.prompts.to_vec());
    }

    #[test]
    fn serializes_to_widget_shape() {
        let value = serde_json::to_value(WidgetOptions::default()).unwrap();

        assert_eq!(value["locale"], "en");
        assert_eq!(value["history"], json!({ "enabled": false }));
        assert_eq!(
            value["theme"],
            json!({ "colorScheme": "light", "radius": "round" })
        );
        assert_eq!(value["header"]["title"]["text"], "Woori Mohae Concierge");
        assert_eq!(value["startScreen"]["prompts"][0]["icon"], "calendar");
        assert_eq!(
            value["startScreen"]["prompts"][1]["label"],
            "Rain-ready routines"
        );
        assert!(value["composer"]["placeholder"].is_string());
        assert!(value.get("api").is_none());
    }
}
