//! Widget configuration for the page
//!
//! Lets the page shell fetch everything locale-specific in one call instead
//! of carrying its own copy tables.

use axum::{extract::Query, routing::get, Json, Router};
use mohae_widget::token::SESSION_ENDPOINT_PATH;
use mohae_widget::{Language, WidgetOptions, WIDGET_ELEMENT, WIDGET_SCRIPT_URL};
use serde::{Deserialize, Serialize};

pub fn options_routes() -> Router {
    Router::new().route("/api/chatkit/options", get(widget_options))
}

#[derive(Debug, Deserialize)]
struct OptionsQuery {
    lang: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WidgetBootstrap {
    script_url: &'static str,
    element: &'static str,
    session_endpoint: &'static str,
    section: SectionCopy,
    options: WidgetOptions,
}

#[derive(Debug, Serialize)]
struct SectionCopy {
    title: &'static str,
    description: &'static str,
}

async fn widget_options(Query(query): Query<OptionsQuery>) -> Json<WidgetBootstrap> {
    let language = Language::from_tag(query.lang.as_deref());
    let copy = language.copy();

    Json(WidgetBootstrap {
        script_url: WIDGET_SCRIPT_URL,
        element: WIDGET_ELEMENT,
        session_endpoint: SESSION_ENDPOINT_PATH,
        section: SectionCopy {
            title: copy.section_title,
            description: copy.section_description,
        },
        options: WidgetOptions::for_language(language),
    })
}
