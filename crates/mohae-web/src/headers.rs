//! Security headers applied to every response
//!
//! The policy admits the ChatKit CDN script and the origins the widget talks
//! to once loaded; everything else is same-origin only.

use axum::http::{header, HeaderValue};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;

pub const CONTENT_SECURITY_POLICY: &str = concat!(
    "default-src 'self'; ",
    "script-src 'self' 'unsafe-inline' https://cdn.platform.openai.com; ",
    "connect-src 'self' https://chatgpt.com https://sentinel.openai.com https://*.oaiusercontent.com ",
    "https://api.openai.com https://browser-intake-datadoghq.com https://api-js.mixpanel.com ",
    "https://chatkit-link-backend.onrender.com https://cdn.platform.openai.com; ",
    "style-src 'self' 'unsafe-inline'; ",
    "img-src 'self' data: blob:; ",
    "font-src 'self' data:; ",
    "frame-src 'self' https://cdn.platform.openai.com; ",
    "frame-ancestors 'self'; ",
    "base-uri 'self'; ",
    "form-action 'self'"
);

pub const REFERRER_POLICY: &str = "strict-origin-when-cross-origin";

pub const PERMISSIONS_POLICY: &str = "camera=(), microphone=(), geolocation=()";

/// Add the security headers unless a handler already set them
pub fn with_security_headers<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(CONTENT_SECURITY_POLICY),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static(REFERRER_POLICY),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::HeaderName::from_static("permissions-policy"),
            HeaderValue::from_static(PERMISSIONS_POLICY),
        ))
}
