//! Resolution of secrets and overrides from the environment
//!
//! # Resolution Priority
//!
//! [`resolve_env`] checks sources in this order:
//! 1. Environment variable (e.g., `OPENAI_API_KEY`)
//! 2. Config file value
//!
//! Lookups go through an [`EnvLookup`] so callers can resolve against
//! something other than the process environment.

use tracing::debug;

/// Environment variable lookup
pub type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// Lookup backed by the process environment
pub(crate) fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Source of a resolved value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// From an environment variable
    EnvVar,
    /// From the config file
    Config,
}

impl std::fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialSource::EnvVar => write!(f, "env"),
            CredentialSource::Config => write!(f, "config"),
        }
    }
}

/// Resolve a value, preferring the environment variable over the config
/// file. Empty values are skipped at both levels.
pub fn resolve_env(
    env_var: &str,
    lookup: EnvLookup<'_>,
    config_value: Option<&str>,
) -> Option<(String, CredentialSource)> {
    if let Some(value) = lookup(env_var) {
        if !value.is_empty() {
            debug!("Resolved {} from environment", env_var);
            return Some((value, CredentialSource::EnvVar));
        }
    }

    if let Some(value) = config_value {
        if !value.is_empty() {
            debug!("Resolved {} from config", env_var);
            return Some((value.to_string(), CredentialSource::Config));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_with(name: &'static str, value: &'static str) -> impl Fn(&str) -> Option<String> {
        move |key: &str| (key == name).then(|| value.to_string())
    }

    #[test]
    fn env_var_takes_priority_over_config() {
        let lookup = lookup_with("OPENAI_API_KEY", "sk-env");
        let resolved = resolve_env("OPENAI_API_KEY", &lookup, Some("sk-config"));
        assert_eq!(
            resolved,
            Some(("sk-env".to_string(), CredentialSource::EnvVar))
        );
    }

    #[test]
    fn falls_back_to_config_value() {
        let lookup = |_: &str| None;
        let resolved = resolve_env("OPENAI_API_KEY", &lookup, Some("sk-config"));
        assert_eq!(
            resolved,
            Some(("sk-config".to_string(), CredentialSource::Config))
        );
    }

    #[test]
    fn empty_env_value_is_skipped() {
        let lookup = lookup_with("OPENAI_API_KEY", "");
        let resolved = resolve_env("OPENAI_API_KEY", &lookup, None);
        assert_eq!(resolved, None);
    }
}
