//! Configuration types for Wellspring.
//!
//! Two layers: [`Settings`] holds the environment-derived endpoints and
//! toggles (the secrets themselves stay in the infra layer), and
//! [`PipelineConfig`] holds the tunable pipeline data loaded from
//! `wellspring.toml` -- timeouts, payload-shape order, extraction-rule order.

use serde::{Deserialize, Serialize};

/// Default identity endpoint for exchanging the API key for a bearer token.
pub const DEFAULT_TOKEN_URL: &str = "https://iam.cloud.ibm.com/identity/token";

/// Environment-derived settings (see `wellspring-infra`'s loader).
#[derive(Debug, Clone)]
pub struct Settings {
    /// Agent deployment URL the chat turns are POSTed to.
    pub agent_url: String,
    /// Identity endpoint for the token exchange.
    pub token_url: String,
    /// Whether to transmit the saved profile as `variables.profile`.
    pub send_profile: bool,
}

/// Tunable pipeline configuration from `wellspring.toml`.
///
/// The payload-shape and extraction-rule lists are deployment tuning, not
/// load-bearing design: an empty list means "use the built-in order".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Per-request timeout for the agent call, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Refresh the bearer token when it is within this many seconds of expiry.
    #[serde(default = "default_token_refresh_margin_secs")]
    pub token_refresh_margin_secs: u64,
    /// Candidate payload shapes to try, in order, by name. Empty = built-in order.
    #[serde(default)]
    pub payload_shapes: Vec<String>,
    /// Extraction rules to probe, in order, by name. Empty = built-in order.
    #[serde(default)]
    pub extract_rules: Vec<String>,
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_token_refresh_margin_secs() -> u64 {
    60
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            request_timeout_secs: default_request_timeout_secs(),
            token_refresh_margin_secs: default_token_refresh_margin_secs(),
            payload_shapes: Vec::new(),
            extract_rules: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_config_defaults() {
        let config: PipelineConfig = toml::from_str("").unwrap();
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.token_refresh_margin_secs, 60);
        assert!(config.payload_shapes.is_empty());
        assert!(config.extract_rules.is_empty());
    }

    #[test]
    fn test_pipeline_config_overrides() {
        let config: PipelineConfig = toml::from_str(
            r#"
request_timeout_secs = 15
payload_shapes = ["input_text", "messages_string"]
"#,
        )
        .unwrap();
        assert_eq!(config.request_timeout_secs, 15);
        assert_eq!(config.token_refresh_margin_secs, 60);
        assert_eq!(config.payload_shapes, vec!["input_text", "messages_string"]);
    }

    #[test]
    fn test_default_token_url() {
        assert!(DEFAULT_TOKEN_URL.starts_with("https://"));
    }
}
