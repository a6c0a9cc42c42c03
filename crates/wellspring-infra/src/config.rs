//! Configuration loading for Wellspring.
//!
//! Two sources: required settings come from environment variables (a `.env`
//! file next to the binary is honored), tunable pipeline data from an
//! optional `wellspring.toml`. Missing or malformed toml falls back to
//! defaults with a warning; missing required env is a startup error.

use std::path::Path;

use secrecy::SecretString;

use wellspring_types::config::{DEFAULT_TOKEN_URL, PipelineConfig, Settings};
use wellspring_types::error::ConfigError;

/// Environment variable holding the long-lived API key.
pub const ENV_API_KEY: &str = "WELLSPRING_API_KEY";
/// Environment variable holding the agent deployment URL.
pub const ENV_AGENT_URL: &str = "WELLSPRING_AGENT_URL";
/// Environment variable overriding the identity endpoint.
pub const ENV_TOKEN_URL: &str = "WELLSPRING_TOKEN_URL";
/// Environment variable toggling profile transmission (default on).
pub const ENV_SEND_PROFILE: &str = "WELLSPRING_SEND_PROFILE";

/// Load settings and the API key from the process environment.
///
/// Reads `.env` first (ignored when absent), then requires
/// `WELLSPRING_API_KEY` and `WELLSPRING_AGENT_URL`. The key is returned
/// separately as a [`SecretString`] so it never travels with the plain
/// settings.
pub fn load_settings() -> Result<(Settings, SecretString), ConfigError> {
    dotenvy::dotenv().ok();
    build_settings(|name| std::env::var(name).ok())
}

/// Build settings from an environment lookup.
///
/// Separated from [`load_settings`] so tests can inject a lookup instead of
/// mutating the process environment.
fn build_settings<F>(get: F) -> Result<(Settings, SecretString), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let api_key = required(&get, ENV_API_KEY)?;
    let agent_url = required(&get, ENV_AGENT_URL)?;
    if !agent_url.starts_with("http://") && !agent_url.starts_with("https://") {
        return Err(ConfigError::Invalid {
            name: ENV_AGENT_URL,
            reason: format!("not an http(s) URL: '{agent_url}'"),
        });
    }

    let token_url = get(ENV_TOKEN_URL)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string());

    let send_profile = match get(ENV_SEND_PROFILE).as_deref().map(str::trim) {
        None | Some("") => true,
        Some(raw) => match raw.to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            other => {
                return Err(ConfigError::Invalid {
                    name: ENV_SEND_PROFILE,
                    reason: format!("expected a boolean, got '{other}'"),
                });
            }
        },
    };

    let settings = Settings {
        agent_url,
        token_url,
        send_profile,
    };
    Ok((settings, SecretString::from(api_key)))
}

fn required<F>(get: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    get(name)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or(ConfigError::Missing(name))
}

/// Load pipeline configuration from `{dir}/wellspring.toml`.
///
/// - If the file does not exist, returns [`PipelineConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and
///   returns the default.
pub async fn load_pipeline_config(dir: &Path) -> PipelineConfig {
    let config_path = dir.join("wellspring.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(
                "No wellspring.toml found at {}, using defaults",
                config_path.display()
            );
            return PipelineConfig::default();
        }
        Err(err) => {
            tracing::warn!(
                "Failed to read {}: {err}, using defaults",
                config_path.display()
            );
            return PipelineConfig::default();
        }
    };

    match toml::from_str::<PipelineConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            PipelineConfig::default()
        }
    }
}
