//! IamClient -- concrete [`TokenExchange`] implementation for the IAM
//! identity endpoint.
//!
//! Exchanges the long-lived API key for a short-lived bearer token via a
//! form-encoded POST. The API key is wrapped in [`secrecy::SecretString`]
//! and is never logged or included in `Debug` output.

use std::time::Duration;

use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use wellspring_core::token::TokenExchange;
use wellspring_types::auth::AccessToken;
use wellspring_types::error::TokenError;

/// Lifetime assumed when the identity endpoint omits an expiry field.
/// Conservative so a token is never used past its real expiry.
const FALLBACK_LIFETIME_SECS: i64 = 300;

/// IAM token exchange client.
///
/// # API Key Security
///
/// The API key is stored as a [`SecretString`] and is only exposed when
/// constructing the form body. It never appears in Debug output, Display
/// output, or tracing logs.
pub struct IamClient {
    client: reqwest::Client,
    api_key: SecretString,
    token_url: String,
}

impl IamClient {
    /// The OAuth grant type for API-key exchange.
    const GRANT_TYPE: &'static str = "urn:ibm:params:oauth:grant-type:apikey";

    /// Create a new IAM client against the given identity endpoint.
    pub fn new(api_key: SecretString, token_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to create reqwest client");

        IamClient {
            client,
            api_key,
            token_url,
        }
    }

    /// The identity endpoint this client exchanges against.
    pub fn token_url(&self) -> &str {
        &self.token_url
    }
}

// IamClient intentionally does NOT derive Debug so the API key can never
// leak through formatting, even though SecretString already redacts it.

impl TokenExchange for IamClient {
    async fn exchange(&self) -> Result<AccessToken, TokenError> {
        let response = self
            .client
            .post(&self.token_url)
            .header("accept", "application/json")
            .form(&[
                ("grant_type", Self::GRANT_TYPE),
                ("apikey", self.api_key.expose_secret()),
            ])
            .send()
            .await
            .map_err(|e| TokenError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TokenError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(TokenError::Http {
                status: status.as_u16(),
                body,
            });
        }

        parse_token_response(&body)
    }
}

/// Wire format of the identity endpoint reply.
///
/// Field names vary across identity services: IAM sends
/// `access_token`/`expires_in`, other deployments send
/// `token`/`expiry_seconds`. Both spellings are accepted.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default, alias = "token")]
    access_token: Option<String>,
    #[serde(default, alias = "expiry_seconds")]
    expires_in: Option<i64>,
}

/// Parse an identity endpoint reply body into an [`AccessToken`].
fn parse_token_response(body: &str) -> Result<AccessToken, TokenError> {
    let parsed: TokenResponse =
        serde_json::from_str(body).map_err(|e| TokenError::Malformed(e.to_string()))?;

    let token = parsed
        .access_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| TokenError::Malformed("no access token field in response".to_string()))?;

    let lifetime = match parsed.expires_in.filter(|s| *s > 0) {
        Some(secs) => secs,
        None => {
            tracing::debug!(
                "identity response missing expiry, assuming {FALLBACK_LIFETIME_SECS}s"
            );
            FALLBACK_LIFETIME_SECS
        }
    };

    Ok(AccessToken {
        token,
        expires_at: Utc::now() + chrono::Duration::seconds(lifetime),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iam_spelling() {
        let token =
            parse_token_response(r#"{"access_token": "abc123", "expires_in": 3600}"#).unwrap();
        assert_eq!(token.token, "abc123");
        assert!(!token.needs_refresh(chrono::Duration::seconds(60)));
    }

    #[test]
    fn test_parse_alternate_spelling() {
        let token =
            parse_token_response(r#"{"token": "xyz", "expiry_seconds": 1800}"#).unwrap();
        assert_eq!(token.token, "xyz");
    }

    #[test]
    fn test_parse_missing_expiry_uses_fallback() {
        let token = parse_token_response(r#"{"access_token": "abc"}"#).unwrap();
        let lifetime = token.expires_at - Utc::now();
        assert!(lifetime <= chrono::Duration::seconds(FALLBACK_LIFETIME_SECS));
        assert!(lifetime > chrono::Duration::seconds(FALLBACK_LIFETIME_SECS - 5));
    }

    #[test]
    fn test_parse_missing_token_is_malformed() {
        let err = parse_token_response(r#"{"expires_in": 3600}"#).unwrap_err();
        assert!(matches!(err, TokenError::Malformed(_)));

        let err = parse_token_response(r#"{"access_token": ""}"#).unwrap_err();
        assert!(matches!(err, TokenError::Malformed(_)));
    }

    #[test]
    fn test_parse_non_json_is_malformed() {
        let err = parse_token_response("<html>oops</html>").unwrap_err();
        assert!(matches!(err, TokenError::Malformed(_)));
    }

    #[test]
    fn test_client_stores_token_url() {
        let client = IamClient::new(
            SecretString::from("test-key-not-real"),
            "http://localhost:8080/identity/token".to_string(),
        );
        assert_eq!(client.token_url(), "http://localhost:8080/identity/token");
    }
}
