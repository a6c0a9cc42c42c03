//! Bearer token types for the agent's identity service.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A short-lived bearer token obtained from the identity endpoint.
///
/// Owned by the token source; shared read-only with the agent caller.
/// Never used past expiry: [`AccessToken::needs_refresh`] is checked before
/// every use, with a safety margin so a token does not expire mid-request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// Whether the token is expired or within `margin` of expiring.
    pub fn needs_refresh(&self, margin: Duration) -> bool {
        Utc::now() + margin >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_token_does_not_need_refresh() {
        let token = AccessToken {
            token: "tok".to_string(),
            expires_at: Utc::now() + Duration::seconds(3600),
        };
        assert!(!token.needs_refresh(Duration::seconds(60)));
    }

    #[test]
    fn test_token_within_margin_needs_refresh() {
        let token = AccessToken {
            token: "tok".to_string(),
            expires_at: Utc::now() + Duration::seconds(30),
        };
        assert!(token.needs_refresh(Duration::seconds(60)));
    }

    #[test]
    fn test_expired_token_needs_refresh() {
        let token = AccessToken {
            token: "tok".to_string(),
            expires_at: Utc::now() - Duration::seconds(10),
        };
        assert!(token.needs_refresh(Duration::zero()));
    }
}
