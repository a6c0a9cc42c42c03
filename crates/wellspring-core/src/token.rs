//! Cached bearer token acquisition.
//!
//! [`TokenExchange`] is the port the infrastructure layer implements (the
//! IAM HTTP client). [`CachedTokenSource`] wraps any exchanger with lazy
//! caching: the token is refreshed only when a caller asks for it and the
//! cached one is within the safety margin of expiry. There is no refresh
//! timer and no retry -- an exchange failure is the turn's failure.

use chrono::Duration;
use tokio::sync::Mutex;

use wellspring_types::auth::AccessToken;
use wellspring_types::error::TokenError;

/// Trait for exchanging a long-lived credential for a short-lived bearer token.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition). The concrete
/// implementation lives in wellspring-infra (`IamClient`).
pub trait TokenExchange: Send + Sync {
    /// Perform one credential exchange against the identity endpoint.
    fn exchange(
        &self,
    ) -> impl std::future::Future<Output = Result<AccessToken, TokenError>> + Send;
}

/// Lazily refreshing token cache over a [`TokenExchange`].
///
/// The cache is process-wide (the API key is a process secret), guarded by
/// an async mutex so concurrent turns never race two exchanges for the same
/// expiring token.
pub struct CachedTokenSource<T: TokenExchange> {
    inner: T,
    margin: Duration,
    cache: Mutex<Option<AccessToken>>,
}

impl<T: TokenExchange> CachedTokenSource<T> {
    /// Create a token source refreshing within `margin_secs` of expiry.
    pub fn new(inner: T, margin_secs: u64) -> Self {
        CachedTokenSource {
            inner,
            margin: Duration::seconds(margin_secs as i64),
            cache: Mutex::new(None),
        }
    }

    /// Return a bearer token string, reusing the cached token when it is not
    /// close to expiry. Performs at most one exchange per call.
    pub async fn bearer(&self) -> Result<String, TokenError> {
        let mut cache = self.cache.lock().await;

        if let Some(token) = cache.as_ref() {
            if !token.needs_refresh(self.margin) {
                return Ok(token.token.clone());
            }
            tracing::debug!("cached token within refresh margin, exchanging");
        }

        let fresh = self.inner.exchange().await?;
        let bearer = fresh.token.clone();
        *cache = Some(fresh);
        Ok(bearer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Exchanger that counts calls and hands out tokens with a fixed lifetime.
    struct CountingExchange {
        calls: AtomicUsize,
        lifetime_secs: i64,
    }

    impl CountingExchange {
        fn new(lifetime_secs: i64) -> Self {
            CountingExchange {
                calls: AtomicUsize::new(0),
                lifetime_secs,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl TokenExchange for CountingExchange {
        async fn exchange(&self) -> Result<AccessToken, TokenError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(AccessToken {
                token: format!("token-{n}"),
                expires_at: Utc::now() + Duration::seconds(self.lifetime_secs),
            })
        }
    }

    struct FailingExchange;

    impl TokenExchange for FailingExchange {
        async fn exchange(&self) -> Result<AccessToken, TokenError> {
            Err(TokenError::Http {
                status: 401,
                body: "invalid apikey".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_token_reused_within_margin() {
        let source = CachedTokenSource::new(CountingExchange::new(3600), 60);
        let first = source.bearer().await.unwrap();
        let second = source.bearer().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(source.inner.calls(), 1);
    }

    #[tokio::test]
    async fn test_token_refreshed_when_near_expiry() {
        // Lifetime shorter than the margin: every call must exchange.
        let source = CachedTokenSource::new(CountingExchange::new(30), 60);
        let first = source.bearer().await.unwrap();
        let second = source.bearer().await.unwrap();
        assert_ne!(first, second);
        assert_eq!(source.inner.calls(), 2);
    }

    #[tokio::test]
    async fn test_exchange_failure_propagates() {
        let source = CachedTokenSource::new(FailingExchange, 60);
        let err = source.bearer().await.unwrap_err();
        assert!(matches!(err, TokenError::Http { status: 401, .. }));
    }
}
