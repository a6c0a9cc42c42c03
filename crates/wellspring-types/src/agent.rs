//! Agent call records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One failed attempt against the agent endpoint.
///
/// Records which candidate payload shape was tried and why it was rejected
/// (HTTP status, transport failure, or unparsable body). The full list is
/// carried by `AgentError::Unavailable` so the operator can see every shape
/// the deployment refused.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptFailure {
    /// Name of the candidate payload shape.
    pub shape: String,
    /// Human-readable failure reason.
    pub reason: String,
}

impl fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.shape, self.reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attempt_failure_display() {
        let failure = AttemptFailure {
            shape: "messages_string".to_string(),
            reason: "HTTP 422".to_string(),
        };
        assert_eq!(failure.to_string(), "messages_string: HTTP 422");
    }
}
