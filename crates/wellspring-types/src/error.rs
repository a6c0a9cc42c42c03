use thiserror::Error;

use crate::agent::AttemptFailure;

/// Errors from configuration loading. Fatal at startup, surfaced once.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required setting: {0}")]
    Missing(&'static str),

    #[error("invalid setting {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Errors from the bearer token exchange. Fatal for the current turn;
/// recoverable on the next turn since the cache may refresh.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token endpoint returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("token response malformed: {0}")]
    Malformed(String),

    #[error("token request failed: {0}")]
    Transport(String),
}

/// Errors from the agent call. Fatal for the current turn.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("agent unavailable: all {} candidate payloads failed", attempts.len())]
    Unavailable { attempts: Vec<AttemptFailure> },
}

/// Local chat validation errors, rejected before any network call.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("message is empty")]
    EmptyMessage,
}
