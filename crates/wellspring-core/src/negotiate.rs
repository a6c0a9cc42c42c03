//! Candidate-payload negotiation against the agent endpoint.
//!
//! The negotiator tries each candidate shape once, in order, and stops at
//! the first reply with a success status and a JSON body. Transport errors
//! and rejections move on to the next candidate; they do not abort the
//! operation. This single-pass fallback is the system's only resilience
//! mechanism -- there is no backoff and no second pass.

use serde_json::Value;
use thiserror::Error;

use wellspring_types::agent::AttemptFailure;
use wellspring_types::error::AgentError;

use crate::payload::PayloadShape;

/// Maximum failure-reason body excerpt carried in an attempt record.
const REASON_BODY_LIMIT: usize = 300;

/// A raw reply from the agent endpoint: HTTP status plus body text.
#[derive(Debug, Clone)]
pub struct TransportReply {
    pub status: u16,
    pub body: String,
}

impl TransportReply {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport-level failure (timeout, connection refused, DNS).
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Trait for POSTing a candidate body to the agent endpoint.
///
/// The concrete implementation lives in wellspring-infra
/// (`HttpAgentTransport`); tests substitute scripted fakes.
pub trait AgentTransport: Send + Sync {
    /// POST `body` with the given bearer token; return status and body text.
    fn post(
        &self,
        bearer: &str,
        body: &Value,
    ) -> impl std::future::Future<Output = Result<TransportReply, TransportError>> + Send;
}

/// Outcome of a successful negotiation.
#[derive(Debug)]
pub struct Negotiated {
    /// Parsed JSON body of the accepted reply.
    pub body: Value,
    /// Name of the candidate shape that was accepted.
    pub shape: &'static str,
    /// Candidates that failed before the accepted one.
    pub failures: Vec<AttemptFailure>,
}

/// Tries candidate payload shapes in a fixed order until one is accepted.
///
/// Stateless across invocations; each call is a fresh single pass over the
/// shape list.
pub struct Negotiator {
    shapes: Vec<PayloadShape>,
}

impl Negotiator {
    /// Create a negotiator over an ordered shape list.
    pub fn new(shapes: Vec<PayloadShape>) -> Self {
        Negotiator { shapes }
    }

    /// The shape names in negotiation order.
    pub fn shape_names(&self) -> Vec<&'static str> {
        self.shapes.iter().map(|s| s.name).collect()
    }

    /// Send one user message through the candidate shapes.
    ///
    /// Returns the first accepted reply's parsed body, or
    /// [`AgentError::Unavailable`] carrying every per-candidate failure when
    /// no shape is accepted.
    pub async fn send<A: AgentTransport>(
        &self,
        transport: &A,
        bearer: &str,
        user_text: &str,
        variables: &Value,
    ) -> Result<Negotiated, AgentError> {
        let mut failures = Vec::new();

        for shape in &self.shapes {
            let body = shape.build(user_text, variables);

            let reason = match transport.post(bearer, &body).await {
                Err(err) => err.to_string(),
                Ok(reply) if !reply.is_success() => {
                    format!("HTTP {}: {}", reply.status, excerpt(&reply.body))
                }
                Ok(reply) => match serde_json::from_str::<Value>(&reply.body) {
                    Ok(parsed) => {
                        tracing::debug!(
                            shape = shape.name,
                            rejected = failures.len(),
                            "agent accepted candidate payload"
                        );
                        return Ok(Negotiated {
                            body: parsed,
                            shape: shape.name,
                            failures,
                        });
                    }
                    Err(err) => format!("HTTP {} but body is not JSON: {err}", reply.status),
                },
            };

            tracing::debug!(shape = shape.name, %reason, "candidate payload rejected");
            failures.push(AttemptFailure {
                shape: shape.name.to_string(),
                reason,
            });
        }

        tracing::warn!(
            attempts = failures.len(),
            "agent rejected every candidate payload"
        );
        Err(AgentError::Unavailable { attempts: failures })
    }
}

/// Truncate a body for a failure reason, marking the cut.
fn excerpt(body: &str) -> String {
    if body.len() <= REASON_BODY_LIMIT {
        return body.to_string();
    }
    let mut end = REASON_BODY_LIMIT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &body[..end])
}
