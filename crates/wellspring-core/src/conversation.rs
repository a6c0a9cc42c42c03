//! Conversation orchestration: one chat turn end to end.
//!
//! `ConversationService` glues the pipeline stages to a session transcript:
//! append the user message, resolve a bearer token, negotiate the agent
//! call, extract the reply text, append the assistant message. Pipeline
//! failures become a visible placeholder message instead of propagating --
//! the chat view never loses its transcript to a backend error.

use thiserror::Error;

use wellspring_types::chat::ChatSession;
use wellspring_types::config::PipelineConfig;
use wellspring_types::error::{AgentError, ChatError, TokenError};

use crate::extract::{ExtractRule, extract_text, select_rules};
use crate::negotiate::{AgentTransport, Negotiated, Negotiator};
use crate::payload::{build_variables, select_shapes};
use crate::token::{CachedTokenSource, TokenExchange};

/// Internal failure of the token or agent stage within one turn.
///
/// Caught at the orchestrator boundary and rendered into the transcript.
#[derive(Debug, Error)]
enum PipelineFailure {
    #[error("authentication failed: {0}")]
    Token(#[from] TokenError),

    #[error("{0}")]
    Agent(#[from] AgentError),
}

/// What happened during one [`ConversationService::handle_message`] call.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// The assistant text appended to the transcript (reply or placeholder).
    pub reply: String,
    /// The accepted payload shape, when the agent call succeeded.
    pub shape: Option<&'static str>,
    /// The extraction rule that matched; `None` with `errored == false`
    /// means the stringification fallback was used (degraded outcome).
    pub rule: Option<&'static str>,
    /// Candidate payloads that failed before the turn resolved.
    pub failed_attempts: usize,
    /// Whether the assistant message is an error placeholder.
    pub errored: bool,
}

impl TurnOutcome {
    /// Whether the reply is the stringified-payload fallback.
    pub fn is_degraded(&self) -> bool {
        !self.errored && self.rule.is_none()
    }
}

/// Orchestrates chat turns over the token and transport ports.
///
/// Generic over [`TokenExchange`] and [`AgentTransport`] so the pipeline is
/// testable without the network (wellspring-core never depends on
/// wellspring-infra).
pub struct ConversationService<T: TokenExchange, A: AgentTransport> {
    tokens: CachedTokenSource<T>,
    transport: A,
    negotiator: Negotiator,
    rules: Vec<ExtractRule>,
    send_profile: bool,
}

impl<T: TokenExchange, A: AgentTransport> ConversationService<T, A> {
    /// Wire a conversation service from its ports and pipeline config.
    pub fn new(exchange: T, transport: A, config: &PipelineConfig, send_profile: bool) -> Self {
        ConversationService {
            tokens: CachedTokenSource::new(exchange, config.token_refresh_margin_secs),
            transport,
            negotiator: Negotiator::new(select_shapes(&config.payload_shapes)),
            rules: select_rules(&config.extract_rules),
            send_profile,
        }
    }

    /// Whether profile variables are transmitted with each turn.
    pub fn sends_profile(&self) -> bool {
        self.send_profile
    }

    /// Resolve one chat turn against the session.
    ///
    /// Empty or whitespace-only input is rejected before any network call
    /// and leaves the transcript untouched. Otherwise the transcript grows
    /// by exactly two messages: the user message, then either the agent's
    /// reply or an error placeholder. Prior entries are never reordered.
    pub async fn handle_message(
        &self,
        session: &mut ChatSession,
        user_text: &str,
    ) -> Result<TurnOutcome, ChatError> {
        let text = user_text.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        session.transcript.push_user(text);
        let variables = build_variables(session.profile.as_ref(), self.send_profile);

        let outcome = match self.call_agent(text, &variables).await {
            Ok(negotiated) => {
                let extracted = extract_text(&negotiated.body, &self.rules);
                tracing::info!(
                    session = %session.id,
                    shape = negotiated.shape,
                    rule = ?extracted.rule,
                    rejected = negotiated.failures.len(),
                    "turn resolved"
                );
                TurnOutcome {
                    reply: extracted.text,
                    shape: Some(negotiated.shape),
                    rule: extracted.rule,
                    failed_attempts: negotiated.failures.len(),
                    errored: false,
                }
            }
            Err(failure) => {
                let failed_attempts = match &failure {
                    PipelineFailure::Agent(AgentError::Unavailable { attempts }) => attempts.len(),
                    PipelineFailure::Token(_) => 0,
                };
                tracing::warn!(session = %session.id, error = %failure, "turn failed");
                TurnOutcome {
                    reply: format!("Sorry, the coach could not respond.\n\n{failure}"),
                    shape: None,
                    rule: None,
                    failed_attempts,
                    errored: true,
                }
            }
        };

        session.transcript.push_assistant(outcome.reply.clone());
        Ok(outcome)
    }

    async fn call_agent(
        &self,
        text: &str,
        variables: &serde_json::Value,
    ) -> Result<Negotiated, PipelineFailure> {
        let bearer = self.tokens.bearer().await?;
        let negotiated = self
            .negotiator
            .send(&self.transport, &bearer, text, variables)
            .await?;
        Ok(negotiated)
    }
}
