//! Agent-call pipeline for Wellspring.
//!
//! This crate defines the "ports" (the [`token::TokenExchange`] and
//! [`negotiate::AgentTransport`] traits) that the infrastructure layer
//! implements, plus the pipeline stages themselves: cached token acquisition,
//! candidate-payload negotiation, response-text extraction, and the
//! conversation orchestrator that glues them to a chat transcript.
//!
//! Depends only on `wellspring-types` -- never on reqwest or any IO crate.

pub mod conversation;
pub mod extract;
pub mod negotiate;
pub mod payload;
pub mod quickstart;
pub mod token;
