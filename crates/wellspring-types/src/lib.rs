//! Shared domain types for Wellspring.
//!
//! This crate contains the core domain types used across the Wellspring
//! coaching gateway: profiles, chat transcripts, access tokens, agent call
//! records, configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod agent;
pub mod auth;
pub mod chat;
pub mod config;
pub mod error;
pub mod profile;
