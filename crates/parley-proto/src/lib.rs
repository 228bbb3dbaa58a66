//! # parley-proto
//!
//! Shared types and error definitions for the Parley conversation-replay
//! test harness.
//!
//! This crate provides the foundational abstractions used across all Parley
//! crates, including:
//! - Request envelope types produced by the harness
//! - Response envelope types consumed from the skill under test
//! - The structured failure descriptor raised on violated expectations
//! - Common error types for harness configuration

mod error;
mod failure;
mod request;
mod response;

pub use error::{Error, Result};
pub use failure::Failure;
pub use request::{
    Intent, PROTOCOL_VERSION, RequestBody, RequestEnvelope, RequestFields, SessionData,
    SessionEndedReason, SessionError, Slot, UserData,
};
pub use response::{OutputSpeech, Reprompt, ResponseBody, ResponseEnvelope};
