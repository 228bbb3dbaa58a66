//! The handler seam.

use async_trait::async_trait;
use parley_proto::{RequestEnvelope, ResponseEnvelope};

/// A voice-skill handler under test.
///
/// One call per conversation step; each call is single-shot and isolated,
/// with session state carried only through the explicit envelope fields.
/// A returned error is forwarded verbatim to the test as the terminal
/// failure of the conversation, never reinterpreted as an expectation
/// violation.
#[async_trait]
pub trait Skill: Send + Sync {
    /// Handles one request, producing the response envelope.
    async fn handle(&self, request: RequestEnvelope) -> anyhow::Result<ResponseEnvelope>;
}
