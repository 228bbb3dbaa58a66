//! Response envelope types consumed from the skill under test.
//!
//! Speech and reprompt are `Option` fields: an absent output is a distinct
//! observable state from an empty string, and the harness asserts on the
//! difference.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A complete response envelope returned by one skill invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub response: ResponseBody,
    /// Carry-forward state for the next request's session block.
    #[serde(default)]
    pub session_attributes: Map<String, Value>,
}

/// The observable facets of a response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    pub should_end_session: bool,
}

/// Rendered speech in SSML markup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputSpeech {
    pub ssml: String,
}

/// A reprompt wraps its own speech output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}
