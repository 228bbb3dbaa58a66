//! Request envelope types produced by the harness.
//!
//! Every step of a conversation dispatches one [`RequestEnvelope`] to the
//! skill under test. The body is a tagged variant per interaction kind, so
//! "which fields exist for which request" is a type-level distinction rather
//! than a runtime convention. Serialized JSON matches the voice-assistant
//! wire shape (`camelCase` keys, `type` tag on the request block).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Protocol version stamped on every request envelope.
pub const PROTOCOL_VERSION: &str = "1.0";

/// A complete request envelope: protocol version, session block, request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    pub version: String,
    pub session: SessionData,
    pub request: RequestBody,
}

/// The session block of a request envelope.
///
/// `attributes` is the opaque carry-forward state threaded between steps.
/// The builder always emits an empty map here; the sequence runner replaces
/// it wholesale with the previous response's session attributes before
/// dispatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    pub session_id: String,
    pub application_id: String,
    pub attributes: Map<String, Value>,
    pub user: UserData,
    pub new: bool,
}

/// The user block of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub user_id: String,
}

/// Fields common to every request kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestFields {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
    pub locale: String,
}

/// The request block, tagged by interaction kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RequestBody {
    /// The user opened the skill without naming an intent.
    LaunchRequest {
        #[serde(flatten)]
        fields: RequestFields,
    },

    /// The user invoked a named intent, possibly with slot values.
    IntentRequest {
        #[serde(flatten)]
        fields: RequestFields,
        intent: Intent,
    },

    /// The session ended, with the reason and an optional error block.
    SessionEndedRequest {
        #[serde(flatten)]
        fields: RequestFields,
        reason: SessionEndedReason,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<SessionError>,
    },
}

impl RequestBody {
    /// Returns the request type tag as it appears on the wire.
    pub fn request_type(&self) -> &'static str {
        match self {
            RequestBody::LaunchRequest { .. } => "LaunchRequest",
            RequestBody::IntentRequest { .. } => "IntentRequest",
            RequestBody::SessionEndedRequest { .. } => "SessionEndedRequest",
        }
    }

    /// Returns the human-readable label used in failure messages: the
    /// request type, or the intent's name for intent invocations.
    pub fn kind(&self) -> &str {
        match self {
            RequestBody::IntentRequest { intent, .. } => &intent.name,
            other => other.request_type(),
        }
    }

    /// Returns the fields common to every request kind.
    pub fn fields(&self) -> &RequestFields {
        match self {
            RequestBody::LaunchRequest { fields }
            | RequestBody::IntentRequest { fields, .. }
            | RequestBody::SessionEndedRequest { fields, .. } => fields,
        }
    }

    /// Returns the locale this request was built with.
    pub fn locale(&self) -> &str {
        &self.fields().locale
    }
}

/// An intent invocation: name plus slot values keyed by slot name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    pub name: String,
    pub slots: BTreeMap<String, Slot>,
}

/// A single filled slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub name: String,
    pub value: String,
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionEndedReason {
    /// The user explicitly ended the session.
    UserInitiated,
    /// The skill raised an error; details travel in the `error` block.
    Error,
    /// The user did not respond within the reprompt limit.
    ExceededMaxReprompts,
}

/// Error details attached to an error-reason session end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionError {
    #[serde(rename = "type")]
    pub error_type: String,
    pub message: String,
}
