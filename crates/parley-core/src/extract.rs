//! Extraction of observable facets from a raw response.

use parley_proto::ResponseEnvelope;

/// The observable facets of one response: primary speech, reprompt, and
/// the session-continuation flag.
///
/// Absence of speech or reprompt maps to `None`, which the evaluator keeps
/// distinct from an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseFacets {
    /// Primary speech SSML, when the response speaks.
    pub speech: Option<String>,
    /// Reprompt speech SSML, when the response reprompts.
    pub reprompt: Option<String>,
    /// Whether the response terminates the session.
    pub ends_session: bool,
}

impl ResponseFacets {
    /// Derives the facets from a response envelope.
    ///
    /// Never fails: partially-absent optional fields are normal.
    pub fn from_envelope(envelope: &ResponseEnvelope) -> Self {
        Self {
            speech: envelope
                .response
                .output_speech
                .as_ref()
                .map(|speech| speech.ssml.clone()),
            reprompt: envelope
                .response
                .reprompt
                .as_ref()
                .map(|reprompt| reprompt.output_speech.ssml.clone()),
            ends_session: envelope.response.should_end_session,
        }
    }
}
