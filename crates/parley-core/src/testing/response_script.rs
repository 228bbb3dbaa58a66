//! Terse construction of response envelopes for scripted skills.

use crate::expect::wrap_ssml;
use parley_proto::{OutputSpeech, Reprompt, ResponseBody, ResponseEnvelope};
use serde_json::{Map, Value};

/// Builder for one scripted response.
///
/// `speech` and `reprompt` wrap the literal text in the speech markup
/// envelope, matching what the exact-text expectations compare against;
/// `ssml` takes the markup verbatim. The session stays open unless
/// [`end_session`](Self::end_session) is called.
#[derive(Debug, Clone, Default)]
pub struct ResponseScript {
    speech: Option<String>,
    reprompt: Option<String>,
    should_end_session: bool,
    session_attributes: Map<String, Value>,
}

impl ResponseScript {
    /// Starts an empty response: no speech, no reprompt, session open.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the speech to the markup-wrapped literal text.
    pub fn speech(mut self, text: &str) -> Self {
        self.speech = Some(wrap_ssml(text));
        self
    }

    /// Sets the speech to raw SSML.
    pub fn ssml(mut self, ssml: impl Into<String>) -> Self {
        self.speech = Some(ssml.into());
        self
    }

    /// Sets the reprompt to the markup-wrapped literal text.
    pub fn reprompt(mut self, text: &str) -> Self {
        self.reprompt = Some(wrap_ssml(text));
        self
    }

    /// Marks the response as ending the session.
    pub fn end_session(mut self) -> Self {
        self.should_end_session = true;
        self
    }

    /// Adds one carry-forward session attribute.
    pub fn attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.session_attributes.insert(key.into(), value);
        self
    }

    /// Builds the response envelope.
    pub fn build(self) -> ResponseEnvelope {
        ResponseEnvelope {
            response: ResponseBody {
                output_speech: self.speech.map(|ssml| OutputSpeech { ssml }),
                reprompt: self.reprompt.map(|ssml| Reprompt {
                    output_speech: OutputSpeech { ssml },
                }),
                should_end_session: self.should_end_session,
            },
            session_attributes: self.session_attributes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_response() {
        let envelope = ResponseScript::new().build();
        assert!(envelope.response.output_speech.is_none());
        assert!(envelope.response.reprompt.is_none());
        assert!(!envelope.response.should_end_session);
        assert!(envelope.session_attributes.is_empty());
    }

    #[test]
    fn test_speech_is_wrapped() {
        let envelope = ResponseScript::new().speech("Welcome").build();
        assert_eq!(
            envelope.response.output_speech.unwrap().ssml,
            "<speak> Welcome </speak>"
        );
    }

    #[test]
    fn test_ssml_is_verbatim() {
        let envelope = ResponseScript::new().ssml("<speak><p>Hi</p></speak>").build();
        assert_eq!(envelope.response.output_speech.unwrap().ssml, "<speak><p>Hi</p></speak>");
    }

    #[test]
    fn test_attributes_and_session_end() {
        let envelope = ResponseScript::new()
            .reprompt("Still there?")
            .end_session()
            .attribute("turn", json!(2))
            .build();

        assert_eq!(
            envelope.response.reprompt.unwrap().output_speech.ssml,
            "<speak> Still there? </speak>"
        );
        assert!(envelope.response.should_end_session);
        assert_eq!(envelope.session_attributes["turn"], json!(2));
    }
}
