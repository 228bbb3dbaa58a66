//! Expectation evaluation for one step.
//!
//! Checks run in a fixed order so the first reported failure is
//! deterministic: exact speech, no-speech, exact reprompt, no-reprompt,
//! session continuation, then the custom callbacks. Evaluation stops at the
//! first violation; the runner halts the sequence on it.

use crate::context::StepContext;
use crate::extract::ResponseFacets;
use parley_proto::{Failure, ResponseEnvelope};

/// Opening delimiter of the speech markup envelope.
pub const SPEECH_OPEN: &str = "<speak> ";
/// Closing delimiter of the speech markup envelope.
pub const SPEECH_CLOSE: &str = " </speak>";

/// Wraps literal expected text in the fixed speech markup envelope.
pub fn wrap_ssml(text: &str) -> String {
    format!("{SPEECH_OPEN}{text}{SPEECH_CLOSE}")
}

/// Custom validation over the extracted speech (absent when no speech).
pub type SpeechCallback =
    Box<dyn Fn(&StepContext, Option<&str>) -> Result<(), Failure> + Send + Sync>;

/// Custom validation over the full response envelope.
pub type ResponseCallback =
    Box<dyn Fn(&StepContext, &ResponseEnvelope) -> Result<(), Failure> + Send + Sync>;

/// Declared expectations for one step.
///
/// All fields are optional; an empty set of expectations passes every
/// response.
#[derive(Default)]
pub struct StepExpectations {
    /// Exact speech text, compared against the markup-wrapped literal.
    pub says: Option<String>,
    /// The response must produce no speech at all.
    pub says_nothing: bool,
    /// Exact reprompt text, compared against the markup-wrapped literal.
    pub reprompts: Option<String>,
    /// The response must produce no reprompt at all.
    pub reprompts_nothing: bool,
    /// Whether the response must end (true) or continue (false) the session.
    pub should_end_session: Option<bool>,
    /// Custom validation receiving the extracted speech.
    pub says_callback: Option<SpeechCallback>,
    /// Custom validation receiving the full response.
    pub callback: Option<ResponseCallback>,
}

impl StepExpectations {
    /// Evaluates the declared expectations against the extracted facets.
    ///
    /// Returns the violations found, in declaration-check order; evaluation
    /// stops at the first violation, so the list holds at most one entry.
    pub fn evaluate(
        &self,
        ctx: &StepContext,
        facets: &ResponseFacets,
        response: &ResponseEnvelope,
    ) -> Vec<Failure> {
        let mut failures = Vec::new();

        if let Some(expected) = &self.says {
            if let Some(failure) = exact_match(
                "speech does not match the expected text",
                expected,
                facets.speech.as_deref(),
            ) {
                failures.push(failure);
                return failures;
            }
        }

        if self.says_nothing {
            if let Some(speech) = &facets.speech {
                failures.push(Failure::new("expected no speech output").with_actual(speech.clone()));
                return failures;
            }
        }

        if let Some(expected) = &self.reprompts {
            if let Some(failure) = exact_match(
                "reprompt does not match the expected text",
                expected,
                facets.reprompt.as_deref(),
            ) {
                failures.push(failure);
                return failures;
            }
        }

        if self.reprompts_nothing {
            if let Some(reprompt) = &facets.reprompt {
                failures
                    .push(Failure::new("expected no reprompt output").with_actual(reprompt.clone()));
                return failures;
            }
        }

        if let Some(expected_end) = self.should_end_session {
            if expected_end != facets.ends_session {
                failures.push(session_flag_failure(expected_end));
                return failures;
            }
        }

        if let Some(callback) = &self.says_callback {
            if let Err(failure) = callback(ctx, facets.speech.as_deref()) {
                failures.push(failure);
                return failures;
            }
        }

        if let Some(callback) = &self.callback {
            if let Err(failure) = callback(ctx, response) {
                failures.push(failure);
                return failures;
            }
        }

        failures
    }
}

/// Compares actual output against the markup-wrapped expected literal.
fn exact_match(message: &str, expected: &str, actual: Option<&str>) -> Option<Failure> {
    let expected = wrap_ssml(expected);
    if actual == Some(expected.as_str()) {
        return None;
    }

    let mut failure = Failure::new(message)
        .with_expected(expected)
        .with_operator("==")
        .with_diff();
    if let Some(actual) = actual {
        failure = failure.with_actual(actual);
    }
    Some(failure)
}

fn session_flag_failure(expected_end: bool) -> Failure {
    const ENDED: &str = "the response ends the session";
    const OPEN: &str = "the response did not end the session";

    let (message, expected, actual) = if expected_end {
        ("expected the session to end", ENDED, OPEN)
    } else {
        ("expected the session to stay open", OPEN, ENDED)
    };
    Failure::new(message).with_expected(expected).with_actual(actual)
}
