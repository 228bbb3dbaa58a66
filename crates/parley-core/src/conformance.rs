//! Built-in conformance checks.
//!
//! Conformance checks are response-shape rules independent of the
//! author-declared expectations, each gated by a feature toggle read at
//! evaluation time. They run only after every declared expectation on the
//! step has passed.

use crate::config::FeatureToggles;
use crate::extract::ResponseFacets;
use parley_proto::Failure;

/// Question-mark glyphs across the supported scripts: Latin, Armenian,
/// Arabic, supplemental punctuation, fullwidth.
pub const QUESTION_GLYPHS: [char; 5] = ['?', '\u{055E}', '\u{061F}', '\u{2047}', '\u{FF1F}'];

/// Returns true when the text contains any question-mark glyph.
pub fn contains_question_glyph(text: &str) -> bool {
    text.chars().any(|c| QUESTION_GLYPHS.contains(&c))
}

/// Evaluates all enabled conformance checks against the facets.
///
/// Toggle state is consulted here, not cached earlier, so a toggle change
/// between conversations takes effect on the next evaluation.
pub fn evaluate(features: &FeatureToggles, facets: &ResponseFacets) -> Vec<Failure> {
    let mut failures = Vec::new();

    if features.question_mark_check() {
        if let Some(failure) = question_mark_rule(facets) {
            failures.push(failure);
        }
    }

    failures
}

/// A response that ends the session must not ask a question, and a response
/// that keeps it open must ask one. Skipped entirely when speech is absent.
fn question_mark_rule(facets: &ResponseFacets) -> Option<Failure> {
    let speech = facets.speech.as_deref()?;
    let asks_question = contains_question_glyph(speech);

    if facets.ends_session && asks_question {
        Some(
            Failure::new("the response ends the session but the speech asks a question")
                .with_actual(speech),
        )
    } else if !facets.ends_session && !asks_question {
        Some(
            Failure::new("the response keeps the session open but the speech does not ask a question")
                .with_actual(speech),
        )
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facets(speech: Option<&str>, ends_session: bool) -> ResponseFacets {
        ResponseFacets {
            speech: speech.map(str::to_string),
            reprompt: None,
            ends_session,
        }
    }

    fn enabled() -> FeatureToggles {
        FeatureToggles::new().with_question_mark_check(true)
    }

    #[test]
    fn test_open_session_with_question_passes() {
        let failures = evaluate(&enabled(), &facets(Some("<speak> Do you want more? </speak>"), false));
        assert!(failures.is_empty());
    }

    #[test]
    fn test_ended_session_with_question_fails() {
        let failures = evaluate(&enabled(), &facets(Some("<speak> Do you want more? </speak>"), true));
        assert_eq!(failures.len(), 1);
        assert!(failures[0].message.contains("asks a question"));
    }

    #[test]
    fn test_ended_session_without_question_passes() {
        let failures = evaluate(&enabled(), &facets(Some("<speak> Okay, goodbye. </speak>"), true));
        assert!(failures.is_empty());
    }

    #[test]
    fn test_open_session_without_question_fails() {
        let failures = evaluate(&enabled(), &facets(Some("<speak> Okay, goodbye. </speak>"), false));
        assert_eq!(failures.len(), 1);
        assert!(failures[0].message.contains("does not ask a question"));
    }

    #[test]
    fn test_skipped_when_speech_absent() {
        assert!(evaluate(&enabled(), &facets(None, true)).is_empty());
        assert!(evaluate(&enabled(), &facets(None, false)).is_empty());
    }

    #[test]
    fn test_disabled_by_default() {
        let failures = evaluate(
            &FeatureToggles::new(),
            &facets(Some("<speak> Do you want more? </speak>"), true),
        );
        assert!(failures.is_empty());
    }

    #[test]
    fn test_disabling_toggle_suppresses_rule() {
        let toggles = enabled().with_question_mark_check(false);
        let failures = evaluate(&toggles, &facets(Some("<speak> Do you want more? </speak>"), true));
        assert!(failures.is_empty());
    }

    #[test]
    fn test_glyph_variants_detected() {
        for glyph in QUESTION_GLYPHS {
            let speech = format!("<speak> Still there{glyph} </speak>");
            assert!(contains_question_glyph(&speech), "missed glyph {glyph:?}");
        }
        assert!(!contains_question_glyph("<speak> Goodbye. </speak>"));
    }
}
