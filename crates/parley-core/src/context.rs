//! Per-step context.
//!
//! One [`StepContext`] exists per step invocation, owned by the sequence
//! runner for the duration of that step. It carries the step's position,
//! resolved locale, and human-readable request kind, and offers the two
//! capabilities custom validation code needs: translation scoped to the
//! step's locale, and failure formatting scoped to the step's position.

use crate::translate::Translator;
use anyhow::anyhow;
use parley_proto::Failure;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Context for one step of a conversation.
#[derive(Clone)]
pub struct StepContext {
    index: usize,
    locale: String,
    request_kind: String,
    translator: Option<Arc<dyn Translator>>,
}

impl StepContext {
    /// Creates a context for the step at `index` (0-based).
    pub fn new(index: usize, locale: impl Into<String>, request_kind: impl Into<String>) -> Self {
        Self {
            index,
            locale: locale.into(),
            request_kind: request_kind.into(),
            translator: None,
        }
    }

    /// Attaches the localization collaborator.
    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    /// The 0-based step index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The 1-based step position as shown in failure messages.
    pub fn position(&self) -> usize {
        self.index + 1
    }

    /// The locale the step's request was built with.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// The human-readable request kind: the request type, or the intent's
    /// name for intent invocations.
    pub fn request_kind(&self) -> &str {
        &self.request_kind
    }

    /// Translates `keys` in the step's resolved locale.
    pub fn translate(&self, keys: &[&str], params: &Map<String, Value>) -> anyhow::Result<String> {
        self.translate_in(keys, params, &self.locale)
    }

    /// Translates `keys` in an explicit locale.
    pub fn translate_in(
        &self,
        keys: &[&str],
        params: &Map<String, Value>,
        locale: &str,
    ) -> anyhow::Result<String> {
        let translator = self
            .translator
            .as_deref()
            .ok_or_else(|| anyhow!("no translator configured for this conversation"))?;
        translator.translate(keys, params, locale)
    }

    /// Prefixes a failure's message with the step position and request kind,
    /// producing the descriptor the runner surfaces.
    pub fn failure(&self, failure: Failure) -> Failure {
        Failure {
            message: format!(
                "Request #{} ({}): {}",
                self.position(),
                self.request_kind,
                failure.message
            ),
            ..failure
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoTranslator;

    impl Translator for EchoTranslator {
        fn translate(
            &self,
            keys: &[&str],
            _params: &Map<String, Value>,
            locale: &str,
        ) -> anyhow::Result<String> {
            Ok(format!("{}:{}", locale, keys.join("+")))
        }
    }

    #[test]
    fn test_failure_prefix_is_one_based() {
        let ctx = StepContext::new(0, "en-US", "LaunchRequest");
        let failure = ctx.failure(Failure::new("speech does not match"));
        assert_eq!(failure.message, "Request #1 (LaunchRequest): speech does not match");
    }

    #[test]
    fn test_failure_prefix_uses_intent_name() {
        let ctx = StepContext::new(2, "en-US", "StopIntent");
        let failure = ctx.failure(Failure::new("expected the session to end"));
        assert_eq!(failure.message, "Request #3 (StopIntent): expected the session to end");
    }

    #[test]
    fn test_failure_preserves_structured_fields() {
        let ctx = StepContext::new(0, "en-US", "LaunchRequest");
        let failure = ctx.failure(
            Failure::new("mismatch")
                .with_expected("a")
                .with_actual("b")
                .with_operator("==")
                .with_diff(),
        );
        assert_eq!(failure.expected.as_deref(), Some("a"));
        assert_eq!(failure.actual.as_deref(), Some("b"));
        assert!(failure.show_diff);
    }

    #[test]
    fn test_translate_defaults_to_step_locale() {
        let ctx = StepContext::new(0, "de-DE", "LaunchRequest")
            .with_translator(Arc::new(EchoTranslator));
        let text = ctx.translate(&["greeting"], &Map::new()).unwrap();
        assert_eq!(text, "de-DE:greeting");
    }

    #[test]
    fn test_translate_in_explicit_locale() {
        let ctx = StepContext::new(0, "de-DE", "LaunchRequest")
            .with_translator(Arc::new(EchoTranslator));
        let text = ctx.translate_in(&["greeting"], &Map::new(), "fr-FR").unwrap();
        assert_eq!(text, "fr-FR:greeting");
    }

    #[test]
    fn test_translate_without_translator_errors() {
        let ctx = StepContext::new(0, "en-US", "LaunchRequest");
        assert!(ctx.translate(&["greeting"], &Map::new()).is_err());
    }
}
