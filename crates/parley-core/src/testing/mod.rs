//! Deterministic test doubles for harness and skill tests.

mod response_script;
mod scripted_skill;

pub use response_script::ResponseScript;
pub use scripted_skill::ScriptedSkill;

use crate::translate::Translator;
use serde_json::{Map, Value};

/// Translator that returns the first key verbatim, ignoring parameters.
#[derive(Debug, Clone, Default)]
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
    fn translate(
        &self,
        keys: &[&str],
        _params: &Map<String, Value>,
        _locale: &str,
    ) -> anyhow::Result<String> {
        Ok(keys.first().copied().unwrap_or_default().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_translator_returns_first_key() {
        let translator = IdentityTranslator;
        let text = translator
            .translate(&["greeting", "fallback"], &Map::new(), "en-US")
            .unwrap();
        assert_eq!(text, "greeting");
    }
}
