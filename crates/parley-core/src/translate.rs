//! Localization seam.
//!
//! The harness never formats localized text itself; it delegates to a
//! [`Translator`] collaborator, reached through the step context which
//! defaults the locale to the current step's resolved locale.

use serde_json::{Map, Value};

/// Resolves translation keys to localized text.
pub trait Translator: Send + Sync {
    /// Translates the first matching key with the given parameters.
    ///
    /// Errors are forwarded verbatim to the caller; the harness does not
    /// reinterpret them.
    fn translate(
        &self,
        keys: &[&str],
        params: &Map<String, Value>,
        locale: &str,
    ) -> anyhow::Result<String>;
}
