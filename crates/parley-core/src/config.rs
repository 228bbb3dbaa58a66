//! Harness configuration.
//!
//! A [`HarnessConfig`] binds the identity of the conversation under test:
//! skill name, application and user identifiers, default locale, and the
//! conformance feature toggles. Built once before any step executes;
//! validation errors surface synchronously at the offending call.

use parley_proto::{Error, Result};

/// Feature toggle key for the question-mark conformance check.
pub const QUESTION_MARK_CHECK: &str = "question_mark_check";

/// Toggle set for the built-in conformance checks.
///
/// Each conversation owns its own toggle set, fixed before execution
/// begins; checks read it at evaluation time. All checks are opt-in:
/// the default set runs none of them.
#[derive(Debug, Clone, Default)]
pub struct FeatureToggles {
    question_mark_check: bool,
}

impl FeatureToggles {
    /// Creates the default toggle set (all checks disabled).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a toggle by its string key.
    ///
    /// Returns [`Error::UnknownFeature`] for keys that name no check.
    pub fn set(&mut self, key: &str, enabled: bool) -> Result<()> {
        match key {
            QUESTION_MARK_CHECK => {
                self.question_mark_check = enabled;
                Ok(())
            }
            other => Err(Error::UnknownFeature(other.to_string())),
        }
    }

    /// Sets the question-mark check toggle.
    pub fn with_question_mark_check(mut self, enabled: bool) -> Self {
        self.question_mark_check = enabled;
        self
    }

    /// Whether the question-mark consistency check is enabled.
    pub fn question_mark_check(&self) -> bool {
        self.question_mark_check
    }
}

/// Validated harness configuration.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Human-readable name of the skill under test.
    pub name: String,
    /// Application identifier stamped on every session block.
    pub application_id: String,
    /// User identifier stamped on every session block.
    pub user_id: String,
    /// Default locale for built requests.
    pub locale: String,
    /// Conformance check toggles.
    pub features: FeatureToggles,
}

impl HarnessConfig {
    /// Starts building a configuration for the named skill.
    pub fn builder(name: impl Into<String>) -> HarnessConfigBuilder {
        HarnessConfigBuilder {
            name: name.into(),
            application_id: None,
            user_id: None,
            locale: "en-US".to_string(),
            features: FeatureToggles::default(),
        }
    }
}

/// Builder for [`HarnessConfig`].
#[derive(Debug, Clone)]
pub struct HarnessConfigBuilder {
    name: String,
    application_id: Option<String>,
    user_id: Option<String>,
    locale: String,
    features: FeatureToggles,
}

impl HarnessConfigBuilder {
    /// Sets the application identifier.
    pub fn application_id(mut self, id: impl Into<String>) -> Self {
        self.application_id = Some(id.into());
        self
    }

    /// Sets the user identifier.
    pub fn user_id(mut self, id: impl Into<String>) -> Self {
        self.user_id = Some(id.into());
        self
    }

    /// Sets the default locale for built requests.
    ///
    /// Returns [`Error::EmptyLocale`] when the locale is empty.
    pub fn locale(mut self, locale: impl Into<String>) -> Result<Self> {
        let locale = locale.into();
        if locale.trim().is_empty() {
            return Err(Error::EmptyLocale);
        }
        self.locale = locale;
        Ok(self)
    }

    /// Sets a feature toggle by key.
    ///
    /// Returns [`Error::UnknownFeature`] for keys that name no check.
    pub fn feature(mut self, key: &str, enabled: bool) -> Result<Self> {
        self.features.set(key, enabled)?;
        Ok(self)
    }

    /// Sets the question-mark check toggle.
    pub fn question_mark_check(mut self, enabled: bool) -> Self {
        self.features = self.features.with_question_mark_check(enabled);
        self
    }

    /// Validates and produces the configuration.
    ///
    /// Application and user identifiers are required; the locale defaults
    /// to `en-US` when never set.
    pub fn build(self) -> Result<HarnessConfig> {
        let application_id = self
            .application_id
            .ok_or(Error::MissingField("application_id"))?;
        let user_id = self.user_id.ok_or(Error::MissingField("user_id"))?;

        Ok(HarnessConfig {
            name: self.name,
            application_id,
            user_id,
            locale: self.locale,
            features: self.features,
        })
    }
}
