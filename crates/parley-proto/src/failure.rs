//! The structured failure descriptor for violated expectations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Describes one violated expectation.
///
/// Produced by the expectation evaluator and conformance checks, prefixed
/// with the step position by the step context, and surfaced to the test
/// framework as the terminal error of a conversation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    /// Human-readable description of the violation.
    pub message: String,
    /// Expected value or condition, when one exists.
    pub expected: Option<String>,
    /// Actual value or condition observed.
    pub actual: Option<String>,
    /// Comparison operator the check applied (e.g. `==`).
    pub operator: Option<String>,
    /// Whether a diff between expected and actual is worth rendering.
    pub show_diff: bool,
}

impl Failure {
    /// Creates a failure with only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            expected: None,
            actual: None,
            operator: None,
            show_diff: false,
        }
    }

    /// Sets the expected value.
    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    /// Sets the actual value.
    pub fn with_actual(mut self, actual: impl Into<String>) -> Self {
        self.actual = Some(actual.into());
        self
    }

    /// Sets the comparison operator.
    pub fn with_operator(mut self, operator: impl Into<String>) -> Self {
        self.operator = Some(operator.into());
        self
    }

    /// Marks the failure as diff-worthy.
    pub fn with_diff(mut self) -> Self {
        self.show_diff = true;
        self
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if self.expected.is_some() || self.actual.is_some() {
            let operator = self.operator.as_deref().unwrap_or("==");
            write!(
                f,
                " (expected: {} {} actual: {})",
                render(self.expected.as_deref()),
                operator,
                render(self.actual.as_deref())
            )?;
        }
        Ok(())
    }
}

/// Renders an optional value, keeping "absent" distinct from the empty string.
fn render(value: Option<&str>) -> String {
    match value {
        Some(value) => format!("{value:?}"),
        None => "absent".to_string(),
    }
}
