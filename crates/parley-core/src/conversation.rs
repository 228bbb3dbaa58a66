//! Conversation replay.
//!
//! A [`Conversation`] owns an ordered list of steps and drives them against
//! the skill under test, one at a time: build the request, inject the
//! carried session attributes, await the handler, extract the response
//! facets, evaluate the step's expectations, then the conformance checks.
//! The first violation (or handler error) halts the sequence; a clean run
//! produces a [`ConversationReport`] with one record per executed step.
//!
//! ```text
//! ┌──────────────┐    ┌───────────┐    ┌─────────────┐    ┌─────────────┐
//! │ Conversation │───▶│   Skill   │───▶│  Extractor  │───▶│ Expectations│
//! └──────────────┘    └───────────┘    └─────────────┘    │ Conformance │
//!        ▲                                                └──────┬──────┘
//!        └──────────────── session attributes ◀──────────────────┘
//! ```

use crate::config::HarnessConfig;
use crate::conformance;
use crate::context::StepContext;
use crate::expect::{ResponseCallback, SpeechCallback, StepExpectations};
use crate::extract::ResponseFacets;
use crate::request_builder::RequestFactory;
use crate::skill::Skill;
use crate::translate::Translator;
use parley_proto::{Failure, RequestEnvelope};
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Terminal error of a conversation run.
#[derive(Debug, Error)]
pub enum ConversationError {
    /// A step declared contradictory expectations; reported before any
    /// request is dispatched.
    #[error("Request #{step} ({kind}): {source}")]
    Config {
        /// 1-based step position.
        step: usize,
        kind: String,
        #[source]
        source: parley_proto::Error,
    },

    /// An expectation or conformance check was violated.
    #[error("{failure}")]
    Expectation {
        /// 1-based step position.
        step: usize,
        kind: String,
        failure: Failure,
    },

    /// The skill returned an error; forwarded verbatim.
    #[error("Request #{step} ({kind}): skill invocation failed")]
    Skill {
        /// 1-based step position.
        step: usize,
        kind: String,
        #[source]
        source: anyhow::Error,
    },
}

impl ConversationError {
    /// The structured failure descriptor, for expectation violations.
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            ConversationError::Expectation { failure, .. } => Some(failure),
            _ => None,
        }
    }

    /// The 1-based position of the step that failed.
    pub fn step(&self) -> usize {
        match self {
            ConversationError::Config { step, .. }
            | ConversationError::Expectation { step, .. }
            | ConversationError::Skill { step, .. } => *step,
        }
    }
}

/// One step: a built request plus its declared expectations.
pub struct Step {
    request: RequestEnvelope,
    expectations: StepExpectations,
    conflict: Option<parley_proto::Error>,
}

impl Step {
    /// Creates a step around a built request with no expectations.
    pub fn new(request: RequestEnvelope) -> Self {
        Self {
            request,
            expectations: StepExpectations::default(),
            conflict: None,
        }
    }

    /// Expects the speech to equal the markup-wrapped literal text.
    pub fn says(mut self, text: impl Into<String>) -> Self {
        if self.expectations.says_nothing {
            self.record_conflict("says and says_nothing");
        }
        self.expectations.says = Some(text.into());
        self
    }

    /// Expects the response to produce no speech at all.
    pub fn says_nothing(mut self) -> Self {
        if self.expectations.says.is_some() {
            self.record_conflict("says and says_nothing");
        }
        self.expectations.says_nothing = true;
        self
    }

    /// Expects the reprompt to equal the markup-wrapped literal text.
    pub fn reprompts(mut self, text: impl Into<String>) -> Self {
        if self.expectations.reprompts_nothing {
            self.record_conflict("reprompts and reprompts_nothing");
        }
        self.expectations.reprompts = Some(text.into());
        self
    }

    /// Expects the response to produce no reprompt at all.
    pub fn reprompts_nothing(mut self) -> Self {
        if self.expectations.reprompts.is_some() {
            self.record_conflict("reprompts and reprompts_nothing");
        }
        self.expectations.reprompts_nothing = true;
        self
    }

    /// Expects the response to end (true) or continue (false) the session.
    pub fn should_end_session(mut self, end: bool) -> Self {
        self.expectations.should_end_session = Some(end);
        self
    }

    /// Attaches a custom validation over the extracted speech.
    pub fn says_callback(
        mut self,
        callback: impl Fn(&StepContext, Option<&str>) -> Result<(), Failure> + Send + Sync + 'static,
    ) -> Self {
        self.expectations.says_callback = Some(Box::new(callback) as SpeechCallback);
        self
    }

    /// Attaches a custom validation over the full response envelope.
    pub fn callback(
        mut self,
        callback: impl Fn(&StepContext, &parley_proto::ResponseEnvelope) -> Result<(), Failure>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.expectations.callback = Some(Box::new(callback) as ResponseCallback);
        self
    }

    fn record_conflict(&mut self, pair: &'static str) {
        if self.conflict.is_none() {
            self.conflict = Some(parley_proto::Error::ConflictingExpectations(pair));
        }
    }
}

/// Record of one successfully executed step.
#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    /// 0-based step index.
    pub index: usize,
    /// Human-readable request kind.
    pub request_kind: String,
    /// Extracted speech, when present.
    pub speech: Option<String>,
    /// Extracted reprompt, when present.
    pub reprompt: Option<String>,
    /// Whether the response ended the session.
    pub ended_session: bool,
}

/// Result of a clean conversation run.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationReport {
    /// One record per executed step, in execution order.
    pub steps: Vec<StepRecord>,
}

impl ConversationReport {
    /// Number of steps executed.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }
}

/// A scripted conversation against one skill.
pub struct Conversation {
    config: HarnessConfig,
    skill: Arc<dyn Skill>,
    translator: Option<Arc<dyn Translator>>,
    steps: Vec<Step>,
}

impl Conversation {
    /// Creates a conversation bound to a validated configuration and the
    /// skill under test.
    pub fn new(config: HarnessConfig, skill: Arc<dyn Skill>) -> Self {
        Self {
            config,
            skill,
            translator: None,
            steps: Vec::new(),
        }
    }

    /// Attaches the localization collaborator reachable from step contexts.
    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    /// A request factory bound to this conversation's configuration.
    pub fn request_factory(&self) -> RequestFactory {
        RequestFactory::new(&self.config)
    }

    /// Appends a step to the sequence.
    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Number of declared steps.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Replays the conversation, one step at a time.
    ///
    /// Session attributes from each response replace the next request's
    /// session attributes wholesale; the first violated expectation or
    /// handler error halts the sequence and no further steps execute.
    pub async fn run(self) -> Result<ConversationReport, ConversationError> {
        // Contradictory declarations surface before any request dispatches.
        for (index, step) in self.steps.iter().enumerate() {
            if let Some(source) = &step.conflict {
                return Err(ConversationError::Config {
                    step: index + 1,
                    kind: step.request.request.kind().to_string(),
                    source: source.clone(),
                });
            }
        }

        info!(
            skill = %self.config.name,
            steps = self.steps.len(),
            "Replaying conversation"
        );

        let mut carry: Map<String, Value> = Map::new();
        let mut records = Vec::with_capacity(self.steps.len());

        for (index, step) in self.steps.into_iter().enumerate() {
            let mut request = step.request;
            request.session.attributes = std::mem::take(&mut carry);

            let kind = request.request.kind().to_string();
            let locale = request.request.locale().to_string();

            let mut ctx = StepContext::new(index, locale, kind.clone());
            if let Some(translator) = &self.translator {
                ctx = ctx.with_translator(translator.clone());
            }

            debug!(step = index + 1, kind = %kind, "Dispatching request");
            let response =
                self.skill
                    .handle(request)
                    .await
                    .map_err(|source| ConversationError::Skill {
                        step: index + 1,
                        kind: kind.clone(),
                        source,
                    })?;

            let facets = ResponseFacets::from_envelope(&response);
            let mut failures = step.expectations.evaluate(&ctx, &facets, &response);
            if failures.is_empty() {
                failures = conformance::evaluate(&self.config.features, &facets);
            }

            if let Some(failure) = failures.into_iter().next() {
                let failure = ctx.failure(failure);
                return Err(ConversationError::Expectation {
                    step: index + 1,
                    kind,
                    failure,
                });
            }

            debug!(
                step = index + 1,
                ends_session = facets.ends_session,
                carried_attributes = response.session_attributes.len(),
                "Step passed"
            );

            records.push(StepRecord {
                index,
                request_kind: kind,
                speech: facets.speech,
                reprompt: facets.reprompt,
                ended_session: facets.ends_session,
            });
            carry = response.session_attributes;
        }

        info!(steps = records.len(), "Conversation completed");
        Ok(ConversationReport { steps: records })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ResponseScript, ScriptedSkill};

    fn config() -> HarnessConfig {
        HarnessConfig::builder("test skill")
            .application_id("amzn1.echo-sdk-ams.app.test")
            .user_id("amzn1.account.test")
            .build()
            .unwrap()
    }

    fn conversation(skill: Arc<ScriptedSkill>) -> Conversation {
        Conversation::new(config(), skill)
    }

    #[tokio::test]
    async fn test_empty_conversation_completes() {
        let skill = Arc::new(ScriptedSkill::new(vec![]));
        let report = conversation(skill.clone()).run().await.unwrap();
        assert_eq!(report.step_count(), 0);
        assert_eq!(skill.invocation_count(), 0);
    }

    #[tokio::test]
    async fn test_conflicting_says_pair_is_config_error() {
        let skill = Arc::new(ScriptedSkill::new(vec![
            ResponseScript::new().speech("Hi?").build(),
        ]));
        let conversation = conversation(skill.clone());
        let factory = conversation.request_factory();

        let err = conversation
            .step(Step::new(factory.launch()).says("Hi").says_nothing())
            .run()
            .await
            .unwrap_err();

        assert!(matches!(err, ConversationError::Config { step: 1, .. }));
        // Config errors are independent of sequence execution.
        assert_eq!(skill.invocation_count(), 0);
    }

    #[tokio::test]
    async fn test_conflicting_reprompts_pair_is_config_error() {
        let skill = Arc::new(ScriptedSkill::new(vec![]));
        let conversation = conversation(skill);
        let factory = conversation.request_factory();

        let err = conversation
            .step(
                Step::new(factory.launch())
                    .reprompts_nothing()
                    .reprompts("Still there?"),
            )
            .run()
            .await
            .unwrap_err();

        let ConversationError::Config { source, .. } = err else {
            panic!("expected a config error");
        };
        assert_eq!(
            source,
            parley_proto::Error::ConflictingExpectations("reprompts and reprompts_nothing")
        );
    }

    #[tokio::test]
    async fn test_failure_halts_before_later_steps() {
        let skill = Arc::new(ScriptedSkill::new(vec![
            ResponseScript::new().speech("Wrong?").build(),
            ResponseScript::new().speech("Never reached?").build(),
        ]));
        let conversation = conversation(skill.clone());
        let factory = conversation.request_factory();

        let err = conversation
            .step(Step::new(factory.launch()).says("Welcome"))
            .step(Step::new(factory.intent("StopIntent", &[])).says_nothing())
            .run()
            .await
            .unwrap_err();

        assert_eq!(err.step(), 1);
        assert_eq!(skill.invocation_count(), 1);
    }

    #[tokio::test]
    async fn test_skill_error_is_forwarded_verbatim() {
        struct FailingSkill;

        #[async_trait::async_trait]
        impl Skill for FailingSkill {
            async fn handle(
                &self,
                _request: RequestEnvelope,
            ) -> anyhow::Result<parley_proto::ResponseEnvelope> {
                Err(anyhow::anyhow!("database unreachable"))
            }
        }

        let conversation = Conversation::new(config(), Arc::new(FailingSkill));
        let factory = conversation.request_factory();

        let err = conversation
            .step(Step::new(factory.launch()))
            .run()
            .await
            .unwrap_err();

        let ConversationError::Skill { step, kind, source } = err else {
            panic!("expected a skill error");
        };
        assert_eq!(step, 1);
        assert_eq!(kind, "LaunchRequest");
        assert_eq!(source.to_string(), "database unreachable");
    }

    #[tokio::test]
    async fn test_conformance_runs_after_expectations_pass() {
        // Speech matches, session open, no question mark: the declared
        // expectation passes and the conformance rule reports.
        let skill = Arc::new(ScriptedSkill::new(vec![
            ResponseScript::new().speech("Welcome.").build(),
        ]));
        let config = HarnessConfig::builder("test skill")
            .application_id("amzn1.echo-sdk-ams.app.test")
            .user_id("amzn1.account.test")
            .question_mark_check(true)
            .build()
            .unwrap();
        let conversation = Conversation::new(config, skill);
        let factory = conversation.request_factory();

        let err = conversation
            .step(Step::new(factory.launch()).says("Welcome."))
            .run()
            .await
            .unwrap_err();

        let failure = err.failure().unwrap();
        assert!(failure.message.contains("does not ask a question"));
    }
}
