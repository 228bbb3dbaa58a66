//! # parley-core
//!
//! Conversation replay engine for testing voice-skill handlers.
//!
//! Given a [`Skill`] implementation, a [`Conversation`] drives a scripted
//! sequence of synthetic requests against it, carrying session attributes
//! forward between steps and asserting each response's speech, reprompt,
//! and session-termination behavior. The first violated expectation halts
//! the sequence and reports the step position and request kind.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌────────────────┐     ┌───────────┐
//! │ Conversation │────▶│ RequestFactory │────▶│   Skill   │
//! └──────┬───────┘     └────────────────┘     └─────┬─────┘
//!        │                                          ▼
//!        │             ┌────────────────┐     ┌───────────┐
//!        └────────────▶│  Expectations  │◀────│ Extractor │
//!                      │  Conformance   │     └───────────┘
//!                      └────────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use parley_core::testing::{ResponseScript, ScriptedSkill};
//! use parley_core::{Conversation, HarnessConfig, Step};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = HarnessConfig::builder("greeter")
//!         .application_id("amzn1.echo-sdk-ams.app.greeter")
//!         .user_id("amzn1.account.tester")
//!         .build()
//!         .unwrap();
//!
//!     let skill = Arc::new(ScriptedSkill::new(vec![
//!         ResponseScript::new().speech("Welcome! What now?").build(),
//!         ResponseScript::new().end_session().build(),
//!     ]));
//!
//!     let conversation = Conversation::new(config, skill);
//!     let factory = conversation.request_factory();
//!
//!     let report = conversation
//!         .step(Step::new(factory.launch()).says("Welcome! What now?"))
//!         .step(Step::new(factory.intent("StopIntent", &[])).should_end_session(true))
//!         .run()
//!         .await
//!         .unwrap();
//!
//!     assert_eq!(report.step_count(), 2);
//! }
//! ```

mod config;
mod conformance;
mod context;
mod conversation;
mod expect;
mod extract;
mod request_builder;
mod skill;
pub mod testing;
mod translate;

pub use config::{FeatureToggles, HarnessConfig, HarnessConfigBuilder, QUESTION_MARK_CHECK};
pub use conformance::{QUESTION_GLYPHS, contains_question_glyph};
pub use context::StepContext;
pub use conversation::{
    Conversation, ConversationError, ConversationReport, Step, StepRecord,
};
pub use expect::{
    ResponseCallback, SPEECH_CLOSE, SPEECH_OPEN, SpeechCallback, StepExpectations, wrap_ssml,
};
pub use extract::ResponseFacets;
pub use request_builder::RequestFactory;
pub use skill::Skill;
pub use translate::Translator;

// Envelope and failure types are re-exported so test code needs only one crate.
pub use parley_proto::{
    Error as ConfigError, Failure, Intent, OutputSpeech, PROTOCOL_VERSION, RequestBody,
    RequestEnvelope, Reprompt, ResponseBody, ResponseEnvelope, SessionEndedReason, SessionError,
    Slot,
};
