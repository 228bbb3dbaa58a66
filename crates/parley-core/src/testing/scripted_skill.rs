//! Mock skill that replays pre-scripted responses.

use crate::skill::Skill;
use anyhow::anyhow;
use async_trait::async_trait;
use parley_proto::{RequestEnvelope, ResponseEnvelope};
use std::sync::{Arc, Mutex};

/// Skill double returning scripted responses in order and recording every
/// received request.
#[derive(Debug, Clone)]
pub struct ScriptedSkill {
    state: Arc<Mutex<ScriptState>>,
}

#[derive(Debug)]
struct ScriptState {
    responses: Vec<ResponseEnvelope>,
    current: usize,
    invocations: Vec<RequestEnvelope>,
}

impl ScriptedSkill {
    /// Creates a skill double with the given scripted responses.
    pub fn new(responses: Vec<ResponseEnvelope>) -> Self {
        Self {
            state: Arc::new(Mutex::new(ScriptState {
                responses,
                current: 0,
                invocations: Vec::new(),
            })),
        }
    }

    /// Number of times the skill was invoked.
    pub fn invocation_count(&self) -> usize {
        self.state.lock().unwrap().invocations.len()
    }

    /// All requests received, in invocation order.
    pub fn invocations(&self) -> Vec<RequestEnvelope> {
        self.state.lock().unwrap().invocations.clone()
    }
}

#[async_trait]
impl Skill for ScriptedSkill {
    async fn handle(&self, request: RequestEnvelope) -> anyhow::Result<ResponseEnvelope> {
        let mut state = self.state.lock().unwrap();
        state.invocations.push(request);

        let response = state
            .responses
            .get(state.current)
            .cloned()
            .ok_or_else(|| anyhow!("no scripted response for invocation #{}", state.current + 1))?;
        state.current += 1;
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ResponseScript;

    fn request() -> RequestEnvelope {
        use crate::config::HarnessConfig;
        use crate::request_builder::RequestFactory;

        let config = HarnessConfig::builder("test")
            .application_id("app")
            .user_id("user")
            .build()
            .unwrap();
        RequestFactory::new(&config).launch()
    }

    #[tokio::test]
    async fn test_returns_scripted_responses_in_order() {
        let skill = ScriptedSkill::new(vec![
            ResponseScript::new().speech("First?").build(),
            ResponseScript::new().speech("Second?").build(),
        ]);

        let first = skill.handle(request()).await.unwrap();
        let second = skill.handle(request()).await.unwrap();

        assert_eq!(
            first.response.output_speech.unwrap().ssml,
            "<speak> First? </speak>"
        );
        assert_eq!(
            second.response.output_speech.unwrap().ssml,
            "<speak> Second? </speak>"
        );
        assert_eq!(skill.invocation_count(), 2);
    }

    #[tokio::test]
    async fn test_errors_when_script_is_exhausted() {
        let skill = ScriptedSkill::new(vec![]);
        let err = skill.handle(request()).await.unwrap_err();
        assert!(err.to_string().contains("no scripted response"));
    }

    #[tokio::test]
    async fn test_records_received_requests() {
        let skill = ScriptedSkill::new(vec![ResponseScript::new().end_session().build()]);
        skill.handle(request()).await.unwrap();

        let invocations = skill.invocations();
        assert_eq!(invocations.len(), 1);
        assert_eq!(invocations[0].request.request_type(), "LaunchRequest");
    }
}
