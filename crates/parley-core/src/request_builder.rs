//! Request construction for each interaction kind.
//!
//! A [`RequestFactory`] captures the configured identifiers and default
//! locale at creation time and produces complete, well-formed request
//! envelopes: launch, intent invocation, and session end. Construction is
//! pure apart from the fresh identifiers and timestamp stamped on each
//! envelope; requests built earlier are unaffected by later configuration
//! changes.

use crate::config::HarnessConfig;
use chrono::Utc;
use parley_proto::{
    Intent, PROTOCOL_VERSION, RequestBody, RequestEnvelope, RequestFields, SessionData,
    SessionEndedReason, SessionError, Slot, UserData,
};
use serde_json::Map;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Builds request envelopes for the configured skill.
#[derive(Debug, Clone)]
pub struct RequestFactory {
    application_id: String,
    user_id: String,
    locale: String,
}

impl RequestFactory {
    /// Creates a factory bound to the given configuration.
    pub fn new(config: &HarnessConfig) -> Self {
        Self {
            application_id: config.application_id.clone(),
            user_id: config.user_id.clone(),
            locale: config.locale.clone(),
        }
    }

    /// The default locale stamped on built requests.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Builds a launch request in the default locale.
    pub fn launch(&self) -> RequestEnvelope {
        self.launch_in_locale(None)
    }

    /// Builds a launch request, optionally overriding the locale.
    pub fn launch_in_locale(&self, locale: Option<&str>) -> RequestEnvelope {
        self.envelope(RequestBody::LaunchRequest {
            fields: self.fields(locale),
        })
    }

    /// Builds an intent request in the default locale.
    ///
    /// Each `name -> value` pair is normalized into a slot record keyed by
    /// slot name.
    pub fn intent(&self, name: &str, slots: &[(&str, &str)]) -> RequestEnvelope {
        self.intent_in_locale(name, slots, None)
    }

    /// Builds an intent request, optionally overriding the locale.
    pub fn intent_in_locale(
        &self,
        name: &str,
        slots: &[(&str, &str)],
        locale: Option<&str>,
    ) -> RequestEnvelope {
        let slots: BTreeMap<String, Slot> = slots
            .iter()
            .map(|(slot_name, value)| {
                (
                    (*slot_name).to_string(),
                    Slot {
                        name: (*slot_name).to_string(),
                        value: (*value).to_string(),
                    },
                )
            })
            .collect();

        self.envelope(RequestBody::IntentRequest {
            fields: self.fields(locale),
            intent: Intent {
                name: name.to_string(),
                slots,
            },
        })
    }

    /// Builds a session-ended request in the default locale.
    pub fn session_ended(&self, reason: SessionEndedReason) -> RequestEnvelope {
        self.session_ended_in_locale(reason, None, None)
    }

    /// Builds a session-ended request with an error block, optionally
    /// overriding the locale.
    pub fn session_ended_in_locale(
        &self,
        reason: SessionEndedReason,
        error: Option<SessionError>,
        locale: Option<&str>,
    ) -> RequestEnvelope {
        self.envelope(RequestBody::SessionEndedRequest {
            fields: self.fields(locale),
            reason,
            error,
        })
    }

    fn envelope(&self, request: RequestBody) -> RequestEnvelope {
        RequestEnvelope {
            version: PROTOCOL_VERSION.to_string(),
            session: SessionData {
                session_id: format!("SessionId.{}", Uuid::new_v4()),
                application_id: self.application_id.clone(),
                attributes: Map::new(),
                user: UserData {
                    user_id: self.user_id.clone(),
                },
                new: true,
            },
            request,
        }
    }

    fn fields(&self, locale: Option<&str>) -> RequestFields {
        RequestFields {
            request_id: format!("EdwRequestId.{}", Uuid::new_v4()),
            timestamp: Utc::now(),
            locale: locale.unwrap_or(&self.locale).to_string(),
        }
    }
}
