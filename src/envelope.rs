use serde::Deserialize;
use std::collections::HashMap;

// Alexa request envelope types (the wire schema is owned by the platform;
// unknown fields are ignored, unknown request types map to `Other`).

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    #[serde(default)]
    pub version: String,
    pub session: Option<Session>,
    pub request: Request,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub new: bool,
    pub session_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[serde(rename = "type", default)]
    pub kind: RequestType,
    pub request_id: Option<String>,
    pub timestamp: Option<String>,
    pub locale: Option<String>,
    pub intent: Option<Intent>,
    /// Only sent on SessionEndedRequest.
    pub reason: Option<String>,
}

/// Request type discriminator. Anything the skill does not model collapses
/// to `Other`, which no specific handler matches, so it reaches the
/// catch-all error handler instead of failing deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum RequestType {
    LaunchRequest,
    IntentRequest,
    SessionEndedRequest,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
pub struct Intent {
    #[serde(default)]
    pub name: String,
    pub slots: Option<HashMap<String, Slot>>,
}

#[derive(Debug, Deserialize)]
pub struct Slot {
    pub name: Option<String>,
    pub value: Option<String>,
}

impl RequestEnvelope {
    pub fn request_type(&self) -> RequestType {
        self.request.kind
    }

    /// Locale tag as sent by the platform, or empty when absent (the locale
    /// resolver then falls back to the default locale).
    pub fn locale(&self) -> &str {
        self.request.locale.as_deref().unwrap_or_default()
    }

    pub fn intent_name(&self) -> Option<&str> {
        self.request.intent.as_ref().map(|i| i.name.as_str())
    }

    /// True for an IntentRequest carrying the given intent name.
    pub fn is_intent(&self, name: &str) -> bool {
        self.request.kind == RequestType::IntentRequest && self.intent_name() == Some(name)
    }

    /// Value of a named slot, when the intent carries one with a value.
    pub fn slot_value(&self, slot: &str) -> Option<&str> {
        self.request
            .intent
            .as_ref()?
            .slots
            .as_ref()?
            .get(slot)?
            .value
            .as_deref()
    }
}
