//! Conversation Session
//!
//! Read-only view over the `session` object of an inbound request.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Session data supplied by the caller for a multi-turn conversation.
///
/// Wraps the JSON object as received; every accessor reads through to it so
/// the handler always sees exactly what the platform sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Session {
    raw: Map<String, Value>,
}

impl Session {
    /// Wrap an already-decoded session object.
    #[must_use]
    pub const fn from_map(raw: Map<String, Value>) -> Self {
        Self { raw }
    }

    /// Whether this is the first request of the session.
    pub fn is_new(&self) -> bool {
        self.raw.get("new").and_then(Value::as_bool).unwrap_or(false)
    }

    /// Platform-assigned session identifier.
    pub fn session_id(&self) -> Option<&str> {
        self.raw.get("sessionId").and_then(Value::as_str)
    }

    /// Identifier of the skill the session belongs to.
    pub fn application_id(&self) -> Option<&str> {
        self.raw
            .get("application")
            .and_then(|app| app.get("applicationId"))
            .and_then(Value::as_str)
    }

    /// Identifier of the end user.
    pub fn user_id(&self) -> Option<&str> {
        self.user_field("userId")
    }

    /// Account-linking access token, when the user has linked an account.
    pub fn user_access_token(&self) -> Option<&str> {
        self.user_field("accessToken")
    }

    /// Attributes the skill stored in a previous response.
    pub fn attributes(&self) -> Option<&Map<String, Value>> {
        self.raw.get("attributes").and_then(Value::as_object)
    }

    /// Look up a single session attribute.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes().and_then(|attrs| attrs.get(name))
    }

    /// Look up a string-valued session attribute.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Look up a session attribute, falling back to `default`.
    pub fn get_or<'a>(&'a self, name: &str, default: &'a Value) -> &'a Value {
        self.get(name).unwrap_or(default)
    }

    /// The session object exactly as received.
    pub const fn raw(&self) -> &Map<String, Value> {
        &self.raw
    }

    fn user_field(&self, field: &str) -> Option<&str> {
        self.raw
            .get("user")
            .and_then(|user| user.get(field))
            .and_then(Value::as_str)
    }
}
