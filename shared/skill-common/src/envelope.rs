//! Request Envelope
//!
//! Decodes the JSON body of an inbound skill request into a typed envelope.
//! Only the shape is validated here; whether the request kind is one a skill
//! can serve is decided by the dispatcher.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::{CommonError, Result};
use crate::session::Session;
use crate::slots::Slots;

/// A decoded skill request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestEnvelope {
    /// Protocol version declared by the platform.
    pub version: Option<String>,
    /// Conversation session, absent for out-of-session requests.
    pub session: Option<Session>,
    /// The request itself.
    pub request: SkillRequest,
}

/// Fields common to every request kind.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillRequest {
    pub request_id: Option<String>,
    /// Declared timestamp, `YYYY-MM-DDTHH:MM:SSZ`.
    pub timestamp: Option<String>,
    pub locale: Option<String>,
    pub kind: RequestKind,
}

/// Request kinds a skill can receive.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestKind {
    /// The user opened the skill without naming an intent.
    Launch,
    /// The user asked for a named intent.
    Intent(IntentRequest),
    /// The platform closed the session.
    SessionEnded {
        /// Why the session ended (`USER_INITIATED`, `ERROR`, ...).
        reason: Option<String>,
    },
    /// Any other declared `request.type`.
    Unknown(String),
}

/// Payload of an `IntentRequest`.
#[derive(Debug, Clone, PartialEq)]
pub struct IntentRequest {
    pub name: String,
    pub slots: Slots,
}

impl RequestKind {
    /// The wire name of this kind.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Launch => "LaunchRequest",
            Self::Intent(_) => "IntentRequest",
            Self::SessionEnded { .. } => "SessionEndedRequest",
            Self::Unknown(kind) => kind,
        }
    }
}

#[derive(Deserialize)]
struct WireEnvelope {
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    session: Option<Session>,
    request: WireRequest,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireRequest {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    request_id: Option<String>,
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default)]
    locale: Option<String>,
    #[serde(default)]
    intent: Option<WireIntent>,
    #[serde(default)]
    reason: Option<String>,
}

#[derive(Deserialize)]
struct WireIntent {
    name: String,
    #[serde(default)]
    slots: Option<HashMap<String, WireSlot>>,
}

#[derive(Deserialize)]
struct WireSlot {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    value: Option<String>,
}

impl TryFrom<WireEnvelope> for RequestEnvelope {
    type Error = CommonError;

    fn try_from(wire: WireEnvelope) -> Result<Self> {
        let WireRequest {
            kind,
            request_id,
            timestamp,
            locale,
            intent,
            reason,
        } = wire.request;

        let kind = match kind.as_str() {
            "LaunchRequest" => RequestKind::Launch,
            "IntentRequest" => {
                let intent = intent.ok_or_else(|| {
                    CommonError::MalformedBody("IntentRequest without intent".into())
                })?;
                RequestKind::Intent(IntentRequest {
                    name: intent.name,
                    slots: flatten_slots(intent.slots.unwrap_or_default()),
                })
            }
            "SessionEndedRequest" => RequestKind::SessionEnded { reason },
            _ => RequestKind::Unknown(kind),
        };

        Ok(Self {
            version: wire.version,
            session: wire.session,
            request: SkillRequest {
                request_id,
                timestamp,
                locale,
                kind,
            },
        })
    }
}

/// Slot collections are keyed by slot name, and each slot repeats its name.
/// The inner name wins when both are present.
fn flatten_slots(slots: HashMap<String, WireSlot>) -> Slots {
    slots
        .into_iter()
        .filter_map(|(key, slot)| slot.value.map(|value| (slot.name.unwrap_or(key), value)))
        .collect()
}

/// Decode a raw request body into a [`RequestEnvelope`].
pub fn parse_envelope(body: &[u8]) -> Result<RequestEnvelope> {
    let wire: WireEnvelope = serde_json::from_slice(body)?;
    RequestEnvelope::try_from(wire)
}

impl RequestEnvelope {
    /// Decode a raw request body. Alias of [`parse_envelope`].
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        parse_envelope(body)
    }
}

#[derive(Deserialize)]
struct TimestampProbe {
    #[serde(default)]
    request: Option<TimestampProbeRequest>,
}

#[derive(Deserialize)]
struct TimestampProbeRequest {
    #[serde(default)]
    timestamp: Option<serde_json::Value>,
}

/// Read `request.timestamp` without decoding the rest of the envelope.
///
/// Returns `Ok(None)` when the field is absent or not a string; fails only if
/// the body is not a JSON object.
pub fn declared_timestamp(body: &[u8]) -> Result<Option<String>> {
    let probe: TimestampProbe = serde_json::from_slice(body)?;
    Ok(probe
        .request
        .and_then(|r| r.timestamp)
        .and_then(|ts| ts.as_str().map(str::to_owned)))
}
