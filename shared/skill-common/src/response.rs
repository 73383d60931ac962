//! Response Envelope
//!
//! The JSON document a skill returns to the platform, and the builder used
//! by handlers to assemble it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Protocol version stamped on every response.
pub const RESPONSE_VERSION: &str = "1.0";

/// Complete response returned by a handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub version: String,
    pub response: ResponseBody,
    /// Always serialized, empty when the skill stores nothing.
    #[serde(default)]
    pub session_attributes: Map<String, Value>,
}

/// Speech and session control for one turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    pub should_end_session: bool,
}

/// Speech spoken if the user does not answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

/// Speech output, either plain text or SSML markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OutputSpeech {
    PlainText { text: String },
    #[serde(rename = "SSML")]
    Ssml { ssml: String },
}

impl OutputSpeech {
    /// Pick plain text over markup; empty strings count as absent.
    fn select(text: Option<String>, ssml: Option<String>) -> Option<Self> {
        let text = text.filter(|t| !t.is_empty());
        let ssml = ssml.filter(|s| !s.is_empty());
        match (text, ssml) {
            (Some(text), _) => Some(Self::PlainText { text }),
            (None, Some(ssml)) => Some(Self::Ssml { ssml }),
            (None, None) => None,
        }
    }
}

impl ResponseEnvelope {
    /// Start building a response.
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder::new()
    }
}

/// Builder for [`ResponseEnvelope`].
///
/// With no inputs it produces an empty plain-text speech block and ends the
/// session. Ending the session is an explicit choice; it is never inferred
/// from whether the request carried a session.
#[derive(Debug, Clone)]
pub struct ResponseBuilder {
    text: Option<String>,
    ssml: Option<String>,
    reprompt_text: Option<String>,
    reprompt_ssml: Option<String>,
    session_attributes: Map<String, Value>,
    end_session: bool,
}

impl Default for ResponseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            text: None,
            ssml: None,
            reprompt_text: None,
            reprompt_ssml: None,
            session_attributes: Map::new(),
            end_session: true,
        }
    }

    /// Plain-text speech. Takes precedence over [`Self::ssml`].
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// SSML speech.
    #[must_use]
    pub fn ssml(mut self, ssml: impl Into<String>) -> Self {
        self.ssml = Some(ssml.into());
        self
    }

    /// Plain-text reprompt. Takes precedence over [`Self::reprompt_ssml`].
    #[must_use]
    pub fn reprompt_text(mut self, text: impl Into<String>) -> Self {
        self.reprompt_text = Some(text.into());
        self
    }

    /// SSML reprompt.
    #[must_use]
    pub fn reprompt_ssml(mut self, ssml: impl Into<String>) -> Self {
        self.reprompt_ssml = Some(ssml.into());
        self
    }

    /// Replace all session attributes.
    #[must_use]
    pub fn session_attributes(mut self, attributes: Map<String, Value>) -> Self {
        self.session_attributes = attributes;
        self
    }

    /// Set one session attribute.
    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.session_attributes.insert(name.into(), value.into());
        self
    }

    /// Whether the platform should close the session after this turn.
    #[must_use]
    pub fn end_session(mut self, end: bool) -> Self {
        self.end_session = end;
        self
    }

    pub fn build(self) -> ResponseEnvelope {
        let output_speech = OutputSpeech::select(self.text, self.ssml).unwrap_or(
            OutputSpeech::PlainText {
                text: String::new(),
            },
        );
        let reprompt = OutputSpeech::select(self.reprompt_text, self.reprompt_ssml)
            .map(|output_speech| Reprompt { output_speech });

        ResponseEnvelope {
            version: RESPONSE_VERSION.to_string(),
            response: ResponseBody {
                output_speech: Some(output_speech),
                reprompt,
                should_end_session: self.end_session,
            },
            session_attributes: self.session_attributes,
        }
    }
}

/// Start a response that ends the session.
pub fn respond() -> ResponseBuilder {
    ResponseBuilder::new()
}

/// Keep the session open and reprompt the user with plain text.
pub fn reprompt(text: impl Into<String>) -> ResponseBuilder {
    ResponseBuilder::new().reprompt_text(text).end_session(false)
}

/// Keep the session open and reprompt the user with SSML.
pub fn reprompt_ssml(ssml: impl Into<String>) -> ResponseBuilder {
    ResponseBuilder::new().reprompt_ssml(ssml).end_session(false)
}
