//! Skill Common Library
//!
//! Wire types shared by every skill host: the inbound request envelope,
//! the conversation session, intent slots and the outbound response envelope.

pub mod envelope;
pub mod error;
pub mod response;
pub mod session;
pub mod slots;

pub use envelope::{declared_timestamp, parse_envelope, IntentRequest, RequestEnvelope, RequestKind, SkillRequest};
pub use error::{CommonError, Result};
pub use response::{reprompt, reprompt_ssml, respond, OutputSpeech, Reprompt, ResponseBody, ResponseBuilder, ResponseEnvelope};
pub use session::Session;
pub use slots::Slots;
