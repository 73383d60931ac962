//! Skill Definition and Dispatch
//!
//! Registers request handlers and routes decoded requests to them.

mod dispatch;
mod error;
mod handler;
mod registry;

pub use error::{DispatchError, RegistrationError, SkillError};
pub use handler::{default_response, unknown_intent_fallback, Handler, UNKNOWN_INTENT_SPEECH};
pub use registry::{validate_intent_name, Skill, SkillBuilder};
