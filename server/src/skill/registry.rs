//! Handler Registration
//!
//! A [`Skill`] is assembled once with [`SkillBuilder`] before serving and is
//! read-only afterwards.
//!
//! ```
//! use skill_server::skill::Skill;
//! use skill_common::respond;
//!
//! let skill = Skill::builder()
//!     .launch(|_, _| async { respond().text("Hello").build() })
//!     .intent("StandUp", |_, _| async { respond().text("Standing up").build() })
//!     .unwrap()
//!     .build();
//! assert!(skill.has_intent("StandUp"));
//! ```
//!
//! Handlers must take `(Slots, Option<Session>)`; anything else is rejected
//! when the skill is compiled:
//!
//! ```compile_fail
//! use skill_server::skill::Skill;
//! use skill_common::respond;
//!
//! let skill = Skill::builder()
//!     .intent("StandUp", |name: String| async move { respond().text(name).build() })
//!     .unwrap()
//!     .build();
//! ```

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use skill_common::{ResponseEnvelope, Session, Slots};
use tracing::debug;

use super::error::RegistrationError;
use super::handler::{default_response, unknown_intent_fallback, BoxedHandler};

/// Intent names as the platform defines them, including built-ins such as
/// `AMAZON.HelpIntent`.
static INTENT_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_.]*$").unwrap());

/// Check an intent name before it is registered.
pub fn validate_intent_name(name: &str) -> Result<(), RegistrationError> {
    if !INTENT_NAME_REGEX.is_match(name) {
        return Err(RegistrationError::InvalidIntentName(name.to_string()));
    }
    Ok(())
}

/// A voice application: its registered handlers.
pub struct Skill {
    pub(super) launch: BoxedHandler,
    pub(super) intents: HashMap<String, BoxedHandler>,
    pub(super) unknown_intent: BoxedHandler,
    pub(super) session_end: BoxedHandler,
}

impl Skill {
    pub fn builder() -> SkillBuilder {
        SkillBuilder::new()
    }

    /// Whether a handler is registered for `name`.
    pub fn has_intent(&self, name: &str) -> bool {
        self.intents.contains_key(name)
    }

    /// Registered intent names, in no particular order.
    pub fn intent_names(&self) -> impl Iterator<Item = &str> {
        self.intents.keys().map(String::as_str)
    }
}

impl Default for Skill {
    fn default() -> Self {
        SkillBuilder::new().build()
    }
}

impl std::fmt::Debug for Skill {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Skill")
            .field("intents", &self.intents.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

/// Collects handler registrations for a [`Skill`].
///
/// Launch, unknown-intent and session-end start out as built-in defaults.
/// Registering a slot twice keeps the last handler.
pub struct SkillBuilder {
    launch: BoxedHandler,
    intents: HashMap<String, BoxedHandler>,
    unknown_intent: BoxedHandler,
    session_end: BoxedHandler,
}

impl SkillBuilder {
    pub fn new() -> Self {
        Self {
            launch: Arc::new(default_response),
            intents: HashMap::new(),
            unknown_intent: Arc::new(unknown_intent_fallback),
            session_end: Arc::new(default_response),
        }
    }

    /// Handler for `LaunchRequest`.
    #[must_use]
    pub fn launch<F, Fut>(mut self, handler: F) -> Self
    where
        F: Fn(Slots, Option<Session>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ResponseEnvelope> + Send + 'static,
    {
        self.launch = Arc::new(handler);
        self
    }

    /// Handler for the intent called `name`.
    pub fn intent<F, Fut>(
        mut self,
        name: impl Into<String>,
        handler: F,
    ) -> Result<Self, RegistrationError>
    where
        F: Fn(Slots, Option<Session>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ResponseEnvelope> + Send + 'static,
    {
        let name = name.into();
        validate_intent_name(&name)?;

        if self.intents.insert(name.clone(), Arc::new(handler)).is_some() {
            debug!(intent = %name, "Replaced intent handler");
        }
        Ok(self)
    }

    /// Handler for intents with no registered handler.
    #[must_use]
    pub fn unknown_intent<F, Fut>(mut self, handler: F) -> Self
    where
        F: Fn(Slots, Option<Session>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ResponseEnvelope> + Send + 'static,
    {
        self.unknown_intent = Arc::new(handler);
        self
    }

    /// Handler for `SessionEndedRequest`. Always called with empty slots and
    /// no session.
    #[must_use]
    pub fn session_end<F, Fut>(mut self, handler: F) -> Self
    where
        F: Fn(Slots, Option<Session>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ResponseEnvelope> + Send + 'static,
    {
        self.session_end = Arc::new(handler);
        self
    }

    pub fn build(self) -> Skill {
        Skill {
            launch: self.launch,
            intents: self.intents,
            unknown_intent: self.unknown_intent,
            session_end: self.session_end,
        }
    }
}

impl Default for SkillBuilder {
    fn default() -> Self {
        Self::new()
    }
}
