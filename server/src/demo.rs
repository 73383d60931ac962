//! Sample Skill
//!
//! Served by the `skill-server` binary.

use skill_common::respond;

use crate::skill::{RegistrationError, Skill};

pub const LAUNCH_SPEECH: &str = "I'm a fried chicken.";
pub const STAND_UP_SPEECH: &str = "please stand up, please stand up";

/// Launch greeting plus a `StandUp` intent.
pub fn demo_skill() -> Result<Skill, RegistrationError> {
    Ok(Skill::builder()
        .launch(|_, _| async { respond().text(LAUNCH_SPEECH).build() })
        .intent("StandUp", |_, _| async { respond().text(STAND_UP_SPEECH).build() })?
        .build())
}
