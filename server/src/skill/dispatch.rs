//! Request Dispatch
//!
//! | Request                | Handler                                  |
//! |------------------------|------------------------------------------|
//! | `LaunchRequest`        | launch, with the session if present      |
//! | `IntentRequest`        | the intent's handler, else unknown-intent|
//! | `SessionEndedRequest`  | session-end, with no slots or session    |
//! | anything else          | [`DispatchError::UnknownRequestKind`]    |

use skill_common::{parse_envelope, IntentRequest, RequestEnvelope, RequestKind, ResponseEnvelope, Slots};
use tracing::{debug, warn};

use super::error::{DispatchError, SkillError};
use super::registry::Skill;

impl Skill {
    /// Route a decoded request to its handler and return the handler's
    /// response.
    #[tracing::instrument(skip(self, envelope), fields(kind = envelope.request.kind.type_name()))]
    pub async fn dispatch(&self, envelope: RequestEnvelope) -> Result<ResponseEnvelope, DispatchError> {
        let RequestEnvelope {
            session, request, ..
        } = envelope;

        let response = match request.kind {
            RequestKind::Launch => self.launch.call(Slots::default(), session),
            RequestKind::Intent(IntentRequest { name, slots }) => match self.intents.get(&name) {
                Some(handler) => {
                    debug!(intent = %name, slots = slots.len(), "Dispatching intent");
                    handler.call(slots, session)
                }
                None => {
                    debug!(intent = %name, "No handler registered for intent");
                    self.unknown_intent.call(slots, session)
                }
            },
            RequestKind::SessionEnded { reason } => {
                debug!(reason = ?reason, "Session ended");
                self.session_end.call(Slots::default(), None)
            }
            RequestKind::Unknown(kind) => {
                warn!(kind = %kind, "Unsupported request type");
                return Err(DispatchError::UnknownRequestKind(kind));
            }
        };

        Ok(response.await)
    }

    /// Decode a raw request body and dispatch it.
    pub async fn handle(&self, body: &[u8]) -> Result<ResponseEnvelope, SkillError> {
        let envelope = parse_envelope(body)?;
        Ok(self.dispatch(envelope).await?)
    }
}
