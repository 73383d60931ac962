//! Skill Handlers
//!
//! Every handler receives the same two arguments, the intent slots and the
//! optional session, and resolves to a response envelope. Handlers that need
//! neither simply ignore them.

use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use skill_common::{respond, ResponseEnvelope, Session, Slots};

/// Spoken by the built-in unknown-intent handler.
pub const UNKNOWN_INTENT_SPEECH: &str = "I'm not sure what this means.";

/// A registered request handler.
///
/// Implemented for every `Fn(Slots, Option<Session>) -> impl Future<Output =
/// ResponseEnvelope>`, so async fns and closures can be registered directly.
pub trait Handler: Send + Sync + 'static {
    fn call(&self, slots: Slots, session: Option<Session>) -> BoxFuture<'static, ResponseEnvelope>;
}

impl<F, Fut> Handler for F
where
    F: Fn(Slots, Option<Session>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ResponseEnvelope> + Send + 'static,
{
    fn call(&self, slots: Slots, session: Option<Session>) -> BoxFuture<'static, ResponseEnvelope> {
        Box::pin(self(slots, session))
    }
}

pub(crate) type BoxedHandler = Arc<dyn Handler>;

/// Default launch and session-end handler: the empty response.
pub async fn default_response(_slots: Slots, _session: Option<Session>) -> ResponseEnvelope {
    respond().build()
}

/// Default unknown-intent handler.
pub async fn unknown_intent_fallback(_slots: Slots, _session: Option<Session>) -> ResponseEnvelope {
    respond().text(UNKNOWN_INTENT_SPEECH).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use skill_common::OutputSpeech;

    #[tokio::test]
    async fn closures_and_fns_are_handlers() {
        let closure = |slots: Slots, _session: Option<Session>| async move {
            respond().text(slots.get("name").unwrap_or("nobody")).build()
        };
        let handlers: Vec<BoxedHandler> = vec![Arc::new(closure), Arc::new(default_response)];

        let slots: Slots = [("name", "Ada")].into_iter().collect();
        let first = handlers[0].call(slots, None).await;
        assert_eq!(
            first.response.output_speech,
            Some(OutputSpeech::PlainText { text: "Ada".into() })
        );

        let second = handlers[1].call(Slots::default(), None).await;
        assert_eq!(second, respond().build());
    }

    #[tokio::test]
    async fn fallback_says_it_does_not_understand() {
        let response = unknown_intent_fallback(Slots::default(), None).await;
        assert_eq!(
            response.response.output_speech,
            Some(OutputSpeech::PlainText {
                text: UNKNOWN_INTENT_SPEECH.into()
            })
        );
        assert!(response.response.should_end_session);
    }
}
