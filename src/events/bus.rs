use tokio::sync::broadcast;
use tracing::debug;

/// Cross-component notifications. These are one-to-many: the publisher does
/// not know its observers, and multiple screens may react to the same event
/// (e.g. the dashboard re-fetches and the payment flow dismisses itself on
/// `PaymentCompleted`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppEvent {
    /// A checkout attempt reached a verified successful outcome.
    PaymentCompleted { payment_id: i64 },
    /// The session transitioned to unauthenticated (explicit sign-out or a
    /// server-rejected credential). Screens show sign-in on their next render.
    SessionInvalidated,
}

/// A typed broadcast bus over `tokio::sync::broadcast`. Publishing never
/// blocks and is fine with zero subscribers.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<AppEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(32);
        EventBus { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.tx.subscribe()
    }

    pub fn publish(&self, event: AppEvent) {
        debug!("Publishing event: {:?}", event);
        // Send only fails when there are no subscribers, which is legal.
        let _ = self.tx.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every subscriber sees every published event.
    #[tokio::test]
    async fn test_publish_reaches_all_subscribers() {
        let bus = EventBus::new();
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();

        bus.publish(AppEvent::PaymentCompleted { payment_id: 42 });

        assert_eq!(
            first.recv().await.expect("event expected"),
            AppEvent::PaymentCompleted { payment_id: 42 }
        );
        assert_eq!(
            second.recv().await.expect("event expected"),
            AppEvent::PaymentCompleted { payment_id: 42 }
        );
    }

    /// Publishing with nobody listening is not an error.
    #[tokio::test]
    async fn test_publish_without_subscribers_is_ok() {
        let bus = EventBus::new();
        bus.publish(AppEvent::SessionInvalidated);
    }
}
