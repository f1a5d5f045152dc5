use crate::domain::Identity;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutReason {
    SignedOut,
    /// The server answered 401.
    SessionExpired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    LoggedIn(Identity),
    LoggedOut { reason: LogoutReason },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&AuthEvent) + Send + Sync>;

/// Listener registry for login/logout transitions. Listeners run synchronously,
/// in registration order, on the thread that changed the session.
#[derive(Clone, Default)]
pub struct AuthEvents {
    listeners: Arc<Mutex<Vec<(SubscriptionId, Listener)>>>,
    next_id: Arc<AtomicU64>,
}

impl AuthEvents {
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&AuthEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.lock().push((id, Arc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.lock();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.lock().len()
    }

    pub(crate) fn emit(&self, event: &AuthEvent) {
        // Snapshot first so a listener may subscribe or unsubscribe.
        let listeners: Vec<Listener> = self.lock().iter().map(|(_, l)| l.clone()).collect();
        for listener in listeners {
            listener(event);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(SubscriptionId, Listener)>> {
        self.listeners.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listeners_run_in_order() {
        let events = AuthEvents::default();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second"] {
            let seen = seen.clone();
            events.subscribe(move |_| seen.lock().unwrap().push(tag));
        }

        events.emit(&AuthEvent::LoggedOut {
            reason: LogoutReason::SignedOut,
        });
        assert_eq!(*seen.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn test_unsubscribe() {
        let events = AuthEvents::default();
        let hits = Arc::new(AtomicU64::new(0));
        let counter = hits.clone();
        let id = events.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(events.unsubscribe(id));
        assert!(!events.unsubscribe(id));
        events.emit(&AuthEvent::LoggedOut {
            reason: LogoutReason::SessionExpired,
        });
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(events.listener_count(), 0);
    }

    #[test]
    fn test_listener_can_unsubscribe_itself() {
        let events = AuthEvents::default();
        let slot: Arc<Mutex<Option<SubscriptionId>>> = Arc::new(Mutex::new(None));

        let handle = events.clone();
        let own_id = slot.clone();
        let id = events.subscribe(move |_| {
            if let Some(id) = *own_id.lock().unwrap() {
                handle.unsubscribe(id);
            }
        });
        *slot.lock().unwrap() = Some(id);

        events.emit(&AuthEvent::LoggedOut {
            reason: LogoutReason::SignedOut,
        });
        assert_eq!(events.listener_count(), 0);
    }
}
