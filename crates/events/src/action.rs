//! Ordered observer channel.
//!
//! An [`Action`] is a typed extension point: interested parties register a
//! handler and every [`Action::notify`] calls the handlers in registration
//! order with a shared reference to the payload.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Handler invoked on every notification.
pub type Handler<T> = Arc<dyn Fn(&T) + Send + Sync + 'static>;

/// Identifies a registration so it can be removed later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(u64);

/// Typed observer channel with register/unregister/notify.
pub struct Action<T> {
    handlers: Mutex<Vec<(HandlerId, Handler<T>)>>,
    next_id: AtomicU64,
}

impl<T> Default for Action<T> {
    fn default() -> Self {
        Self {
            handlers: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl<T> Action<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler.
    ///
    /// Registering a handler that is already registered (same `Arc`) keeps
    /// its original position and returns the original id.
    pub fn register(&self, handler: Handler<T>) -> HandlerId {
        let mut handlers = self.lock();

        if let Some((id, _)) = handlers.iter().find(|(_, h)| same_handler(h, &handler)) {
            return *id;
        }

        let id = HandlerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        handlers.push((id, handler));
        id
    }

    /// Remove a registration. Returns `false` if the id was not registered.
    pub fn unregister(&self, id: HandlerId) -> bool {
        let mut handlers = self.lock();
        let before = handlers.len();
        handlers.retain(|(registered, _)| *registered != id);
        handlers.len() != before
    }

    /// Remove a handler by identity. Returns `false` if it was not registered.
    pub fn unregister_handler(&self, handler: &Handler<T>) -> bool {
        let mut handlers = self.lock();
        let before = handlers.len();
        handlers.retain(|(_, h)| !same_handler(h, handler));
        handlers.len() != before
    }

    /// Call every registered handler in registration order.
    ///
    /// Handlers run against a snapshot of the registrations, so a handler may
    /// register or unregister without deadlocking; such changes apply from
    /// the next notification.
    pub fn notify(&self, payload: &T) {
        let snapshot: Vec<Handler<T>> = self.lock().iter().map(|(_, h)| Arc::clone(h)).collect();

        tracing::trace!(handlers = snapshot.len(), "notifying observers");

        for handler in snapshot {
            handler(payload);
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(HandlerId, Handler<T>)>> {
        self.handlers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> std::fmt::Debug for Action<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Action")
            .field("handlers", &self.len())
            .finish_non_exhaustive()
    }
}

/// Pointer identity on the data half only; vtable pointers are not unique.
fn same_handler<T>(a: &Handler<T>, b: &Handler<T>) -> bool {
    std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder(log: &Arc<Mutex<Vec<String>>>, tag: &'static str) -> Handler<bool> {
        let log = Arc::clone(log);
        Arc::new(move |value: &bool| log.lock().unwrap().push(format!("{tag}:{value}")))
    }

    #[test]
    fn test_notify_in_registration_order() {
        let action = Action::<bool>::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        action.register(recorder(&log, "first"));
        action.register(recorder(&log, "second"));
        action.register(recorder(&log, "third"));
        action.notify(&true);

        assert_eq!(
            *log.lock().unwrap(),
            vec!["first:true", "second:true", "third:true"]
        );
    }

    #[test]
    fn test_duplicate_registration_is_collapsed() {
        let action = Action::<bool>::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let handler = recorder(&log, "only");

        let first = action.register(Arc::clone(&handler));
        let second = action.register(Arc::clone(&handler));

        assert_eq!(first, second);
        assert_eq!(action.len(), 1);

        action.notify(&false);
        assert_eq!(log.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_unregister_by_id() {
        let action = Action::<bool>::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        let id = action.register(recorder(&log, "gone"));
        action.register(recorder(&log, "kept"));

        assert!(action.unregister(id));
        assert!(!action.unregister(id));

        action.notify(&true);
        assert_eq!(*log.lock().unwrap(), vec!["kept:true"]);
    }

    #[test]
    fn test_unregister_by_handler() {
        let action = Action::<bool>::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let handler = recorder(&log, "gone");

        action.register(Arc::clone(&handler));
        assert!(action.unregister_handler(&handler));
        assert!(action.is_empty());

        action.notify(&true);
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_register_during_notify_applies_next_time() {
        let action = Arc::new(Action::<bool>::new());
        let log = Arc::new(Mutex::new(Vec::new()));

        let late = recorder(&log, "late");
        let action_clone = Arc::clone(&action);
        action.register(Arc::new(move |_: &bool| {
            action_clone.register(Arc::clone(&late));
        }));

        action.notify(&true);
        assert!(log.lock().unwrap().is_empty());

        action.notify(&true);
        assert_eq!(*log.lock().unwrap(), vec!["late:true"]);
    }
}
