// Author: Dustin Pilgrim
// License: MIT

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};

use crate::core::events::ActivityKind;

type Callback = Arc<dyn Fn(ActivityKind) + Send + Sync>;

struct Listener {
    kinds: Vec<ActivityKind>,
    callback: Callback,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: HashMap<u64, Listener>,
}

/// Host-side source of raw interaction events.
///
/// The host calls [`ActivityBus::dispatch`] from its input handlers; the
/// monitor registers a listener only while a session is tracked.
#[derive(Clone, Default)]
pub struct ActivityBus {
    inner: Arc<Mutex<Registry>>,
}

impl ActivityBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for `kinds`. The listener lives as long as the guard.
    pub fn register<F>(&self, kinds: &[ActivityKind], callback: F) -> ListenerGuard
    where
        F: Fn(ActivityKind) + Send + Sync + 'static,
    {
        let mut reg = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let id = reg.next_id;
        reg.next_id += 1;

        reg.listeners.insert(
            id,
            Listener {
                kinds: kinds.to_vec(),
                callback: Arc::new(callback),
            },
        );

        tracing::debug!("activity listener {} registered for {} kinds", id, kinds.len());

        ListenerGuard {
            bus: Arc::downgrade(&self.inner),
            id,
        }
    }

    /// Deliver one raw event. Returns how many listeners saw it.
    pub fn dispatch(&self, kind: ActivityKind) -> usize {
        // Snapshot callbacks so a listener may drop its own guard re-entrantly.
        let callbacks: Vec<Callback> = {
            let reg = self.inner.lock().unwrap_or_else(|e| e.into_inner());
            reg.listeners
                .values()
                .filter(|l| l.kinds.contains(&kind))
                .map(|l| Arc::clone(&l.callback))
                .collect()
        };

        for cb in &callbacks {
            cb(kind);
        }

        callbacks.len()
    }

    pub fn listener_count(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .listeners
            .len()
    }
}

/// Registration handle; dropping it removes the listener.
pub struct ListenerGuard {
    bus: Weak<Mutex<Registry>>,
    id: u64,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        let Some(bus) = self.bus.upgrade() else {
            return;
        };
        let mut reg = bus.lock().unwrap_or_else(|e| e.into_inner());
        if reg.listeners.remove(&self.id).is_some() {
            tracing::debug!("activity listener {} removed", self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn dispatch_reaches_matching_listeners_only() {
        let bus = ActivityBus::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let h = Arc::clone(&hits);
        let _guard = bus.register(&[ActivityKind::KeyDown, ActivityKind::Click], move |_| {
            h.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(bus.dispatch(ActivityKind::KeyDown), 1);
        assert_eq!(bus.dispatch(ActivityKind::PointerMove), 0);
        assert_eq!(bus.dispatch(ActivityKind::Click), 1);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn dropping_guard_unregisters() {
        let bus = ActivityBus::new();
        let guard = bus.register(&ActivityKind::ALL, |_| {});
        let other = bus.register(&[ActivityKind::Scroll], |_| {});
        assert_eq!(bus.listener_count(), 2);

        drop(guard);
        assert_eq!(bus.listener_count(), 1);
        assert_eq!(bus.dispatch(ActivityKind::Click), 0);

        drop(other);
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn guard_outliving_bus_is_harmless() {
        let bus = ActivityBus::new();
        let guard = bus.register(&[ActivityKind::Scroll], |_| {});
        drop(bus);
        drop(guard);
    }
}
