//=========================================================================
// Window Registry
//=========================================================================
//
// Per-context routing table from native window key to window inbox.
//
// Owned by the context instance rather than kept in a global, so several
// contexts (one per test, for instance) never see each other's windows.
// Entries are inserted at creation and erased when the window is gone:
// either its inbox receiver was dropped or the OS reported destruction.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::native_event::NativeEvent;

//=== WindowRegistry ======================================================

#[derive(Debug)]
pub struct WindowRegistry<K> {
    routes: HashMap<K, Sender<NativeEvent>>,
}

impl<K: Copy + Eq + Hash + Debug> WindowRegistry<K> {
    pub fn new() -> Self {
        Self { routes: HashMap::new() }
    }

    /// Opens a route for `key` and returns the receiving end for its window.
    pub fn register(&mut self, key: K) -> Receiver<NativeEvent> {
        let (sender, receiver) = unbounded();
        if self.routes.insert(key, sender).is_some() {
            debug!(target: "platform", "Replaced stale route for window {:?}", key);
        }
        receiver
    }

    /// Delivers `event` to the window registered under `key`.
    ///
    /// Returns `false` if the window is unknown or gone; gone windows are
    /// erased. `Destroyed` is delivered and then erases the route.
    pub fn route(&mut self, key: K, event: NativeEvent) -> bool {
        let Some(sender) = self.routes.get(&key) else {
            trace!(target: "platform", "Dropped {:?} for unregistered window {:?}", event, key);
            return false;
        };

        let destroyed = matches!(event, NativeEvent::Destroyed);
        let delivered = sender.send(event).is_ok();

        if !delivered || destroyed {
            self.routes.remove(&key);
            debug!(target: "platform", "Erased route for window {:?}", key);
        }
        delivered
    }

    /// Delivers a copy of `event` to every live window.
    pub fn broadcast(&mut self, event: &NativeEvent) {
        self.routes.retain(|key, sender| {
            let alive = sender.send(event.clone()).is_ok();
            if !alive {
                debug!(target: "platform", "Erased route for window {:?}", key);
            }
            alive
        });
    }

    pub fn unregister(&mut self, key: K) -> bool {
        self.routes.remove(&key).is_some()
    }
}

impl<K: Copy + Eq + Hash + Debug> Default for WindowRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_to_registered_window_only() {
        let mut registry = WindowRegistry::<u32>::new();
        let first = registry.register(1);
        let second = registry.register(2);

        assert!(registry.route(2, NativeEvent::Focused(true)));
        assert!(first.try_recv().is_err());
        assert_eq!(second.try_recv(), Ok(NativeEvent::Focused(true)));
    }

    #[test]
    fn unknown_key_is_dropped() {
        let mut registry = WindowRegistry::<u32>::new();
        assert!(!registry.route(9, NativeEvent::Minimized));
    }

    #[test]
    fn dropped_window_is_erased_on_next_route() {
        let mut registry = WindowRegistry::<u32>::new();
        let inbox = registry.register(1);
        drop(inbox);

        assert!(!registry.route(1, NativeEvent::Minimized));
        assert!(!registry.routes.contains_key(&1));
    }

    #[test]
    fn destroyed_is_delivered_then_erased() {
        let mut registry = WindowRegistry::<u32>::new();
        let inbox = registry.register(1);

        assert!(registry.route(1, NativeEvent::Destroyed));
        assert_eq!(inbox.try_recv(), Ok(NativeEvent::Destroyed));
        assert!(registry.routes.is_empty());
    }

    #[test]
    fn broadcast_reaches_every_live_window() {
        let mut registry = WindowRegistry::<u32>::new();
        let first = registry.register(1);
        let second = registry.register(2);
        drop(registry.register(3));

        registry.broadcast(&NativeEvent::Suspended);

        assert_eq!(first.try_recv(), Ok(NativeEvent::Suspended));
        assert_eq!(second.try_recv(), Ok(NativeEvent::Suspended));
        assert_eq!(registry.routes.len(), 2);
    }
}
