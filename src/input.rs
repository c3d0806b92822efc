//! Keyboard state and per-key subscriptions
//!
//! Keys are normalized to lowercase. Every key-down fires the callbacks
//! subscribed to that key in registration order, including OS auto-repeat
//! key-downs unless repeat suppression is enabled. Key-up only clears state.

use std::collections::HashSet;

/// Handle returned by `subscribe`, used to unsubscribe later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

struct Listener {
    id: u64,
    key: String,
    callback: Box<dyn FnMut(&str)>,
}

#[derive(Default)]
pub struct InputManager {
    pressed: HashSet<String>,
    listeners: Vec<Listener>,
    next_id: u64,
    ignore_repeat: bool,
}

/// Lowercase form used for both subscriptions and lookups
pub fn normalize_key(key: &str) -> String {
    key.to_lowercase()
}

impl InputManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip callbacks for key-downs of keys that are already held
    pub fn with_repeat_suppression(mut self, ignore_repeat: bool) -> Self {
        self.ignore_repeat = ignore_repeat;
        self
    }

    pub fn subscribe(&mut self, key: &str, callback: impl FnMut(&str) + 'static) -> Subscription {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.push(Listener {
            id,
            key: normalize_key(key),
            callback: Box::new(callback),
        });
        Subscription(id)
    }

    /// Remove a subscription. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != subscription.0);
        self.listeners.len() != before
    }

    /// Record a key-down and fire its callbacks. Returns how many callbacks ran.
    pub fn key_down(&mut self, key: &str) -> usize {
        let key = normalize_key(key);
        let repeat = !self.pressed.insert(key.clone());
        if repeat && self.ignore_repeat {
            return 0;
        }
        let mut fired = 0;
        for listener in self.listeners.iter_mut().filter(|l| l.key == key) {
            (listener.callback)(&key);
            fired += 1;
        }
        fired
    }

    pub fn key_up(&mut self, key: &str) {
        self.pressed.remove(&normalize_key(key));
    }

    pub fn is_pressed(&self, key: &str) -> bool {
        self.pressed.contains(&normalize_key(key))
    }

    /// Forget all held keys (key-ups are lost when the window loses focus)
    pub fn release_all(&mut self) {
        self.pressed.clear();
    }

    /// Whether any callback listens for this key, regardless of repeat suppression
    pub fn is_subscribed(&self, key: &str) -> bool {
        let key = normalize_key(key);
        self.listeners.iter().any(|l| l.key == key)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}
