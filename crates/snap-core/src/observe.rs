//! Plain value holders that let their dependents find out about changes
//! without callbacks or shared ownership.
//!
//! The owner of an [`Observable`] mutates it through [`Observable::set`],
//! and every dependent keeps a [`Subscription`] which it polls when it wants
//! to know whether its cached state is stale.

/// A value with a change counter.
#[derive(Debug, Clone)]
pub struct Observable<T> {
    value: T,
    version: u64,
}

/// Remembers the last version of an [`Observable`] that was seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription {
    seen: u64,
}

impl<T> Observable<T> {
    pub fn new(value: T) -> Self {
        Self { value, version: 0 }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replace the value, notifying subscribers only if it actually changed.
    /// Returns whether the value changed.
    pub fn set(&mut self, value: T) -> bool
    where
        T: PartialEq,
    {
        if self.value == value {
            return false;
        }
        self.value = value;
        self.version += 1;
        true
    }

    /// Modify the value in place, unconditionally notifying subscribers.
    pub fn modify(&mut self, f: impl FnOnce(&mut T)) {
        f(&mut self.value);
        self.version += 1;
    }

    /// Subscribe to changes made after this call.
    pub fn subscribe(&self) -> Subscription {
        Subscription { seen: self.version }
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl Subscription {
    /// Subscription that reports a change on the first poll.
    pub fn stale() -> Self {
        Self { seen: u64::MAX }
    }

    /// Check whether the source changed since the last poll, and mark it as seen.
    pub fn poll<T>(&mut self, source: &Observable<T>) -> bool {
        let changed = self.seen != source.version;
        self.seen = source.version;
        changed
    }
}
