//! Mirroring local mutations somewhere else.

use tracing::debug;

use crate::store::{LocalStore, Snapshot};

/// One change to a [`LocalStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreMutation {
    Set { key: String, value: String },
    Remove { key: String },
    Clear,
}

/// Receives every mutation of a [`MirroredStore`] after it was applied.
///
/// Forwarding cannot fail from the store's point of view; a sink deals with
/// its own failures.
pub trait MirrorSink: Send + Sync {
    fn forward(&self, mutation: StoreMutation);
}

/// A sink that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMirror;

impl MirrorSink for NoMirror {
    fn forward(&self, _mutation: StoreMutation) {}
}

/// Wraps a store so each mutation is applied locally, then forwarded.
#[derive(Debug)]
pub struct MirroredStore<S, M> {
    inner: S,
    sink: M,
}

impl<S: LocalStore, M: MirrorSink> MirroredStore<S, M> {
    pub fn new(inner: S, sink: M) -> Self {
        Self { inner, sink }
    }

    /// Load persisted entries without forwarding them.
    pub fn hydrate(&mut self, snapshot: Snapshot) {
        debug!(entries = snapshot.len(), "hydrating local store");
        for (key, value) in &snapshot {
            self.inner.set(key, value);
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn sink(&self) -> &M {
        &self.sink
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: LocalStore, M: MirrorSink> LocalStore for MirroredStore<S, M> {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) {
        self.inner.set(key, value);
        self.sink.forward(StoreMutation::Set {
            key: key.to_string(),
            value: value.to_string(),
        });
    }

    fn remove(&mut self, key: &str) -> Option<String> {
        let previous = self.inner.remove(key);
        self.sink.forward(StoreMutation::Remove {
            key: key.to_string(),
        });
        previous
    }

    fn clear(&mut self) {
        self.inner.clear();
        self.sink.forward(StoreMutation::Clear);
    }

    fn keys(&self) -> Vec<String> {
        self.inner.keys()
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}
