//! Mirroring the frame's local store to the host.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::warn;

use toolframe_local_store::{
    InMemoryStore, LocalStore, MirrorSink, MirroredStore, Snapshot, StoreMutation,
};
use toolframe_protocol::HostRequest;
use toolframe_rpc::HostCaller;

/// Forwards store mutations to the host as fire-and-forget requests.
#[derive(Debug, Clone)]
pub struct HostMirror {
    caller: HostCaller,
}

impl HostMirror {
    pub fn new(caller: HostCaller) -> Self {
        Self { caller }
    }
}

impl MirrorSink for HostMirror {
    fn forward(&self, mutation: StoreMutation) {
        let request = match mutation {
            StoreMutation::Set { key, value } => HostRequest::MirrorStoreSet { key, value },
            StoreMutation::Remove { key } => HostRequest::MirrorStoreRemove { key },
            StoreMutation::Clear => HostRequest::MirrorStoreClear,
        };
        let kind = request.kind();
        if let Err(e) = self.caller.notify(request) {
            warn!(kind, error = %e, "failed to mirror store mutation to host");
        }
    }
}

/// The frame's local store, shared between tool code and the runtime.
///
/// Writes land locally at once; the host copy follows.
#[derive(Debug, Clone)]
pub struct FrameStore {
    inner: Arc<Mutex<MirroredStore<InMemoryStore, HostMirror>>>,
}

impl FrameStore {
    pub fn new(mirror: HostMirror) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MirroredStore::new(InMemoryStore::new(), mirror))),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MirroredStore<InMemoryStore, HostMirror>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn hydrate(&self, snapshot: Snapshot) {
        self.lock().hydrate(snapshot);
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key)
    }

    pub fn set(&self, key: &str, value: &str) {
        self.lock().set(key, value);
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        self.lock().remove(key)
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn keys(&self) -> Vec<String> {
        self.lock().keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use collection_literals::btree;
    use toolframe_protocol::{FrameIdentity, HashB64};
    use toolframe_rpc::testing::ScriptedHost;
    use toolframe_rpc::ChannelLink;

    fn identity() -> FrameIdentity {
        FrameIdentity::new(HashB64::parse("uhCkkAB12xY").unwrap())
    }

    #[test]
    fn mutations_reach_the_host() {
        let host = ScriptedHost::new();
        let store = FrameStore::new(HostMirror::new(HostCaller::new(
            Arc::new(host.clone()),
            identity(),
        )));

        store.set("theme", "dark");
        store.remove("theme");
        store.clear();

        assert_eq!(
            host.requests(),
            vec![
                HostRequest::MirrorStoreSet {
                    key: "theme".to_string(),
                    value: "dark".to_string()
                },
                HostRequest::MirrorStoreRemove {
                    key: "theme".to_string()
                },
                HostRequest::MirrorStoreClear,
            ]
        );
    }

    #[test]
    fn closed_link_does_not_block_local_writes() {
        let (link, rx) = ChannelLink::new();
        drop(rx);
        let store = FrameStore::new(HostMirror::new(HostCaller::new(Arc::new(link), identity())));

        store.set("draft", "hello");
        assert_eq!(store.get("draft"), Some("hello".to_string()));
        assert_eq!(store.remove("draft"), Some("hello".to_string()));
    }

    #[test]
    fn hydration_stays_local() {
        let host = ScriptedHost::new();
        let store = FrameStore::new(HostMirror::new(HostCaller::new(
            Arc::new(host.clone()),
            identity(),
        )));
        store.hydrate(btree! { "lang".to_string() => "en".to_string() });

        assert_eq!(store.keys(), vec!["lang".to_string()]);
        assert!(host.kinds().is_empty());
    }
}
