//! Frame-local key-value store.
//!
//! A frame keeps small persistent state (settings, last-opened views) in a
//! flat string map. The host owns the durable copy: the frame starts from a
//! [`Snapshot`] the host hands over, and every later mutation is mirrored back
//! through a [`MirrorSink`].
//!
//! ```rust
//! use toolframe_local_store::{InMemoryStore, LocalStore, MirroredStore, NoMirror};
//!
//! let mut store = MirroredStore::new(InMemoryStore::new(), NoMirror);
//! store.set("theme", "dark");
//! assert_eq!(store.get("theme"), Some("dark".to_string()));
//! ```

mod error;
mod mirror;
mod store;

pub use error::{Result, StoreError};
pub use mirror::{MirrorSink, MirroredStore, NoMirror, StoreMutation};
pub use store::{parse_snapshot, InMemoryStore, LocalStore, Snapshot};
