//! Toolgate Storage — the durable preference substrate.
//!
//! The confirmation engine reads and writes its persisted preferences
//! through the [`PreferenceStore`] trait: a whole-document `read` and an
//! atomic full-document `write`. Hosts back it with whatever durability
//! they have (a settings file, a database, a preference service);
//! [`MemoryPreferenceStore`] is the in-process implementation used by tests
//! and ephemeral embeddings.
//!
//! The document model deliberately replaces a live preference subscription:
//! the engine always works against an explicit snapshot, so there is no
//! hidden global mutable state between resolution and writeback.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod error;
pub mod store;

pub use error::{StorageError, StorageResult};
pub use store::{MemoryPreferenceStore, PreferenceStore};
