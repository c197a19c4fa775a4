//! Persistence seam for indexed collections, plus an in-memory backend.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::corpus::IndexedCollection;
use crate::error::Result;

/// A storage backend for indexed collections, keyed by document filename.
///
/// Keying is by filename only — no content hash, no timestamp. Storing a
/// changed document under a name that is already present keeps the old
/// embeddings until the caller invalidates the entry with
/// [`remove`](CollectionStore::remove). That trade-off is deliberate;
/// callers that re-process uploads must remove first.
#[async_trait]
pub trait CollectionStore: Send + Sync {
    /// Load the collection stored under `filename`, if any.
    async fn load(&self, filename: &str) -> Result<Option<IndexedCollection>>;

    /// Store `collection` under `filename`, replacing any previous entry.
    async fn save(&self, filename: &str, collection: &IndexedCollection) -> Result<()>;

    /// Remove the entry for `filename`. No-op if absent.
    async fn remove(&self, filename: &str) -> Result<()>;
}

/// An in-memory [`CollectionStore`] backed by a `HashMap`.
///
/// Suitable for development, testing, and single-process deployments
/// where collections do not need to outlive the process. All operations
/// are async-safe via `tokio::sync::RwLock`.
#[derive(Debug, Default)]
pub struct InMemoryCollectionStore {
    entries: RwLock<HashMap<String, IndexedCollection>>,
}

impl InMemoryCollectionStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CollectionStore for InMemoryCollectionStore {
    async fn load(&self, filename: &str) -> Result<Option<IndexedCollection>> {
        let entries = self.entries.read().await;
        Ok(entries.get(filename).cloned())
    }

    async fn save(&self, filename: &str, collection: &IndexedCollection) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(filename.to_string(), collection.clone());
        Ok(())
    }

    async fn remove(&self, filename: &str) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.remove(filename);
        Ok(())
    }
}
