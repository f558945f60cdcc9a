// src/store/mod.rs
// =============================================================================
// Persistence for crawled images and the search index.
//
// The crawl engine writes through the ImageSink trait: one idempotent upsert
// per image, keyed by its file URL. Writing the same file URL twice leaves a
// single stored record holding the newer values.
// =============================================================================

#[cfg(test)]
mod memory;
mod mongo;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::extract::ImageRecord;

#[cfg(test)]
pub use memory::MemorySink;
pub use mongo::MongoStore;

#[async_trait]
pub trait ImageSink: Send + Sync {
    /// Inserts the record, or replaces the one with the same `file_url`.
    async fn upsert(&self, record: &ImageRecord) -> Result<(), StoreError>;
}
