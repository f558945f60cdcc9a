// src/store/mongo.rs
// =============================================================================
// MongoDB-backed storage.
//
// Collections:
// - image_files:     one document per image, keyed by file_url (crawler output)
// - image_documents: per-image search metadata, _id = file_url
// - image_terms:     inverted index, one document per term
// =============================================================================

use async_trait::async_trait;
use bson::{doc, Document};
use futures::TryStreamExt;
use mongodb::options::UpdateOptions;
use mongodb::{Client, Collection, Database};
use tracing::{info, warn};

use super::ImageSink;
use crate::config::StoreSettings;
use crate::error::StoreError;
use crate::extract::ImageRecord;
use crate::index::{ImageIndex, IndexedImage, TermEntry};

const IMAGES: &str = "image_files";
const DOCUMENTS: &str = "image_documents";
const TERMS: &str = "image_terms";
const TERM_BATCH: usize = 1000;

pub struct MongoStore {
    images: Collection<ImageRecord>,
    documents: Collection<IndexedImage>,
    terms: Collection<TermEntry>,
}

impl MongoStore {
    // Connects and pings, so a bad URI fails at startup rather than on the
    // first upsert
    pub async fn connect(settings: &StoreSettings) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(&settings.uri).await?;
        let db: Database = client.database(&settings.database);
        db.run_command(doc! { "ping": 1 }, None).await?;

        info!(database = %settings.database, "connected to image store");

        Ok(Self {
            images: db.collection(IMAGES),
            documents: db.collection(DOCUMENTS),
            terms: db.collection(TERMS),
        })
    }

    // Reads every stored image; documents that do not decode are skipped
    pub async fn load_images(&self) -> Result<Vec<ImageRecord>, StoreError> {
        let cursor = self
            .images
            .clone_with_type::<Document>()
            .find(None, None)
            .await?;
        let raw: Vec<Document> = cursor.try_collect().await?;
        Ok(decode_images(raw))
    }

    // Replaces the whole search index with a freshly built one
    pub async fn replace_index(&self, index: &ImageIndex) -> Result<(), StoreError> {
        self.documents.drop(None).await?;
        self.terms.drop(None).await?;

        if !index.documents.is_empty() {
            self.documents.insert_many(&index.documents, None).await?;
        }
        info!(count = index.documents.len(), "inserted image documents");

        for (batch_no, batch) in index.terms.chunks(TERM_BATCH).enumerate() {
            self.terms.insert_many(batch, None).await?;
            info!(
                inserted = batch_no * TERM_BATCH + batch.len(),
                total = index.terms.len(),
                "inserted index terms"
            );
        }
        Ok(())
    }

    pub async fn find_terms(&self, terms: &[String]) -> Result<Vec<TermEntry>, StoreError> {
        let cursor = self
            .terms
            .find(doc! { "term": { "$in": terms.to_vec() } }, None)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn find_documents(&self, ids: &[String]) -> Result<Vec<IndexedImage>, StoreError> {
        let cursor = self
            .documents
            .find(doc! { "_id": { "$in": ids.to_vec() } }, None)
            .await?;
        Ok(cursor.try_collect().await?)
    }
}

fn decode_images(raw: Vec<Document>) -> Vec<ImageRecord> {
    raw.into_iter()
        .filter_map(|document| {
            let id = document.get("_id").map(ToString::to_string).unwrap_or_default();
            match bson::from_document(document) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(id = %id, error = %e, "skipping unreadable image document");
                    None
                }
            }
        })
        .collect()
}

#[async_trait]
impl ImageSink for MongoStore {
    async fn upsert(&self, record: &ImageRecord) -> Result<(), StoreError> {
        let filter = doc! { "file_url": record.file_url.as_str() };
        let update = doc! { "$set": bson::to_document(record)? };
        let options = UpdateOptions::builder().upsert(true).build();

        self.images.update_one(filter, update, options).await?;
        Ok(())
    }
}
