// src/store/memory.rs
// =============================================================================
// In-memory image sink for tests. Keyed by file_url like the Mongo
// collection, so repeated upserts of one file leave one record.
// =============================================================================

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::ImageSink;
use crate::error::StoreError;
use crate::extract::ImageRecord;

/// In-memory sink with the same upsert semantics as the Mongo collection.
#[derive(Default)]
pub struct MemorySink {
    records: Mutex<HashMap<String, ImageRecord>>,
}

impl MemorySink {
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn get(&self, file_url: &str) -> Option<ImageRecord> {
        self.records.lock().unwrap().get(file_url).cloned()
    }
}

#[async_trait]
impl ImageSink for MemorySink {
    async fn upsert(&self, record: &ImageRecord) -> Result<(), StoreError> {
        self.records
            .lock()
            .unwrap()
            .insert(record.file_url.clone(), record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(alt: &str) -> ImageRecord {
        ImageRecord {
            file_url: "https://x.test/a.png".to_string(),
            alt_text: alt.to_string(),
            caption_text: String::new(),
            page_url: "https://x.test/".to_string(),
            domain_name: "x.test".to_string(),
            format: "png".to_string(),
            width: String::new(),
            height: String::new(),
            time_fetched: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_upsert_is_last_write_wins() {
        let sink = MemorySink::default();
        sink.upsert(&record("first")).await.unwrap();
        sink.upsert(&record("second")).await.unwrap();

        assert_eq!(sink.len(), 1);
        assert_eq!(sink.get("https://x.test/a.png").unwrap().alt_text, "second");
    }
}
