//! Process-wide cache of built video indexes.
//!
//! Entries are keyed by the raw video ID and live for the lifetime of the process;
//! there is no eviction. Each key owns a once-cell, so concurrent first requests for
//! the same video wait on a single build. A failed build leaves the cell empty and
//! the next request builds again.

use crate::error::{Result, TubeQaError};
use crate::vector_store::{IndexBuilder, VectorIndex};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument};

type IndexCell = Arc<OnceCell<Arc<dyn VectorIndex>>>;

/// Cache mapping video IDs to their built index.
#[derive(Default)]
pub struct RetrieverCache {
    entries: Mutex<HashMap<String, IndexCell>>,
}

impl RetrieverCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn cell(&self, video_id: &str) -> Result<IndexCell> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| TubeQaError::Cache("cache lock poisoned".to_string()))?;
        Ok(entries.entry(video_id.to_string()).or_default().clone())
    }

    /// Return the cached index for `video_id`, building it from `transcript_text` on a miss.
    ///
    /// On a hit `transcript_text` is ignored, even if it differs from the text the
    /// cached index was built from.
    #[instrument(skip(self, transcript_text, builder))]
    pub async fn get_or_build(
        &self,
        video_id: &str,
        transcript_text: &str,
        builder: &dyn IndexBuilder,
    ) -> Result<Arc<dyn VectorIndex>> {
        let cell = self.cell(video_id)?;

        if let Some(index) = cell.get() {
            debug!("Cache hit");
            return Ok(index.clone());
        }

        let index = cell
            .get_or_try_init(|| async {
                info!("Building index for {}", video_id);
                builder.build(transcript_text).await
            })
            .await?;

        Ok(index.clone())
    }

    /// The cached index for `video_id`, if one has been built.
    pub fn get(&self, video_id: &str) -> Option<Arc<dyn VectorIndex>> {
        let entries = self.entries.lock().ok()?;
        entries.get(video_id).and_then(|cell| cell.get().cloned())
    }

    /// Whether a built index exists for `video_id`.
    pub fn contains(&self, video_id: &str) -> bool {
        self.get(video_id).is_some()
    }

    /// Number of built indexes.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .map(|entries| entries.values().filter(|cell| cell.initialized()).count())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::CountingIndexBuilder;

    #[tokio::test]
    async fn test_hit_skips_build_and_ignores_text() {
        let cache = RetrieverCache::new();
        let builder = CountingIndexBuilder::new();

        let first = cache.get_or_build("vid", "[Time: 0] original", &builder).await.unwrap();
        let second = cache.get_or_build("vid", "[Time: 0] changed", &builder).await.unwrap();

        assert_eq!(builder.builds(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
        assert!(cache.contains("vid"));
    }

    #[tokio::test]
    async fn test_keys_are_raw_ids() {
        let cache = RetrieverCache::new();
        let builder = CountingIndexBuilder::new();

        cache.get_or_build("vid", "text", &builder).await.unwrap();
        cache.get_or_build(" vid", "text", &builder).await.unwrap();

        assert_eq!(builder.builds(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_build_is_not_cached() {
        let cache = RetrieverCache::new();
        let builder = CountingIndexBuilder::failing_first(1);

        assert!(cache.get_or_build("vid", "text", &builder).await.is_err());
        assert!(cache.is_empty());
        assert!(!cache.contains("vid"));

        assert!(cache.get_or_build("vid", "text", &builder).await.is_ok());
        assert_eq!(builder.builds(), 2);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_misses_share_one_build() {
        let cache = Arc::new(RetrieverCache::new());
        let builder = Arc::new(CountingIndexBuilder::with_delay(std::time::Duration::from_millis(50)));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let cache = cache.clone();
            let builder = builder.clone();
            handles.push(tokio::spawn(async move {
                cache.get_or_build("vid", "text", builder.as_ref()).await.map(|_| ())
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(builder.builds(), 1);
        assert_eq!(cache.len(), 1);
    }
}
