use crate::config::SearchConfig;
use crate::core::DocumentStore;
use crate::domain::model::{CatalogItem, Document, QueryLogEntry};
use crate::utils::error::Result;
use std::marker::PhantomData;

/// Save / count / delete-all for one index, passed straight to the engine.
pub struct DocumentRepository<S: DocumentStore, D: Document> {
    store: S,
    index: String,
    _document: PhantomData<fn() -> D>,
}

impl<S: DocumentStore, D: Document> DocumentRepository<S, D> {
    pub fn new(store: S, index: impl Into<String>) -> Self {
        Self {
            store,
            index: index.into(),
            _document: PhantomData,
        }
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    /// 回傳帶有引擎指派 id 的文件；已有 id 的文件會覆寫同一筆
    pub async fn save(&self, mut document: D) -> Result<D> {
        let body = serde_json::to_value(&document)?;
        let id = self
            .store
            .index_document(&self.index, document.id(), &body)
            .await?;
        tracing::debug!("Saved document {} to {}", id, self.index);

        document.set_id(id);
        Ok(document)
    }

    pub async fn count(&self) -> Result<u64> {
        self.store.count_documents(&self.index).await
    }

    pub async fn delete_all(&self) -> Result<u64> {
        let deleted = self.store.delete_all_documents(&self.index).await?;
        tracing::debug!("Deleted {} documents from {}", deleted, self.index);
        Ok(deleted)
    }

    /// Makes writes so far visible to search.
    pub async fn refresh(&self) -> Result<()> {
        self.store.refresh_index(&self.index).await
    }
}

impl<S: DocumentStore> DocumentRepository<S, CatalogItem> {
    pub fn catalog(store: S, config: &SearchConfig) -> Self {
        Self::new(store, config.catalog.index.clone())
    }
}

impl<S: DocumentStore> DocumentRepository<S, QueryLogEntry> {
    pub fn search_log(store: S, config: &SearchConfig) -> Self {
        Self::new(store, config.search_log.index.clone())
    }
}
