use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// 搜尋引擎傳輸層：送出 `_search` 請求並回傳原始 JSON 回應
#[async_trait]
pub trait EngineTransport: Send + Sync {
    async fn search(&self, index: &str, body: &Value) -> Result<Value>;
}

/// 文件 CRUD，僅為引擎 API 的轉送
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Returns the id the engine stored the document under.
    async fn index_document(&self, index: &str, id: Option<&str>, document: &Value)
        -> Result<String>;
    async fn count_documents(&self, index: &str) -> Result<u64>;
    async fn delete_all_documents(&self, index: &str) -> Result<u64>;
    async fn refresh_index(&self, index: &str) -> Result<()>;
}
