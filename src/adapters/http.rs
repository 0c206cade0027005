use crate::config::EngineConfig;
use crate::core::{DocumentStore, EngineTransport};
use crate::utils::error::{Result, SearchError};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde_json::{json, Value};
use std::time::Duration;
use url::Url;

/// Engine transport over the Elasticsearch REST API.
#[derive(Debug, Clone)]
pub struct HttpEngineClient {
    base_url: Url,
    client: Client,
    credentials: Option<(String, String)>,
}

impl HttpEngineClient {
    pub fn new(endpoint: &str, client: Client) -> Result<Self> {
        let base_url = Url::parse(endpoint).map_err(|e| SearchError::InvalidConfigValueError {
            field: "engine.endpoint".to_string(),
            value: endpoint.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(SearchError::InvalidConfigValueError {
                field: "engine.endpoint".to_string(),
                value: endpoint.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            });
        }

        Ok(Self {
            base_url,
            client,
            credentials: None,
        })
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| SearchError::ConfigError {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        let mut engine = Self::new(&config.endpoint, client)?;
        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            engine = engine.with_basic_auth(username.clone(), password.clone());
        }
        Ok(engine)
    }

    pub fn with_basic_auth(mut self, username: String, password: String) -> Self {
        self.credentials = Some((username, password));
        self
    }

    pub fn endpoint(&self) -> &str {
        self.base_url.as_str()
    }

    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| SearchError::ConfigError {
                message: format!("engine endpoint {} cannot take a path", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.credentials {
            Some((username, password)) => builder.basic_auth(username, Some(password)),
            None => builder,
        }
    }

    /// 非 2xx 或無法解析的回應一律視為引擎錯誤
    async fn check_and_parse(response: Response) -> Result<Value> {
        let status = response.status();
        tracing::debug!("Engine response status: {}", status);

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SearchError::engine_unavailable(format!(
                "engine returned {}: {}",
                status, error_text
            )));
        }

        response.json().await.map_err(|e| {
            SearchError::engine_unavailable(format!("response is not valid JSON: {}", e))
        })
    }
}

#[async_trait]
impl EngineTransport for HttpEngineClient {
    async fn search(&self, index: &str, body: &Value) -> Result<Value> {
        let url = self.url(&[index, "_search"])?;
        tracing::debug!("POST {} {}", url, body);

        let response = self.request(Method::POST, url).json(body).send().await?;
        Self::check_and_parse(response).await
    }
}

#[async_trait]
impl DocumentStore for HttpEngineClient {
    async fn index_document(
        &self,
        index: &str,
        id: Option<&str>,
        document: &Value,
    ) -> Result<String> {
        let (method, url) = match id {
            Some(id) => (Method::PUT, self.url(&[index, "_doc", id])?),
            None => (Method::POST, self.url(&[index, "_doc"])?),
        };

        let response = self.request(method, url).json(document).send().await?;
        let body = Self::check_and_parse(response).await?;

        body.get("_id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| SearchError::engine_unavailable("index response carries no _id"))
    }

    async fn count_documents(&self, index: &str) -> Result<u64> {
        let url = self.url(&[index, "_count"])?;
        let response = self.request(Method::GET, url).send().await?;
        let body = Self::check_and_parse(response).await?;

        body.get("count")
            .and_then(Value::as_u64)
            .ok_or_else(|| SearchError::engine_unavailable("count response carries no count"))
    }

    async fn delete_all_documents(&self, index: &str) -> Result<u64> {
        let url = self.url(&[index, "_delete_by_query"])?;
        let response = self
            .request(Method::POST, url)
            .query(&[("refresh", "true")])
            .json(&json!({"query": {"match_all": {}}}))
            .send()
            .await?;
        let body = Self::check_and_parse(response).await?;

        Ok(body.get("deleted").and_then(Value::as_u64).unwrap_or(0))
    }

    async fn refresh_index(&self, index: &str) -> Result<()> {
        let url = self.url(&[index, "_refresh"])?;
        let response = self.request(Method::POST, url).send().await?;
        Self::check_and_parse(response).await?;
        Ok(())
    }
}
