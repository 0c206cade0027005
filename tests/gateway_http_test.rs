use catalog_search::{HttpEngineClient, PopularityRank, SearchConfig, SearchError, SearchGateway};
use chrono::{DateTime, Utc};
use httpmock::prelude::*;
use serde_json::{json, Value};

fn fixed_now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-10-16T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

fn gateway_for(server: &MockServer) -> SearchGateway<HttpEngineClient> {
    let config = SearchConfig::default().with_endpoint(server.base_url());
    let engine = HttpEngineClient::from_config(&config.engine).unwrap();
    SearchGateway::new(engine, &config).with_clock(fixed_now)
}

fn suggestion_option(id: &str, text: &str, name: &str, inputs: &[&str]) -> Value {
    json!({
        "text": text,
        "_index": "products",
        "_id": id,
        "_score": 1.0,
        "_source": {
            "name": name,
            "description": "",
            "category": "",
            "suggestion": {"input": inputs}
        }
    })
}

fn terms_response(buckets: Value) -> Value {
    json!({
        "took": 2,
        "timed_out": false,
        "hits": {"total": {"value": 0, "relation": "eq"}, "max_score": null, "hits": []},
        "aggregations": {"popular_queries": {
            "doc_count_error_upper_bound": 0,
            "sum_other_doc_count": 0,
            "buckets": buckets
        }}
    })
}

#[tokio::test]
async fn test_autocomplete_single_item() {
    let server = MockServer::start_async().await;
    let suggest_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/products/_search")
                .json_body_partial(
                    r#"{"size": 0, "suggest": {"catalog-suggest": {"prefix": "kimch",
                        "completion": {"field": "suggestion", "size": 10, "skip_duplicates": true}}}}"#,
                );
            then.status(200).json_body(json!({
                "hits": {"hits": []},
                "suggest": {"catalog-suggest": [{
                    "text": "kimch", "offset": 0, "length": 5,
                    "options": [suggestion_option("k-1", "kimchi stew", "kimchi stew", &["kimchi stew"])]
                }]}
            }));
        })
        .await;

    let items = gateway_for(&server).autocomplete("kimch", 10).await.unwrap();

    suggest_mock.assert_async().await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "kimchi stew");
    assert_eq!(items[0].id.as_deref(), Some("k-1"));
}

#[tokio::test]
async fn test_autocomplete_collapses_overlapping_suggestion_terms() {
    let server = MockServer::start_async().await;
    let inputs = ["european", "model house", "european model house"];
    server
        .mock_async(|when, then| {
            when.method(POST).path("/products/_search");
            then.status(200).json_body(json!({
                "suggest": {"catalog-suggest": [{
                    "text": "europ",
                    "options": [
                        suggestion_option("h-1", "european", "european model house", &inputs),
                        suggestion_option("h-1", "european model house", "european model house", &inputs)
                    ]
                }]}
            }));
        })
        .await;

    let items = gateway_for(&server).autocomplete("europ", 10).await.unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "european model house");
    assert_eq!(items[0].suggestion_terms.len(), 3);
}

#[tokio::test]
async fn test_search_returns_hits_in_score_order() {
    let server = MockServer::start_async().await;
    let search_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/products/_search").json_body_partial(
                r#"{"size": 10, "query": {"multi_match": {"query": "computer parts",
                    "fields": ["name^3", "description", "category^2", "synonyms"]}}}"#,
            );
            then.status(200).json_body(json!({
                "hits": {"total": {"value": 2}, "hits": [
                    {"_id": "p-1", "_score": 2.1, "_source": {
                        "name": "RTX 5080TI graphics card", "description": "high performance GPU",
                        "category": "computer parts", "suggestion": {"input": ["RTX 5080TI"]}}},
                    {"_id": "p-3", "_score": 1.4, "_source": {
                        "name": "samsung monitor", "description": "high resolution gaming display",
                        "category": "computer parts", "suggestion": {"input": ["samsung monitor"]}}}
                ]}
            }));
        })
        .await;

    let items = gateway_for(&server).search("computer parts", 10).await.unwrap();

    search_mock.assert_async().await;
    let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["RTX 5080TI graphics card", "samsung monitor"]);
}

#[tokio::test]
async fn test_search_without_matches_is_empty() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/products/_search");
            then.status(200)
                .json_body(json!({"hits": {"total": {"value": 0}, "hits": []}}));
        })
        .await;

    let items = gateway_for(&server).search("no such thing", 10).await.unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn test_popular_searches_ranked_by_count() {
    let server = MockServer::start_async().await;
    let aggregation_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/search_logs/_search").json_body_partial(
                r#"{"size": 0,
                    "query": {"range": {"timestamp": {
                        "gte": "2026-10-16T11:00:00.000Z", "lt": "2026-10-16T12:00:00.000Z"}}},
                    "aggs": {"popular_queries": {"terms": {"field": "query", "size": 10}}}}"#,
            );
            then.status(200).json_body(terms_response(json!([
                {"key": "gpu", "doc_count": 5},
                {"key": "monitor", "doc_count": 3},
                {"key": "keyboard", "doc_count": 1}
            ])));
        })
        .await;

    let ranks = gateway_for(&server).popular_searches("1h", 10).await.unwrap();

    aggregation_mock.assert_async().await;
    assert_eq!(
        ranks,
        vec![
            PopularityRank::new("gpu", 5),
            PopularityRank::new("monitor", 3),
            PopularityRank::new("keyboard", 1),
        ]
    );
}

#[tokio::test]
async fn test_popular_searches_on_empty_index() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/search_logs/_search");
            then.status(200).json_body(terms_response(json!([])));
        })
        .await;

    let ranks = gateway_for(&server).popular_searches("1h", 10).await.unwrap();
    assert!(ranks.is_empty());
}

#[tokio::test]
async fn test_popular_searches_respects_requested_size() {
    let server = MockServer::start_async().await;
    let buckets: Vec<Value> = (1..=5)
        .map(|i| json!({"key": format!("query {}", i), "doc_count": 1}))
        .collect();
    let aggregation_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/search_logs/_search")
                .json_body_partial(r#"{"aggs": {"popular_queries": {"terms": {"size": 5}}}}"#);
            then.status(200).json_body(terms_response(Value::Array(buckets.clone())));
        })
        .await;

    let ranks = gateway_for(&server).popular_searches("1h", 5).await.unwrap();

    aggregation_mock.assert_async().await;
    assert_eq!(ranks.len(), 5);
}

#[tokio::test]
async fn test_popular_searches_between_explicit_window() {
    let server = MockServer::start_async().await;
    let aggregation_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/search_logs/_search").json_body_partial(
                r#"{"query": {"range": {"timestamp": {
                    "gte": "2026-10-16T10:00:00.000Z", "lt": "2026-10-16T11:00:00.000Z"}}}}"#,
            );
            then.status(200)
                .json_body(terms_response(json!([{"key": "ssd", "doc_count": 2}])));
        })
        .await;

    let ranks = gateway_for(&server)
        .popular_searches_between("2h", "1h", 10)
        .await
        .unwrap();

    aggregation_mock.assert_async().await;
    assert_eq!(ranks, vec![PopularityRank::new("ssd", 2)]);
}

#[tokio::test]
async fn test_inverted_window_never_reaches_engine() {
    let server = MockServer::start_async().await;
    let aggregation_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/search_logs/_search");
            then.status(200).json_body(terms_response(json!([])));
        })
        .await;

    let result = gateway_for(&server)
        .popular_searches_between("1h", "2h", 10)
        .await;

    assert!(matches!(result, Err(SearchError::InvalidArgument { .. })));
    aggregation_mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_engine_error_status_is_engine_unavailable() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/products/_search");
            then.status(503).body("cluster is recovering");
        })
        .await;

    let err = gateway_for(&server).search("gpu", 10).await.unwrap_err();

    assert!(matches!(err, SearchError::EngineUnavailable { .. }));
    assert!(err.to_string().contains("cluster is recovering"));
}

#[tokio::test]
async fn test_malformed_envelope_is_engine_unavailable() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/search_logs/_search");
            then.status(200).json_body(json!(["unexpected"]));
        })
        .await;

    let err = gateway_for(&server)
        .popular_searches("1h", 10)
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::EngineUnavailable { .. }));
}

#[tokio::test]
async fn test_unreachable_engine_is_transport_error() {
    // 沒有服務在此埠口
    let config = SearchConfig::default().with_endpoint("http://127.0.0.1:9");
    let engine = HttpEngineClient::from_config(&config.engine).unwrap();
    let gateway = SearchGateway::new(engine, &config);

    let err = gateway.search("gpu", 10).await.unwrap_err();
    assert_eq!(
        err.category(),
        catalog_search::utils::error::ErrorCategory::EngineUnavailable
    );
}
