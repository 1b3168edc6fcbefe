//! End to end scenarios driving a [`ContentService`] through the public api
//! with a scripted in-memory fetcher.

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use content_link::BoxError;
use content_link::ContentFetcher;
use content_link::ContentService;
use content_link::ContentServiceError;
use content_link::Evaluator;
use content_link::FetchError;
use content_link::Object;
use content_link::Request;
use content_link::Reshaper;
use content_link::ShapeDescriptor;
use serde_json::json;
use serde_json::Value;

enum Call {
    Entry { id: String, params: Object },
    Entries { params: Object },
}

struct ScriptedFetcher {
    calls: Mutex<Vec<Call>>,
    result: Result<Value, FetchError>,
}

impl ScriptedFetcher {
    fn returning(payload: Value) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(vec![]),
            result: Ok(payload),
        })
    }
}

#[async_trait]
impl ContentFetcher for ScriptedFetcher {
    async fn get_entry(&self, id: &str, params: &Object) -> Result<Value, FetchError> {
        self.calls.lock().unwrap().push(Call::Entry {
            id: id.to_string(),
            params: params.clone(),
        });
        self.result.clone()
    }

    async fn get_entries(&self, params: &Object) -> Result<Value, FetchError> {
        self.calls.lock().unwrap().push(Call::Entries {
            params: params.clone(),
        });
        self.result.clone()
    }
}

struct NestingReshaper;

impl Reshaper for NestingReshaper {
    fn reshape(
        &self,
        root_key: &str,
        payload: &Value,
        _shape: Option<&ShapeDescriptor>,
    ) -> Result<Value, BoxError> {
        Ok(json!({ root_key: payload }))
    }
}

struct PassthroughEvaluator;

#[async_trait]
impl Evaluator for PassthroughEvaluator {
    async fn evaluate(&self, _request: &Request, reshaped: &Value) -> Result<Value, BoxError> {
        Ok(reshaped.clone())
    }
}

fn service(fetcher: Arc<ScriptedFetcher>) -> ContentService {
    ContentService::builder()
        .default_client(fetcher)
        .query_defaults(object(json!({"locale": "en-US"})))
        .reshaper(Arc::new(NestingReshaper))
        .evaluator(Arc::new(PassthroughEvaluator))
        .build()
}

fn object(value: Value) -> Object {
    value.as_object().cloned().unwrap_or_default()
}

#[tokio::test]
async fn test_ordered_collection_query_becomes_a_get_entries_call() {
    let fetcher = ScriptedFetcher::returning(json!({"items": []}));
    let response = service(fetcher.clone())
        .call(
            Request::builder()
                .query("{ postCollection(order: [publishedAt_DESC], limit: 2) { items { title } } }")
                .build(),
        )
        .await
        .unwrap();

    let calls = fetcher.calls.lock().unwrap();
    let Some(Call::Entries { params }) = calls.first() else {
        panic!("expected a collection fetch");
    };
    assert_eq!(
        serde_json::to_value(params).unwrap(),
        json!({
            "locale": "en-US",
            "order": "-fields.publishedAt",
            "limit": "2",
            "content_type": "post",
        })
    );
    assert_eq!(response.data, json!({"postCollection": {"items": []}}));
    assert!(response.errors.is_empty());
}

#[tokio::test]
async fn test_id_variable_becomes_a_get_entry_call() {
    let fetcher = ScriptedFetcher::returning(json!({"sys": {"id": "abc123"}}));
    service(fetcher.clone())
        .call(
            Request::builder()
                .query("{ post(id: $id) { title } }")
                .variables(object(json!({"id": "abc123"})))
                .build(),
        )
        .await
        .unwrap();

    let calls = fetcher.calls.lock().unwrap();
    let Some(Call::Entry { id, params }) = calls.first() else {
        panic!("expected a single-entry fetch");
    };
    assert_eq!(id, "abc123");
    assert_eq!(
        serde_json::to_value(params).unwrap(),
        json!({"locale": "en-US"})
    );
}

#[tokio::test]
async fn test_rejected_fetch_yields_exactly_one_failure() {
    let fetcher = Arc::new(ScriptedFetcher {
        calls: Mutex::new(vec![]),
        result: Err(FetchError::TransportError {
            reason: "connection refused".to_string(),
        }),
    });
    let result = service(fetcher)
        .call(
            Request::builder()
                .query("{ postCollection { items { title } } }")
                .build(),
        )
        .await;
    assert!(matches!(result, Err(ContentServiceError::Fetch(_))));
}
