//! HTTP ingestion surface for change notification batches.

use std::sync::Arc;

use axum::{
    body::Bytes, extract::State, http::StatusCode, response::IntoResponse, response::Response,
    routing::post, Json, Router,
};
use driftlog_core::ChangeBatch;
use serde::Serialize;
use tracing::{error, info, warn};
use utoipa::{OpenApi, ToSchema};

use crate::error::WriterError;
use crate::service::AuditWriter;

/// Shared state for writer handlers
pub struct WriterState {
    pub writer: Arc<AuditWriter>,
}

impl WriterState {
    pub fn new(writer: Arc<AuditWriter>) -> Self {
        Self { writer }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(ingest_changes),
    components(schemas(IngestResponse, IngestErrorResponse)),
    info(
        title = "Driftlog API",
        description = "Change notification ingestion for the audit writer",
        version = "1.0.0"
    ),
    tags(
        (name = "Changes", description = "Change notification ingestion endpoints")
    )
)]
pub struct WriterApiDoc;

#[derive(Debug, Serialize, ToSchema)]
pub struct IngestResponse {
    #[schema(example = "Success")]
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct IngestErrorResponse {
    pub message: String,
    pub error: String,
}

/// Configure change ingestion routes
pub fn configure_routes() -> Router<Arc<WriterState>> {
    Router::new().route("/changes", post(ingest_changes))
}

/// Ingest a batch of change notifications
///
/// Returns 200 once every write attempt has settled, even when some of
/// them failed; only a malformed batch produces a 500.
#[utoipa::path(
    tag = "Changes",
    post,
    path = "/changes",
    request_body = String,
    responses(
        (status = 200, description = "Batch processed", body = IngestResponse),
        (status = 500, description = "Malformed batch or processing error", body = IngestErrorResponse)
    )
)]
pub async fn ingest_changes(State(state): State<Arc<WriterState>>, body: Bytes) -> Response {
    info!("Received change batch: {}", String::from_utf8_lossy(&body));

    let batch = match serde_json::from_slice::<ChangeBatch>(&body) {
        Ok(batch) => batch,
        Err(e) => return internal_error(WriterError::MalformedBatch(e)),
    };

    match state.writer.write_batch(&batch).await {
        Ok(outcomes) => {
            let failed = outcomes.iter().filter(|o| !o.success).count();
            if failed > 0 {
                warn!("{} of {} audit writes failed", failed, outcomes.len());
            }
            (
                StatusCode::OK,
                Json(IngestResponse {
                    message: "Success".to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => internal_error(e),
    }
}

fn internal_error(error: WriterError) -> Response {
    error!("Error processing change batch: {}", error);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(IngestErrorResponse {
            message: "Internal server error".to_string(),
            error: error.to_string(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::AuditWriterConfig;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use driftlog_core::{AuditStore, StoreError};
    use driftlog_store::MemoryAuditStore;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    /// Store that rejects every put.
    struct BrokenStore;

    #[async_trait]
    impl AuditStore for BrokenStore {
        async fn put(&self, _table: &str, _item: Value) -> Result<(), StoreError> {
            Err(StoreError::Backend("store unreachable".to_string()))
        }
    }

    fn test_router(store: Arc<dyn AuditStore>) -> Router {
        let writer = Arc::new(AuditWriter::new(
            store,
            AuditWriterConfig {
                table: "audit".to_string(),
            },
        ));
        configure_routes().with_state(Arc::new(WriterState::new(writer)))
    }

    async fn post_changes(router: Router, body: Value) -> (StatusCode, Value) {
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/changes")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        (status, body)
    }

    #[tokio::test]
    async fn test_successful_batch_returns_200() {
        let store = Arc::new(MemoryAuditStore::new());
        let batch = json!({
            "records": [
                {"kind": "CREATE", "after": {"key": "k1", "value": "v1"}},
                {"kind": "UPDATE", "before": {"key": "k1", "value": "v1"}, "after": {"key": "k1", "value": "v2"}}
            ]
        });

        let (status, body) = post_changes(test_router(store.clone()), batch).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Success"}));
        assert_eq!(store.entries("audit").await.len(), 2);
    }

    #[tokio::test]
    async fn test_store_failures_still_return_200() {
        let batch = json!({
            "records": [
                {"kind": "CREATE", "after": {"key": "k1", "value": "v1"}}
            ]
        });

        let (status, body) = post_changes(test_router(Arc::new(BrokenStore)), batch).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Success"}));
    }

    #[tokio::test]
    async fn test_malformed_batch_returns_500_with_error() {
        let store = Arc::new(MemoryAuditStore::new());

        let (status, body) =
            post_changes(test_router(store), json!({"notifications": []})).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], json!("Internal server error"));
        assert!(body["error"].as_str().unwrap().contains("records"));
    }

    #[tokio::test]
    async fn test_deletion_kind_writes_minimal_entry() {
        let store = Arc::new(MemoryAuditStore::new());
        let batch = json!({
            "records": [
                {"kind": "REMOVE", "before": {"key": "k1", "value": "v1"}}
            ]
        });

        let (status, _) = post_changes(test_router(store.clone()), batch).await;
        assert_eq!(status, StatusCode::OK);

        let entries = store.entries("audit").await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["itemKey"], json!("k1"));
        assert!(entries[0].get("oldValue").is_none());
        assert!(entries[0].get("newValue").is_none());
    }
}
