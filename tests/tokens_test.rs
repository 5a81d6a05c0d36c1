use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use axum::{Json, Router, http::StatusCode, routing::post};
use serde_json::{Value, json};
use tempfile::TempDir;
use tunerelay::error::ApiError;
use tunerelay::management::{CredentialStore, TokenRefresher};
use tunerelay::types::TokenRecord;
use tunerelay::utils::now_millis;

/// Spins up a local stand-in for the accounts-service token endpoint.
///
/// Returns the endpoint URL; `hits` counts how many refresh calls arrived.
async fn spawn_token_stub(status: StatusCode, body: Value, hits: Arc<AtomicUsize>) -> String {
    let app = Router::new().route(
        "/token",
        post(move || {
            let body = body.clone();
            let hits = Arc::clone(&hits);
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                (status, Json(body))
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}/token")
}

async fn open_store(dir: &TempDir) -> Arc<CredentialStore> {
    Arc::new(
        CredentialStore::open(dir.path().join("credentials.json"))
            .await
            .unwrap(),
    )
}

fn refresher(store: Arc<CredentialStore>, token_url: String) -> TokenRefresher {
    TokenRefresher::new(
        store,
        token_url,
        "client-id".to_string(),
        "client-secret".to_string(),
    )
}

fn record(user_id: &str, access: &str, refresh: &str, expires_at: i64) -> TokenRecord {
    TokenRecord {
        user_id: user_id.to_string(),
        access_token: access.to_string(),
        refresh_token: refresh.to_string(),
        expires_at,
    }
}

#[tokio::test]
async fn test_unknown_user_fails_with_no_credential() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;
    let refresher = refresher(store, "http://127.0.0.1:9/token".to_string());

    let err = refresher.ensure_valid("ghost").await.unwrap_err();
    assert!(matches!(err, ApiError::NoCredential(_)));
}

#[tokio::test]
async fn test_fresh_token_returned_without_upstream_call() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;
    store
        .upsert(record("u1", "A", "R", now_millis() + 60_000))
        .await
        .unwrap();

    // Unreachable token endpoint: any refresh attempt would fail loudly.
    let refresher = refresher(Arc::clone(&store), "http://127.0.0.1:9/token".to_string());

    let token = refresher.ensure_valid("u1").await.unwrap();
    assert_eq!(token, "A");
    assert_eq!(store.get("u1").await.unwrap().access_token, "A");
}

#[tokio::test]
async fn test_expired_token_is_refreshed_and_persisted() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;
    store
        .upsert(record("u1", "A", "R", now_millis() - 1000))
        .await
        .unwrap();

    let hits = Arc::new(AtomicUsize::new(0));
    let url = spawn_token_stub(
        StatusCode::OK,
        json!({ "access_token": "B", "expires_in": 3600 }),
        Arc::clone(&hits),
    )
    .await;

    let before = now_millis();
    let refresher = refresher(Arc::clone(&store), url);
    let token = refresher.ensure_valid("u1").await.unwrap();
    assert_eq!(token, "B");
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    let stored = store.get("u1").await.unwrap();
    assert_eq!(stored.access_token, "B");
    // Upstream omitted the refresh token; the previous one is preserved.
    assert_eq!(stored.refresh_token, "R");
    assert!(stored.expires_at >= before + 3_600_000);
    assert!(stored.expires_at <= now_millis() + 3_600_000);
}

#[tokio::test]
async fn test_rotated_refresh_token_is_stored() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;
    store
        .upsert(record("u1", "A", "R", now_millis() - 1000))
        .await
        .unwrap();

    let url = spawn_token_stub(
        StatusCode::OK,
        json!({ "access_token": "B", "refresh_token": "R2", "expires_in": 3600 }),
        Arc::new(AtomicUsize::new(0)),
    )
    .await;

    refresher(Arc::clone(&store), url)
        .ensure_valid("u1")
        .await
        .unwrap();

    assert_eq!(store.get("u1").await.unwrap().refresh_token, "R2");
}

#[tokio::test]
async fn test_failed_refresh_leaves_record_untouched() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;
    let expired = record("u1", "A", "R", now_millis() - 1000);
    store.upsert(expired.clone()).await.unwrap();

    let url = spawn_token_stub(
        StatusCode::BAD_REQUEST,
        json!({ "error": "invalid_grant" }),
        Arc::new(AtomicUsize::new(0)),
    )
    .await;

    let err = refresher(Arc::clone(&store), url)
        .ensure_valid("u1")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::RefreshFailed(_)));

    // Next request can retry the refresh against the same record.
    assert_eq!(store.get("u1").await, Some(expired));
}

#[tokio::test]
async fn test_concurrent_requests_refresh_once() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;
    store
        .upsert(record("u1", "A", "R", now_millis() - 1000))
        .await
        .unwrap();

    let hits = Arc::new(AtomicUsize::new(0));
    let url = spawn_token_stub(
        StatusCode::OK,
        json!({ "access_token": "B", "expires_in": 3600 }),
        Arc::clone(&hits),
    )
    .await;

    let refresher = Arc::new(refresher(Arc::clone(&store), url));
    let (a, b) = tokio::join!(refresher.ensure_valid("u1"), refresher.ensure_valid("u1"));

    assert_eq!(a.unwrap(), "B");
    assert_eq!(b.unwrap(), "B");
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_logout_then_ensure_valid_fails() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir).await;
    store
        .upsert(record("u1", "A", "R", now_millis() + 60_000))
        .await
        .unwrap();

    assert!(store.delete("u1").await.unwrap());

    let refresher = refresher(Arc::clone(&store), "http://127.0.0.1:9/token".to_string());
    let err = refresher.ensure_valid("u1").await.unwrap_err();
    assert!(matches!(err, ApiError::NoCredential(_)));
}
