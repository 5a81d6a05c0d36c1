use tempfile::TempDir;
use tunerelay::management::CredentialStore;
use tunerelay::types::TokenRecord;

// Helper function to create a test record
fn create_test_record(user_id: &str, access: &str, refresh: &str, expires_at: i64) -> TokenRecord {
    TokenRecord {
        user_id: user_id.to_string(),
        access_token: access.to_string(),
        refresh_token: refresh.to_string(),
        expires_at,
    }
}

#[tokio::test]
async fn test_open_without_file_is_empty() {
    let dir = TempDir::new().unwrap();
    let store = CredentialStore::open(dir.path().join("credentials.json"))
        .await
        .unwrap();

    assert!(store.get("u1").await.is_none());
    assert!(store.list().await.is_empty());
}

#[tokio::test]
async fn test_upsert_then_get() {
    let dir = TempDir::new().unwrap();
    let store = CredentialStore::open(dir.path().join("credentials.json"))
        .await
        .unwrap();

    let record = create_test_record("u1", "A", "R", 1234);
    store.upsert(record.clone()).await.unwrap();

    assert_eq!(store.get("u1").await, Some(record));
    assert!(store.get("u2").await.is_none());
}

#[tokio::test]
async fn test_upsert_replaces_existing_record() {
    let dir = TempDir::new().unwrap();
    let store = CredentialStore::open(dir.path().join("credentials.json"))
        .await
        .unwrap();

    store
        .upsert(create_test_record("u1", "A", "R", 1000))
        .await
        .unwrap();
    store
        .upsert(create_test_record("u1", "B", "R2", 2000))
        .await
        .unwrap();

    let stored = store.get("u1").await.unwrap();
    assert_eq!(stored.access_token, "B");
    assert_eq!(stored.refresh_token, "R2");
    assert_eq!(stored.expires_at, 2000);

    // Still a single record for the user
    assert_eq!(store.list().await, vec!["u1".to_string()]);
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let store = CredentialStore::open(dir.path().join("credentials.json"))
        .await
        .unwrap();

    store
        .upsert(create_test_record("u1", "A", "R", 1000))
        .await
        .unwrap();

    assert!(store.delete("u1").await.unwrap());
    assert!(store.get("u1").await.is_none());

    // Second delete is a successful no-op
    assert!(!store.delete("u1").await.unwrap());
}

#[tokio::test]
async fn test_records_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("credentials.json");

    {
        let store = CredentialStore::open(path.clone()).await.unwrap();
        store
            .upsert(create_test_record("u1", "A", "R", 1000))
            .await
            .unwrap();
        store
            .upsert(create_test_record("u2", "B", "R2", 2000))
            .await
            .unwrap();
    }

    let reopened = CredentialStore::open(path).await.unwrap();
    assert_eq!(
        reopened.get("u1").await,
        Some(create_test_record("u1", "A", "R", 1000))
    );
    assert_eq!(
        reopened.list().await,
        vec!["u1".to_string(), "u2".to_string()]
    );
}
