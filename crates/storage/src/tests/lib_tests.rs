use super::*;

#[tokio::test]
async fn memory_store_round_trips_and_removes_slots() {
    let store = MemoryStore::new();
    assert!(store.is_empty().await);

    store.set("towing_app.user", "{}").await.expect("set");
    assert_eq!(
        store.get("towing_app.user").await.expect("get").as_deref(),
        Some("{}")
    );
    assert_eq!(store.len().await, 1);

    store.remove("towing_app.user").await.expect("remove");
    assert!(store.get("towing_app.user").await.expect("get").is_none());
}

#[tokio::test]
async fn memory_store_remove_of_missing_slot_is_a_no_op() {
    let store = MemoryStore::new();
    store.remove("absent").await.expect("remove");
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn health_check_succeeds_for_live_pool() {
    let store = SqliteStore::new("sqlite::memory:").await.expect("db");
    store.health_check().await.expect("health check");
}

#[tokio::test]
async fn sqlite_store_overwrites_existing_slot() {
    let store = SqliteStore::new("sqlite::memory:").await.expect("db");
    store.set("slot", "first").await.expect("first write");
    store.set("slot", "second").await.expect("second write");

    assert_eq!(
        store.get("slot").await.expect("get").as_deref(),
        Some("second")
    );
    assert_eq!(store.keys().await.expect("keys"), vec!["slot".to_string()]);
}

#[tokio::test]
async fn sqlite_store_removes_slot() {
    let store = SqliteStore::new("sqlite::memory:").await.expect("db");
    store.set("slot", "value").await.expect("write");
    store.remove("slot").await.expect("remove");

    assert!(store.get("slot").await.expect("get").is_none());
    assert!(store.keys().await.expect("keys").is_empty());
}

#[test]
fn sqlite_path_ignores_memory_and_non_sqlite_urls() {
    assert!(sqlite_path("sqlite::memory:").is_none());
    assert!(sqlite_path("postgres://localhost/db").is_none());
    assert_eq!(
        sqlite_path("sqlite://./data/towing.db?mode=rwc"),
        Some(PathBuf::from("./data/towing.db"))
    );
}
