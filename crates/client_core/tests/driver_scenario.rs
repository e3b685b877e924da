use std::{sync::Arc, time::Duration};

use client_core::{
    DriverDashboard, JobStatus, MockAuthenticator, Screen, SessionStore, IDENTITY_SLOT,
};
use shared::domain::{JobId, UserKind};
use storage::{KeyValueStore, SqliteStore};

async fn open_store(database_url: &str) -> Arc<SqliteStore> {
    Arc::new(SqliteStore::new(database_url).await.expect("open store"))
}

async fn open_session(store: Arc<SqliteStore>) -> SessionStore {
    SessionStore::load(store, Arc::new(MockAuthenticator::new(Duration::ZERO)))
        .await
        .expect("load session")
}

#[tokio::test]
async fn demo_driver_runs_a_job_from_accept_to_complete() {
    let temp = tempfile::tempdir().expect("tempdir");
    let database_url = format!(
        "sqlite://{}",
        temp.path()
            .join("towing.db")
            .to_string_lossy()
            .replace('\\', "/")
    );
    let session = open_session(open_store(&database_url).await).await;

    let identity = session
        .login("demo@example.com", "password", UserKind::Driver)
        .await
        .expect("login");
    assert_eq!(identity.name, "demo");
    assert_eq!(identity.kind, UserKind::Driver);
    assert_eq!(identity.vehicle_type.as_deref(), Some("flatbed"));
    assert_eq!(Screen::current(&session).await, Screen::DriverDashboard);

    let mut dashboard = DriverDashboard::new(identity).expect("driver dashboard");
    dashboard.set_online(true).expect("go online");

    let accepted = dashboard.accept_offer(JobId(1)).expect("accept");
    assert_eq!(accepted.status, JobStatus::Accepted);
    assert!(dashboard.visible_offers().is_empty());

    for _ in 0..5 {
        dashboard.advance_job().expect("advance");
    }
    assert_eq!(
        dashboard.active_job().map(|job| job.status),
        Some(JobStatus::Delivered)
    );

    dashboard.complete_job().expect("complete");
    assert!(dashboard.active_job().is_none());
}

#[tokio::test]
async fn session_survives_restart_until_logout() {
    let temp = tempfile::tempdir().expect("tempdir");
    let database_url = format!(
        "sqlite://{}",
        temp.path()
            .join("towing.db")
            .to_string_lossy()
            .replace('\\', "/")
    );

    let first_run = open_store(&database_url).await;
    let identity = open_session(first_run.clone())
        .await
        .login("pat@example.com", "password", UserKind::Customer)
        .await
        .expect("login");
    first_run.pool().close().await;

    let second_run = open_store(&database_url).await;
    let restored = open_session(second_run.clone()).await;
    assert_eq!(restored.current().await, Some(identity));

    restored.logout().await.expect("logout");
    assert!(second_run
        .get(IDENTITY_SLOT)
        .await
        .expect("read slot")
        .is_none());
    second_run.pool().close().await;

    let third_run = open_session(open_store(&database_url).await).await;
    assert!(third_run.current().await.is_none());
    assert_eq!(Screen::current(&third_run).await, Screen::Auth);
}
