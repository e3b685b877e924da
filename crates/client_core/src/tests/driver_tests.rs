use super::*;

use shared::domain::{UserId, UserKind};

fn driver() -> Identity {
    Identity {
        id: UserId(7),
        email: "demo@example.com".into(),
        name: "demo".into(),
        kind: UserKind::Driver,
        phone: Some("+1234567890".into()),
        vehicle_type: Some("flatbed".into()),
    }
}

fn online_dashboard() -> DriverDashboard {
    let mut dashboard = DriverDashboard::new(driver()).expect("driver dashboard");
    dashboard.set_online(true).expect("go online");
    dashboard
}

#[test]
fn customer_identity_is_rejected() {
    let customer = Identity {
        kind: UserKind::Customer,
        vehicle_type: None,
        ..driver()
    };
    assert_eq!(
        DriverDashboard::new(customer).err(),
        Some(DriverError::NotADriver("customer".into()))
    );
}

#[test]
fn starts_offline_with_no_offers_presented() {
    let dashboard = DriverDashboard::new(driver()).expect("driver dashboard");
    assert!(!dashboard.is_online());
    assert_eq!(dashboard.jobs_view(), JobsView::Offline);
    assert!(dashboard.visible_offers().is_empty());
}

#[test]
fn going_online_presents_offers() {
    let dashboard = online_dashboard();
    let ids: Vec<_> = dashboard.visible_offers().iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![JobId(1), JobId(2)]);
}

#[test]
fn offline_driver_cannot_accept() {
    let mut dashboard = DriverDashboard::new(driver()).expect("driver dashboard");
    let err = dashboard.accept_offer(JobId(1)).expect_err("offline");
    assert_eq!(err, DriverError::OfferUnavailable { job_id: JobId(1) });
}

#[test]
fn unknown_offer_cannot_be_accepted() {
    let mut dashboard = online_dashboard();
    let err = dashboard.accept_offer(JobId(99)).expect_err("unknown");
    assert_eq!(err, DriverError::OfferUnavailable { job_id: JobId(99) });
}

#[test]
fn offers_are_hidden_while_job_is_active() {
    let mut dashboard = online_dashboard();
    dashboard.accept_offer(JobId(2)).expect("accept");

    assert!(dashboard.visible_offers().is_empty());
    assert!(matches!(
        dashboard.jobs_view(),
        JobsView::JobInProgress(job) if job.id() == JobId(2)
    ));
}

#[test]
fn second_offer_is_refused_while_busy() {
    let mut dashboard = online_dashboard();
    dashboard.accept_offer(JobId(1)).expect("accept");

    let err = dashboard.accept_offer(JobId(2)).expect_err("busy");
    assert_eq!(
        err,
        DriverError::Job(JobError::JobInProgress { job_id: JobId(1) })
    );
}

#[test]
fn availability_is_locked_during_a_job() {
    let mut dashboard = online_dashboard();
    dashboard.accept_offer(JobId(1)).expect("accept");

    assert!(!dashboard.can_toggle_availability());
    assert_eq!(
        dashboard.set_online(false),
        Err(DriverError::AvailabilityLocked { job_id: JobId(1) })
    );
    assert!(dashboard.is_online());
}

#[test]
fn completing_returns_driver_to_offers() {
    let mut dashboard = online_dashboard();
    dashboard.accept_offer(JobId(1)).expect("accept");
    for _ in 0..5 {
        dashboard.advance_job().expect("advance");
    }
    assert_eq!(dashboard.next_action_label(), Some("Complete Job"));

    dashboard.complete_job().expect("complete");

    assert!(dashboard.active_job().is_none());
    assert_eq!(dashboard.visible_offers().len(), 2);
    assert!(dashboard.can_toggle_availability());
    dashboard.set_online(false).expect("go offline");
}

#[test]
fn next_action_follows_status() {
    let mut dashboard = online_dashboard();
    assert_eq!(dashboard.next_action_label(), None);

    dashboard.accept_offer(JobId(1)).expect("accept");
    assert_eq!(dashboard.next_action_label(), Some("Mark as En Route"));

    assert_eq!(
        dashboard.perform_next_action().expect("action"),
        JobProgress::Advanced(JobStatus::EnRoute)
    );
    assert_eq!(dashboard.next_action_label(), Some("Mark as Arrived"));
}

#[test]
fn profile_and_earnings_are_read_only_views() {
    let dashboard = DriverDashboard::new(driver()).expect("driver dashboard");

    let profile = dashboard.profile();
    assert_eq!(profile.name, "demo");
    assert_eq!(profile.vehicle_type, Some("flatbed"));
    assert_eq!(profile.review_count, 156);

    assert_eq!(dashboard.earnings().total_jobs, 156);
    assert_eq!(dashboard.earnings().today.to_string(), "$245.50");
    assert_eq!(dashboard.recent_earnings().len(), 3);
}
