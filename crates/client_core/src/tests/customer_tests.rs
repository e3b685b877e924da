use super::*;

use shared::domain::{UserId, UserKind};

fn customer() -> Identity {
    Identity {
        id: UserId(11),
        email: "pat@example.com".into(),
        name: "pat".into(),
        kind: UserKind::Customer,
        phone: Some("+1234567890".into()),
        vehicle_type: None,
    }
}

fn request(kind: ServiceKind) -> ServiceRequest {
    ServiceRequest {
        kind,
        pickup_location: "12 Harbor Rd".into(),
        dropoff_location: "88 Mill Ln".into(),
        vehicle: VehicleInfo {
            make: "Ford".into(),
            model: "Focus".into(),
            plate: "TOW-001".into(),
        },
    }
}

#[test]
fn driver_identity_is_rejected() {
    let driver = Identity {
        kind: UserKind::Driver,
        ..customer()
    };
    assert_eq!(
        CustomerDashboard::new(driver).err(),
        Some(CustomerError::NotACustomer("driver".into()))
    );
}

#[test]
fn splits_services_into_active_and_history() {
    let dashboard = CustomerDashboard::new(customer()).expect("dashboard");

    let active: Vec<_> = dashboard.active_services().iter().map(|s| s.id).collect();
    let history: Vec<_> = dashboard
        .completed_services()
        .iter()
        .map(|s| s.id)
        .collect();

    assert_eq!(active, vec![ServiceId(1)]);
    assert_eq!(history, vec![ServiceId(2)]);
}

#[test]
fn empty_dashboard_has_no_active_or_history() {
    let dashboard = CustomerDashboard::with_services(customer(), Vec::new()).expect("dashboard");
    assert!(dashboard.active_services().is_empty());
    assert!(dashboard.completed_services().is_empty());
}

#[test]
fn new_request_is_active_and_requested() {
    let mut dashboard = CustomerDashboard::new(customer()).expect("dashboard");
    let record = dashboard
        .request_service(request(ServiceKind::Carrier))
        .expect("request")
        .clone();

    assert_eq!(record.id, ServiceId(3));
    assert_eq!(record.status, ServiceStatus::Requested);
    assert_eq!(record.price, quoted_price(ServiceKind::Carrier));
    assert!(record.driver.is_none());
    assert_eq!(dashboard.active_services().len(), 2);
}

#[test]
fn request_requires_locations() {
    let mut dashboard = CustomerDashboard::new(customer()).expect("dashboard");
    let mut blank = request(ServiceKind::Towing);
    blank.dropoff_location = "  ".into();

    assert_eq!(
        dashboard.request_service(blank).err(),
        Some(CustomerError::MissingField("dropoff location"))
    );
    assert_eq!(dashboard.services().len(), 2);
}

#[test]
fn tracking_selects_a_known_service() {
    let mut dashboard = CustomerDashboard::new(customer()).expect("dashboard");
    assert!(dashboard.tracked_service().is_none());

    dashboard.track_service(ServiceId(1)).expect("track");
    let tracked = dashboard.tracked_service().expect("tracked");
    assert_eq!(tracked.status.display_text(), "In Transit");
    assert_eq!(
        tracked.driver.as_ref().and_then(|d| d.eta.as_deref()),
        Some("15 min")
    );

    assert_eq!(
        dashboard.track_service(ServiceId(42)).err(),
        Some(CustomerError::UnknownService(ServiceId(42)))
    );
    assert_eq!(dashboard.tracked_service().map(|s| s.id), Some(ServiceId(1)));
}
