//! Canned data shown on the dashboards until a dispatch backend exists.

use chrono::{DateTime, TimeZone, Utc};
use shared::{
    domain::{JobId, ServiceId, ServiceKind},
    records::{
        AssignedDriver, Cents, CustomerContact, DailyEarnings, EarningsSummary, JobOffer,
        Priority, ServiceRecord, ServiceStatus, VehicleInfo,
    },
};

pub const DRIVER_RATING: f32 = 4.8;
pub const DRIVER_REVIEW_COUNT: u32 = 156;

fn vehicle(make: &str, model: &str, plate: &str) -> VehicleInfo {
    VehicleInfo {
        make: make.into(),
        model: model.into(),
        plate: plate.into(),
    }
}

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

pub fn job_offers() -> Vec<JobOffer> {
    vec![
        JobOffer {
            id: JobId(1),
            kind: ServiceKind::Towing,
            customer: CustomerContact {
                name: "John Smith".into(),
                phone: "+1 (555) 123-4567".into(),
            },
            vehicle: vehicle("Honda", "Civic", "ABC-123"),
            pickup_location: "123 Main St, Downtown".into(),
            dropoff_location: "456 Oak Ave, Uptown".into(),
            distance: "5.2 miles".into(),
            estimated_time: "25 min".into(),
            price: Cents(8999),
            priority: Priority::Urgent,
        },
        JobOffer {
            id: JobId(2),
            kind: ServiceKind::Carrier,
            customer: CustomerContact {
                name: "Sarah Johnson".into(),
                phone: "+1 (555) 987-6543".into(),
            },
            vehicle: vehicle("Toyota", "Camry", "XYZ-789"),
            pickup_location: "789 Pine St, Westside".into(),
            dropoff_location: "321 Elm Dr, Eastside".into(),
            distance: "8.7 miles".into(),
            estimated_time: "35 min".into(),
            price: Cents(12999),
            priority: Priority::Normal,
        },
    ]
}

pub fn service_records() -> Vec<ServiceRecord> {
    vec![
        ServiceRecord {
            id: ServiceId(1),
            kind: ServiceKind::Towing,
            status: ServiceStatus::InTransit,
            pickup_location: "123 Main St, Downtown".into(),
            dropoff_location: "456 Oak Ave, Uptown".into(),
            vehicle: vehicle("Honda", "Civic", "ABC-123"),
            driver: Some(AssignedDriver {
                name: "Mike Johnson".into(),
                rating: 4.8,
                eta: Some("15 min".into()),
            }),
            price: Cents(8999),
            created_at: at(2024, 1, 15, 10, 30),
        },
        ServiceRecord {
            id: ServiceId(2),
            kind: ServiceKind::Carrier,
            status: ServiceStatus::Completed,
            pickup_location: "789 Pine St, Westside".into(),
            dropoff_location: "321 Elm Dr, Eastside".into(),
            vehicle: vehicle("Toyota", "Camry", "XYZ-789"),
            driver: Some(AssignedDriver {
                name: "Sarah Davis".into(),
                rating: 4.9,
                eta: None,
            }),
            price: Cents(12999),
            created_at: at(2024, 1, 10, 14, 20),
        },
    ]
}

pub fn earnings_summary() -> EarningsSummary {
    EarningsSummary {
        today: Cents(24550),
        week: Cents(120075),
        month: Cents(485025),
        total_jobs: 156,
    }
}

pub fn recent_earnings() -> Vec<DailyEarnings> {
    [("Today", 8999, 3), ("Yesterday", 14550, 5), ("Jan 13", 6725, 2)]
        .into_iter()
        .map(|(label, amount, jobs)| DailyEarnings {
            label: label.into(),
            amount: Cents(amount),
            jobs,
        })
        .collect()
}
