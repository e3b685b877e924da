//! Customer dashboard: current services, history, new requests.

use chrono::Utc;
use shared::{
    domain::{Identity, ServiceId, ServiceKind},
    records::{Cents, ServiceRecord, ServiceStatus, VehicleInfo},
};
use thiserror::Error;
use tracing::info;

use crate::fixtures;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CustomerError {
    #[error("the customer dashboard requires a customer identity, got {0}")]
    NotACustomer(String),
    #[error("no service with id {0}")]
    UnknownService(ServiceId),
    #[error("{0} must not be empty")]
    MissingField(&'static str),
}

/// Details entered when requesting a tow or a carrier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRequest {
    pub kind: ServiceKind,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub vehicle: VehicleInfo,
}

/// Quoted price for a new request, before a driver is assigned.
pub fn quoted_price(kind: ServiceKind) -> Cents {
    match kind {
        ServiceKind::Towing => Cents(8999),
        ServiceKind::Carrier => Cents(12999),
    }
}

pub struct CustomerDashboard {
    identity: Identity,
    services: Vec<ServiceRecord>,
    tracked: Option<ServiceId>,
}

impl CustomerDashboard {
    pub fn new(identity: Identity) -> Result<Self, CustomerError> {
        Self::with_services(identity, fixtures::service_records())
    }

    pub fn with_services(
        identity: Identity,
        services: Vec<ServiceRecord>,
    ) -> Result<Self, CustomerError> {
        if !identity.is_customer() {
            return Err(CustomerError::NotACustomer(identity.kind.to_string()));
        }
        Ok(Self {
            identity,
            services,
            tracked: None,
        })
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn services(&self) -> &[ServiceRecord] {
        &self.services
    }

    /// Everything not yet completed, in request order.
    pub fn active_services(&self) -> Vec<&ServiceRecord> {
        self.services
            .iter()
            .filter(|service| !service.status.is_completed())
            .collect()
    }

    pub fn completed_services(&self) -> Vec<&ServiceRecord> {
        self.services
            .iter()
            .filter(|service| service.status.is_completed())
            .collect()
    }

    pub fn request_service(
        &mut self,
        request: ServiceRequest,
    ) -> Result<&ServiceRecord, CustomerError> {
        if request.pickup_location.trim().is_empty() {
            return Err(CustomerError::MissingField("pickup location"));
        }
        if request.dropoff_location.trim().is_empty() {
            return Err(CustomerError::MissingField("dropoff location"));
        }

        let id = ServiceId(
            self.services
                .iter()
                .map(|service| service.id.0)
                .max()
                .unwrap_or(0)
                + 1,
        );
        info!(customer = %self.identity.id, service_id = %id, kind = ?request.kind, "service requested");

        self.services.push(ServiceRecord {
            id,
            kind: request.kind,
            status: ServiceStatus::Requested,
            pickup_location: request.pickup_location,
            dropoff_location: request.dropoff_location,
            vehicle: request.vehicle,
            driver: None,
            price: quoted_price(request.kind),
            created_at: Utc::now(),
        });
        self.find(id)
    }

    pub fn track_service(&mut self, id: ServiceId) -> Result<&ServiceRecord, CustomerError> {
        self.find(id)?;
        self.tracked = Some(id);
        self.find(id)
    }

    pub fn tracked_service(&self) -> Option<&ServiceRecord> {
        self.tracked.and_then(|id| self.find(id).ok())
    }

    fn find(&self, id: ServiceId) -> Result<&ServiceRecord, CustomerError> {
        self.services
            .iter()
            .find(|service| service.id == id)
            .ok_or(CustomerError::UnknownService(id))
    }
}

#[cfg(test)]
#[path = "tests/customer_tests.rs"]
mod tests;
