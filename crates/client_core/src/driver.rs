//! Driver dashboard: availability, job offers, the active job, earnings.

use shared::{
    domain::{Identity, JobId},
    records::{DailyEarnings, EarningsSummary, JobOffer},
};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    fixtures,
    job::{ActiveJob, CompletedJob, JobError, JobProgress, JobStatus, JobTracker},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DriverError {
    #[error("the driver dashboard requires a driver identity, got {0}")]
    NotADriver(String),
    #[error("availability is locked while job {job_id} is active")]
    AvailabilityLocked { job_id: JobId },
    #[error("job {job_id} is not currently offered")]
    OfferUnavailable { job_id: JobId },
    #[error(transparent)]
    Job(#[from] JobError),
}

/// What the jobs tab shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobsView<'a> {
    Offline,
    JobInProgress(&'a ActiveJob),
    Offers(&'a [JobOffer]),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DriverProfile<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub vehicle_type: Option<&'a str>,
    pub rating: f32,
    pub review_count: u32,
}

pub struct DriverDashboard {
    identity: Identity,
    online: bool,
    offers: Vec<JobOffer>,
    tracker: JobTracker,
    earnings: EarningsSummary,
    recent_earnings: Vec<DailyEarnings>,
}

impl DriverDashboard {
    pub fn new(identity: Identity) -> Result<Self, DriverError> {
        Self::with_offers(identity, fixtures::job_offers())
    }

    pub fn with_offers(identity: Identity, offers: Vec<JobOffer>) -> Result<Self, DriverError> {
        if !identity.is_driver() {
            return Err(DriverError::NotADriver(identity.kind.to_string()));
        }
        Ok(Self {
            identity,
            online: false,
            offers,
            tracker: JobTracker::new(),
            earnings: fixtures::earnings_summary(),
            recent_earnings: fixtures::recent_earnings(),
        })
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn is_online(&self) -> bool {
        self.online
    }

    /// The toggle is locked while a job is active.
    pub fn can_toggle_availability(&self) -> bool {
        !self.tracker.has_active_job()
    }

    pub fn set_online(&mut self, online: bool) -> Result<(), DriverError> {
        if let Some(active) = self.tracker.active() {
            return Err(DriverError::AvailabilityLocked {
                job_id: active.id(),
            });
        }
        if self.online != online {
            info!(driver = %self.identity.id, online, "driver availability changed");
        }
        self.online = online;
        Ok(())
    }

    pub fn jobs_view(&self) -> JobsView<'_> {
        if !self.online {
            JobsView::Offline
        } else if let Some(active) = self.tracker.active() {
            JobsView::JobInProgress(active)
        } else {
            JobsView::Offers(&self.offers)
        }
    }

    /// Offers currently presented. Empty while offline or busy.
    pub fn visible_offers(&self) -> &[JobOffer] {
        match self.jobs_view() {
            JobsView::Offers(offers) => offers,
            JobsView::Offline | JobsView::JobInProgress(_) => &[],
        }
    }

    pub fn accept_offer(&mut self, job_id: JobId) -> Result<&ActiveJob, DriverError> {
        if let Some(active) = self.tracker.active() {
            return Err(JobError::JobInProgress {
                job_id: active.id(),
            }
            .into());
        }
        let offer = self
            .visible_offers()
            .iter()
            .find(|offer| offer.id == job_id)
            .cloned()
            .ok_or(DriverError::OfferUnavailable { job_id })?;

        debug!(driver = %self.identity.id, job_id = %job_id, "accepting offer");
        Ok(self.tracker.accept(offer)?)
    }

    pub fn active_job(&self) -> Option<&ActiveJob> {
        self.tracker.active()
    }

    /// Label for the single action button on the active job card.
    pub fn next_action_label(&self) -> Option<&'static str> {
        self.tracker.active().map(|job| job.status.action_label())
    }

    pub fn advance_job(&mut self) -> Result<JobStatus, DriverError> {
        Ok(self.tracker.advance()?)
    }

    pub fn complete_job(&mut self) -> Result<CompletedJob, DriverError> {
        Ok(self.tracker.complete()?)
    }

    pub fn perform_next_action(&mut self) -> Result<JobProgress, DriverError> {
        Ok(self.tracker.perform_next_action()?)
    }

    pub fn earnings(&self) -> &EarningsSummary {
        &self.earnings
    }

    pub fn recent_earnings(&self) -> &[DailyEarnings] {
        &self.recent_earnings
    }

    pub fn profile(&self) -> DriverProfile<'_> {
        DriverProfile {
            name: &self.identity.name,
            email: &self.identity.email,
            phone: self.identity.phone.as_deref(),
            vehicle_type: self.identity.vehicle_type.as_deref(),
            rating: fixtures::DRIVER_RATING,
            review_count: fixtures::DRIVER_REVIEW_COUNT,
        }
    }
}

#[cfg(test)]
#[path = "tests/driver_tests.rs"]
mod tests;
