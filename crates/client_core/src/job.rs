//! Lifecycle of the single job a driver is working.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{
    domain::JobId,
    records::{title_case_slug, JobOffer},
};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobStatus {
    Accepted,
    EnRoute,
    Arrived,
    PickedUp,
    InTransit,
    Delivered,
}

/// The one action a driver can take from a status. `to: None` completes the
/// job and releases it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: JobStatus,
    pub action: &'static str,
    pub to: Option<JobStatus>,
}

/// Indexed by `JobStatus as usize`.
pub const TRANSITIONS: [Transition; 6] = [
    Transition {
        from: JobStatus::Accepted,
        action: "Mark as En Route",
        to: Some(JobStatus::EnRoute),
    },
    Transition {
        from: JobStatus::EnRoute,
        action: "Mark as Arrived",
        to: Some(JobStatus::Arrived),
    },
    Transition {
        from: JobStatus::Arrived,
        action: "Mark as Picked Up",
        to: Some(JobStatus::PickedUp),
    },
    Transition {
        from: JobStatus::PickedUp,
        action: "Mark as In Transit",
        to: Some(JobStatus::InTransit),
    },
    Transition {
        from: JobStatus::InTransit,
        action: "Mark as Delivered",
        to: Some(JobStatus::Delivered),
    },
    Transition {
        from: JobStatus::Delivered,
        action: "Complete Job",
        to: None,
    },
];

impl JobStatus {
    pub const ALL: [JobStatus; 6] = [
        Self::Accepted,
        Self::EnRoute,
        Self::Arrived,
        Self::PickedUp,
        Self::InTransit,
        Self::Delivered,
    ];

    pub fn transition(self) -> Transition {
        TRANSITIONS[self as usize]
    }

    pub fn next(self) -> Option<JobStatus> {
        self.transition().to
    }

    /// Label of the button that performs this status's transition.
    pub fn action_label(self) -> &'static str {
        self.transition().action
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::EnRoute => "en-route",
            Self::Arrived => "arrived",
            Self::PickedUp => "picked-up",
            Self::InTransit => "in-transit",
            Self::Delivered => "delivered",
        }
    }

    pub fn display_text(self) -> String {
        title_case_slug(self.as_str())
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveJob {
    pub offer: JobOffer,
    pub status: JobStatus,
    pub accepted_at: DateTime<Utc>,
}

impl ActiveJob {
    pub fn id(&self) -> JobId {
        self.offer.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedJob {
    pub offer: JobOffer,
    pub accepted_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobProgress {
    Advanced(JobStatus),
    Completed(CompletedJob),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JobError {
    #[error("job {job_id} is still in progress")]
    JobInProgress { job_id: JobId },
    #[error("no active job")]
    NoActiveJob,
    #[error("job {job_id} is delivered and waiting to be completed")]
    AwaitingCompletion { job_id: JobId },
    #[error("job {job_id} cannot be completed while {status}")]
    NotDelivered { job_id: JobId, status: JobStatus },
}

/// Holds at most one active job and moves it forward one status at a time.
#[derive(Debug, Default)]
pub struct JobTracker {
    active: Option<ActiveJob>,
}

impl JobTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&ActiveJob> {
        self.active.as_ref()
    }

    pub fn has_active_job(&self) -> bool {
        self.active.is_some()
    }

    pub fn accept(&mut self, offer: JobOffer) -> Result<&ActiveJob, JobError> {
        if let Some(active) = &self.active {
            return Err(JobError::JobInProgress {
                job_id: active.id(),
            });
        }

        info!(job_id = %offer.id, kind = ?offer.kind, "job accepted");
        Ok(self.active.insert(ActiveJob {
            offer,
            status: JobStatus::Accepted,
            accepted_at: Utc::now(),
        }))
    }

    /// Moves the active job to the next status. Refuses at `delivered`.
    pub fn advance(&mut self) -> Result<JobStatus, JobError> {
        let active = self.active.as_mut().ok_or(JobError::NoActiveJob)?;
        let next = active
            .status
            .next()
            .ok_or(JobError::AwaitingCompletion {
                job_id: active.offer.id,
            })?;

        info!(job_id = %active.offer.id, from = %active.status, to = %next, "job status advanced");
        active.status = next;
        Ok(next)
    }

    /// Releases a delivered job.
    pub fn complete(&mut self) -> Result<CompletedJob, JobError> {
        let active = self.active.as_ref().ok_or(JobError::NoActiveJob)?;
        if active.status != JobStatus::Delivered {
            return Err(JobError::NotDelivered {
                job_id: active.id(),
                status: active.status,
            });
        }

        let Some(active) = self.active.take() else {
            return Err(JobError::NoActiveJob);
        };
        info!(job_id = %active.offer.id, "job completed");
        Ok(CompletedJob {
            offer: active.offer,
            accepted_at: active.accepted_at,
            completed_at: Utc::now(),
        })
    }

    /// Performs whichever single action the current status offers.
    pub fn perform_next_action(&mut self) -> Result<JobProgress, JobError> {
        let status = self.active.as_ref().ok_or(JobError::NoActiveJob)?.status;
        match status.next() {
            Some(_) => self.advance().map(JobProgress::Advanced),
            None => self.complete().map(JobProgress::Completed),
        }
    }
}

#[cfg(test)]
#[path = "tests/job_tests.rs"]
mod tests;
