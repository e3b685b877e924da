use shared::domain::{Identity, UserKind};
use thiserror::Error;

use crate::{
    customer::{CustomerDashboard, CustomerError},
    driver::{DriverDashboard, DriverError},
    session::SessionStore,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Auth,
    CustomerDashboard,
    DriverDashboard,
}

impl Screen {
    pub fn for_identity(identity: Option<&Identity>) -> Self {
        match identity.map(|identity| identity.kind) {
            None => Self::Auth,
            Some(UserKind::Customer) => Self::CustomerDashboard,
            Some(UserKind::Driver) => Self::DriverDashboard,
        }
    }

    pub async fn current(session: &SessionStore) -> Self {
        Self::for_identity(session.current().await.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Customer(#[from] CustomerError),
    #[error(transparent)]
    Driver(#[from] DriverError),
}

/// The dashboard matching a signed-in identity.
pub enum Dashboard {
    Customer(CustomerDashboard),
    Driver(DriverDashboard),
}

impl Dashboard {
    pub fn open(identity: Identity) -> Result<Self, DashboardError> {
        Ok(match identity.kind {
            UserKind::Customer => Self::Customer(CustomerDashboard::new(identity)?),
            UserKind::Driver => Self::Driver(DriverDashboard::new(identity)?),
        })
    }

    pub fn screen(&self) -> Screen {
        match self {
            Self::Customer(_) => Screen::CustomerDashboard,
            Self::Driver(_) => Screen::DriverDashboard,
        }
    }
}
