//! Client-side state for the Swift Tow Fleet screens: the session, the auth
//! forms, and the customer and driver dashboards.
//!
//! Nothing here renders. Each screen is a plain state object that a front end
//! queries and drives; the session is passed to whatever needs it.

pub mod auth;
pub mod config;
pub mod customer;
pub mod driver;
pub mod fixtures;
pub mod job;
pub mod screen;
pub mod session;

pub use auth::{AuthOutcome, AuthScreen, AuthTab, LoginForm, Notification, RegisterForm};
pub use config::{load_settings, Settings};
pub use customer::{CustomerDashboard, CustomerError, ServiceRequest};
pub use driver::{DriverDashboard, DriverError, JobsView};
pub use job::{ActiveJob, CompletedJob, JobError, JobProgress, JobStatus, JobTracker};
pub use screen::{Dashboard, Screen};
pub use session::{
    AuthError, Authenticator, MockAuthenticator, RegisterFields, SessionError, SessionEvent,
    SessionStore, IDENTITY_SLOT,
};
