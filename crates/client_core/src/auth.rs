//! Login and registration forms and the notifications they raise.

use shared::{
    domain::{Identity, UserKind},
    error::{ErrorCode, ErrorReport},
};
use thiserror::Error;
use tracing::debug;

use crate::session::{RegisterFields, SessionStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationVariant {
    Default,
    Destructive,
}

/// A transient message shown after a form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
    pub code: Option<ErrorCode>,
}

impl Notification {
    fn info(title: &str, description: &str) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Default,
            code: None,
        }
    }

    fn failure(title: &str, description: impl Into<String>, code: ErrorCode) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Destructive,
            code: Some(code),
        }
    }

    pub fn is_error(&self) -> bool {
        self.variant == NotificationVariant::Destructive
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("passwords do not match")]
    PasswordMismatch,
}

impl FormError {
    fn notification(&self) -> Notification {
        match self {
            Self::PasswordMismatch => Notification::failure(
                "Password Mismatch",
                "Passwords do not match",
                ErrorCode::PasswordMismatch,
            ),
            Self::MissingField(_) => {
                Notification::failure("Missing Information", self.to_string(), ErrorCode::Validation)
            }
        }
    }
}

fn required(value: &str, field: &'static str) -> Result<(), FormError> {
    if value.trim().is_empty() {
        return Err(FormError::MissingField(field));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthTab {
    #[default]
    Login,
    Register,
}

/// Result of submitting one of the auth forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthOutcome {
    pub identity: Option<Identity>,
    pub notification: Option<Notification>,
}

impl AuthOutcome {
    fn rejected(notification: Notification) -> Self {
        Self {
            identity: None,
            notification: Some(notification),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub kind: UserKind,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), FormError> {
        required(&self.email, "email")?;
        required(&self.password, "password")
    }

    /// Signs in through `session`. Success is silent; the screen switches.
    pub async fn submit(&self, session: &SessionStore) -> AuthOutcome {
        if let Err(err) = self.validate() {
            return AuthOutcome::rejected(err.notification());
        }

        match session.login(&self.email, &self.password, self.kind).await {
            Ok(identity) => AuthOutcome {
                identity: Some(identity),
                notification: None,
            },
            Err(err) => {
                let report = ErrorReport::from(&err);
                AuthOutcome::rejected(Notification::failure(
                    "Login Failed",
                    "Invalid credentials. Try demo@example.com / password",
                    report.code,
                ))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
    pub kind: UserKind,
    pub vehicle_type: String,
}

impl RegisterForm {
    /// Client-side checks; nothing reaches the session store unless these pass.
    pub fn to_fields(&self) -> Result<RegisterFields, FormError> {
        required(&self.name, "name")?;
        required(&self.email, "email")?;
        required(&self.password, "password")?;
        if self.password != self.confirm_password {
            return Err(FormError::PasswordMismatch);
        }

        let optional = |value: &str| {
            let trimmed = value.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };
        Ok(RegisterFields {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: optional(&self.phone),
            password: self.password.clone(),
            kind: self.kind,
            vehicle_type: match self.kind {
                UserKind::Driver => optional(&self.vehicle_type),
                UserKind::Customer => None,
            },
        })
    }

    pub async fn submit(&self, session: &SessionStore) -> AuthOutcome {
        let fields = match self.to_fields() {
            Ok(fields) => fields,
            Err(err) => {
                debug!("registration form rejected: {err}");
                return AuthOutcome::rejected(err.notification());
            }
        };

        match session.register(&fields).await {
            Ok(identity) => AuthOutcome {
                identity: Some(identity),
                notification: Some(Notification::info(
                    "Registration Successful",
                    "Welcome to Swift Tow Fleet!",
                )),
            },
            Err(err) => AuthOutcome::rejected(Notification::failure(
                "Registration Failed",
                "Please try again",
                err.code(),
            )),
        }
    }
}

/// State of the sign-in screen.
#[derive(Debug, Clone, Default)]
pub struct AuthScreen {
    pub tab: AuthTab,
    pub login: LoginForm,
    pub register: RegisterForm,
    pub notification: Option<Notification>,
}

impl AuthScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn submit(&mut self, session: &SessionStore) -> Option<Identity> {
        let outcome = match self.tab {
            AuthTab::Login => self.login.submit(session).await,
            AuthTab::Register => self.register.submit(session).await,
        };
        self.notification = outcome.notification;
        outcome.identity
    }

    /// Clears the transient notification once it has been shown.
    pub fn dismiss_notification(&mut self) -> Option<Notification> {
        self.notification.take()
    }
}

#[cfg(test)]
#[path = "tests/auth_tests.rs"]
mod tests;
