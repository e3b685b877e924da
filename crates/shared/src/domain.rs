use std::{fmt, str::FromStr};

use serde::{de, Deserialize, Deserializer, Serialize};
use thiserror::Error;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(UserId);
id_newtype!(JobId);
id_newtype!(ServiceId);

/// Role discriminator for a signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserKind {
    #[default]
    Customer,
    Driver,
}

impl UserKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Driver => "driver",
        }
    }
}

impl fmt::Display for UserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown user kind '{0}', expected 'customer' or 'driver'")]
pub struct ParseUserKindError(pub String);

impl FromStr for UserKind {
    type Err = ParseUserKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "customer" => Ok(Self::Customer),
            "driver" => Ok(Self::Driver),
            other => Err(ParseUserKindError(other.to_string())),
        }
    }
}

/// Service discriminator shared by driver offers and customer records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    Towing,
    Carrier,
}

impl ServiceKind {
    /// Heading used for an incoming offer on the driver side.
    pub fn request_title(self) -> &'static str {
        match self {
            Self::Towing => "Towing Request",
            Self::Carrier => "Car Carrier Request",
        }
    }

    pub fn service_title(self) -> &'static str {
        match self {
            Self::Towing => "Towing Service",
            Self::Carrier => "Car Carrier Service",
        }
    }
}

/// The authenticated user's profile and role.
///
/// Serialized with `type` and `vehicleType` field names. The id is written as
/// a number but may also be read from a decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    #[serde(deserialize_with = "user_id_from_number_or_string")]
    pub id: UserId,
    pub email: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: UserKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<String>,
}

fn user_id_from_number_or_string<'de, D>(deserializer: D) -> Result<UserId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(id) => Ok(UserId(id)),
        RawId::Text(text) => text
            .trim()
            .parse()
            .map(UserId)
            .map_err(|_| de::Error::custom(format!("user id '{text}' is not numeric"))),
    }
}

impl Identity {
    pub fn is_driver(&self) -> bool {
        self.kind == UserKind::Driver
    }

    pub fn is_customer(&self) -> bool {
        self.kind == UserKind::Customer
    }
}
