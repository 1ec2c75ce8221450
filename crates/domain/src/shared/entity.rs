use serde::{de::Visitor, Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

pub trait Entity<T: PartialEq> {
    fn id(&self) -> T;
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

/// Opaque principal token issued by the identity provider on account
/// creation. Immutable and owned by the provider, the core only carries
/// it around.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExternalIdentity(String);

impl ExternalIdentity {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for ExternalIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Error, Debug)]
pub enum InvalidExternalIdentityError {
    #[error("External identity token cannot be empty")]
    Empty,
}

impl FromStr for ExternalIdentity {
    type Err = InvalidExternalIdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(InvalidExternalIdentityError::Empty);
        }
        Ok(Self(s.to_string()))
    }
}

impl Serialize for ExternalIdentity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ExternalIdentity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct ExternalIdentityVisitor;

        impl<'de> Visitor<'de> for ExternalIdentityVisitor {
            type Value = ExternalIdentity;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("A non-empty identity token")
            }

            fn visit_str<E>(self, value: &str) -> Result<ExternalIdentity, E>
            where
                E: serde::de::Error,
            {
                value
                    .parse::<ExternalIdentity>()
                    .map_err(|_| E::custom(format!("Malformed identity token: {}", value)))
            }
        }

        deserializer.deserialize_str(ExternalIdentityVisitor)
    }
}

/// Identifier assigned by the application backend when the canonical
/// profile record is created. One-to-one with an `ExternalIdentity` once
/// linked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InternalUserId(i64);

impl InternalUserId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn inner(self) -> i64 {
        self.0
    }
}

impl Display for InternalUserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for InternalUserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}
