use crate::shared::entity::{Entity, ExternalIdentity, InternalUserId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    Renter,
    Landlord,
}

impl Default for UserRole {
    fn default() -> Self {
        // New sign-ups always start out as renters
        Self::Renter
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Renter => write!(f, "Renter"),
            Self::Landlord => write!(f, "Landlord"),
        }
    }
}

/// The canonical profile owned by the application backend. Read-only to
/// the contact aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub user_id: InternalUserId,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub email: String,
}

impl ProfileRecord {
    /// `"firstName lastName"`, trimmed. Profiles created before the user
    /// filled in their details have blank name fields.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim().to_string();
        if full.is_empty() {
            "Unknown User".to_string()
        } else {
            full
        }
    }
}

impl Entity<InternalUserId> for ProfileRecord {
    fn id(&self) -> InternalUserId {
        self.user_id
    }
}

/// The association {ExternalIdentity -> InternalUserId}. At most one
/// internal id per external identity; this is the sole mapping edge
/// between the identity provider and the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityLink {
    pub external_id: ExternalIdentity,
    pub internal_user_id: InternalUserId,
}

/// Profile document kept in the identity provider's store, keyed by the
/// external identity it also self-references. Registration writes it
/// without an internal user id; the provider-side data layer completes
/// the link once the backend profile exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityDocument {
    pub external_id: ExternalIdentity,
    pub email: String,
    pub role: UserRole,
    pub internal_user_id: Option<InternalUserId>,
}

impl IdentityDocument {
    pub fn new(external_id: ExternalIdentity, email: String, role: UserRole) -> Self {
        Self {
            external_id,
            email,
            role,
            internal_user_id: None,
        }
    }

    pub fn link(&self) -> Option<IdentityLink> {
        self.internal_user_id.map(|internal_user_id| IdentityLink {
            external_id: self.external_id.clone(),
            internal_user_id,
        })
    }
}

impl Entity<ExternalIdentity> for IdentityDocument {
    fn id(&self) -> ExternalIdentity {
        self.external_id.clone()
    }
}
