use crate::shared::entity::{Entity, ExternalIdentity, InternalUserId};
use serde::{Deserialize, Serialize};

/// A fully resolved chat partner. Transient: rebuilt on every chat-list
/// load, never persisted. Uniqueness key is the external identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactEntry {
    pub external_identity: ExternalIdentity,
    pub internal_user_id: InternalUserId,
    pub display_name: String,
}

impl Entity<ExternalIdentity> for ContactEntry {
    fn id(&self) -> ExternalIdentity {
        self.external_identity.clone()
    }
}
