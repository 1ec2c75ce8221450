mod contact;
mod shared;
mod user;

pub use contact::ContactEntry;
pub use shared::entity::{Entity, ExternalIdentity, InternalUserId, InvalidExternalIdentityError};
pub use user::{IdentityDocument, IdentityLink, ProfileRecord, UserRole};
