//! The Gharbhada identity core: the pipelines that keep a user's
//! identity consistent across the identity provider and the application
//! backend, and that resolve chat partners into displayable contacts.

mod contact;
mod error;
mod identity;
mod session;
mod shared;
mod user;

pub use contact::{ContactList, ListContactsUseCase};
pub use error::GharbhadaError;
pub use identity::{ResolveIdentityUseCase, ResolvedIdentity};
pub use session::{CurrentIdentity, GetCurrentIdentityUseCase};
pub use shared::usecase::{execute, UseCase};
pub use user::{RegisterUserError, RegisterUserUseCase, RegisteredUser};
