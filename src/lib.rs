//! Gharbhada identity core.
//!
//! Embeddable client library for the Gharbhada rental marketplace. It
//! owns the cross-system identity pipelines between the identity
//! provider and the application backend: dual-write registration,
//! identity mapping, contact resolution and the current-identity
//! accessor. The presentation layer calls the pipelines and renders
//! their results.
//!
//! ```
//! use gharbhada::telemetry::{get_subscriber, init_subscriber};
//! use gharbhada::{execute, setup_context, RegisterUserUseCase};
//!
//! # async fn run() {
//! let subscriber = get_subscriber("gharbhada".into(), "info".into());
//! init_subscriber(subscriber);
//!
//! let ctx = setup_context().await;
//! let usecase = RegisterUserUseCase {
//!     email: "a@b.com".into(),
//!     password: "secret1".into(),
//! };
//! let registered = execute(usecase, &ctx).await.unwrap();
//! println!("Registered backend user {}", registered.user_id);
//! # }
//! ```

pub mod telemetry;

pub use gharbhada_core::{
    execute, ContactList, CurrentIdentity, GetCurrentIdentityUseCase, GharbhadaError,
    ListContactsUseCase, RegisterUserUseCase, RegisteredUser, ResolveIdentityUseCase,
    ResolvedIdentity, UseCase,
};
pub use gharbhada_domain::{
    ContactEntry, ExternalIdentity, IdentityDocument, IdentityLink, InternalUserId, ProfileRecord,
    UserRole,
};
pub use gharbhada_infra::{setup_context, Config, GharbhadaContext};
