mod resolve_identity;

pub use resolve_identity::{
    ResolveIdentityUseCase, UseCaseError as ResolveIdentityError, UseCaseRes as ResolvedIdentity,
};
