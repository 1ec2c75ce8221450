mod get_current_identity;

pub use get_current_identity::{
    GetCurrentIdentityUseCase, UseCaseError as GetCurrentIdentityError,
    UseCaseRes as CurrentIdentity,
};
