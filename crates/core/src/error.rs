use thiserror::Error;

/// Presentation-facing error taxonomy. Expected absences (an identity
/// that was never linked, a missing profile) are `Option::None` in the
/// pipeline signatures and deliberately have no variant here.
#[derive(Error, Debug)]
pub enum GharbhadaError {
    #[error("Invalid input provided. Error message: `{0}`")]
    InvalidInput(String),
    #[error("The identity provider rejected account creation. Error message: `{0}`")]
    IdentityCreationFailed(String),
    #[error("Could not persist the identity document. Error message: `{0}`")]
    LinkPersistenceFailed(String),
    #[error("The backend rejected profile creation. Error message: `{0}`")]
    ProfileCreationFailed(String),
    #[error("The backend response did not have the expected shape")]
    UnexpectedResponseShape,
    #[error("The identity mapping channel is unavailable")]
    MapperUnavailable,
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::identity::ResolveIdentityError;
    use crate::user::RegisterUserError;

    #[test]
    fn usecase_errors_convert_verbatim() {
        let e: GharbhadaError = RegisterUserError::InvalidInput("bad".into()).into();
        assert!(matches!(e, GharbhadaError::InvalidInput(_)));

        let e: GharbhadaError = RegisterUserError::UnexpectedResponseShape.into();
        assert!(matches!(e, GharbhadaError::UnexpectedResponseShape));

        let e: GharbhadaError = ResolveIdentityError::MapperUnavailable.into();
        assert!(matches!(e, GharbhadaError::MapperUnavailable));
    }
}
