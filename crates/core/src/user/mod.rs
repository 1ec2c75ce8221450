mod register_user;

pub use register_user::{
    RegisterUserUseCase, UseCaseError as RegisterUserError, UseCaseRes as RegisteredUser,
};
