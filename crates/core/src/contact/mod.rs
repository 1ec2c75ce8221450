mod list_contacts;

pub use list_contacts::{
    ListContactsUseCase, UseCaseError as ListContactsError, UseCaseRes as ContactList,
};
