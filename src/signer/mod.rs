//! Transaction authorization.
//!
//! A `TransactionAuthorization` binds one identity to the credential store
//! that holds its key. Deployment code hands it transactions to sign; it
//! refuses any request made on behalf of another address.

pub mod authorization;

pub use authorization::TransactionAuthorization;
