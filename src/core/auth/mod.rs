pub mod auth_models;
pub mod auth_service;

pub use auth_models::{AuthError, ClientIdentity, Credential};
pub use auth_service::{ApprovalCodeProvider, AuthProvider, CredentialStore, Session, SessionBuilder};
