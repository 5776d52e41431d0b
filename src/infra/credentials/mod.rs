// Credential persistence.
// - `file_store.rs` keeps the OAuth credential in a JSON file on disk.

#[path = "file_store.rs"]
pub mod file_store;

pub use file_store::FileCredentialStore;
