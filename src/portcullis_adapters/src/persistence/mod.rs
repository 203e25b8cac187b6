pub mod in_memory_credential_store;
mod password_hashing;

pub use in_memory_credential_store::InMemoryCredentialStore;
