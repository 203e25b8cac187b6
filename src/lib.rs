//! # Portcullis - Credential & Password-Reset Library
//!
//! This is a facade crate that re-exports all public APIs from the portcullis components.
//! Use this crate to get access to the whole authentication core in one place.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! portcullis = { path = "../portcullis" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `UserRecord`, `ResetToken`, etc.
//! - **Port traits**: `CredentialStore`, `Mailer`, `SessionTokenIssuer`
//! - **Use cases**: `AuthenticateUseCase`, `RequestPasswordResetUseCase`, `ConsumePasswordResetUseCase`
//! - **Adapters**: `InMemoryCredentialStore`, `PostmarkMailer`, `JwtSessionIssuer`, `Settings`
//! - **Service**: `AuthService` - The caller-facing operation surface

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use portcullis_core::*;
}

// Re-export most commonly used core types at the root level
pub use portcullis_core::{
    Email, EmailError, Password, PasswordError, ResetRequest, ResetToken, SessionToken, UserId,
    UserRecord,
};

// ============================================================================
// Port Traits
// ============================================================================

/// Port trait definitions
pub mod ports {
    pub use portcullis_core::{
        CredentialStore, CredentialStoreError, MailError, MailTemplate, Mailer, SessionTokenError,
        SessionTokenIssuer,
    };
}

// Re-export port traits at root level
pub use portcullis_core::{
    CredentialStore, CredentialStoreError, MailError, MailTemplate, Mailer, SessionTokenError,
    SessionTokenIssuer,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use portcullis_application::*;
}

// Re-export use cases at root level
pub use portcullis_application::{
    AuthenticateUseCase, AuthenticatedUser, ConsumePasswordResetUseCase,
    RequestPasswordResetUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// Persistence implementations
    pub mod persistence {
        pub use portcullis_adapters::persistence::*;
    }

    /// Mailer implementations
    pub mod email {
        pub use portcullis_adapters::email::*;
    }

    /// Session-token issuing
    pub mod session {
        pub use portcullis_adapters::session::*;
    }

    /// Configuration
    pub mod config {
        pub use portcullis_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use portcullis_adapters::{
    ConfigError, InMemoryCredentialStore, JwtSessionIssuer, PostmarkMailer, RecordingMailer,
    Settings,
};

// ============================================================================
// Auth Service (Main Entry Point)
// ============================================================================

/// Main auth service
pub use portcullis_auth_service::AuthService;

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};
