pub mod use_cases;

pub use use_cases::{
    authenticate::{AuthenticateError, AuthenticateUseCase, AuthenticatedUser},
    consume_password_reset::{ConsumePasswordResetError, ConsumePasswordResetUseCase},
    request_password_reset::{RequestPasswordResetError, RequestPasswordResetUseCase},
};
