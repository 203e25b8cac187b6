pub mod jwt_session_issuer;

pub use jwt_session_issuer::{JwtSessionIssuer, SessionClaims, SESSION_TOKEN_TTL_SECONDS};
