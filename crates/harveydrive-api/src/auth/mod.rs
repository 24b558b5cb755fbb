//! Verification of the auth provider's bearer tokens.

pub mod claims;
pub mod verifier;

pub use claims::{AccessClaims, UserMetadata};
pub use verifier::TokenVerifier;
