//! Share link token generation.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

/// Random bytes per token.
const TOKEN_BYTES: usize = 32;

/// Generates public share link tokens.
#[derive(Debug, Clone, Default)]
pub struct LinkService;

impl LinkService {
    /// Creates a new link service.
    pub fn new() -> Self {
        Self
    }

    /// Generates a cryptographically secure, URL-safe token.
    pub fn generate_token(&self) -> String {
        let bytes: [u8; TOKEN_BYTES] = rand::random();
        URL_SAFE_NO_PAD.encode(bytes)
    }

    /// Whether `token` has the shape of a generated token.
    pub fn is_well_formed(&self, token: &str) -> bool {
        URL_SAFE_NO_PAD
            .decode(token)
            .is_ok_and(|bytes| bytes.len() == TOKEN_BYTES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_url_safe_and_distinct() {
        let links = LinkService::new();
        let a = links.generate_token();
        let b = links.generate_token();
        assert_ne!(a, b);
        assert_eq!(a.len(), 43);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        assert!(links.is_well_formed(&a));
    }

    #[test]
    fn test_rejects_malformed_tokens() {
        let links = LinkService::new();
        assert!(!links.is_well_formed(""));
        assert!(!links.is_well_formed("not a token"));
        assert!(!links.is_well_formed("c2hvcnQ"));
    }
}
