//! Authentication for the Discogs API
//!
//! # Personal access tokens
//! Sent as `Authorization: Discogs token=<token>`. Price suggestions
//! require it; listing and statistics lookups work anonymously.
//! OAuth flows are not handled here.
//!
//! # Source
//! - Authentication: https://www.discogs.com/developers/#page:authentication

/// Personal access token
#[derive(Clone)]
pub struct Token(String);

impl Token {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header
    pub fn header_value(&self) -> String {
        format!("Discogs token={}", self.0)
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Token")
            .field(&format!("{}...", self.0.chars().take(4).collect::<String>()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_debug_redacts_secret() {
        let token = Token::new("abcdSECRETSECRET");
        let debug_str = format!("{:?}", token);
        assert!(!debug_str.contains("SECRET"));
        assert!(debug_str.contains("abcd..."));
    }

    #[test]
    fn test_header_value() {
        let token = Token::new("xyz");
        assert_eq!(token.header_value(), "Discogs token=xyz");
        assert_eq!(token.expose(), "xyz");
    }
}
