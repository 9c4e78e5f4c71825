use std::fmt;
use std::str::FromStr;

use super::DomainError;

const MAX_TOKEN_LEN: usize = 64;

/// Public key of a premium site, used in its URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SiteToken(String);

impl SiteToken {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let token = raw.trim();
        if token.is_empty() {
            return Err(DomainError::MissingField("token"));
        }
        if token.len() > MAX_TOKEN_LEN
            || !token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(DomainError::InvalidToken(raw.to_string()));
        }
        Ok(Self(token.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SiteToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SiteToken {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::SiteToken;
    use crate::domain::DomainError;

    #[test]
    fn accepts_url_safe_tokens() {
        let token: SiteToken = "site_abc-123".parse().expect("token should parse");
        assert_eq!(token.as_str(), "site_abc-123");
    }

    #[test]
    fn rejects_empty_and_unsafe_tokens() {
        assert_eq!(SiteToken::parse(""), Err(DomainError::MissingField("token")));
        assert!(matches!(
            SiteToken::parse("../etc/passwd"),
            Err(DomainError::InvalidToken(_))
        ));
        assert!(SiteToken::parse(&"a".repeat(65)).is_err());
    }
}
