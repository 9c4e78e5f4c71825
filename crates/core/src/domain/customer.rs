use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use super::DomainError;
use super::site::{MAX_EMAIL_LEN, validate_len};

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern is valid"));

/// Brazilian taxpayer number, stored as its 11 digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cpf(String);

impl Cpf {
    /// Accepts any punctuation around the digits (`123.456.789-09`, `12345678909`).
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        if digits.len() != 11 {
            return Err(DomainError::InvalidCpf(digits.len()));
        }
        Ok(Self(digits))
    }

    pub fn digits(&self) -> &str {
        &self.0
    }

    /// `XXX.XXX.XXX-XX`
    pub fn formatted(&self) -> String {
        let d = &self.0;
        format!("{}.{}.{}-{}", &d[0..3], &d[3..6], &d[6..9], &d[9..11])
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(DomainError::MissingField("email"));
        }
        validate_len("email", &normalized, MAX_EMAIL_LEN)?;
        if !EMAIL_PATTERN.is_match(&normalized) {
            return Err(DomainError::InvalidEmail(raw.to_string()));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Payer name split the way the gateway wants it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayerName {
    pub first_name: String,
    pub last_name: String,
}

impl PayerName {
    /// A single-word name repeats as the last name.
    pub fn split(full_name: &str) -> Result<Self, DomainError> {
        let mut parts = full_name.split_whitespace();
        let Some(first) = parts.next() else {
            return Err(DomainError::MissingField("customer.name"));
        };

        let rest = parts.collect::<Vec<_>>().join(" ");
        let last_name = if rest.is_empty() {
            first.to_string()
        } else {
            rest
        };

        Ok(Self {
            first_name: first.to_string(),
            last_name,
        })
    }
}
