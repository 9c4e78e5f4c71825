use std::fmt;
use std::str::FromStr;

use super::DomainError;

pub const MAX_CUSTOMER_NAME_LEN: usize = 100;
pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_DESCRIPTION_LEN: usize = 1000;
pub const MAX_PERSON_NAME_LEN: usize = 50;
pub const MAX_EMOJI_LEN: usize = 10;
pub const MAX_TRACK_FIELD_LEN: usize = 200;
pub const MAX_PHOTOS: usize = 7;
pub const MAX_EMAIL_LEN: usize = 255;
pub const MAX_PAYMENT_ID_LEN: usize = 64;

pub const DEFAULT_EMOJI: &str = "❤️";
pub const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";

/// Counts characters, not bytes, so emoji and accented names measure as typed.
pub fn validate_len(field: &'static str, value: &str, max: usize) -> Result<(), DomainError> {
    let len = value.chars().count();
    if len > max {
        return Err(DomainError::TooLong { field, len, max });
    }
    Ok(())
}

/// Trims `value` and fails when nothing is left.
pub fn require_non_empty(field: &'static str, value: &str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    #[default]
    Romantic,
    Purple,
    Ocean,
    Sunset,
    Forest,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Romantic => "romantic",
            Theme::Purple => "purple",
            Theme::Ocean => "ocean",
            Theme::Sunset => "sunset",
            Theme::Forest => "forest",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "romantic" => Ok(Theme::Romantic),
            "purple" => Ok(Theme::Purple),
            "ocean" => Ok(Theme::Ocean),
            "sunset" => Ok(Theme::Sunset),
            "forest" => Ok(Theme::Forest),
            other => Err(DomainError::InvalidTheme(other.to_string())),
        }
    }
}

/// `#RRGGBB` background color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexColor(String);

impl HexColor {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let value = raw.trim();
        if value.is_empty() {
            return Ok(Self(DEFAULT_BACKGROUND_COLOR.to_string()));
        }

        let valid = value.len() == 7
            && value.starts_with('#')
            && value[1..].chars().all(|c| c.is_ascii_hexdigit());
        if !valid {
            return Err(DomainError::InvalidColor(raw.to_string()));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self(DEFAULT_BACKGROUND_COLOR.to_string())
    }
}

/// Banner image location. Empty means "no banner".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BannerUrl(String);

impl BannerUrl {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let value = raw.trim();
        if value.is_empty() {
            return Ok(Self::default());
        }

        let rest = value
            .strip_prefix("https://")
            .or_else(|| value.strip_prefix("http://"));
        match rest {
            Some(rest) if !rest.is_empty() => Ok(Self(value.to_string())),
            _ => Err(DomainError::InvalidBanner(raw.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}
