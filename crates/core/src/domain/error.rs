use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid plan: {0}. plan must be 'premium' or 'lifetime'")]
    InvalidPlan(String),

    #[error("CPF must have 11 digits, got {0}")]
    InvalidCpf(usize),

    #[error("invalid email: {0}")]
    InvalidEmail(String),

    #[error("invalid amount: {0}. amount must be a positive number")]
    InvalidAmount(String),

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("invalid theme: {0}")]
    InvalidTheme(String),

    #[error("invalid color: {0}. color must be in #RRGGBB format")]
    InvalidColor(String),

    #[error("invalid banner url: {0}")]
    InvalidBanner(String),

    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("{field} is too long: {len} > {max}")]
    TooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("too many photos: {0} > {max}", max = super::MAX_PHOTOS)]
    TooManyPhotos(usize),
}
