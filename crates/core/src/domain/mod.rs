mod amount;
mod customer;
mod dates;
mod error;
mod payment_status;
mod plan;
mod site;
mod token;

pub use amount::Amount;
pub use customer::{Cpf, Email, PayerName};
pub use dates::parse_date_time;
pub use error::DomainError;
pub use payment_status::PaymentStatus;
pub use plan::Plan;
pub use site::{
    BannerUrl, DEFAULT_BACKGROUND_COLOR, DEFAULT_EMOJI, HexColor, MAX_CUSTOMER_NAME_LEN,
    MAX_DESCRIPTION_LEN, MAX_EMAIL_LEN, MAX_EMOJI_LEN, MAX_PAYMENT_ID_LEN, MAX_PERSON_NAME_LEN,
    MAX_PHOTOS, MAX_TITLE_LEN, MAX_TRACK_FIELD_LEN, Theme, require_non_empty, validate_len,
};
pub use token::SiteToken;
