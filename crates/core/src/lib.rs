//! Domain rules for the Vibraze storefront: plans, payers, premium site fields.

pub mod domain;
