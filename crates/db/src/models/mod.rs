//! Row models mapped with `sqlx::FromRow` and their conversions into
//! `banner-core` domain types.

pub mod banner;
pub mod profile;
