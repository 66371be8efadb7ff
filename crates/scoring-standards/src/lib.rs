#![deny(unsafe_code)]

pub mod countries;
pub mod error;
pub mod normalize;
pub mod paths;

pub use crate::countries::{AFRICAN_CODE_COUNT, CountryAliasEntry, CountryTable};
pub use crate::error::StandardsError;
pub use crate::normalize::normalize_key;
pub use crate::paths::{COUNTRIES_ENV_VAR, load_default_country_table};
