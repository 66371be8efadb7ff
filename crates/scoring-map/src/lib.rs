#![deny(unsafe_code)]

//! Matching free text against the country reference table and scoring
//! dataset columns by role.

pub mod detect;
pub mod fuzzy;
pub mod resolver;

pub use detect::{
    COUNTRY_HEADER_KEYWORDS, ColumnDetector, header_is_identifier, header_matches_keyword,
    report_from_profiles,
};
pub use fuzzy::{token_sort_key, token_sort_ratio};
pub use resolver::{CountryResolver, MIN_FUZZY_ALIAS_CHARS, MatchKind, Resolution};
