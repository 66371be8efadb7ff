//! Country table location.

use std::path::PathBuf;

use tracing::info;

use crate::countries::CountryTable;
use crate::error::StandardsError;

/// Environment variable pointing at a replacement country table.
pub const COUNTRIES_ENV_VAR: &str = "SCORING_COUNTRIES_FILE";

/// Loads the country table.
///
/// Resolution order:
/// 1. `SCORING_COUNTRIES_FILE` environment variable
/// 2. The table compiled into this crate
pub fn load_default_country_table() -> Result<CountryTable, StandardsError> {
    match std::env::var_os(COUNTRIES_ENV_VAR) {
        Some(path) if !path.is_empty() => {
            let path = PathBuf::from(path);
            info!(path = %path.display(), "loading country table from environment");
            CountryTable::from_path(&path)
        }
        _ => CountryTable::builtin(),
    }
}
