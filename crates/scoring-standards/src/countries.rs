//! Country alias table.
//!
//! Maps name variants (official, short, historical, ISO3 codes) to canonical
//! three-letter codes and records which codes belong to the African set used
//! for output filtering. The table is built once and only read afterwards.
//!
//! The built-in table also lists regional and income aggregates ("South
//! Asia", "Sub-Saharan Africa", "Low income") as non-African rows, using
//! World Bank codes where one exists and the user-assigned `X..` range
//! otherwise. Statistical exports mix such rows in with countries; listing
//! them makes them match exactly instead of drifting to a similar country.

use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use serde::Deserialize;
use tracing::debug;

use crate::error::StandardsError;
use crate::normalize::normalize_key;

/// Size of the African code set in the built-in table.
pub const AFRICAN_CODE_COUNT: usize = 54;

const BUILTIN_COUNTRIES: &str = include_str!("../data/countries.csv");
const BUILTIN_SOURCE: &str = "built-in countries.csv";
const NAME_SEPARATOR: char = '|';

/// One normalized alias and the code it resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryAliasEntry {
    /// Normalized lookup key (see [`normalize_key`]).
    pub variant: String,
    pub code: String,
    pub is_african: bool,
}

#[derive(Debug, Deserialize)]
struct CountryRow {
    code: String,
    african: String,
    names: String,
}

/// Read-only alias table shared by every resolution.
#[derive(Debug, Clone, Default)]
pub struct CountryTable {
    aliases: BTreeMap<String, CountryAliasEntry>,
    display_names: BTreeMap<String, String>,
    african: BTreeSet<String>,
}

impl CountryTable {
    /// Loads the table compiled into this crate.
    pub fn builtin() -> Result<Self, StandardsError> {
        let table = Self::from_reader(BUILTIN_COUNTRIES.as_bytes(), BUILTIN_SOURCE)?;
        if table.african.len() != AFRICAN_CODE_COUNT {
            return Err(StandardsError::AfricanSetSize {
                expected: AFRICAN_CODE_COUNT,
                actual: table.african.len(),
            });
        }
        Ok(table)
    }

    /// Loads a replacement table with columns `code,african,names`.
    pub fn from_path(path: &Path) -> Result<Self, StandardsError> {
        let file = std::fs::File::open(path).map_err(|err| StandardsError::io(path, err))?;
        Self::from_reader(file, &path.display().to_string())
    }

    pub fn from_reader<R: Read>(reader: R, source_name: &str) -> Result<Self, StandardsError> {
        let mut reader = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut table = Self::default();
        for record in reader.deserialize::<CountryRow>() {
            let row = record.map_err(|err| StandardsError::Csv {
                source_name: source_name.to_string(),
                message: err.to_string(),
            })?;
            table.add_row(row, source_name)?;
        }
        debug!(
            source = source_name,
            countries = table.display_names.len(),
            aliases = table.aliases.len(),
            african = table.african.len(),
            "loaded country table"
        );
        Ok(table)
    }

    fn add_row(&mut self, row: CountryRow, source_name: &str) -> Result<(), StandardsError> {
        let code = row.code.trim().to_ascii_uppercase();
        if code.len() != 3 || !code.chars().all(|ch| ch.is_ascii_alphabetic()) {
            return Err(StandardsError::InvalidCode {
                source_name: source_name.to_string(),
                code: row.code,
            });
        }
        if self.display_names.contains_key(&code) {
            return Err(StandardsError::DuplicateCode {
                source_name: source_name.to_string(),
                code,
            });
        }
        let is_african = parse_flag(&row.african).ok_or_else(|| {
            StandardsError::InvalidAfricanFlag {
                source_name: source_name.to_string(),
                code: code.clone(),
                value: row.african.clone(),
            }
        })?;

        let names: Vec<&str> = row
            .names
            .split(NAME_SEPARATOR)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect();
        let display = names.first().copied().unwrap_or(code.as_str()).to_string();

        // The code itself is always an accepted spelling.
        for variant in names.iter().copied().chain(std::iter::once(code.as_str())) {
            self.insert_alias(variant, &code, is_african)?;
        }
        self.display_names.insert(code.clone(), display);
        if is_african {
            self.african.insert(code);
        }
        Ok(())
    }

    fn insert_alias(
        &mut self,
        variant: &str,
        code: &str,
        is_african: bool,
    ) -> Result<(), StandardsError> {
        let key = normalize_key(variant);
        if key.is_empty() {
            return Ok(());
        }
        if let Some(existing) = self.aliases.get(&key) {
            if existing.code != code {
                return Err(StandardsError::ConflictingAlias {
                    alias: key,
                    existing: existing.code.clone(),
                    code: code.to_string(),
                });
            }
            return Ok(());
        }
        self.aliases.insert(
            key.clone(),
            CountryAliasEntry {
                variant: key,
                code: code.to_string(),
                is_african,
            },
        );
        Ok(())
    }

    /// Exact lookup after key normalization.
    pub fn resolve_alias(&self, text: &str) -> Option<&str> {
        self.lookup(&normalize_key(text))
            .map(|entry| entry.code.as_str())
    }

    /// Exact lookup of an already normalized key.
    pub fn lookup(&self, key: &str) -> Option<&CountryAliasEntry> {
        self.aliases.get(key)
    }

    pub fn is_african(&self, code: &str) -> bool {
        self.african.contains(&code.trim().to_ascii_uppercase())
    }

    pub fn african_codes(&self) -> &BTreeSet<String> {
        &self.african
    }

    /// All alias entries in key order.
    pub fn entries(&self) -> impl Iterator<Item = &CountryAliasEntry> {
        self.aliases.values()
    }

    /// All canonical codes in code order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.display_names.keys().map(String::as_str)
    }

    /// The first listed name for a code.
    pub fn display_name(&self, code: &str) -> Option<&str> {
        self.display_names
            .get(&code.trim().to_ascii_uppercase())
            .map(String::as_str)
    }

    /// Number of alias entries.
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(contents: &str) -> Result<CountryTable, StandardsError> {
        CountryTable::from_reader(contents.as_bytes(), "test")
    }

    #[test]
    fn builtin_has_full_african_set() {
        let table = CountryTable::builtin().unwrap();
        assert_eq!(table.african_codes().len(), AFRICAN_CODE_COUNT);
        assert!(table.is_african("NGA"));
        assert!(table.is_african("ssd"));
        assert!(!table.is_african("FRA"));
        assert!(!table.is_african("ESH"));
    }

    #[test]
    fn codes_are_aliases() {
        let table = table("code,african,names\nKEN,true,Kenya\n").unwrap();
        assert_eq!(table.resolve_alias("KEN"), Some("KEN"));
        assert_eq!(table.resolve_alias(" kenya "), Some("KEN"));
        assert_eq!(table.display_name("ken"), Some("Kenya"));
    }

    #[test]
    fn rejects_conflicting_alias() {
        let err = table("code,african,names\nCOG,true,Congo\nCOD,true,Congo\n").unwrap_err();
        assert!(matches!(err, StandardsError::ConflictingAlias { .. }));
    }

    #[test]
    fn rejects_bad_code_and_flag() {
        assert!(matches!(
            table("code,african,names\nKE,true,Kenya\n").unwrap_err(),
            StandardsError::InvalidCode { .. }
        ));
        assert!(matches!(
            table("code,african,names\nKEN,maybe,Kenya\n").unwrap_err(),
            StandardsError::InvalidAfricanFlag { .. }
        ));
        assert!(matches!(
            table("code,african,names\nKEN,true,Kenya\nKEN,true,Kenia\n").unwrap_err(),
            StandardsError::DuplicateCode { .. }
        ));
    }

    #[test]
    fn repeated_spellings_of_same_code_are_merged() {
        let table = table("code,african,names\nGNB,true,Guinea-Bissau|Guinea Bissau\n").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.resolve_alias("guinea bissau"), Some("GNB"));
    }
}
