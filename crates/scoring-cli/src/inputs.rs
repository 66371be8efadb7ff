//! Loading the command's inputs: options, country table and process config.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use scoring_model::{ProcessConfig, ScoringOptions};
use scoring_standards::{CountryTable, load_default_country_table};
use tracing::debug;

/// Where the stage-two configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Stdin,
    Inline(String),
}

impl ConfigSource {
    /// `-` reads standard input, anything else is a file path.
    pub fn from_arg(path: Option<&Path>, inline: Option<&str>) -> Option<Self> {
        if let Some(text) = inline {
            return Some(Self::Inline(text.to_string()));
        }
        path.map(|path| {
            if path == Path::new("-") {
                Self::Stdin
            } else {
                Self::File(path.to_path_buf())
            }
        })
    }
}

pub fn load_options(path: Option<&Path>) -> Result<ScoringOptions> {
    match path {
        Some(path) => ScoringOptions::from_toml_path(path)
            .with_context(|| format!("load options {}", path.display())),
        None => Ok(ScoringOptions::default()),
    }
}

/// Loads the table from `path`, or the default table (see `SCORING_COUNTRIES_FILE`).
pub fn load_country_table(path: Option<&Path>) -> Result<CountryTable> {
    let table = match path {
        Some(path) => CountryTable::from_path(path)
            .with_context(|| format!("load country table {}", path.display()))?,
        None => load_default_country_table().context("load country table")?,
    };
    debug!(
        aliases = table.len(),
        african = table.african_codes().len(),
        "country table ready"
    );
    Ok(table)
}

pub fn load_process_config(source: &ConfigSource) -> Result<ProcessConfig> {
    let text = match source {
        ConfigSource::File(path) => std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?,
        ConfigSource::Stdin => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("read config from stdin")?;
            text
        }
        ConfigSource::Inline(text) => text.clone(),
    };
    ProcessConfig::from_json(&text).context("decode process config")
}
