//! Declarative description of the place datasets
//!
//! Each source names its program, where to fetch it and which CSV column
//! headers carry each field. Adding a dataset only needs a new entry here
//! or in `config.toml`.

use serde::{Deserialize, Serialize};
use shack_common::Program;
use std::path::Path;

/// Accepted header names for each place field, tried in order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldAliases {
    pub reference: Vec<String>,
    pub name: Vec<String>,
    #[serde(default)]
    pub locator: Vec<String>,
    #[serde(default)]
    pub latitude: Vec<String>,
    #[serde(default)]
    pub longitude: Vec<String>,
}

impl FieldAliases {
    fn of(reference: &str, name: &str, locator: &str, latitude: &str, longitude: &str) -> Self {
        let one = |s: &str| vec![s.to_string()];
        Self {
            reference: one(reference),
            name: one(name),
            locator: one(locator),
            latitude: one(latitude),
            longitude: one(longitude),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpec {
    /// Label used in status reports
    pub name: String,
    pub program: Program,
    /// URL or file path of the CSV file
    pub location: String,
    pub fields: FieldAliases,
}

/// Column indexes resolved from a CSV header row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub reference: usize,
    pub name: Option<usize>,
    pub locator: Option<usize>,
    pub latitude: Option<usize>,
    pub longitude: Option<usize>,
}

/// First header matching any alias; exact match wins over case-insensitive
fn find_column(headers: &csv::StringRecord, aliases: &[String]) -> Option<usize> {
    let trimmed: Vec<&str> = headers.iter().map(str::trim).collect();
    aliases
        .iter()
        .find_map(|alias| trimmed.iter().position(|h| *h == alias.as_str()))
        .or_else(|| {
            aliases
                .iter()
                .find_map(|alias| trimmed.iter().position(|h| h.eq_ignore_ascii_case(alias)))
        })
}

impl ColumnMap {
    /// `None` if the reference column is missing
    pub fn resolve(headers: &csv::StringRecord, fields: &FieldAliases) -> Option<Self> {
        Some(Self {
            reference: find_column(headers, &fields.reference)?,
            name: find_column(headers, &fields.name),
            locator: find_column(headers, &fields.locator),
            latitude: find_column(headers, &fields.latitude),
            longitude: find_column(headers, &fields.longitude),
        })
    }
}

/// The POTA, WWFF and SOTA datasets under `data_dir`
pub fn default_sources(data_dir: impl AsRef<Path>) -> Vec<SourceSpec> {
    let dir = data_dir.as_ref();
    let at = |file: &str| dir.join(file).to_string_lossy().to_string();

    vec![
        SourceSpec {
            name: "POTA".to_string(),
            program: Program::Pota,
            location: at("all_parks_ext.csv"),
            fields: FieldAliases::of("reference", "name", "grid", "latitude", "longitude"),
        },
        SourceSpec {
            name: "WWFF".to_string(),
            program: Program::Wwff,
            location: at("wwff_directory.csv"),
            fields: FieldAliases::of("reference", "name", "iaruLocator", "latitude", "longitude"),
        },
        SourceSpec {
            name: "SOTA".to_string(),
            program: Program::Sota,
            location: at("summitlist.csv"),
            fields: FieldAliases::of("SummitCode", "SummitName", "GridRef1", "Latitude", "Longitude"),
        },
    ]
}
