//! Concurrent loading of the place datasets
//!
//! Every source is fetched and parsed independently. A source that fails is
//! reported and skipped; the catalog holds whatever the others produced.

use anyhow::{Context, Result};
use futures::future::join_all;
use shack_common::Program;

use super::source::{ColumnMap, SourceSpec};
use super::types::{PlaceRecord, parse_coordinate};
use crate::module::fetch::TextFetcher;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOutcome {
    Loaded { records: usize },
    Failed { reason: String },
}

/// Load result of one source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceStatus {
    pub name: String,
    pub program: Program,
    pub outcome: SourceOutcome,
}

impl SourceStatus {
    pub fn is_loaded(&self) -> bool {
        matches!(self.outcome, SourceOutcome::Loaded { .. })
    }
}

/// Parse one CSV dataset into place records.
///
/// Rows without a reference are dropped. Any malformed row fails the
/// whole source.
pub fn parse_source(spec: &SourceSpec, text: &str) -> Result<Vec<PlaceRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(text.as_bytes());

    let headers = reader.headers().context("Failed to read CSV header")?.clone();
    let columns = ColumnMap::resolve(&headers, &spec.fields).ok_or_else(|| {
        anyhow::anyhow!("No reference column (tried {:?})", spec.fields.reference)
    })?;

    let mut places = Vec::new();
    let mut skipped = 0usize;

    for (row, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Malformed CSV row {}", row + 1))?;
        let cell = |idx: Option<usize>| idx.and_then(|i| record.get(i)).map(str::trim).unwrap_or("");

        let reference = cell(Some(columns.reference));
        if reference.is_empty() {
            skipped += 1;
            continue;
        }

        let locator = Some(cell(columns.locator)).filter(|l| !l.is_empty()).map(str::to_string);

        places.push(PlaceRecord::new(
            spec.program,
            reference,
            cell(columns.name),
            locator,
            parse_coordinate(cell(columns.latitude), 90.0),
            parse_coordinate(cell(columns.longitude), 180.0),
        ));
    }

    if skipped > 0 {
        tracing::debug!("{}: skipped {} rows without reference", spec.name, skipped);
    }

    Ok(places)
}

async fn load_source(spec: &SourceSpec, fetcher: &dyn TextFetcher) -> Result<Vec<PlaceRecord>> {
    let text = fetcher.fetch_text(&spec.location).await?;
    parse_source(spec, &text).with_context(|| format!("Failed to parse {}", spec.location))
}

/// All successfully loaded places plus per-source status
#[derive(Debug, Clone, Default)]
pub struct PlaceCatalog {
    places: Vec<PlaceRecord>,
    statuses: Vec<SourceStatus>,
}

impl PlaceCatalog {
    pub fn new(places: Vec<PlaceRecord>, statuses: Vec<SourceStatus>) -> Self {
        Self { places, statuses }
    }

    pub fn places(&self) -> &[PlaceRecord] {
        &self.places
    }

    pub fn statuses(&self) -> &[SourceStatus] {
        &self.statuses
    }

    /// True when at least one source failed; results may be incomplete
    pub fn has_failures(&self) -> bool {
        self.statuses.iter().any(|s| !s.is_loaded())
    }

    /// Reference codes for autocompletion, in load order
    pub fn suggestions(&self) -> impl Iterator<Item = &str> {
        self.places.iter().map(|p| p.reference.as_str())
    }

    /// Exact (case-insensitive) reference lookup
    pub fn find(&self, reference: &str) -> Option<&PlaceRecord> {
        let reference = reference.trim();
        self.places.iter().find(|p| p.reference.eq_ignore_ascii_case(reference))
    }
}

/// Fetch and parse all sources concurrently and merge the results.
pub async fn load_places(sources: &[SourceSpec], fetcher: &dyn TextFetcher) -> PlaceCatalog {
    tracing::info!("Loading {} place sources", sources.len());

    let results = join_all(sources.iter().map(|spec| load_source(spec, fetcher))).await;

    let mut places = Vec::new();
    let mut statuses = Vec::with_capacity(sources.len());

    for (spec, result) in sources.iter().zip(results) {
        let outcome = match result {
            Ok(loaded) => {
                tracing::info!("{}: loaded {} places", spec.name, loaded.len());
                let records = loaded.len();
                places.extend(loaded);
                SourceOutcome::Loaded { records }
            }
            Err(e) => {
                tracing::warn!("{}: failed to load: {:#}", spec.name, e);
                SourceOutcome::Failed {
                    reason: format!("{:#}", e),
                }
            }
        };
        statuses.push(SourceStatus {
            name: spec.name.clone(),
            program: spec.program,
            outcome,
        });
    }

    PlaceCatalog::new(places, statuses)
}
