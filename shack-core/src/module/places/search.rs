//! Place filtering and bearings
use shack_common::{LatLng, Program};

use super::types::PlaceRecord;
use crate::module::geo::{locator_to_latlng, rounded_bearing};

/// Shortest operator locator bearings are computed from
pub const MIN_OBSERVER_GRID_LEN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgramFilter {
    #[default]
    All,
    Only(Program),
}

impl ProgramFilter {
    pub fn matches(&self, program: Program) -> bool {
        match self {
            ProgramFilter::All => true,
            ProgramFilter::Only(p) => *p == program,
        }
    }
}

impl std::str::FromStr for ProgramFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(ProgramFilter::All)
        } else {
            s.parse::<Program>().map(ProgramFilter::Only)
        }
    }
}

/// Filter `places` by program and free-text query.
///
/// # Search Priority
/// 1. Exact reference match (case-insensitive) returns that single place
/// 2. Otherwise every place whose reference or name contains the query
///
/// An empty query keeps everything the program filter lets through.
pub fn filter_places<'a>(places: &'a [PlaceRecord], filter: ProgramFilter, query: &str) -> Vec<&'a PlaceRecord> {
    let candidates = places.iter().filter(|p| filter.matches(p.program));
    let query = query.trim().to_lowercase();

    if query.is_empty() {
        return candidates.collect();
    }

    let candidates: Vec<&PlaceRecord> = candidates.collect();

    if let Some(exact) = candidates.iter().find(|p| p.reference.to_lowercase() == query) {
        return vec![*exact];
    }

    candidates
        .into_iter()
        .filter(|p| p.reference.to_lowercase().contains(&query) || p.name.to_lowercase().contains(&query))
        .collect()
}

/// Operator position from their locator; short or invalid locators give `None`
pub fn observer_position(grid: &str) -> Option<LatLng> {
    let grid = grid.trim();
    if grid.chars().count() < MIN_OBSERVER_GRID_LEN {
        return None;
    }
    match locator_to_latlng(grid) {
        Ok(pos) => Some(pos),
        Err(e) => {
            tracing::debug!("Ignoring operator locator '{}': {}", grid, e);
            None
        }
    }
}

/// Whole-degree bearing from the observer to a place, if both are located
pub fn bearing_to(observer: Option<LatLng>, place: &PlaceRecord) -> Option<u16> {
    Some(rounded_bearing(observer?, place.position?))
}
