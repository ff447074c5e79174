//! Place record types

use serde::{Deserialize, Serialize};
use shack_common::{LatLng, Program};

use crate::module::geo::locator_to_latlng;

/// One activation place from a reference dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceRecord {
    pub program: Program,
    /// Reference code, e.g. "OH-0001", "OHFF-0001", "OH/KS-001"
    pub reference: String,
    pub name: String,
    /// Maidenhead locator as given by the source
    pub locator: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Resolved once at load time; `None` keeps the place off the map
    pub position: Option<LatLng>,
}

impl PlaceRecord {
    /// Build a record and resolve its position: direct coordinates first,
    /// then the grid locator. An undecodable locator leaves it unresolved.
    pub fn new(
        program: Program,
        reference: impl Into<String>,
        name: impl Into<String>,
        locator: Option<String>,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Self {
        let reference = reference.into();
        let position = match (latitude, longitude) {
            (Some(lat), Some(lon)) => Some(LatLng::new(lat, lon)),
            _ => locator.as_deref().and_then(|grid| match locator_to_latlng(grid) {
                Ok(pos) => Some(pos),
                Err(e) => {
                    tracing::debug!("{}: locator '{}' unusable: {}", reference, grid, e);
                    None
                }
            }),
        };

        Self {
            program,
            reference,
            name: name.into(),
            locator,
            latitude,
            longitude,
            position,
        }
    }
}

/// Lenient coordinate parsing: anything non-numeric or out of range is absent
pub fn parse_coordinate(raw: &str, limit: f64) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && v.abs() <= limit)
}
