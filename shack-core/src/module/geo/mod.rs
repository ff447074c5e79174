//! Grid locator and great-circle helpers
//!
//! Used by the places engine to resolve coordinates for records that only
//! carry a Maidenhead locator, and to show bearings from the operator's grid.

pub mod bearing;
pub mod maidenhead;

pub use bearing::{initial_bearing, rounded_bearing};
pub use maidenhead::{GridError, latlng_to_locator, locator_to_latlng};
