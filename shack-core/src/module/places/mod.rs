//! POTA / WWFF / SOTA place search
//!
//! ## Main Components
//! - `SourceSpec`: declarative description of one CSV dataset
//! - `load_places`: concurrent fetch and parse of every source
//! - `PlaceCatalog`: merged records plus per-source load status
//! - `filter_places`: program filter and query match

// ============ Data Structures ============
mod types;
pub use types::{PlaceRecord, parse_coordinate};

// ============ Data Sources ============
mod source;
pub use source::{ColumnMap, FieldAliases, SourceSpec, default_sources};

mod loader;
pub use loader::{PlaceCatalog, SourceOutcome, SourceStatus, load_places, parse_source};

// ============ Search ============
mod search;
pub use search::{MIN_OBSERVER_GRID_LEN, ProgramFilter, bearing_to, filter_places, observer_position};
