// ============ Shared Plumbing ============
pub mod fetch;
pub mod geo;

// ============ Clock & Propagation ============
pub mod clock;
pub mod grayline;

// ============ Contest Logbook ============
pub mod logbook;

// ============ Activation Places ============
pub mod places;

// ============ Interface Text ============
pub mod i18n;
