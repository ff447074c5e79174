//! Station tools core: contest logbook, activation place search, grid
//! locators, grayline and the UTC clock.

pub mod config;
pub mod logging;
pub mod module;
