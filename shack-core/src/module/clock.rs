//! UTC station clock

use chrono::{DateTime, Utc};
use std::time::Duration;

/// Refresh period of the clock display
pub const TICK: Duration = Duration::from_secs(1);

/// Render an instant as `UTC HH:MM:SS`
pub fn format_utc(now: DateTime<Utc>) -> String {
    format!("UTC {}", now.format("%H:%M:%S"))
}
