//! Clock and grayline commands

use anyhow::Result;
use chrono::{DateTime, Utc};
use shack_core::module::clock::{TICK, format_utc};
use shack_core::module::geo::locator_to_latlng;
use shack_core::module::grayline::{REFRESH, Terminator};
use std::io::Write;

use crate::cli::{ClockCommand, GraylineCommand};

pub async fn run_clock(args: ClockCommand) -> Result<()> {
    if args.once {
        println!("{}", format_utc(Utc::now()));
        return Ok(());
    }

    let mut interval = tokio::time::interval(TICK);
    let mut stdout = std::io::stdout();
    loop {
        tokio::select! {
            _ = interval.tick() => {
                write!(stdout, "\r{}", format_utc(Utc::now()))?;
                stdout.flush()?;
            }
            _ = tokio::signal::ctrl_c() => {
                writeln!(stdout)?;
                tracing::debug!("Clock stopped");
                return Ok(());
            }
        }
    }
}

/// Render one grayline snapshot
fn render_grayline(args: &GraylineCommand, now: DateTime<Utc>) -> Result<String> {
    let terminator = Terminator::at(now, args.resolution)?;

    match &args.at {
        Some(grid) => {
            let pos = locator_to_latlng(grid)?;
            let state = if terminator.is_daylight(pos) { "day" } else { "night" };
            Ok(format!(
                "{} subsolar {} | {} {} ({:.1}° sun elevation)",
                format_utc(now),
                terminator.subsolar,
                grid.to_uppercase(),
                state,
                terminator.solar_elevation(pos)
            ))
        }
        None => Ok(serde_json::to_string_pretty(&terminator)?),
    }
}

pub async fn run_grayline(args: GraylineCommand) -> Result<()> {
    if !args.watch {
        println!("{}", render_grayline(&args, Utc::now())?);
        return Ok(());
    }

    tracing::info!("Grayline watch, refreshing every {}s", REFRESH.as_secs());
    let mut interval = tokio::time::interval(REFRESH);
    loop {
        tokio::select! {
            _ = interval.tick() => println!("{}", render_grayline(&args, Utc::now())?),
            _ = tokio::signal::ctrl_c() => return Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn args(at: Option<&str>, resolution: f64) -> GraylineCommand {
        GraylineCommand {
            watch: false,
            resolution,
            at: at.map(str::to_string),
        }
    }

    #[test]
    fn test_render_json() {
        let now = Utc.with_ymd_and_hms(2024, 6, 20, 12, 0, 0).unwrap();
        let out = render_grayline(&args(None, 45.0), now).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["points"].as_array().unwrap().len(), 9);
    }

    #[test]
    fn test_render_at_locator() {
        let now = Utc.with_ymd_and_hms(2024, 6, 20, 12, 0, 0).unwrap();
        let out = render_grayline(&args(Some("kp20"), 2.0), now).unwrap();
        assert!(out.starts_with("UTC 12:00:00"));
        assert!(out.contains("KP20 day"));

        assert!(render_grayline(&args(Some("K"), 2.0), now).is_err());
        assert!(render_grayline(&args(None, 0.0), now).is_err());
    }
}
