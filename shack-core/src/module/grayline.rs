//! Day/night terminator (grayline)
//!
//! Low-precision solar ephemeris, good to a fraction of a degree for the
//! next few decades:
//! - Julian day and Greenwich mean sidereal time from the instant
//! - Sun ecliptic longitude and obliquity of the ecliptic
//! - Equatorial position (right ascension, declination)
//!
//! The terminator latitude for each longitude follows from the local hour
//! angle of the sun.

use chrono::{DateTime, Utc};
use serde::Serialize;
use shack_common::LatLng;
use std::time::Duration;
use thiserror::Error;

/// Refresh period in watch mode
pub const REFRESH: Duration = Duration::from_secs(60);

/// Default longitude step of the terminator polyline, in degrees
pub const DEFAULT_RESOLUTION: f64 = 2.0;

const J2000: f64 = 2_451_545.0;
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GraylineError {
    #[error("resolution must be in (0, 180] degrees, got {0}")]
    InvalidResolution(f64),
}

/// Sun position in equatorial coordinates, degrees
#[derive(Debug, Clone, Copy)]
struct SunPosition {
    right_ascension: f64,
    declination: f64,
}

fn julian_day(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 86_400_000.0 + UNIX_EPOCH_JD
}

/// Greenwich mean sidereal time in hours
fn gmst(jd: f64) -> f64 {
    let d = jd - J2000;
    (18.697_374_558 + 24.065_709_824_419_08 * d).rem_euclid(24.0)
}

/// Apparent ecliptic longitude of the sun in degrees
fn sun_ecliptic_longitude(jd: f64) -> f64 {
    let n = jd - J2000;
    let mean_longitude = (280.460 + 0.985_647_4 * n).rem_euclid(360.0);
    let mean_anomaly = (357.528 + 0.985_600_3 * n).rem_euclid(360.0).to_radians();
    mean_longitude + 1.915 * mean_anomaly.sin() + 0.02 * (2.0 * mean_anomaly).sin()
}

fn ecliptic_obliquity(jd: f64) -> f64 {
    let t = (jd - J2000) / 36_525.0;
    23.439_291_11
        - t * (46.836_769 / 3600.0
            - t * (0.000_183_1 / 3600.0
                + t * (0.002_003_40 / 3600.0 - t * (0.576e-6 / 3600.0 - t * 4.34e-8 / 3600.0))))
}

fn sun_position(jd: f64) -> SunPosition {
    let lambda = sun_ecliptic_longitude(jd);
    let epsilon = ecliptic_obliquity(jd).to_radians();
    let lambda_rad = lambda.to_radians();

    let mut alpha = (epsilon.cos() * lambda_rad.tan()).atan().to_degrees();
    let delta = (epsilon.sin() * lambda_rad.sin()).asin().to_degrees();

    // put the right ascension in the same quadrant as the ecliptic longitude
    let lambda_quadrant = (lambda / 90.0).floor() * 90.0;
    let alpha_quadrant = (alpha / 90.0).floor() * 90.0;
    alpha += lambda_quadrant - alpha_quadrant;

    SunPosition {
        right_ascension: alpha,
        declination: delta,
    }
}

/// Local hour angle of the sun at `lon`, degrees
fn hour_angle(lon: f64, sun: SunPosition, gst_hours: f64) -> f64 {
    gst_hours * 15.0 + lon - sun.right_ascension
}

fn terminator_latitude(hour_angle: f64, sun: SunPosition) -> f64 {
    (-hour_angle.to_radians().cos() / sun.declination.to_radians().tan())
        .atan()
        .to_degrees()
}

fn wrap_longitude(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

/// Terminator snapshot for one instant
#[derive(Debug, Clone, Serialize)]
pub struct Terminator {
    pub time: DateTime<Utc>,
    /// Point where the sun is at the zenith
    pub subsolar: LatLng,
    /// Terminator line from longitude -180 to 180
    pub points: Vec<LatLng>,
    #[serde(skip)]
    sun: SunPosition,
    #[serde(skip)]
    gst_hours: f64,
}

impl Terminator {
    /// Compute the terminator with one point every `resolution` degrees of longitude
    pub fn at(time: DateTime<Utc>, resolution: f64) -> Result<Self, GraylineError> {
        if !(resolution > 0.0 && resolution <= 180.0) {
            return Err(GraylineError::InvalidResolution(resolution));
        }

        let jd = julian_day(time);
        let gst_hours = gmst(jd);
        let sun = sun_position(jd);

        let steps = (360.0 / resolution).ceil() as usize;
        let points = (0..=steps)
            .map(|i| (-180.0 + i as f64 * resolution).min(180.0))
            .map(|lon| LatLng::new(terminator_latitude(hour_angle(lon, sun, gst_hours), sun), lon))
            .collect();

        let subsolar = LatLng::new(
            sun.declination,
            wrap_longitude(sun.right_ascension - gst_hours * 15.0),
        );

        Ok(Self {
            time,
            subsolar,
            points,
            sun,
            gst_hours,
        })
    }

    /// Sun elevation above the horizon at `pos`, degrees
    pub fn solar_elevation(&self, pos: LatLng) -> f64 {
        let lat = pos.lat.to_radians();
        let dec = self.sun.declination.to_radians();
        let ha = hour_angle(pos.lon, self.sun, self.gst_hours).to_radians();
        (lat.sin() * dec.sin() + lat.cos() * dec.cos() * ha.cos())
            .clamp(-1.0, 1.0)
            .asin()
            .to_degrees()
    }

    pub fn is_daylight(&self, pos: LatLng) -> bool {
        self.solar_elevation(pos) > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn june_solstice() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 20, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_subsolar_latitude_at_june_solstice() {
        let t = Terminator::at(june_solstice(), 1.0).unwrap();
        assert!((t.subsolar.lat - 23.44).abs() < 0.1, "got {}", t.subsolar.lat);
        // noon UTC, sun close to the Greenwich meridian
        assert!(t.subsolar.lon.abs() < 2.0, "got {}", t.subsolar.lon);
    }

    #[test]
    fn test_subsolar_latitude_at_december_solstice() {
        let time = Utc.with_ymd_and_hms(2024, 12, 21, 0, 0, 0).unwrap();
        let t = Terminator::at(time, 1.0).unwrap();
        assert!((t.subsolar.lat + 23.44).abs() < 0.1, "got {}", t.subsolar.lat);
        assert!(t.subsolar.lon.abs() > 175.0, "got {}", t.subsolar.lon);
    }

    #[test]
    fn test_polyline_covers_all_longitudes() {
        let t = Terminator::at(june_solstice(), 1.0).unwrap();
        assert_eq!(t.points.len(), 361);
        assert_eq!(t.points.first().unwrap().lon, -180.0);
        assert_eq!(t.points.last().unwrap().lon, 180.0);

        let coarse = Terminator::at(june_solstice(), 7.0).unwrap();
        assert_eq!(coarse.points.last().unwrap().lon, 180.0);
    }

    #[test]
    fn test_terminator_points_are_on_the_horizon() {
        let t = Terminator::at(june_solstice(), 5.0).unwrap();
        for p in &t.points {
            assert!(t.solar_elevation(*p).abs() < 0.01, "{} -> {}", p, t.solar_elevation(*p));
        }
    }

    #[test]
    fn test_day_and_night() {
        let t = Terminator::at(june_solstice(), 1.0).unwrap();
        assert!(t.is_daylight(LatLng::new(0.0, 0.0)));
        assert!(!t.is_daylight(LatLng::new(0.0, 180.0)));
        // midnight sun
        assert!(t.is_daylight(LatLng::new(89.0, 180.0)));
        assert!(!t.is_daylight(LatLng::new(-89.0, 0.0)));
    }

    #[test]
    fn test_invalid_resolution() {
        assert!(Terminator::at(june_solstice(), 0.0).is_err());
        assert!(Terminator::at(june_solstice(), -1.0).is_err());
        assert!(Terminator::at(june_solstice(), f64::NAN).is_err());
        assert!(Terminator::at(june_solstice(), 181.0).is_err());
    }

    #[test]
    fn test_serializes_to_json() {
        let t = Terminator::at(june_solstice(), 90.0).unwrap();
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["points"].as_array().unwrap().len(), 5);
        assert!(json["subsolar"]["lat"].is_number());
        assert!(json.get("sun").is_none());
    }
}
