use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Award program a place belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Program {
    #[serde(rename = "POTA")]
    Pota,
    #[serde(rename = "WWFF")]
    Wwff,
    #[serde(rename = "SOTA")]
    Sota,
}

impl Program {
    pub const ALL: [Program; 3] = [Program::Pota, Program::Wwff, Program::Sota];

    pub fn as_str(&self) -> &'static str {
        match self {
            Program::Pota => "POTA",
            Program::Wwff => "WWFF",
            Program::Sota => "SOTA",
        }
    }
}

impl std::fmt::Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Program {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pota" => Ok(Program::Pota),
            "wwff" => Ok(Program::Wwff),
            "sota" => Ok(Program::Sota),
            _ => Err(format!("Unknown program: {}", s)),
        }
    }
}

/// UI language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "fi")]
    Fi,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Fi => "fi",
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "fi" => Ok(Locale::Fi),
            _ => Err(format!("Unknown locale: {}", s)),
        }
    }
}

/// Geographic coordinate in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lon: f64,
}

impl LatLng {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl std::fmt::Display for LatLng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lon)
    }
}

/// One logged QSO.
///
/// Every field is kept as entered. Missing fields in stored logs
/// deserialize to empty strings so a damaged entry never blocks export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ContactRecord {
    /// Stable handle used for deletion
    pub id: Uuid,
    /// UTC date, e.g. "2024-06-01"
    pub date: String,
    /// UTC time, e.g. "14:05"
    pub time: String,
    /// Worked station callsign
    pub call: String,
    /// Band label, e.g. "20m"
    pub band: String,
    /// Mode, e.g. "SSB", "CW"
    pub mode: String,
    pub rst_sent: String,
    pub rst_rcvd: String,
    pub exch_sent: String,
    pub exch_rcvd: String,
}
