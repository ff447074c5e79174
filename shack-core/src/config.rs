use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::module::logbook::LogbookOptions;
use crate::module::places::{SourceSpec, default_sources};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_station_callsign")]
    pub station_callsign: String,

    #[serde(default = "default_created_by")]
    pub created_by: String,

    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_locale_dir")]
    pub locale_dir: PathBuf,

    /// Operator locator used for bearings
    #[serde(default)]
    pub home_grid: Option<String>,

    /// Keep one serial counter per contest and mode instead of per mode
    #[serde(default)]
    pub serials_per_contest: bool,

    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,

    #[serde(default)]
    pub places: PlacesConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlacesConfig {
    /// Replaces the built-in POTA/WWFF/SOTA sources when given
    #[serde(default)]
    pub sources: Option<Vec<SourceSpec>>,
}

fn default_station_callsign() -> String {
    "N0CALL".to_string()
}

fn default_created_by() -> String {
    "shackbook".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_locale_dir() -> PathBuf {
    PathBuf::from("locales")
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            station_callsign: default_station_callsign(),
            created_by: default_created_by(),
            data_dir: default_data_dir(),
            log_dir: default_log_dir(),
            log_level: default_log_level(),
            locale_dir: default_locale_dir(),
            home_grid: None,
            serials_per_contest: false,
            export_dir: default_export_dir(),
            places: PlacesConfig::default(),
        }
    }
}

impl AppConfig {
    /// Read `path`; a missing file yields the defaults
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file {}: {}", path.display(), e))?;
        Ok(config)
    }

    pub fn place_sources(&self) -> Vec<SourceSpec> {
        match &self.places.sources {
            Some(sources) => sources.clone(),
            None => default_sources(&self.data_dir),
        }
    }

    pub fn logbook_options(&self) -> LogbookOptions {
        LogbookOptions {
            station_callsign: self.station_callsign.clone(),
            created_by: self.created_by.clone(),
            serials_per_contest: self.serials_per_contest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::from_file(dir.path().join("config.toml")).unwrap();
        assert_eq!(config.station_callsign, "N0CALL");
        assert_eq!(config.log_level, "info");
        assert!(!config.serials_per_contest);
        assert_eq!(config.place_sources().len(), 3);
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
            station_callsign = "OH2XYZ"
            data_dir = "/srv/shack"
            home_grid = "KP20"
            serials_per_contest = true
            "#,
        )
        .unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.station_callsign, "OH2XYZ");
        assert_eq!(config.created_by, "shackbook");
        assert_eq!(config.home_grid.as_deref(), Some("KP20"));
        assert!(config.place_sources()[0].location.starts_with("/srv/shack"));

        let options = config.logbook_options();
        assert_eq!(options.station_callsign, "OH2XYZ");
        assert!(options.serials_per_contest);
    }

    #[test]
    fn test_custom_sources() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
            [[places.sources]]
            name = "Parks"
            program = "POTA"
            location = "https://example.org/parks.csv"
            [places.sources.fields]
            reference = ["reference"]
            name = ["name"]
            "#,
        )
        .unwrap();

        let sources = AppConfig::from_file(&path).unwrap().place_sources();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].location, "https://example.org/parks.csv");
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "station_callsign = [").unwrap();
        assert!(AppConfig::from_file(&path).is_err());
    }
}
