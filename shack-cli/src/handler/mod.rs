//! Command dispatch
//!
//! Every handler prints its result on stdout; diagnostics go through
//! `tracing` to the log file and stderr.

mod logbook;
mod places;
mod sky;

use anyhow::{Context, Result};
use shack_common::Locale;
use shack_core::config::AppConfig;
use shack_core::module::fetch::ResourceFetcher;
use shack_core::module::i18n::{self, Translations};
use shack_core::module::logbook::{FileBackend, Logbook};

use crate::cli::{Command, LocaleCommand};

/// Shared state of one invocation
pub struct Session {
    pub config: AppConfig,
    pub fetcher: ResourceFetcher,
}

impl Session {
    pub fn new(config: AppConfig) -> Result<Self> {
        Ok(Self {
            config,
            fetcher: ResourceFetcher::new()?,
        })
    }

    pub fn open_logbook(&self) -> Result<Logbook<FileBackend>> {
        let backend = FileBackend::in_dir(&self.config.data_dir);
        let path = backend.path().display().to_string();
        Logbook::open(backend, self.config.logbook_options())
            .with_context(|| format!("Failed to open logbook state {}", path))
    }

    pub async fn translations(&self, locale: Locale) -> Translations {
        i18n::load(locale, &self.config.locale_dir, &self.fetcher).await
    }
}

pub async fn run(command: Command, session: Session) -> Result<()> {
    match command {
        Command::Clock(args) => sky::run_clock(args).await,
        Command::Grayline(args) => sky::run_grayline(args).await,
        Command::Log(cmd) => logbook::run_log(cmd, &session).await,
        Command::Export(args) => logbook::run_export(args, &session).await,
        Command::Places(cmd) => places::run_places(cmd, &session).await,
        Command::Locale(cmd) => run_locale(cmd, &session).await,
    }
}

async fn run_locale(command: LocaleCommand, session: &Session) -> Result<()> {
    let mut logbook = session.open_logbook()?;

    match command {
        LocaleCommand::Show => println!("{}", logbook.locale()),
        LocaleCommand::Set { locale } => {
            logbook.set_locale(locale)?;
            let tr = session.translations(locale).await;
            println!("{}", tr.format("locale.changed", &[("locale", locale.as_str())]));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EN: &str = include_str!("../../../locales/en.json");
    const FI: &str = include_str!("../../../locales/fi.json");

    const KEYS: &[&str] = &[
        "log.contest",
        "log.band",
        "log.mode",
        "log.region",
        "log.next_serial",
        "log.contest_selected",
        "log.next_exchange",
        "log.saved",
        "log.deleted",
        "log.empty",
        "export.nothing",
        "export.missing_info",
        "export.written",
        "places.status.loaded",
        "places.status.failed",
        "places.incomplete",
        "places.no_results",
        "places.bearing_hint",
        "settings.saved",
        "locale.changed",
    ];

    #[test]
    fn test_bundled_tables_cover_all_keys() {
        for (locale, text) in [(Locale::En, EN), (Locale::Fi, FI)] {
            let tr = Translations::from_json(locale, text).unwrap();
            for key in KEYS {
                assert_ne!(tr.get(key), *key, "{} is missing {}", locale, key);
            }
        }
    }

    #[tokio::test]
    async fn test_open_logbook_in_fresh_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            data_dir: dir.path().join("data"),
            ..AppConfig::default()
        };
        let session = Session::new(config).unwrap();
        let logbook = session.open_logbook().unwrap();
        assert!(logbook.contacts().is_empty());
        assert_eq!(logbook.locale(), Locale::En);
    }
}
