//! Interface translations
//!
//! One JSON table per locale, `<locale_dir>/<locale>.json`. Keys are looked
//! up by dotted path (`places.status.loaded`); anything missing renders as
//! the key itself.

use anyhow::{Context, Result};
use serde_json::Value;
use shack_common::Locale;
use std::path::Path;

use crate::module::fetch::TextFetcher;

#[derive(Debug, Clone, Default)]
pub struct Translations {
    locale: Locale,
    table: Value,
}

impl Translations {
    /// Empty table: every lookup falls back to the key
    pub fn empty(locale: Locale) -> Self {
        Self {
            locale,
            table: Value::Null,
        }
    }

    pub fn from_json(locale: Locale, text: &str) -> Result<Self> {
        let table: Value = serde_json::from_str(text).context("Invalid translation JSON")?;
        if !table.is_object() {
            anyhow::bail!("Translation table must be a JSON object");
        }
        Ok(Self { locale, table })
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        // flat keys containing dots take precedence over nesting
        if let Some(text) = self.table.get(key).and_then(Value::as_str) {
            return Some(text);
        }
        key.split('.')
            .try_fold(&self.table, |node, part| node.get(part))
            .and_then(Value::as_str)
    }

    /// Translated text for `key`, or the key itself
    pub fn get<'a>(&'a self, key: &'a str) -> &'a str {
        self.lookup(key).unwrap_or(key)
    }

    /// Translated text with `{name}` placeholders filled in
    pub fn format(&self, key: &str, args: &[(&str, &str)]) -> String {
        args.iter().fold(self.get(key).to_string(), |text, (name, value)| {
            text.replace(&format!("{{{}}}", name), value)
        })
    }
}

/// Location of the table for `locale` under `locale_dir`
pub fn table_location(locale_dir: impl AsRef<Path>, locale: Locale) -> String {
    locale_dir
        .as_ref()
        .join(format!("{}.json", locale.as_str()))
        .to_string_lossy()
        .to_string()
}

/// Load the table for `locale`. Failures are logged and yield an empty table.
pub async fn load(locale: Locale, locale_dir: impl AsRef<Path>, fetcher: &dyn TextFetcher) -> Translations {
    let location = table_location(locale_dir, locale);

    let result = async {
        let text = fetcher.fetch_text(&location).await?;
        Translations::from_json(locale, &text)
    }
    .await;

    match result {
        Ok(translations) => {
            tracing::debug!("Loaded translations for '{}' from {}", locale, location);
            translations
        }
        Err(e) => {
            tracing::warn!("Failed to load translations from {}: {:#}", location, e);
            Translations::empty(locale)
        }
    }
}
