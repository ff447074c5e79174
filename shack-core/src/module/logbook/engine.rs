//! Logbook engine: form state, submission, deletion and export

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use regex::Regex;
use shack_common::{ContactRecord, Locale};
use std::sync::LazyLock;
use uuid::Uuid;

use super::adif::to_adif;
use super::cabrillo::{CabrilloHeader, to_cabrillo};
use super::contest::{CONTESTS, Contest, DEFAULT_CONTEST, find_contest};
use super::exchange::{ExchangeInputs, SentExchange, compute_exchange, default_rst, serial_key};
use super::store::{CabrilloCategory, ContestInfo, FormSelections, StateBackend, StateStore};
use super::{ExportError, LogbookError};

/// Received report when none is given, whatever the mode
const DEFAULT_RST_RCVD: &str = "59";

static CALLSIGN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9/]+$").expect("valid callsign pattern"));

/// Station-wide settings that are not part of the persisted state
#[derive(Debug, Clone)]
pub struct LogbookOptions {
    pub station_callsign: String,
    pub created_by: String,
    /// Keep a separate serial sequence per contest
    pub serials_per_contest: bool,
}

impl Default for LogbookOptions {
    fn default() -> Self {
        Self {
            station_callsign: "N0CALL".to_string(),
            created_by: "shackbook".to_string(),
            serials_per_contest: false,
        }
    }
}

/// A QSO as entered by the operator. Band, mode and contest come from the
/// current form selections.
#[derive(Debug, Clone, Default)]
pub struct ContactDraft {
    pub call: String,
    /// `YYYY-MM-DD`, defaults to today (UTC)
    pub date: Option<String>,
    /// `HH:MM`, defaults to now (UTC)
    pub time: Option<String>,
    /// Overrides the selected sent report
    pub rst_sent: Option<String>,
    /// Defaults to the mode's usual report
    pub rst_rcvd: Option<String>,
    pub exch_rcvd: String,
    /// Only used by free-text contests
    pub exch_sent: Option<String>,
}

/// A serialized log ready to be written out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub content: String,
}

pub struct Logbook<B: StateBackend> {
    store: StateStore<B>,
    options: LogbookOptions,
}

impl<B: StateBackend> Logbook<B> {
    pub fn open(backend: B, options: LogbookOptions) -> Result<Self, LogbookError> {
        let mut store = StateStore::open(backend)?;

        // documents written before contacts carried ids
        let missing = store.state().contacts.iter().filter(|c| c.id.is_nil()).count();
        if missing > 0 {
            store.update(|s| {
                for contact in s.contacts.iter_mut().filter(|c| c.id.is_nil()) {
                    contact.id = Uuid::now_v7();
                }
            })?;
            tracing::info!("Assigned ids to {} stored contacts", missing);
        }
        tracing::info!(
            "Logbook opened: {} contacts, contest {}",
            store.state().contacts.len(),
            store.state().selections.contest
        );
        Ok(Self { store, options })
    }

    pub fn options(&self) -> &LogbookOptions {
        &self.options
    }

    pub fn contacts(&self) -> &[ContactRecord] {
        &self.store.state().contacts
    }

    pub fn selections(&self) -> &FormSelections {
        &self.store.state().selections
    }

    pub fn contest_info(&self) -> &ContestInfo {
        &self.store.state().contest_info
    }

    pub fn locale(&self) -> Locale {
        self.store.state().locale
    }

    /// Active contest; an unknown stored id falls back to the default contest
    pub fn contest(&self) -> &'static Contest {
        find_contest(&self.selections().contest)
            .or_else(|| find_contest(DEFAULT_CONTEST))
            .unwrap_or(&CONTESTS[0])
    }

    fn active_serial_key(&self) -> String {
        let sel = self.selections();
        serial_key(self.contest().id, &sel.mode, self.options.serials_per_contest)
    }

    /// Serial that the next QSO will send
    pub fn next_serial(&self) -> u32 {
        self.store
            .state()
            .serials
            .get(&self.active_serial_key())
            .copied()
            .unwrap_or(1)
    }

    pub fn sent_exchange(&self) -> SentExchange {
        let state = self.store.state();
        let contest = self.contest();
        compute_exchange(
            contest.policy,
            ExchangeInputs {
                serial: self.next_serial(),
                rst_sent: &state.selections.rst_sent,
                region_code: &state.selections.region_code,
                free_text: state.free_text_exchange.get(contest.id).map(String::as_str),
            },
        )
    }

    pub fn select_contest(&mut self, id: &str) -> Result<&'static Contest, LogbookError> {
        let contest = find_contest(id).ok_or_else(|| LogbookError::UnknownContest(id.to_string()))?;
        self.store.update(|s| s.selections.contest = contest.id.to_string())?;
        tracing::debug!("Contest selected: {}", contest.id);
        Ok(contest)
    }

    /// Select a mode; the sent report resets to the mode's default.
    pub fn select_mode(&mut self, mode: &str) -> Result<(), LogbookError> {
        let mode = mode.trim().to_uppercase();
        if mode.is_empty() {
            return Err(invalid("mode", "must not be empty"));
        }
        self.store.update(|s| {
            s.selections.rst_sent = default_rst(&mode).to_string();
            s.selections.mode = mode;
        })?;
        Ok(())
    }

    pub fn select_band(&mut self, band: &str) -> Result<(), LogbookError> {
        let band = band.trim().to_string();
        if band.is_empty() {
            return Err(invalid("band", "must not be empty"));
        }
        self.store.update(|s| s.selections.band = band)?;
        Ok(())
    }

    pub fn set_rst_sent(&mut self, rst: &str) -> Result<(), LogbookError> {
        let rst = rst.trim().to_string();
        self.store.update(|s| s.selections.rst_sent = rst)?;
        Ok(())
    }

    pub fn set_region_code(&mut self, code: &str) -> Result<(), LogbookError> {
        let code = code.trim().to_uppercase();
        self.store.update(|s| s.selections.region_code = code)?;
        Ok(())
    }

    pub fn set_category(&mut self, category: CabrilloCategory) -> Result<(), LogbookError> {
        self.store.update(|s| s.selections.category = category)?;
        Ok(())
    }

    /// Remember the free-text exchange for the active contest
    pub fn set_free_text_exchange(&mut self, text: &str) -> Result<(), LogbookError> {
        let contest = self.contest();
        if !contest.policy.is_editable() {
            return Err(LogbookError::ExchangeNotEditable(contest.id));
        }
        let text = text.to_string();
        self.store.update(|s| {
            s.free_text_exchange.insert(contest.id.to_string(), text);
        })?;
        Ok(())
    }

    pub fn set_contest_info(&mut self, info: ContestInfo) -> Result<(), LogbookError> {
        self.store.update(|s| s.contest_info = info)?;
        Ok(())
    }

    pub fn set_locale(&mut self, locale: Locale) -> Result<(), LogbookError> {
        self.store.update(|s| s.locale = locale)?;
        Ok(())
    }

    /// Validate and append a QSO.
    ///
    /// The record is appended first and the serial counter advances by one
    /// after it, only for serial-based contests, in the same flush. Nothing
    /// changes when validation or the flush fails.
    pub fn submit(&mut self, draft: ContactDraft, now: DateTime<Utc>) -> Result<ContactRecord, LogbookError> {
        let contest = self.contest();
        let record = self.build_record(draft, now)?;
        let counter = contest
            .policy
            .uses_serial()
            .then(|| (self.active_serial_key(), self.next_serial().saturating_add(1)));

        // record and counter go out in one flush, record first
        self.store.update(|s| {
            s.contacts.push(record.clone());
            if contest.policy.is_editable() {
                s.free_text_exchange.insert(contest.id.to_string(), record.exch_sent.clone());
            }
            if let Some((key, next)) = counter {
                s.serials.insert(key, next);
            }
        })?;
        tracing::info!("Logged {} on {} {} ({})", record.call, record.band, record.mode, record.exch_sent);

        Ok(record)
    }

    fn build_record(&self, draft: ContactDraft, now: DateTime<Utc>) -> Result<ContactRecord, LogbookError> {
        let sel = self.selections();

        let call = draft.call.trim().to_string();
        if !CALLSIGN_RE.is_match(&call) {
            return Err(invalid("callsign", format!("'{}' is not a callsign", call)));
        }

        // stored zero-padded whatever the operator typed
        let date = match draft.date {
            Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .map_err(|e| invalid("date", format!("'{}': {}", raw, e)))?,
            None => now.date_naive(),
        }
        .format("%Y-%m-%d")
        .to_string();

        let time = match draft.time {
            Some(raw) => NaiveTime::parse_from_str(raw.trim(), "%H:%M")
                .map_err(|e| invalid("time", format!("'{}': {}", raw, e)))?,
            None => now.time(),
        }
        .format("%H:%M")
        .to_string();

        if sel.band.trim().is_empty() {
            return Err(invalid("band", "must not be empty"));
        }
        if sel.mode.trim().is_empty() {
            return Err(invalid("mode", "must not be empty"));
        }

        let rst_sent = draft.rst_sent.unwrap_or_else(|| sel.rst_sent.clone());
        // Serial-with-region embeds the report, so compute it with the override applied
        let exch_sent = compute_exchange(
            self.contest().policy,
            ExchangeInputs {
                serial: self.next_serial(),
                rst_sent: &rst_sent,
                region_code: &sel.region_code,
                free_text: draft.exch_sent.as_deref().or_else(|| {
                    self.store
                        .state()
                        .free_text_exchange
                        .get(self.contest().id)
                        .map(String::as_str)
                }),
            },
        )
        .value
        .trim()
        .to_string();

        Ok(ContactRecord {
            id: Uuid::now_v7(),
            date,
            time,
            call,
            band: sel.band.clone(),
            mode: sel.mode.clone(),
            rst_rcvd: draft.rst_rcvd.unwrap_or_else(|| DEFAULT_RST_RCVD.to_string()),
            rst_sent,
            exch_sent,
            exch_rcvd: draft.exch_rcvd.trim().to_string(),
        })
    }

    /// Remove the contact at `index`. Serial counters are left untouched.
    pub fn delete(&mut self, index: usize) -> Result<ContactRecord, LogbookError> {
        if index >= self.contacts().len() {
            return Err(LogbookError::NoSuchContact(index));
        }
        let removed = self.store.update(|s| s.contacts.remove(index))?;
        tracing::info!("Deleted contact #{} ({})", index, removed.call);
        Ok(removed)
    }

    pub fn delete_by_id(&mut self, id: Uuid) -> Result<ContactRecord, LogbookError> {
        if id.is_nil() {
            return Err(LogbookError::NoSuchContactId(id));
        }
        let index = self
            .contacts()
            .iter()
            .position(|c| c.id == id)
            .ok_or(LogbookError::NoSuchContactId(id))?;
        self.delete(index)
    }

    fn export_stem(&self, now: DateTime<Utc>) -> String {
        format!(
            "{}_log_{}",
            self.options.station_callsign.trim().to_lowercase().replace('/', "-"),
            now.format("%Y-%m-%d")
        )
    }

    /// Cabrillo export; requires contest name and address to be set.
    pub fn export_cabrillo(&self, now: DateTime<Utc>) -> Result<ExportFile, LogbookError> {
        if self.contacts().is_empty() {
            return Err(ExportError::NothingToExport.into());
        }
        let state = self.store.state();
        if !state.contest_info.is_complete() {
            return Err(ExportError::MissingContestInfo.into());
        }

        let content = to_cabrillo(
            &state.contacts,
            &CabrilloHeader {
                contest: self.contest().id,
                callsign: &self.options.station_callsign,
                category: &state.selections.category,
                created_by: &self.options.created_by,
                info: &state.contest_info,
            },
        )?;

        Ok(ExportFile {
            file_name: format!("{}.log", self.export_stem(now)),
            content,
        })
    }

    pub fn export_adif(&self, now: DateTime<Utc>) -> Result<ExportFile, LogbookError> {
        let content = to_adif(self.contacts(), &self.options.created_by)?;
        Ok(ExportFile {
            file_name: format!("{}.adi", self.export_stem(now)),
            content,
        })
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> LogbookError {
    LogbookError::Invalid {
        field,
        reason: reason.into(),
    }
}
