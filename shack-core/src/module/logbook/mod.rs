//! Contest logbook
//!
//! Keeps the QSO list and serial counters in a persisted state document,
//! computes the sent exchange for the active contest and exports the log as
//! Cabrillo or ADIF.

use thiserror::Error;

pub mod adif;
pub mod cabrillo;
pub mod contest;
pub mod engine;
pub mod exchange;
pub mod store;

pub use contest::{CONTESTS, Contest, ContestPolicy, find_contest};
pub use engine::{ContactDraft, ExportFile, Logbook, LogbookOptions};
pub use exchange::SentExchange;
pub use store::{
    CabrilloCategory, ContestInfo, FileBackend, FormSelections, MemoryBackend, PersistedState,
    StateBackend, StateStore, StoreError,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("logbook is empty, nothing to export")]
    NothingToExport,

    #[error("contest info is incomplete: name and address are required")]
    MissingContestInfo,
}

#[derive(Debug, Error)]
pub enum LogbookError {
    #[error("unknown contest: {0}")]
    UnknownContest(String),

    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("no contact at position {0}")]
    NoSuchContact(usize),

    #[error("no contact with id {0}")]
    NoSuchContactId(uuid::Uuid),

    #[error("the sent exchange of contest '{0}' is not editable")]
    ExchangeNotEditable(&'static str),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
