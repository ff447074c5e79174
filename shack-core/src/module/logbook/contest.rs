//! Contest definitions and the exchange each one sends

/// How the sent exchange of a contest is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContestPolicy {
    /// Constant text, e.g. a greeting
    Fixed(&'static str),
    /// Zero-padded serial number
    SerialOnly,
    /// `<report> <serial> <region code>`
    SerialWithRegion,
    /// Operator-entered text; carries the input hint
    FreeText(&'static str),
}

impl ContestPolicy {
    /// Whether submitting a QSO under this policy consumes a serial number
    pub fn uses_serial(&self) -> bool {
        matches!(self, ContestPolicy::SerialOnly | ContestPolicy::SerialWithRegion)
    }

    /// Whether the operator may edit the sent exchange
    pub fn is_editable(&self) -> bool {
        matches!(self, ContestPolicy::FreeText(_))
    }
}

/// A selectable contest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contest {
    pub id: &'static str,
    pub policy: ContestPolicy,
}

pub const DEFAULT_CONTEST: &str = "generic-serial";

pub static CONTESTS: &[Contest] = &[
    Contest { id: "generic-serial", policy: ContestPolicy::SerialOnly },
    Contest { id: "sral-peruskisa", policy: ContestPolicy::SerialWithRegion },
    Contest { id: "sral-talvi", policy: ContestPolicy::SerialOnly },
    Contest { id: "sral-kalakukko", policy: ContestPolicy::SerialOnly },
    Contest { id: "sral-sainio", policy: ContestPolicy::SerialOnly },
    Contest { id: "sral-kesakisa", policy: ContestPolicy::SerialOnly },
    Contest { id: "sral-syysottelu", policy: ContestPolicy::SerialOnly },
    Contest { id: "sral-joulu", policy: ContestPolicy::Fixed("HYVÄÄ JOULUA") },
    Contest { id: "sac", policy: ContestPolicy::SerialOnly },
    Contest { id: "cq-wpx", policy: ContestPolicy::SerialOnly },
    Contest { id: "cq-ww-dx", policy: ContestPolicy::FreeText("Your CQ Zone") },
    Contest { id: "iaru-hf", policy: ContestPolicy::FreeText("Your ITU Zone") },
    Contest { id: "generic-static", policy: ContestPolicy::FreeText("Exchange") },
];

/// Look up a contest by id (case-insensitive)
pub fn find_contest(id: &str) -> Option<&'static Contest> {
    let id = id.trim();
    CONTESTS.iter().find(|c| c.id.eq_ignore_ascii_case(id))
}
