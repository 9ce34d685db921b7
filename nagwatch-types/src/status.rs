//! Status vocabulary for individual services and aggregated rollups.

use std::fmt;

/// The evaluated state of a single service check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CheckState {
    Ok,
    Warning,
    Critical,
    Unknown,
    /// The check result is older than the configured threshold.
    Stale,
}

impl CheckState {
    /// Map a raw Nagios `current_state` code to a state.
    ///
    /// `0` is ok, `1` warning, `2` critical; anything else is unknown.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => CheckState::Ok,
            1 => CheckState::Warning,
            2 => CheckState::Critical,
            _ => CheckState::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CheckState::Ok => "ok",
            CheckState::Warning => "warning",
            CheckState::Critical => "critical",
            CheckState::Unknown => "unknown",
            CheckState::Stale => "stale",
        }
    }
}

impl fmt::Display for CheckState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The aggregated status of a collection of services.
///
/// There is no `Stale` variant: staleness of any member surfaces as
/// [`GroupStatus::Unknown`] at this level. `Downtime` means every remaining
/// problem is suppressed by scheduled downtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GroupStatus {
    #[default]
    Ok,
    Warning,
    Critical,
    Unknown,
    Downtime,
}

impl GroupStatus {
    pub fn label(&self) -> &'static str {
        match self {
            GroupStatus::Ok => "ok",
            GroupStatus::Warning => "warning",
            GroupStatus::Critical => "critical",
            GroupStatus::Unknown => "unknown",
            GroupStatus::Downtime => "downtime",
        }
    }

    /// Short symbol for compact display.
    pub fn symbol(&self) -> &'static str {
        match self {
            GroupStatus::Ok => "OK",
            GroupStatus::Warning => "WARN",
            GroupStatus::Critical => "CRIT",
            GroupStatus::Unknown => "UNKN",
            GroupStatus::Downtime => "DOWN",
        }
    }
}

impl fmt::Display for GroupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Evaluated status of one service: its state plus whether it is in
/// scheduled downtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServiceStatus {
    pub state: CheckState,
    pub downtime: bool,
}

impl ServiceStatus {
    pub fn new(state: CheckState, downtime: bool) -> Self {
        Self { state, downtime }
    }

    /// True for any state other than ok.
    pub fn is_problem(&self) -> bool {
        self.state != CheckState::Ok
    }
}

/// Aggregated status of a set of services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rollup {
    pub status: GroupStatus,
    /// True if any member is in scheduled downtime, regardless of `status`.
    pub downtime: bool,
}

impl Rollup {
    pub fn new(status: GroupStatus, downtime: bool) -> Self {
        Self { status, downtime }
    }

    pub fn is_ok(&self) -> bool {
        self.status == GroupStatus::Ok
    }
}
