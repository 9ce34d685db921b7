//! Status evaluation for single services and rollups over collections.
//!
//! Hosts, service groups and the snapshot root have no state of their own;
//! their status is always [`rollup`] over the services they resolve to.

use chrono::Utc;
use nagwatch_types::{CheckState, GroupStatus, Rollup, ServiceStatus};

use super::service::Service;
use crate::config::DEFAULT_STALE_THRESHOLD;

/// `state_type` value of a confirmed (hard) state.
pub const HARD_STATE: i64 = 1;

/// Settings that change how a service's raw fields map to a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusPolicy {
    /// Seconds past `next_check` before an actively checked service is stale.
    pub stale_threshold: u64,
    pub ignore_stale_data: bool,
    /// Report soft (unconfirmed) states as ok.
    pub require_hard_state: bool,
}

impl Default for StatusPolicy {
    fn default() -> Self {
        Self {
            stale_threshold: DEFAULT_STALE_THRESHOLD,
            ignore_stale_data: false,
            require_hard_state: false,
        }
    }
}

/// Current Unix time in seconds.
pub fn unix_now() -> f64 {
    Utc::now().timestamp_millis() as f64 / 1000.0
}

/// Evaluate one service at time `now` (Unix seconds).
///
/// Staleness is checked first and wins over everything else, including the
/// hard-state requirement.
pub fn evaluate(service: &Service, policy: &StatusPolicy, now: f64) -> ServiceStatus {
    let downtime = service.scheduled_downtime_depth() > 0;

    let stale = service.active_checks_enabled()
        && !policy.ignore_stale_data
        && now - policy.stale_threshold as f64 > service.next_check() as f64;

    let state = if stale {
        CheckState::Stale
    } else if policy.require_hard_state && service.state_type() != HARD_STATE {
        CheckState::Ok
    } else {
        CheckState::from_code(service.current_state())
    };

    ServiceStatus::new(state, downtime)
}

/// Aggregate service statuses into one rollup.
///
/// Precedence, first match wins:
/// 1. any stale member: `unknown`
/// 2. any critical member not in downtime: `critical`
/// 3. any warning member not in downtime: `warning`
/// 4. any ok or unknown member in downtime: `downtime`
/// 5. any unknown member: `unknown`
/// 6. any other member in downtime (a suppressed warning or critical): `downtime`
/// 7. otherwise `ok`
///
/// The downtime flag is set if any member is in downtime, independent of the
/// status. An empty input is `ok` without downtime.
pub fn rollup<I>(statuses: I) -> Rollup
where
    I: IntoIterator<Item = ServiceStatus>,
{
    let statuses: Vec<ServiceStatus> = statuses.into_iter().collect();
    let any = |pred: fn(&ServiceStatus) -> bool| statuses.iter().any(pred);

    let downtime = any(|s| s.downtime);

    let status = if any(|s| s.state == CheckState::Stale) {
        GroupStatus::Unknown
    } else if any(|s| s.state == CheckState::Critical && !s.downtime) {
        GroupStatus::Critical
    } else if any(|s| s.state == CheckState::Warning && !s.downtime) {
        GroupStatus::Warning
    } else if any(|s| s.downtime && matches!(s.state, CheckState::Ok | CheckState::Unknown)) {
        GroupStatus::Downtime
    } else if any(|s| s.state == CheckState::Unknown) {
        GroupStatus::Unknown
    } else if downtime {
        GroupStatus::Downtime
    } else {
        GroupStatus::Ok
    };

    Rollup::new(status, downtime)
}
