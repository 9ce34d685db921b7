//! Services from `servicestatus` blocks.

use chrono::{DateTime, Utc};
use nagwatch_types::{ServiceStatus, Value};

use super::attributes::{set_int, Attributes, Entity};
use super::host::Host;
use super::linked::Linked;
use super::list::{NagList, Named};
use super::servicegroup::ServiceGroup;
use super::status::{evaluate, unix_now};
use crate::error::Result;
use crate::source::{Field, Record};

/// A monitored service, identified by (`host_name`, `service_description`).
///
/// Only the fields that status evaluation needs are typed; every other
/// `servicestatus` field is kept in [`Service::extra`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Service {
    host_name: String,
    service_description: String,
    current_state: i64,
    state_type: i64,
    scheduled_downtime_depth: i64,
    last_state_change: i64,
    next_check: i64,
    active_checks_enabled: bool,
    extra: Attributes,
}

impl Service {
    pub fn new(host_name: impl Into<String>, service_description: impl Into<String>) -> Self {
        Self {
            host_name: host_name.into(),
            service_description: service_description.into(),
            ..Self::default()
        }
    }

    pub fn from_record(record: Record) -> Self {
        let mut service = Self::default();
        service.apply(record);
        service
    }

    pub fn host_name(&self) -> &str {
        &self.host_name
    }

    pub fn service_description(&self) -> &str {
        &self.service_description
    }

    /// Raw state code: 0 ok, 1 warning, 2 critical, anything else unknown.
    pub fn current_state(&self) -> i64 {
        self.current_state
    }

    /// 0 soft, 1 hard.
    pub fn state_type(&self) -> i64 {
        self.state_type
    }

    pub fn scheduled_downtime_depth(&self) -> i64 {
        self.scheduled_downtime_depth
    }

    /// Unix time of the last state change.
    pub fn last_state_change(&self) -> i64 {
        self.last_state_change
    }

    /// Unix time the next check is scheduled for.
    pub fn next_check(&self) -> i64 {
        self.next_check
    }

    pub fn active_checks_enabled(&self) -> bool {
        self.active_checks_enabled
    }

    pub fn extra(&self) -> &Attributes {
        &self.extra
    }

    pub fn in_downtime(&self) -> bool {
        self.scheduled_downtime_depth > 0
    }
}

impl Named for Service {
    const KIND: &'static str = "service";

    fn name(&self) -> &str {
        &self.service_description
    }
}

impl Entity for Service {
    fn set_attribute(&mut self, field: Field) {
        let Field { key, raw, value } = field;
        let extra = &mut self.extra;
        match key.as_str() {
            "host_name" => self.host_name = raw,
            "service_description" => self.service_description = raw,
            "current_state" => set_int("service", &mut self.current_state, extra, key, value),
            "state_type" => set_int("service", &mut self.state_type, extra, key, value),
            "scheduled_downtime_depth" => {
                set_int("service", &mut self.scheduled_downtime_depth, extra, key, value)
            }
            "last_state_change" => {
                set_int("service", &mut self.last_state_change, extra, key, value)
            }
            "next_check" => set_int("service", &mut self.next_check, extra, key, value),
            "active_checks_enabled" => {
                let mut flag = i64::from(self.active_checks_enabled);
                set_int("service", &mut flag, extra, key, value);
                self.active_checks_enabled = flag == 1;
            }
            _ => extra.insert(key, value),
        }
    }

    fn attributes(&self) -> Vec<(&str, Value)> {
        let mut attrs = vec![
            ("host_name", Value::from(self.host_name.as_str())),
            (
                "service_description",
                Value::from(self.service_description.as_str()),
            ),
            ("current_state", Value::Int(self.current_state)),
            ("state_type", Value::Int(self.state_type)),
            (
                "scheduled_downtime_depth",
                Value::Int(self.scheduled_downtime_depth),
            ),
            ("last_state_change", Value::Int(self.last_state_change)),
            ("next_check", Value::Int(self.next_check)),
            (
                "active_checks_enabled",
                Value::from(self.active_checks_enabled),
            ),
        ];
        attrs.extend(self.extra.iter().map(|(k, v)| (k, v.clone())));
        attrs
    }
}

impl<'a> Linked<'a, Service> {
    /// The host this service runs on, looked up by name.
    pub fn host(&self) -> Result<Option<Linked<'a, Host>>> {
        self.nag().host(&self.host_name)
    }

    /// Status under the snapshot's configuration, evaluated now.
    pub fn status(&self) -> ServiceStatus {
        self.status_at(unix_now())
    }

    pub fn status_at(&self, now: f64) -> ServiceStatus {
        evaluate(self.get(), self.nag().policy(), now)
    }

    /// Every group, declared or synthetic, whose resolved services include
    /// this one.
    pub fn servicegroups(&self) -> NagList<Linked<'a, ServiceGroup>> {
        self.nag()
            .servicegroups()
            .into_iter()
            .filter(|group| group.contains(self))
            .collect()
    }

    pub fn last_status_change(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.last_state_change, 0)
    }
}
