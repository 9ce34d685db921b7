//! Hosts from `hoststatus` blocks.

use chrono::{DateTime, Utc};
use nagwatch_types::{Rollup, Value};

use super::attributes::{Attributes, Entity};
use super::linked::Linked;
use super::list::{NagList, Named};
use super::service::Service;
use super::status::{rollup, unix_now};
use crate::error::Result;
use crate::source::{Field, Record};

/// A monitored host.
///
/// A host has no state of its own here; its status is the rollup of its
/// services (see [`Linked::<Host>::status`]).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Host {
    host_name: String,
    extra: Attributes,
}

impl Host {
    pub fn new(host_name: impl Into<String>) -> Self {
        Self {
            host_name: host_name.into(),
            extra: Attributes::new(),
        }
    }

    pub fn from_record(record: Record) -> Self {
        let mut host = Self::default();
        host.apply(record);
        host
    }

    pub fn host_name(&self) -> &str {
        &self.host_name
    }

    /// Fields without a typed slot.
    pub fn extra(&self) -> &Attributes {
        &self.extra
    }
}

impl Named for Host {
    const KIND: &'static str = "host";

    fn name(&self) -> &str {
        &self.host_name
    }
}

impl Entity for Host {
    fn set_attribute(&mut self, field: Field) {
        match field.key.as_str() {
            "host_name" => self.host_name = field.raw,
            _ => self.extra.insert(field.key, field.value),
        }
    }

    fn attributes(&self) -> Vec<(&str, Value)> {
        let mut attrs = vec![("host_name", Value::from(self.host_name.as_str()))];
        attrs.extend(self.extra.iter().map(|(k, v)| (k, v.clone())));
        attrs
    }
}

impl<'a> Linked<'a, Host> {
    /// Every service whose `host_name` matches this host, in snapshot order.
    ///
    /// Recomputed on each call.
    pub fn services(&self) -> NagList<Linked<'a, Service>> {
        let nag = self.nag();
        nag.service_list()
            .iter()
            .filter(|s| s.host_name() == self.host_name)
            .map(|s| Linked::new(nag, s))
            .collect()
    }

    /// The single service on this host with the given description.
    pub fn service(&self, service_description: &str) -> Result<Option<Linked<'a, Service>>> {
        Ok(self.services().by_name(service_description)?.copied())
    }

    /// Services on this host whose state is not ok.
    pub fn bad_services(&self) -> NagList<Linked<'a, Service>> {
        let now = unix_now();
        self.services()
            .into_iter()
            .filter(|s| s.status_at(now).is_problem())
            .collect()
    }

    pub fn status(&self) -> Rollup {
        self.status_at(unix_now())
    }

    pub fn status_at(&self, now: f64) -> Rollup {
        rollup(self.services().iter().map(|s| s.status_at(now)))
    }

    /// Most recent state change across this host's services.
    pub fn last_status_change(&self) -> Option<DateTime<Utc>> {
        self.services()
            .iter()
            .filter_map(|s| s.last_status_change())
            .max()
    }
}
