//! Service groups from `define servicegroup` blocks, plus synthetic groups.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use nagwatch_types::{Rollup, Value};
use tracing::{debug, warn};

use super::attributes::{Attributes, Entity};
use super::host::Host;
use super::linked::Linked;
use super::list::{NagList, Named};
use super::nag::Nag;
use super::service::Service;
use super::status::{rollup, unix_now};
use crate::source::{Field, Record};

/// Where a group came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupOrigin {
    /// Defined in the object cache.
    #[default]
    Declared,
    /// Derived from the snapshot (ungrouped / all services).
    Synthetic,
}

/// A named set of host/service pairs.
///
/// `members` is the raw comma-separated list of alternating host names and
/// service descriptions (`web01,HTTP,web02,HTTP`). It is resolved against the
/// owning snapshot on first use and the result is kept for the lifetime of the
/// group.
#[derive(Debug, Clone, Default)]
pub struct ServiceGroup {
    servicegroup_name: String,
    alias: String,
    members: String,
    origin: GroupOrigin,
    extra: Attributes,
    resolved: OnceLock<Members>,
}

/// Resolved membership, as indices into the snapshot's service and host lists.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Members {
    services: Vec<usize>,
    hosts: Vec<usize>,
}

impl ServiceGroup {
    pub fn new(
        servicegroup_name: impl Into<String>,
        alias: impl Into<String>,
        members: impl Into<String>,
    ) -> Self {
        Self {
            servicegroup_name: servicegroup_name.into(),
            alias: alias.into(),
            members: members.into(),
            ..Self::default()
        }
    }

    pub(crate) fn synthetic(
        servicegroup_name: &str,
        alias: &str,
        members: impl Into<String>,
    ) -> Self {
        Self {
            origin: GroupOrigin::Synthetic,
            ..Self::new(servicegroup_name, alias, members)
        }
    }

    pub fn from_record(record: Record) -> Self {
        let mut group = Self::default();
        group.apply(record);
        group
    }

    pub fn servicegroup_name(&self) -> &str {
        &self.servicegroup_name
    }

    /// Display name.
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Raw member list.
    pub fn members(&self) -> &str {
        &self.members
    }

    pub fn origin(&self) -> GroupOrigin {
        self.origin
    }

    pub fn is_synthetic(&self) -> bool {
        self.origin == GroupOrigin::Synthetic
    }

    pub fn extra(&self) -> &Attributes {
        &self.extra
    }

    /// Member pairs as written, without resolving them.
    pub fn member_pairs(&self) -> Vec<(&str, &str)> {
        member_tokens(&self.members)
            .chunks_exact(2)
            .map(|pair| (pair[0], pair[1]))
            .collect()
    }

    fn resolve(&self, nag: &Nag) -> &Members {
        self.resolved
            .get_or_init(|| resolve_members(&self.servicegroup_name, &self.members, nag))
    }

    /// Positions of the resolved member services in the snapshot's service list.
    pub(crate) fn service_indices(&self, nag: &Nag) -> &[usize] {
        &self.resolve(nag).services
    }
}

fn member_tokens(members: &str) -> Vec<&str> {
    if members.trim().is_empty() {
        return Vec::new();
    }
    members.split(',').map(str::trim).collect()
}

/// Resolve `host,service` pairs: the host by name through the snapshot, then
/// the service by description among that host's services. Unresolvable pairs
/// are skipped; duplicates collapse to their first occurrence.
fn resolve_members(group: &str, members: &str, nag: &Nag) -> Members {
    let tokens = member_tokens(members);
    let mut resolved = Members::default();

    if tokens.len() % 2 != 0 {
        warn!(group, members, "odd number of member tokens, ignoring the last one");
    }

    for pair in tokens.chunks_exact(2) {
        let (host_name, description) = (pair[0], pair[1]);

        let host_index = match nag.host_list().position_by_name(host_name) {
            Ok(Some(index)) => index,
            Ok(None) => {
                debug!(group, host = host_name, "member host not found");
                continue;
            }
            Err(e) => {
                warn!(group, error = %e, "skipping member");
                continue;
            }
        };
        if !resolved.hosts.contains(&host_index) {
            resolved.hosts.push(host_index);
        }

        let mut matches = nag
            .service_list()
            .iter()
            .enumerate()
            .filter(|(_, s)| s.host_name() == host_name && s.service_description() == description)
            .map(|(index, _)| index);

        match (matches.next(), matches.next()) {
            (Some(index), None) => {
                if !resolved.services.contains(&index) {
                    resolved.services.push(index);
                }
            }
            (None, _) => {
                debug!(group, host = host_name, service = description, "member service not found");
            }
            (Some(_), Some(_)) => {
                warn!(
                    group,
                    host = host_name,
                    service = description,
                    "multiple services match member, skipping"
                );
            }
        }
    }

    resolved
}

impl Named for ServiceGroup {
    const KIND: &'static str = "servicegroup";

    fn name(&self) -> &str {
        &self.servicegroup_name
    }
}

impl Entity for ServiceGroup {
    fn set_attribute(&mut self, field: Field) {
        match field.key.as_str() {
            "servicegroup_name" => self.servicegroup_name = field.raw,
            "alias" => self.alias = field.raw,
            "members" => self.members = field.raw,
            _ => self.extra.insert(field.key, field.value),
        }
    }

    fn attributes(&self) -> Vec<(&str, Value)> {
        let mut attrs = vec![
            (
                "servicegroup_name",
                Value::from(self.servicegroup_name.as_str()),
            ),
            ("alias", Value::from(self.alias.as_str())),
            ("members", Value::from(self.members.as_str())),
        ];
        attrs.extend(self.extra.iter().map(|(k, v)| (k, v.clone())));
        attrs
    }
}

impl<'a> Linked<'a, ServiceGroup> {
    /// Resolved member services, without duplicates.
    pub fn services(&self) -> NagList<Linked<'a, Service>> {
        let nag = self.nag();
        let services = nag.service_list();
        self.get()
            .resolve(nag)
            .services
            .iter()
            .map(|&index| Linked::new(nag, &services[index]))
            .collect()
    }

    /// Hosts named by the member list, without duplicates.
    pub fn hosts(&self) -> NagList<Linked<'a, Host>> {
        let nag = self.nag();
        let hosts = nag.host_list();
        self.get()
            .resolve(nag)
            .hosts
            .iter()
            .map(|&index| Linked::new(nag, &hosts[index]))
            .collect()
    }

    pub fn contains(&self, service: &Linked<'_, Service>) -> bool {
        self.services().iter().any(|s| s.same(service))
    }

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

    pub fn last_status_change(&self) -> Option<DateTime<Utc>> {
        self.services()
            .iter()
            .filter_map(|s| s.last_status_change())
            .max()
    }
}
