//! The snapshot root: owns every entity and resolves relationships between them.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use nagwatch_types::{Rollup, Value};
use tracing::warn;

use super::attributes::{Attributes, Entity};
use super::host::Host;
use super::linked::Linked;
use super::list::NagList;
use super::service::Service;
use super::servicegroup::ServiceGroup;
use super::status::{rollup, unix_now, StatusPolicy};
use super::synthetic;
use crate::config::NagConfig;
use crate::error::Result;
use crate::source::Field;

/// Which service groups a root-level query covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupView {
    /// Declared groups followed by the synthetic ones.
    #[default]
    All,
    /// Groups named in [`NagConfig::important_servicegroups`].
    Important,
}

/// A parsed snapshot.
///
/// Built once by [`crate::parse`] or [`Nag::from_snapshots`] and read-only
/// afterwards. Synthetic groups and the important-group selection are computed
/// on first access and kept for the lifetime of the value; they are never
/// invalidated.
#[derive(Debug)]
pub struct Nag {
    hosts: NagList<Host>,
    services: NagList<Service>,
    servicegroups: NagList<ServiceGroup>,
    created: Option<i64>,
    last_command_check: Option<i64>,
    extra: Attributes,
    config: NagConfig,
    policy: StatusPolicy,
    synthetic: OnceLock<Vec<ServiceGroup>>,
    important: OnceLock<Vec<usize>>,
}

impl Nag {
    pub(crate) fn new(config: NagConfig) -> Self {
        Self {
            hosts: NagList::new(),
            services: NagList::new(),
            servicegroups: NagList::new(),
            created: None,
            last_command_check: None,
            extra: Attributes::new(),
            policy: config.policy(),
            config,
            synthetic: OnceLock::new(),
            important: OnceLock::new(),
        }
    }

    pub(crate) fn push_host(&mut self, host: Host) {
        self.hosts.push(host);
    }

    pub(crate) fn push_service(&mut self, service: Service) {
        self.services.push(service);
    }

    pub(crate) fn push_servicegroup(&mut self, group: ServiceGroup) {
        self.servicegroups.push(group);
    }

    pub fn config(&self) -> &NagConfig {
        &self.config
    }

    pub fn policy(&self) -> &StatusPolicy {
        &self.policy
    }

    /// Program-status and info fields without a typed slot.
    pub fn extra(&self) -> &Attributes {
        &self.extra
    }

    // Raw collections

    pub fn host_list(&self) -> &NagList<Host> {
        &self.hosts
    }

    pub fn service_list(&self) -> &NagList<Service> {
        &self.services
    }

    /// Groups from the object cache, without the synthetic ones.
    pub fn declared_servicegroups(&self) -> &NagList<ServiceGroup> {
        &self.servicegroups
    }

    fn synthetic(&self) -> &[ServiceGroup] {
        self.synthetic.get_or_init(|| synthetic::build(self))
    }

    // Linked views

    pub fn hosts(&self) -> NagList<Linked<'_, Host>> {
        self.hosts.iter().map(|h| Linked::new(self, h)).collect()
    }

    pub fn services(&self) -> NagList<Linked<'_, Service>> {
        self.services.iter().map(|s| Linked::new(self, s)).collect()
    }

    /// Declared groups followed by the ungrouped and all-services groups.
    pub fn servicegroups(&self) -> NagList<Linked<'_, ServiceGroup>> {
        self.servicegroups
            .iter()
            .chain(self.synthetic())
            .map(|g| Linked::new(self, g))
            .collect()
    }

    /// Groups whose name is listed as important, in [`Nag::servicegroups`] order.
    ///
    /// Synthetic groups are candidates too, so listing `allservices` selects
    /// every service.
    pub fn important_servicegroups(&self) -> NagList<Linked<'_, ServiceGroup>> {
        let all = self.servicegroups();
        let picks = self.important.get_or_init(|| {
            all.iter()
                .enumerate()
                .filter(|(_, g)| self.config.is_important(g.servicegroup_name()))
                .map(|(index, _)| index)
                .collect()
        });
        picks.iter().map(|&index| all[index]).collect()
    }

    pub fn servicegroup_view(&self, view: GroupView) -> NagList<Linked<'_, ServiceGroup>> {
        match view {
            GroupView::All => self.servicegroups(),
            GroupView::Important => self.important_servicegroups(),
        }
    }

    // Lookups

    pub fn host(&self, host_name: &str) -> Result<Option<Linked<'_, Host>>> {
        Ok(self
            .hosts
            .by_name(host_name)?
            .map(|h| Linked::new(self, h)))
    }

    /// The single service with this description, across all hosts.
    pub fn service(&self, service_description: &str) -> Result<Option<Linked<'_, Service>>> {
        Ok(self
            .services
            .by_name(service_description)?
            .map(|s| Linked::new(self, s)))
    }

    /// The single group with this name, declared or synthetic.
    pub fn servicegroup(&self, servicegroup_name: &str) -> Result<Option<Linked<'_, ServiceGroup>>> {
        Ok(self.servicegroups().by_name(servicegroup_name)?.copied())
    }

    // Status

    /// Services covered by the groups in `view`, each once, in first-seen order.
    pub fn view_services(&self, view: GroupView) -> NagList<Linked<'_, Service>> {
        let mut seen = vec![false; self.services.len()];
        let mut services = NagList::new();
        for group in self.servicegroup_view(view) {
            for &index in group.service_indices(self) {
                if !seen[index] {
                    seen[index] = true;
                    services.push(Linked::new(self, &self.services[index]));
                }
            }
        }
        services
    }

    pub fn status(&self, view: GroupView) -> Rollup {
        self.status_at(view, unix_now())
    }

    pub fn status_at(&self, view: GroupView, now: f64) -> Rollup {
        rollup(self.view_services(view).iter().map(|s| s.status_at(now)))
    }

    /// Every service whose state is not ok.
    pub fn bad_services(&self) -> NagList<Linked<'_, Service>> {
        self.bad_services_at(unix_now())
    }

    pub fn bad_services_at(&self, now: f64) -> NagList<Linked<'_, Service>> {
        self.services()
            .into_iter()
            .filter(|s| s.status_at(now).is_problem())
            .collect()
    }

    /// Every host whose rollup is not ok.
    pub fn bad_hosts(&self) -> NagList<Linked<'_, Host>> {
        self.bad_hosts_at(unix_now())
    }

    pub fn bad_hosts_at(&self, now: f64) -> NagList<Linked<'_, Host>> {
        self.hosts()
            .into_iter()
            .filter(|h| !h.status_at(now).is_ok())
            .collect()
    }

    // Timestamps

    /// When the status snapshot was written (`info.created`).
    pub fn generated(&self) -> Option<DateTime<Utc>> {
        self.created.and_then(|t| DateTime::from_timestamp(t, 0))
    }

    /// Last time the monitoring process read external commands.
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_command_check
            .and_then(|t| DateTime::from_timestamp(t, 0))
    }

    pub fn last_status_change(&self) -> Option<DateTime<Utc>> {
        self.services()
            .iter()
            .filter_map(|s| s.last_status_change())
            .max()
    }
}

fn set_timestamp(slot: &mut Option<i64>, extra: &mut Attributes, key: String, value: Value) {
    match value.as_i64() {
        Some(t) => *slot = Some(t),
        None => {
            warn!(key = %key, value = %value, "non-numeric timestamp");
            extra.insert(key, value);
        }
    }
}

impl Entity for Nag {
    fn set_attribute(&mut self, field: Field) {
        let Field { key, value, .. } = field;
        match key.as_str() {
            "created" => set_timestamp(&mut self.created, &mut self.extra, key, value),
            "last_command_check" => {
                set_timestamp(&mut self.last_command_check, &mut self.extra, key, value)
            }
            _ => self.extra.insert(key, value),
        }
    }

    fn attributes(&self) -> Vec<(&str, Value)> {
        let mut attrs = Vec::new();
        if let Some(created) = self.created {
            attrs.push(("created", Value::Int(created)));
        }
        if let Some(last_command_check) = self.last_command_check {
            attrs.push(("last_command_check", Value::Int(last_command_check)));
        }
        attrs.extend(self.extra.iter().map(|(k, v)| (k, v.clone())));
        attrs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::synthetic::{ALL_SERVICES_NAME, UNGROUPED_NAME};
    use crate::error::Error;
    use crate::source::{FileKind, SnapshotFile};
    use nagwatch_types::GroupStatus;

    const NOW: f64 = 1_700_000_000.0;

    fn service_block(host: &str, description: &str, state: i64, downtime: i64) -> String {
        format!(
            "servicestatus {{\n\thost_name={host}\n\tservice_description={description}\n\
             \tcurrent_state={state}\n\tstate_type=1\n\tscheduled_downtime_depth={downtime}\n\
             \tactive_checks_enabled=1\n\tnext_check={next}\n\tlast_state_change={state}000\n\t}}\n",
            next = NOW as i64 + 60,
        )
    }

    fn host_block(host: &str) -> String {
        format!("hoststatus {{\n\thost_name={host}\n\tcurrent_state=0\n\t}}\n")
    }

    fn group_block(name: &str, members: &str) -> String {
        format!(
            "define servicegroup {{\n\tservicegroup_name\t{name}\n\talias\t{name} alias\n\tmembers\t{members}\n\t}}\n"
        )
    }

    fn snapshot(status: &str, cache: &str, config: NagConfig) -> Nag {
        let files = [
            SnapshotFile::from_content(FileKind::ObjectCache, cache),
            SnapshotFile::from_content(FileKind::Status, status),
        ];
        Nag::from_snapshots(&files, config).unwrap()
    }

    fn fixture(config: NagConfig) -> Nag {
        let status = [
            "info {\n\tcreated=1700000000\n\tversion=3.2.3\n\t}\n".to_string(),
            "programstatus {\n\tlast_command_check=1699999990\n\tnagios_pid=42\n\t}\n".to_string(),
            host_block("web01"),
            host_block("db01"),
            service_block("web01", "HTTP", 0, 0),
            service_block("web01", "Disk", 1, 0),
            service_block("db01", "MySQL", 2, 0),
            service_block("db01", "Load", 0, 0),
        ]
        .concat();
        let cache = [
            group_block("web", "web01,HTTP,web01,Disk"),
            group_block("db", "db01,MySQL,db01,MySQL"),
        ]
        .concat();
        snapshot(&status, &cache, config)
    }

    #[test]
    fn test_root_fields() {
        let nag = fixture(NagConfig::default());
        assert_eq!(nag.generated().map(|t| t.timestamp()), Some(1_700_000_000));
        assert_eq!(nag.last_updated().map(|t| t.timestamp()), Some(1_699_999_990));
        assert_eq!(nag.extra().get("nagios_pid"), Some(&Value::Int(42)));
        assert_eq!(nag.attributes()[0], ("created", Value::Int(1_700_000_000)));
    }

    #[test]
    fn test_host_services_recomputed_by_name() {
        let nag = fixture(NagConfig::default());
        let web = nag.host("web01").unwrap().unwrap();
        assert_eq!(web.services().names(), vec!["HTTP", "Disk"]);
        assert_eq!(web.status_at(NOW).status, GroupStatus::Warning);

        let mysql = nag.service("MySQL").unwrap().unwrap();
        assert!(mysql.host().unwrap().unwrap().same(&nag.host("db01").unwrap().unwrap()));
    }

    #[test]
    fn test_lookup_not_found() {
        let nag = fixture(NagConfig::default());
        assert!(nag.host("mail01").unwrap().is_none());
        assert!(nag.servicegroup("mail").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_host_is_ambiguous() {
        let status = [host_block("web01"), host_block("web01")].concat();
        let nag = snapshot(&status, "", NagConfig::default());
        assert!(matches!(
            nag.host("web01"),
            Err(Error::AmbiguousName { kind: "host", .. })
        ));
    }

    #[test]
    fn test_group_members_deduplicated() {
        let nag = fixture(NagConfig::default());
        let db = nag.servicegroup("db").unwrap().unwrap();
        assert_eq!(db.services().len(), 1);
        assert_eq!(db.hosts().names(), vec!["db01"]);
        assert_eq!(db.status_at(NOW).status, GroupStatus::Critical);
    }

    #[test]
    fn test_synthetic_groups() {
        let nag = fixture(NagConfig::default());
        assert_eq!(
            nag.servicegroups().names(),
            vec!["web", "db", UNGROUPED_NAME, ALL_SERVICES_NAME]
        );

        let all = nag.servicegroup(ALL_SERVICES_NAME).unwrap().unwrap();
        assert!(all.is_synthetic());
        assert_eq!(all.services().len(), nag.service_list().len());

        let ungrouped = nag.servicegroup(UNGROUPED_NAME).unwrap().unwrap();
        assert_eq!(ungrouped.services().names(), vec!["Load"]);
        assert_eq!(ungrouped.members(), "db01,Load");
    }

    #[test]
    fn test_synthetic_groups_are_cached() {
        let nag = fixture(NagConfig::default());
        let first = nag.servicegroup(ALL_SERVICES_NAME).unwrap().unwrap();
        let second = nag.servicegroup(ALL_SERVICES_NAME).unwrap().unwrap();
        assert!(first.same(&second));
    }

    #[test]
    fn test_service_servicegroups() {
        let nag = fixture(NagConfig::default());
        let http = nag.service("HTTP").unwrap().unwrap();
        assert_eq!(http.servicegroups().names(), vec!["web", ALL_SERVICES_NAME]);
    }

    #[test]
    fn test_root_status_views() {
        let config = NagConfig {
            important_servicegroups: vec!["web".to_string()],
            ..NagConfig::default()
        };
        let nag = fixture(config);

        assert_eq!(nag.view_services(GroupView::All).len(), 4);
        assert_eq!(nag.status_at(GroupView::All, NOW).status, GroupStatus::Critical);

        assert_eq!(nag.important_servicegroups().names(), vec!["web"]);
        assert_eq!(
            nag.status_at(GroupView::Important, NOW).status,
            GroupStatus::Warning
        );
    }

    #[test]
    fn test_bad_entities() {
        let nag = fixture(NagConfig::default());
        assert_eq!(nag.bad_services_at(NOW).names(), vec!["Disk", "MySQL"]);
        assert_eq!(nag.bad_hosts_at(NOW).names(), vec!["web01", "db01"]);
    }

    #[test]
    fn test_last_status_change() {
        let nag = fixture(NagConfig::default());
        assert_eq!(nag.last_status_change().map(|t| t.timestamp()), Some(2000));
        let web = nag.host("web01").unwrap().unwrap();
        assert_eq!(web.last_status_change().map(|t| t.timestamp()), Some(1000));
    }

    #[test]
    fn test_numeric_looking_names_resolve_in_groups() {
        let status = [
            host_block("007"),
            service_block("007", "HTTP", 0, 0),
            service_block("007", "1.50", 1, 0),
        ]
        .concat();
        let cache = group_block("ops", "007,HTTP,007,1.50");
        let nag = snapshot(&status, &cache, NagConfig::default());

        let host = nag.host("007").unwrap().unwrap();
        assert_eq!(host.host_name(), "007");
        assert_eq!(host.services().names(), vec!["HTTP", "1.50"]);

        let ops = nag.servicegroup("ops").unwrap().unwrap();
        assert_eq!(ops.services().len(), 2);
        assert_eq!(ops.hosts().names(), vec!["007"]);
    }

    #[test]
    fn test_empty_snapshot() {
        let nag = snapshot("", "", NagConfig::default());
        assert!(nag.generated().is_none());
        assert_eq!(nag.servicegroups().len(), 2);
        assert_eq!(nag.status_at(GroupView::All, NOW), Rollup::default());
        assert!(nag.last_status_change().is_none());
    }
}
