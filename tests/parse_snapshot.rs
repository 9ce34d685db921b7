use std::io::Write;

use nagwatch::data::synthetic::{ALL_SERVICES_NAME, UNGROUPED_NAME};
use nagwatch::{CheckState, Error, GroupStatus, GroupView, NagConfig};
use tempfile::NamedTempFile;

const NOW: f64 = 1_700_000_000.0;

const STATUS: &str = "\
info {
\tcreated=1700000000
\tversion=4.4.6
\t}

programstatus {
\tlast_command_check=1699999995
\t}

hoststatus {
\thost_name=web01
\tcurrent_state=0
\t}

hoststatus {
\thost_name=db01
\tcurrent_state=0
\t}

servicestatus {
\thost_name=web01
\tservice_description=HTTP
\tcurrent_state=0
\tstate_type=1
\tactive_checks_enabled=1
\tnext_check=1700000100
\t}

servicestatus {
\thost_name=web01
\tservice_description=Disk
\tcurrent_state=1
\tstate_type=1
\tactive_checks_enabled=1
\tnext_check=1700000100
\t}

servicestatus {
\thost_name=web01
\tservice_description=Load
\tcurrent_state=2
\tstate_type=1
\tactive_checks_enabled=1
\tnext_check=1700000100
\t}

servicestatus {
\thost_name=db01
\tservice_description=MySQL
\tcurrent_state=2
\tstate_type=1
\tactive_checks_enabled=1
\tnext_check=1000
\t}
";

const OBJECTS: &str = "\
define servicegroup {
\tservicegroup_name\tweb
\talias\tWeb Servers
\tmembers\tweb01,HTTP,web01,Disk,web01,HTTP
\t}

define servicegroup {
\tservicegroup_name\tdatabases
\talias\tDatabases
\tmembers\tdb01,MySQL
\t}
";

fn write(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(suffix).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn fixture() -> (NamedTempFile, NamedTempFile, NagConfig) {
    let objects = write(".cache", OBJECTS);
    let status = write(".dat", STATUS);
    let config = NagConfig::new([objects.path(), status.path()]).unwrap();
    (objects, status, config)
}

#[test]
fn test_host_with_three_services_rolls_up_to_critical() {
    let (_objects, _status, config) = fixture();
    let nag = nagwatch::parse(&config).unwrap();

    assert_eq!(nag.hosts().len(), 2);
    assert_eq!(nag.services().len(), 4);

    let web = nag.host("web01").unwrap().unwrap();
    assert_eq!(web.services().len(), 3);
    assert_eq!(web.status_at(NOW).status, GroupStatus::Critical);
}

#[test]
fn test_synthetic_group_counts() {
    let (_objects, _status, config) = fixture();
    let nag = nagwatch::parse(&config).unwrap();

    let all = nag.servicegroup(ALL_SERVICES_NAME).unwrap().unwrap();
    assert_eq!(all.services().len(), nag.services().len());

    // web covers HTTP and Disk (HTTP listed twice), databases covers MySQL
    let ungrouped = nag.servicegroup(UNGROUPED_NAME).unwrap().unwrap();
    assert_eq!(ungrouped.services().names(), vec!["Load"]);

    let web = nag.servicegroup("web").unwrap().unwrap();
    assert_eq!(web.services().len(), 2);
    assert_eq!(web.alias(), "Web Servers");
}

#[test]
fn test_stale_precedes_critical() {
    let (_objects, _status, config) = fixture();
    let nag = nagwatch::parse(&config).unwrap();

    let mysql = nag.service("MySQL").unwrap().unwrap();
    assert_eq!(mysql.status_at(NOW).state, CheckState::Stale);

    let databases = nag.servicegroup("databases").unwrap().unwrap();
    assert_eq!(databases.status_at(NOW).status, GroupStatus::Unknown);
}

#[test]
fn test_ignore_stale_data() {
    let (_objects, _status, mut config) = fixture();
    config.ignore_stale_data = true;
    let nag = nagwatch::parse(&config).unwrap();

    let mysql = nag.service("MySQL").unwrap().unwrap();
    assert_eq!(mysql.status_at(NOW).state, CheckState::Critical);
}

#[test]
fn test_important_view() {
    let (_objects, _status, mut config) = fixture();
    config.important_servicegroups = vec!["web".to_string()];
    let nag = nagwatch::parse(&config).unwrap();

    assert_eq!(nag.status_at(GroupView::Important, NOW).status, GroupStatus::Warning);
    // The all view includes the stale MySQL service
    assert_eq!(nag.status_at(GroupView::All, NOW).status, GroupStatus::Unknown);
}

#[test]
fn test_ambiguous_and_missing_hosts() {
    let status = write(
        ".dat",
        "hoststatus {\n\thost_name=web01\n\t}\nhoststatus {\n\thost_name=web01\n\t}\n",
    );
    let config = NagConfig::new([status.path()]).unwrap();
    let nag = nagwatch::parse(&config).unwrap();

    assert!(matches!(nag.host("web01"), Err(Error::AmbiguousName { .. })));
    assert!(nag.host("db01").unwrap().is_none());
}

#[test]
fn test_missing_file_rejected_by_config() {
    let result = NagConfig::new(["/nonexistent/status.dat"]);
    assert!(matches!(result, Err(Error::FilesNotFound(_))));
}

#[test]
fn test_root_timestamps() {
    let (_objects, _status, config) = fixture();
    let nag = nagwatch::parse(&config).unwrap();

    assert_eq!(nag.generated().map(|t| t.timestamp()), Some(1_700_000_000));
    assert_eq!(nag.last_updated().map(|t| t.timestamp()), Some(1_699_999_995));
}

#[test]
fn test_single_host_ok_warning_critical() {
    let services: String = [(0, "HTTP"), (1, "Disk"), (2, "Load")]
        .iter()
        .map(|(state, description)| {
            format!(
                "servicestatus {{\n\thost_name=web01\n\tservice_description={description}\n\
                 \tcurrent_state={state}\n\tstate_type=1\n\t}}\n"
            )
        })
        .collect();
    let status = write(
        ".dat",
        &format!("hoststatus {{\n\thost_name=web01\n\t}}\n{services}"),
    );
    let config = NagConfig::new([status.path()]).unwrap();
    let nag = nagwatch::parse(&config).unwrap();

    assert_eq!(nag.hosts().len(), 1);
    assert_eq!(nag.services().len(), 3);

    let web = nag.host("web01").unwrap().unwrap();
    assert_eq!(web.services().len(), 3);
    assert_eq!(web.status_at(NOW).status, GroupStatus::Critical);
    assert!(!web.status_at(NOW).downtime);
}
