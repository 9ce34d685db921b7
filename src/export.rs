//! JSON export of a parsed snapshot.
//!
//! Each entity is rendered from its flat [`Entity::attributes`] listing, with
//! computed status and nested collections added alongside.

use nagwatch_types::{GroupStatus, Value};
use serde_json::{json, Map};

use crate::data::{Entity, GroupView, Nag};

fn attributes_json(attrs: Vec<(&str, Value)>) -> Map<String, serde_json::Value> {
    attrs
        .into_iter()
        .map(|(key, value)| (key.to_string(), json!(value)))
        .collect()
}

/// Render `nag` as a JSON document, evaluating status at `now` (Unix seconds).
pub fn to_json(nag: &Nag, view: GroupView, now: f64) -> serde_json::Value {
    let mut export = Map::new();

    export.insert(
        "program".to_string(),
        serde_json::Value::Object(attributes_json(nag.attributes())),
    );

    // Summary
    let overall = nag.status_at(view, now);
    let hosts = nag.hosts();
    let count = |status: GroupStatus| {
        hosts
            .iter()
            .filter(|h| h.status_at(now).status == status)
            .count()
    };
    export.insert(
        "summary".to_string(),
        json!({
            "status": overall.status,
            "downtime": overall.downtime,
            "total_hosts": hosts.len(),
            "total_services": nag.service_list().len(),
            "total_servicegroups": nag.declared_servicegroups().len(),
            "hosts_ok": count(GroupStatus::Ok),
            "hosts_warning": count(GroupStatus::Warning),
            "hosts_critical": count(GroupStatus::Critical),
            "hosts_unknown": count(GroupStatus::Unknown),
            "hosts_downtime": count(GroupStatus::Downtime),
        }),
    );

    // Hosts with their services
    let hosts: Vec<serde_json::Value> = hosts
        .iter()
        .map(|host| {
            let mut entry = attributes_json(host.attributes());
            entry.insert("status".to_string(), json!(host.status_at(now)));
            let services: Vec<serde_json::Value> = host
                .services()
                .iter()
                .map(|service| {
                    let mut entry = attributes_json(service.attributes());
                    entry.insert("status".to_string(), json!(service.status_at(now)));
                    serde_json::Value::Object(entry)
                })
                .collect();
            entry.insert("services".to_string(), json!(services));
            serde_json::Value::Object(entry)
        })
        .collect();
    export.insert("hosts".to_string(), serde_json::Value::Array(hosts));

    // Groups in the selected view
    let groups: Vec<serde_json::Value> = nag
        .servicegroup_view(view)
        .iter()
        .map(|group| {
            let mut entry = attributes_json(group.attributes());
            entry.insert("synthetic".to_string(), json!(group.is_synthetic()));
            entry.insert("status".to_string(), json!(group.status_at(now)));
            let members: Vec<serde_json::Value> = group
                .services()
                .iter()
                .map(|s| json!({ "host_name": s.host_name(), "service_description": s.service_description() }))
                .collect();
            entry.insert("resolved_members".to_string(), json!(members));
            serde_json::Value::Object(entry)
        })
        .collect();
    export.insert("servicegroups".to_string(), serde_json::Value::Array(groups));

    serde_json::Value::Object(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NagConfig;
    use crate::source::{FileKind, SnapshotFile};

    #[test]
    fn test_export_shape() {
        let files = [
            SnapshotFile::from_content(
                FileKind::ObjectCache,
                "define servicegroup {\n\tservicegroup_name\tweb\n\talias\tWeb\n\tmembers\tweb01,HTTP\n\t}\n",
            ),
            SnapshotFile::from_content(
                FileKind::Status,
                "info {\n\tcreated=1700000000\n\t}\nhoststatus {\n\thost_name=web01\n\t}\n\
                 servicestatus {\n\thost_name=web01\n\tservice_description=HTTP\n\tcurrent_state=2\n\t}\n",
            ),
        ];
        let nag = Nag::from_snapshots(&files, NagConfig::default()).unwrap();
        let export = to_json(&nag, GroupView::All, 1_700_000_000.0);

        assert_eq!(export["program"]["created"], json!(1_700_000_000));
        assert_eq!(export["summary"]["status"], json!("critical"));
        assert_eq!(export["summary"]["hosts_critical"], json!(1));
        assert_eq!(export["hosts"][0]["host_name"], json!("web01"));
        assert_eq!(
            export["hosts"][0]["services"][0]["status"]["state"],
            json!("critical")
        );
        assert_eq!(export["servicegroups"][0]["servicegroup_name"], json!("web"));
        assert_eq!(export["servicegroups"][0]["synthetic"], json!(false));
        assert_eq!(export["servicegroups"].as_array().map(Vec::len), Some(3));
    }
}
