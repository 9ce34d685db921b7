//! Groups derived from the snapshot rather than declared in it.

use super::nag::Nag;
use super::service::Service;
use super::servicegroup::ServiceGroup;

/// Name of the group holding services that belong to no declared group.
pub const UNGROUPED_NAME: &str = "noservicegroup";
pub const UNGROUPED_ALIAS: &str = "No Service Group";

/// Name of the group holding every parsed service.
pub const ALL_SERVICES_NAME: &str = "allservices";
pub const ALL_SERVICES_ALIAS: &str = "All Services";

/// Build the ungrouped and all-services groups for `nag`.
///
/// Both are written as ordinary `host,service` member strings so they resolve
/// through the same path as declared groups.
pub(crate) fn build(nag: &Nag) -> Vec<ServiceGroup> {
    let services = nag.service_list();

    let mut grouped = vec![false; services.len()];
    for group in nag.declared_servicegroups() {
        for &index in group.service_indices(nag) {
            grouped[index] = true;
        }
    }

    let ungrouped = services
        .iter()
        .zip(&grouped)
        .filter(|(_, in_group)| !**in_group)
        .map(|(service, _)| service);

    vec![
        ServiceGroup::synthetic(UNGROUPED_NAME, UNGROUPED_ALIAS, members_string(ungrouped)),
        ServiceGroup::synthetic(
            ALL_SERVICES_NAME,
            ALL_SERVICES_ALIAS,
            members_string(services.iter()),
        ),
    ]
}

fn members_string<'a, I>(services: I) -> String
where
    I: Iterator<Item = &'a Service>,
{
    services
        .flat_map(|s| [s.host_name(), s.service_description()])
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_members_string_pairs() {
        let services = [Service::new("web01", "HTTP"), Service::new("db01", "MySQL")];
        assert_eq!(members_string(services.iter()), "web01,HTTP,db01,MySQL");
        assert_eq!(members_string(std::iter::empty()), "");
    }
}
