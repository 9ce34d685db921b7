//! Turning parsed records into entities on a [`Nag`].

use tracing::{debug, info};

use super::attributes::Entity;
use super::host::Host;
use super::nag::Nag;
use super::service::Service;
use super::servicegroup::ServiceGroup;
use crate::config::NagConfig;
use crate::error::Result;
use crate::source::{BlockKind, Record, SnapshotFile};

/// Parse every file named in `config` into a snapshot.
///
/// The file list is validated before anything is read. Any failure (a
/// missing or unreadable file, an unknown suffix, an unterminated block)
/// aborts the whole parse.
pub fn parse(config: &NagConfig) -> Result<Nag> {
    config.validate()?;
    let files = config
        .files
        .iter()
        .map(SnapshotFile::read)
        .collect::<Result<Vec<_>>>()?;
    Nag::from_snapshots(&files, config.clone())
}

impl Nag {
    /// Build a snapshot from already loaded files, in order.
    pub fn from_snapshots(files: &[SnapshotFile], config: NagConfig) -> Result<Self> {
        let mut nag = Nag::new(config);
        for file in files {
            let records = file.records()?;
            debug!(
                path = %file.path().display(),
                records = records.len(),
                "parsed snapshot file"
            );
            for (kind, record) in records {
                materialize(&mut nag, kind, record);
            }
        }

        info!(
            hosts = nag.host_list().len(),
            services = nag.service_list().len(),
            servicegroups = nag.declared_servicegroups().len(),
            "snapshot loaded"
        );
        Ok(nag)
    }
}

fn materialize(nag: &mut Nag, kind: BlockKind, record: Record) {
    match kind {
        BlockKind::HostStatus => nag.push_host(Host::from_record(record)),
        BlockKind::ServiceStatus => nag.push_service(Service::from_record(record)),
        BlockKind::ServiceGroup => nag.push_servicegroup(ServiceGroup::from_record(record)),
        BlockKind::ProgramStatus | BlockKind::Info => nag.apply(record),
    }
}
