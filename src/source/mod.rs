//! Snapshot input: file loading, block extraction and record parsing.
//!
//! ```text
//! status.dat / objects.cache
//!        │
//!        ▼
//! SnapshotFile::read()        (suffix selects FileKind)
//!        │
//!        ▼
//! extract_sections()          (one raw body per `<keyword> {` block)
//!        │
//!        ▼
//! Record::parse()             (ordered, lower-cased, coerced key/values)
//! ```

mod file;
mod record;
mod section;

pub use file::{FileKind, SnapshotFile};
pub use record::{Field, Record};
pub use section::extract_sections;

/// The block types read from snapshot files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    HostStatus,
    ServiceStatus,
    ProgramStatus,
    Info,
    ServiceGroup,
}

impl BlockKind {
    /// The text that opens this block, before the ` {`.
    pub fn keyword(&self) -> &'static str {
        match self {
            BlockKind::HostStatus => "hoststatus",
            BlockKind::ServiceStatus => "servicestatus",
            BlockKind::ProgramStatus => "programstatus",
            BlockKind::Info => "info",
            BlockKind::ServiceGroup => "define servicegroup",
        }
    }

    /// Key/value separator inside the block body.
    pub fn delimiter(&self) -> char {
        match self {
            BlockKind::ServiceGroup => '\t',
            _ => '=',
        }
    }
}
