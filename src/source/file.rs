//! Snapshot file loading.
//!
//! Reads a status (`*.dat`) or object cache (`*.cache`) file and splits it into
//! parsed records for each block type that kind of file carries.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::record::Record;
use super::section::extract_sections;
use super::BlockKind;
use crate::error::{Error, Result};

/// The two snapshot formats, told apart by file suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Runtime status dump (`status.dat`).
    Status,
    /// Object definitions dump (`objects.cache`).
    ObjectCache,
}

impl FileKind {
    /// Determine the kind from the path's extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("dat") => Ok(FileKind::Status),
            Some("cache") => Ok(FileKind::ObjectCache),
            _ => Err(Error::UnknownFileKind(path.to_path_buf())),
        }
    }

    /// Block types read from this kind of file, in extraction order.
    pub fn blocks(&self) -> &'static [BlockKind] {
        match self {
            FileKind::Status => &[
                BlockKind::HostStatus,
                BlockKind::ServiceStatus,
                BlockKind::ProgramStatus,
                BlockKind::Info,
            ],
            FileKind::ObjectCache => &[BlockKind::ServiceGroup],
        }
    }
}

/// The raw contents of one snapshot file.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
    kind: FileKind,
    content: String,
}

impl SnapshotFile {
    /// Read a snapshot file from disk.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let kind = FileKind::from_path(&path)?;
        let content = fs::read_to_string(&path).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), bytes = content.len(), "read snapshot file");
        Ok(Self {
            path,
            kind,
            content,
        })
    }

    /// Wrap in-memory content as a snapshot of the given kind.
    pub fn from_content(kind: FileKind, content: impl Into<String>) -> Self {
        let path = match kind {
            FileKind::Status => PathBuf::from("<memory>.dat"),
            FileKind::ObjectCache => PathBuf::from("<memory>.cache"),
        };
        Self {
            path,
            kind,
            content: content.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> FileKind {
        self.kind
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Extract and parse every block this file carries.
    ///
    /// Records are grouped by block type in [`FileKind::blocks`] order and keep
    /// file order within a type.
    pub fn records(&self) -> Result<Vec<(BlockKind, Record)>> {
        let mut records = Vec::new();
        for &block in self.kind.blocks() {
            let bodies = extract_sections(&self.content, block.keyword())?;
            debug!(
                path = %self.path.display(),
                block = block.keyword(),
                count = bodies.len(),
                "extracted blocks"
            );
            records.extend(
                bodies
                    .into_iter()
                    .map(|body| (block, Record::parse(body, block.delimiter()))),
            );
        }
        Ok(records)
    }
}
