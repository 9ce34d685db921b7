//! Error types for snapshot parsing and lookups.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for nagwatch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring, parsing or querying a snapshot.
#[derive(Debug, Error)]
pub enum Error {
    /// One or more configured snapshot files do not exist.
    #[error("File(s) not found: {}", display_paths(.0))]
    FilesNotFound(Vec<PathBuf>),

    /// The file name does not identify a status (`.dat`) or object cache (`.cache`) file.
    #[error("Unrecognized snapshot file: {}", .0.display())]
    UnknownFileKind(PathBuf),

    /// A block was opened but never closed by a `\t}` line.
    #[error("Unterminated `{keyword}` block starting at line {line}")]
    UnterminatedBlock { keyword: String, line: usize },

    /// A name lookup matched more than one entity.
    #[error("Multiple {kind} entries named `{name}`")]
    AmbiguousName { kind: &'static str, name: String },

    /// Reading a snapshot file failed.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Loading layered configuration failed.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl Error {
    /// Create an ambiguous-name error.
    pub fn ambiguous(kind: &'static str, name: impl Into<String>) -> Self {
        Self::AmbiguousName {
            kind,
            name: name.into(),
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = Error::FilesNotFound(vec![PathBuf::from("a.dat"), PathBuf::from("b.cache")]);
        assert_eq!(err.to_string(), "File(s) not found: a.dat, b.cache");

        let err = Error::ambiguous("host", "web01");
        assert_eq!(err.to_string(), "Multiple host entries named `web01`");

        let err = Error::UnterminatedBlock {
            keyword: "hoststatus".into(),
            line: 12,
        };
        assert_eq!(err.to_string(), "Unterminated `hoststatus` block starting at line 12");
    }
}
