//! Configuration for snapshot parsing and status evaluation.
//!
//! A [`NagConfig`] names the snapshot files to parse and carries the knobs that
//! change how service states are interpreted. It can be built directly with
//! [`NagConfig::new`] or layered from a config file plus `NAGWATCH_*`
//! environment variables with [`NagConfig::load`]:
//!
//! ```toml
//! files = ["/var/cache/nagios3/objects.cache", "/var/cache/nagios3/status.dat"]
//! stale_threshold = 300
//! important_servicegroups = ["web", "db"]
//! ```

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::data::StatusPolicy;
use crate::error::{Error, Result};

/// Default age in seconds after which an actively checked service is stale.
pub const DEFAULT_STALE_THRESHOLD: u64 = 240;

/// Default format used when rendering snapshot timestamps.
pub const DEFAULT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parser and status configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NagConfig {
    /// Snapshot files, parsed in order. The suffix selects the file kind.
    pub files: Vec<PathBuf>,
    /// Seconds past `next_check` before an actively checked service is stale.
    pub stale_threshold: u64,
    /// Never report services as stale.
    pub ignore_stale_data: bool,
    /// Treat soft (unconfirmed) states as ok.
    pub require_hard_service_status: bool,
    /// Names of the service groups included in the important-only view.
    pub important_servicegroups: Vec<String>,
    /// strftime-style format for displaying timestamps.
    pub datetime_format: String,
}

impl Default for NagConfig {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            stale_threshold: DEFAULT_STALE_THRESHOLD,
            ignore_stale_data: false,
            require_hard_service_status: false,
            important_servicegroups: Vec::new(),
            datetime_format: DEFAULT_DATETIME_FORMAT.to_string(),
        }
    }
}

impl NagConfig {
    /// Create a configuration for the given files with default settings.
    ///
    /// Fails if any of the files does not exist.
    pub fn new<I, P>(files: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let config = Self {
            files: files.into_iter().map(Into::into).collect(),
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file, overridden by `NAGWATCH_*` environment
    /// variables (e.g. `NAGWATCH_STALE_THRESHOLD=300`). List values in the
    /// environment are comma separated.
    pub fn load(path: &Path) -> Result<Self> {
        let config: Self = Config::builder()
            .add_source(File::from(path))
            .add_source(
                Environment::with_prefix("NAGWATCH")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("files")
                    .with_list_parse_key("important_servicegroups"),
            )
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every configured file exists.
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<PathBuf> = self.files.iter().filter(|f| !f.exists()).cloned().collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::FilesNotFound(missing))
        }
    }

    /// The subset of settings used to evaluate service status.
    pub fn policy(&self) -> StatusPolicy {
        StatusPolicy {
            stale_threshold: self.stale_threshold,
            ignore_stale_data: self.ignore_stale_data,
            require_hard_state: self.require_hard_service_status,
        }
    }

    pub fn is_important(&self, servicegroup_name: &str) -> bool {
        self.important_servicegroups
            .iter()
            .any(|name| name == servicegroup_name)
    }
}
