//! # nagwatch
//!
//! Parse Nagios `status.dat` and `objects.cache` snapshots into a queryable
//! model of hosts, services and service groups, and compute status rollups
//! over them.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  ┌──────────┐    ┌──────────┐    ┌──────────┐    ┌─────────┐ │
//! │  │  config  │───▶│  source  │───▶│   data   │───▶│ export  │ │
//! │  │ (files)  │    │ (records)│    │  (Nag)   │    │ (JSON)  │ │
//! │  └──────────┘    └──────────┘    └──────────┘    └─────────┘ │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`config`]**: [`NagConfig`], the files to read and the status knobs
//! - **[`source`]**: block extraction and record parsing
//! - **[`data`]**: entities, relationships, synthetic groups and status rollup
//! - **[`export`]**: JSON rendering of a parsed snapshot
//!
//! ## Usage
//!
//! ```no_run
//! use nagwatch::{GroupView, NagConfig};
//!
//! let config = NagConfig::new([
//!     "/var/cache/nagios3/objects.cache",
//!     "/var/cache/nagios3/status.dat",
//! ])?;
//! let nag = nagwatch::parse(&config)?;
//!
//! println!("overall: {}", nag.status(GroupView::All).status);
//! for host in nag.bad_hosts() {
//!     println!("{}: {}", host.host_name(), host.status().status);
//! }
//! # Ok::<(), nagwatch::Error>(())
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod source;

pub use config::NagConfig;
pub use data::{
    parse, Attributes, Entity, GroupOrigin, GroupView, Host, Linked, Nag, NagList, Named,
    Service, ServiceGroup, StatusPolicy,
};
pub use error::{Error, Result};
pub use nagwatch_types::{CheckState, GroupStatus, Rollup, ServiceStatus, Value};
