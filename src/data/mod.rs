//! The snapshot model: entities, relationships and status.
//!
//! ## Submodules
//!
//! - [`attributes`]: the ordered side bag and the [`Entity`] trait
//! - [`list`]: [`NagList`], an ordered collection with strict name lookups
//! - [`host`], [`service`], [`servicegroup`]: the entities
//! - [`nag`]: the root [`Nag`], which owns every entity
//! - [`status`]: per-service evaluation and [`rollup`]
//! - [`synthetic`]: the ungrouped and all-services groups
//!
//! ## Data Flow
//!
//! ```text
//! Vec<(BlockKind, Record)>
//!        │
//!        ▼
//! Nag::from_snapshots()
//!        │
//!        ├──▶ Host / Service / ServiceGroup (typed fields + side bag)
//!        │
//!        └──▶ root fields (programstatus, info)
//!
//! Linked<'_, T>  ──▶ relationships resolved by name through the Nag
//!                ──▶ status() = rollup(evaluate(service) for each service)
//! ```

pub mod attributes;
mod factory;
pub mod host;
pub mod linked;
pub mod list;
pub mod nag;
pub mod service;
pub mod servicegroup;
pub mod status;
pub mod synthetic;

pub use attributes::{Attributes, Entity};
pub use factory::parse;
pub use host::Host;
pub use linked::Linked;
pub use list::{NagList, Named};
pub use nag::{GroupView, Nag};
pub use service::Service;
pub use servicegroup::{GroupOrigin, ServiceGroup};
pub use status::{evaluate, rollup, unix_now, StatusPolicy, HARD_STATE};
