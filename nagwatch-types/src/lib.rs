//! # nagwatch-types
//!
//! Core types shared by the nagwatch snapshot parser and anything that consumes
//! its output. A Nagios snapshot is plain text, so every parsed field starts life
//! as a dynamically typed [`Value`]; statuses are derived from those fields and
//! expressed with the small enums in this crate.
//!
//! ## Features
//!
//! - `serde`: serialization of values (untagged) and statuses (lowercase labels)
//!
//! ## Example
//!
//! ```rust
//! use nagwatch_types::{CheckState, ServiceStatus, Value};
//!
//! assert_eq!(Value::coerce("2"), Value::Int(2));
//! assert_eq!(Value::coerce("0.25"), Value::Float(0.25));
//! assert_eq!(Value::coerce("web01"), Value::Str("web01".into()));
//!
//! let status = ServiceStatus::new(CheckState::Critical, false);
//! assert!(status.is_problem());
//! ```

mod status;
mod value;

pub use status::*;
pub use value::*;
