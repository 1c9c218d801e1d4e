//! Serde integration for stephist stores.
//!
//! This layer adds typed access on top of the core store:
//! - `TypedAccess`: read/write Rust types at paths through serde
//! - `convert`: scalar `Value` ↔ `serde_json::Value` conversions
//! - `snapshot`: render a store tree at one step offset as JSON
//!
//! # Example
//!
//! ```rust
//! use stephist_serde_store::{snapshot, TypedAccess};
//! use stephist_store::{path, Store};
//!
//! let mut store = Store::new(2);
//! store.set_as(&path!("loop/objective"), &0.25, 0).unwrap();
//!
//! let json = snapshot(&store, 0);
//! assert_eq!(json["loop"]["objective"], 0.25);
//! ```

mod convert;
mod error;
mod snapshot;
mod typed;

pub use convert::{from_value, json_to_value, to_value, value_to_json};
pub use error::Error;
pub use snapshot::snapshot;
pub use typed::TypedAccess;
