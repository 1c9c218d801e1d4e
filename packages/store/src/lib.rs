//! stephist store: hierarchical key-value store with per-node step history.
//!
//! The store is the bookkeeping structure of an iterative optimization or
//! time-stepping loop: a tree of named nodes, each holding a fixed-size
//! circular buffer of scalar values per local key, addressed by
//! slash-delimited paths.
//!
//! - `Path`: validated path with Unicode identifier components
//! - `Value`: the closed scalar set a history slot can hold
//! - `Store`: the node tree with ring-buffered histories
//!
//! # Example
//!
//! ```rust
//! use stephist_store::{path, Store};
//!
//! let mut info = Store::new(3);
//! info.set(&path!("solver/residual"), 1.5e-3, 0).unwrap();
//!
//! // Each node steps on its own timeline; step the node owning the value.
//! let solver = info.child_mut(&path!("solver")).unwrap();
//! solver.advance_step();
//! solver.clear_step();
//!
//! info.set(&path!("solver/residual"), 7.2e-4, 0).unwrap();
//! let previous = info.get(&path!("solver/residual"), 1).unwrap();
//! assert_eq!(previous.as_f64(), Some(1.5e-3));
//! ```

mod error;
mod path;
mod store;
mod value;

pub use error::{Error, ItemKind};
pub use path::{Path, PathError};
pub use store::Store;
pub use value::Value;
