//! Typed access extension trait.

use serde::de::DeserializeOwned;
use serde::Serialize;
use stephist_store::{Path, Store};

use crate::convert::{from_value, to_value};
use crate::Error;

/// Typed reads and writes against a [`Store`].
///
/// Values pass through serde, so any type that serializes to a single
/// scalar works: plain numbers, strings, bools, newtype wrappers, and
/// C-style enums with scalar representations.
///
/// # Example
///
/// ```rust
/// use stephist_serde_store::TypedAccess;
/// use stephist_store::{path, Store};
///
/// let mut store = Store::new(2);
/// store.set_as(&path!("solver/iterations"), &14u32, 0).unwrap();
///
/// let iterations: u32 = store.get_as(&path!("solver/iterations"), 0).unwrap();
/// assert_eq!(iterations, 14);
/// ```
pub trait TypedAccess {
    /// Read the value at `path`/`offset` and deserialize it.
    fn get_as<T: DeserializeOwned>(&self, path: &Path, offset: usize) -> Result<T, Error>;

    /// Serialize `data` and write it at `path`/`offset`.
    fn set_as<T: Serialize>(&mut self, path: &Path, data: &T, offset: usize) -> Result<(), Error>;
}

impl TypedAccess for Store {
    fn get_as<T: DeserializeOwned>(&self, path: &Path, offset: usize) -> Result<T, Error> {
        let value = self.get(path, offset)?;
        from_value(value)
    }

    fn set_as<T: Serialize>(&mut self, path: &Path, data: &T, offset: usize) -> Result<(), Error> {
        let value = to_value(data)?;
        self.set(path, value, offset)?;
        Ok(())
    }
}
