//! JSON snapshot rendering of a store tree.

use stephist_store::Store;

use crate::convert::value_to_json;

/// Render the tree under `store` at one step offset as a JSON object.
///
/// Value keys appear with their scalar at that offset; unwritten slots
/// and keys whose node's buffer is shorter than `offset` are simply
/// absent (offset bounds are per node, not inherited). Children recurse
/// at the same offset. The result is meant for logging and test
/// assertions, not as a round-trippable serialization: buffer sizes and
/// ring positions are not represented.
pub fn snapshot(store: &Store, offset: usize) -> serde_json::Value {
    let mut object = serde_json::Map::new();
    for (key, value) in store.values_at(offset) {
        object.insert(key.to_string(), value_to_json(value));
    }
    for (key, child) in store.children() {
        object.insert(key.to_string(), snapshot(child, offset));
    }
    serde_json::Value::Object(object)
}
