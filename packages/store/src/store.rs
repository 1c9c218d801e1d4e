//! The store: a tree of nodes, each with a circular per-step value history.
//!
//! Every node owns a mapping from local key to either a value history
//! (`buffer_size` slots, one per retained step) or a child `Store` with its
//! own independent buffer size. Paths descend root-down through children;
//! there are no back-pointers and no cycles.

use std::collections::{btree_map, BTreeMap};

use crate::error::{Error, ItemKind};
use crate::path::{Path, PathError};
use crate::value::Value;

/// What a local key maps to.
#[derive(Debug, Clone, PartialEq)]
enum Item {
    /// One slot per retained step. `None` means the slot was never written
    /// (or was cleared) for that step.
    History(Vec<Option<Value>>),
    /// An exclusively owned child store.
    Child(Store),
}

/// A hierarchical key-value store with per-node circular step history.
///
/// Offsets address the past: offset `0` is the current step, offset `n` is
/// `n` steps back, bounded by the buffer size of the node that owns the
/// value. Stepping is strictly per node; advancing a parent never touches
/// its children, so each subtree can run on its own timeline.
///
/// # Example
///
/// ```rust
/// use stephist_store::{path, Store};
///
/// let mut store = Store::new(3);
/// store.set(&path!("step"), 1, 0).unwrap();
///
/// store.advance_step();
/// store.clear_step();
/// store.set(&path!("step"), 2, 0).unwrap();
///
/// assert_eq!(store.get(&path!("step"), 0).unwrap().as_i64(), Some(2));
/// assert_eq!(store.get(&path!("step"), 1).unwrap().as_i64(), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Store {
    buffer_size: usize,
    current_index: usize,
    entries: BTreeMap<String, Item>,
}

impl Store {
    /// Create an empty store retaining `buffer_size` steps of history.
    ///
    /// # Panics
    ///
    /// Panics if `buffer_size` is zero.
    pub fn new(buffer_size: usize) -> Self {
        assert!(buffer_size > 0, "buffer size must be positive");
        Self {
            buffer_size,
            current_index: 0,
            entries: BTreeMap::new(),
        }
    }

    /// Number of steps of history this node retains.
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// True if this node holds no values and no children.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rotate this node's ring index by one step.
    ///
    /// Strictly local: children keep their own timelines. Use
    /// [`children_mut`](Self::children_mut) to walk the tree when a whole
    /// hierarchy steps together.
    pub fn advance_step(&mut self) {
        self.current_index = (self.current_index + 1) % self.buffer_size;
    }

    /// Mark the slot at the current index unwritten for every direct value
    /// key of this node.
    ///
    /// Called after [`advance_step`](Self::advance_step), this guarantees no
    /// value from `buffer_size` steps ago leaks into the new step. Children
    /// and other slots are untouched.
    pub fn clear_step(&mut self) {
        let index = self.current_index;
        for item in self.entries.values_mut() {
            if let Item::History(slots) = item {
                slots[index] = None;
            }
        }
    }

    /// Read the value at `path`, `offset` steps into the past.
    ///
    /// # Errors
    ///
    /// * [`Error::NotFound`] - nothing is stored at the path.
    /// * [`Error::NotWritten`] - the slot exists but holds nothing at that offset.
    /// * [`Error::OffsetOutOfRange`] - `offset >= buffer_size` of the owning node.
    /// * [`Error::TypeConflict`] - the path names a child store.
    pub fn get(&self, path: &Path, offset: usize) -> Result<&Value, Error> {
        let (node, key) = self.resolve(path)?;
        match node.entries.get(key) {
            Some(Item::History(slots)) => {
                node.check_offset(offset)?;
                slots[node.slot(offset)]
                    .as_ref()
                    .ok_or_else(|| Error::NotWritten {
                        path: path.clone(),
                        offset,
                    })
            }
            Some(Item::Child(_)) => Err(Error::TypeConflict {
                path: path.clone(),
                expected: ItemKind::Value,
                found: ItemKind::Child,
            }),
            None => Err(Error::NotFound { path: path.clone() }),
        }
    }

    /// Write a value at `path`, `offset` steps into the past.
    ///
    /// Missing intermediate children are created with the buffer size of
    /// the node this method was called on; children that already exist keep
    /// their own size. The history window never resizes: offsets are bound
    /// by the owning node's buffer size.
    ///
    /// # Errors
    ///
    /// * [`Error::OffsetOutOfRange`] - `offset >= buffer_size` of the owning node.
    /// * [`Error::TypeConflict`] - the terminal key already holds a child store.
    /// * [`Error::Path`] - an intermediate segment names a value.
    pub fn set(&mut self, path: &Path, value: impl Into<Value>, offset: usize) -> Result<(), Error> {
        let value = value.into();
        let (node, key) = self.resolve_or_create(path)?;
        node.check_offset(offset)?;
        let index = node.slot(offset);
        let buffer_size = node.buffer_size;
        match node
            .entries
            .entry(key.to_string())
            .or_insert_with(|| Item::History(vec![None; buffer_size]))
        {
            Item::History(slots) => {
                slots[index] = Some(value);
                Ok(())
            }
            Item::Child(_) => Err(Error::TypeConflict {
                path: path.clone(),
                expected: ItemKind::Value,
                found: ItemKind::Child,
            }),
        }
    }

    /// Check whether a value is readable at `path` and `offset`, or whether
    /// the path names an existing child store.
    ///
    /// Never fails: missing paths, unwritten slots and out-of-range offsets
    /// all report `false`. This is the one deliberate check-then-act
    /// convenience; every other operation surfaces its error. A child store
    /// has no history dimension, so a path naming one is `true` at any
    /// offset.
    pub fn has(&self, path: &Path, offset: usize) -> bool {
        let Ok((node, key)) = self.resolve(path) else {
            return false;
        };
        match node.entries.get(key) {
            Some(Item::History(slots)) => {
                offset < node.buffer_size && slots[node.slot(offset)].is_some()
            }
            Some(Item::Child(_)) => true,
            None => false,
        }
    }

    /// Mark one historical slot unwritten, returning its previous value.
    ///
    /// Only the addressed slot changes; other steps keep their values and
    /// the key itself stays in the mapping even when its whole history
    /// empties, so a later `set` needs no re-creation.
    ///
    /// # Errors
    ///
    /// * [`Error::NotFound`] - nothing is stored at the path.
    /// * [`Error::OffsetOutOfRange`] - `offset >= buffer_size` of the owning node.
    /// * [`Error::TypeConflict`] - the path names a child store.
    pub fn remove(&mut self, path: &Path, offset: usize) -> Result<Option<Value>, Error> {
        let (node, key) = self.resolve_mut(path)?;
        let buffer_size = node.buffer_size;
        let current_index = node.current_index;
        match node.entries.get_mut(key) {
            Some(Item::History(slots)) => {
                if offset >= buffer_size {
                    return Err(Error::OffsetOutOfRange {
                        offset,
                        buffer_size,
                    });
                }
                let index = (current_index + buffer_size - offset) % buffer_size;
                Ok(slots[index].take())
            }
            Some(Item::Child(_)) => Err(Error::TypeConflict {
                path: path.clone(),
                expected: ItemKind::Value,
                found: ItemKind::Child,
            }),
            None => Err(Error::NotFound { path: path.clone() }),
        }
    }

    /// Attach a child store at `path`.
    ///
    /// The child keeps its own buffer size, independent of this node's.
    /// An existing child at the key is replaced; a value at the key is a
    /// conflict. Missing intermediate children are created as in
    /// [`set`](Self::set).
    pub fn attach(&mut self, path: &Path, child: Store) -> Result<(), Error> {
        let (node, key) = self.resolve_or_create(path)?;
        match node.entries.entry(key.to_string()) {
            btree_map::Entry::Vacant(vacant) => {
                vacant.insert(Item::Child(child));
                Ok(())
            }
            btree_map::Entry::Occupied(mut occupied) => match occupied.get() {
                Item::Child(_) => {
                    occupied.insert(Item::Child(child));
                    Ok(())
                }
                Item::History(_) => Err(Error::TypeConflict {
                    path: path.clone(),
                    expected: ItemKind::Child,
                    found: ItemKind::Value,
                }),
            },
        }
    }

    /// Remove and return the child store at `path`.
    pub fn detach(&mut self, path: &Path) -> Result<Store, Error> {
        let (node, key) = self.resolve_mut(path)?;
        match node.entries.remove(key) {
            Some(Item::Child(child)) => Ok(child),
            Some(history) => {
                node.entries.insert(key.to_string(), history);
                Err(Error::TypeConflict {
                    path: path.clone(),
                    expected: ItemKind::Child,
                    found: ItemKind::Value,
                })
            }
            None => Err(Error::NotFound { path: path.clone() }),
        }
    }

    /// Borrow the child store at `path`.
    pub fn child(&self, path: &Path) -> Result<&Store, Error> {
        let (node, key) = self.resolve(path)?;
        match node.entries.get(key) {
            Some(Item::Child(child)) => Ok(child),
            Some(Item::History(_)) => Err(Error::TypeConflict {
                path: path.clone(),
                expected: ItemKind::Child,
                found: ItemKind::Value,
            }),
            None => Err(Error::NotFound { path: path.clone() }),
        }
    }

    /// Mutably borrow the child store at `path`.
    pub fn child_mut(&mut self, path: &Path) -> Result<&mut Store, Error> {
        let (node, key) = self.resolve_mut(path)?;
        match node.entries.get_mut(key) {
            Some(Item::Child(child)) => Ok(child),
            Some(Item::History(_)) => Err(Error::TypeConflict {
                path: path.clone(),
                expected: ItemKind::Child,
                found: ItemKind::Value,
            }),
            None => Err(Error::NotFound { path: path.clone() }),
        }
    }

    /// Iterate over direct children as `(key, store)` pairs.
    pub fn children(&self) -> impl Iterator<Item = (&str, &Store)> {
        self.entries.iter().filter_map(|(key, item)| match item {
            Item::Child(child) => Some((key.as_str(), child)),
            Item::History(_) => None,
        })
    }

    /// Iterate over direct children mutably.
    ///
    /// This is the hook for tree-wide stepping: the orchestrator that owns
    /// the whole hierarchy walks it and calls `advance_step`/`clear_step`
    /// per node.
    pub fn children_mut(&mut self) -> impl Iterator<Item = (&str, &mut Store)> {
        self.entries.iter_mut().filter_map(|(key, item)| match item {
            Item::Child(child) => Some((key.as_str(), child)),
            Item::History(_) => None,
        })
    }

    /// Iterate over the local keys that hold value histories.
    pub fn value_keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|(key, item)| match item {
            Item::History(_) => Some(key.as_str()),
            Item::Child(_) => None,
        })
    }

    /// Iterate over direct values written at `offset`, as `(key, value)`
    /// pairs. Unwritten slots are skipped; an offset past this node's
    /// buffer yields nothing.
    pub fn values_at(&self, offset: usize) -> impl Iterator<Item = (&str, &Value)> {
        let index = (offset < self.buffer_size).then(|| self.slot(offset));
        self.entries.iter().filter_map(move |(key, item)| {
            match (index, item) {
                (Some(i), Item::History(slots)) => slots[i].as_ref().map(|v| (key.as_str(), v)),
                _ => None,
            }
        })
    }

    /// Ring position for `offset` steps into the past. Caller checks range.
    fn slot(&self, offset: usize) -> usize {
        (self.current_index + self.buffer_size - offset) % self.buffer_size
    }

    fn check_offset(&self, offset: usize) -> Result<(), Error> {
        if offset >= self.buffer_size {
            return Err(Error::OffsetOutOfRange {
                offset,
                buffer_size: self.buffer_size,
            });
        }
        Ok(())
    }

    /// Descend through all but the last segment, read-only. Returns the
    /// node owning the final segment and that segment's key.
    fn resolve<'p>(&self, path: &'p Path) -> Result<(&Store, &'p str), Error> {
        let (key, parents) =
            path.components
                .split_last()
                .ok_or_else(|| PathError::InvalidPath {
                    message: "empty path".to_string(),
                })?;
        let mut node = self;
        for (position, component) in parents.iter().enumerate() {
            match node.entries.get(component) {
                Some(Item::Child(child)) => node = child,
                Some(Item::History(_)) => {
                    return Err(PathError::ValueSegment {
                        component: component.clone(),
                        position,
                    }
                    .into())
                }
                None => return Err(Error::NotFound { path: path.clone() }),
            }
        }
        Ok((node, key.as_str()))
    }

    /// Mutable variant of [`resolve`](Self::resolve); never creates nodes.
    fn resolve_mut<'p>(&mut self, path: &'p Path) -> Result<(&mut Store, &'p str), Error> {
        let (key, parents) =
            path.components
                .split_last()
                .ok_or_else(|| PathError::InvalidPath {
                    message: "empty path".to_string(),
                })?;
        let mut node = self;
        for (position, component) in parents.iter().enumerate() {
            match node.entries.get_mut(component) {
                Some(Item::Child(child)) => node = child,
                Some(Item::History(_)) => {
                    return Err(PathError::ValueSegment {
                        component: component.clone(),
                        position,
                    }
                    .into())
                }
                None => return Err(Error::NotFound { path: path.clone() }),
            }
        }
        Ok((node, key.as_str()))
    }

    /// Descend through all but the last segment, creating missing children
    /// with the buffer size of the node this resolution started from.
    fn resolve_or_create<'p>(&mut self, path: &'p Path) -> Result<(&mut Store, &'p str), Error> {
        let (key, parents) =
            path.components
                .split_last()
                .ok_or_else(|| PathError::InvalidPath {
                    message: "empty path".to_string(),
                })?;
        let default_size = self.buffer_size;
        let mut node = self;
        for (position, component) in parents.iter().enumerate() {
            let item = node
                .entries
                .entry(component.clone())
                .or_insert_with(|| Item::Child(Store::new(default_size)));
            match item {
                Item::Child(child) => node = child,
                Item::History(_) => {
                    return Err(PathError::ValueSegment {
                        component: component.clone(),
                        position,
                    }
                    .into())
                }
            }
        }
        Ok((node, key.as_str()))
    }
}
