//! Persistent declaration maps with structural sharing.
//!
//! A thin wrapper around the `im` crate's persistent data structures that
//! remembers declaration order. Cloning is O(1), so a registry can be
//! extended speculatively and dropped on failure without touching the
//! original.

use std::fmt;

use crate::error::{Error, ErrorKind};
use crate::name::Name;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Insertion-ordered persistent map from [`Name`] to `V`.
///
/// Insertion never overwrites: [`DeclMap::try_insert`] refuses a name that is
/// already present, because declarations are one-shot.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "Vec<(Name, V)>",
        into = "Vec<(Name, V)>",
        bound(
            serialize = "V: Clone + Serialize",
            deserialize = "V: Clone + Deserialize<'de>"
        )
    )
)]
pub struct DeclMap<V: Clone> {
    entries: im::Vector<(Name, V)>,
    index: im::HashMap<Name, usize>,
}

impl<V: Clone> DeclMap<V> {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: im::Vector::new(),
            index: im::HashMap::new(),
        }
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Gets a value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&V> {
        let position = *self.index.get(name)?;
        self.entries.get(position).map(|(_, v)| v)
    }

    /// Gets the stored name and value by name.
    #[must_use]
    pub fn get_entry(&self, name: &str) -> Option<(&Name, &V)> {
        let position = *self.index.get(name)?;
        self.entries.get(position).map(|(n, v)| (n, v))
    }

    /// Returns true if the name is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Returns the declaration position of a name.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Returns a new map with the entry appended.
    ///
    /// Returns `None` if the name is already present.
    #[must_use]
    pub fn try_insert(&self, name: Name, value: V) -> Option<Self> {
        if self.index.contains_key(name.as_str()) {
            return None;
        }
        let mut new = self.clone();
        new.index.insert(name.clone(), new.entries.len());
        new.entries.push_back((name, value));
        Some(new)
    }

    /// Returns an iterator over entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&Name, &V)> {
        self.entries.iter().map(|(n, v)| (n, v))
    }

    /// Returns an iterator over names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &Name> {
        self.entries.iter().map(|(n, _)| n)
    }

    /// Returns an iterator over values in declaration order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl<V: Clone> Default for DeclMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone + fmt::Debug> fmt::Debug for DeclMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V: Clone + PartialEq> PartialEq for DeclMap<V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<V: Clone> TryFrom<Vec<(Name, V)>> for DeclMap<V> {
    type Error = Error;

    /// Rebuilds a map from its entries.
    ///
    /// A repeated name is an error rather than being dropped.
    fn try_from(entries: Vec<(Name, V)>) -> Result<Self, Error> {
        let mut map = Self::new();
        for (name, value) in entries {
            map = map.try_insert(name.clone(), value).ok_or_else(|| {
                Error::new(ErrorKind::SerializationError(format!(
                    "duplicate entry '{name}'"
                )))
            })?;
        }
        Ok(map)
    }
}

impl<V: Clone> From<DeclMap<V>> for Vec<(Name, V)> {
    fn from(map: DeclMap<V>) -> Self {
        map.entries.into_iter().collect()
    }
}
