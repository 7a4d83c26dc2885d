//! Ordered key → set multimap used by the inheritance databases.
//!
//! Keys of the databases are descriptors, not strings, so the map is encoded
//! as a sequence of `(key, values)` entries rather than as a serde map. This
//! keeps it round-trippable through text formats such as JSON.

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MultiMap<K: Ord, V: Ord> {
    entries: BTreeMap<K, BTreeSet<V>>,
}

impl<K: Ord, V: Ord> Default for MultiMap<K, V> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<K: Ord, V: Ord> MultiMap<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one edge. Returns `true` if it was not already present.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        self.entries.entry(key).or_default().insert(value)
    }

    pub fn get(&self, key: &K) -> Option<&BTreeSet<V>> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &K, value: &V) -> bool {
        self.entries
            .get(key)
            .is_some_and(|values| values.contains(value))
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of key/value edges.
    pub fn edge_count(&self) -> usize {
        self.entries.values().map(BTreeSet::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &BTreeSet<V>)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }

    /// Remove values for which `keep` returns false, then drop empty keys.
    pub fn retain(&mut self, mut keep: impl FnMut(&K, &V) -> bool) {
        for (key, values) in self.entries.iter_mut() {
            values.retain(|value| keep(key, value));
        }
        self.entries.retain(|_, values| !values.is_empty());
    }
}

impl<K: Ord, V: Ord> FromIterator<(K, V)> for MultiMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V: Ord> Extend<(K, V)> for MultiMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord + Serialize, V: Ord + Serialize> Serialize for MultiMap<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.iter())
    }
}

impl<'de, K, V> Deserialize<'de> for MultiMap<K, V>
where
    K: Ord + Deserialize<'de>,
    V: Ord + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries: Vec<(K, BTreeSet<V>)> = Vec::deserialize(deserializer)?;
        let mut map = Self::new();
        for (key, values) in entries {
            if !values.is_empty() {
                map.entries.entry(key).or_default().extend(values);
            }
        }
        Ok(map)
    }
}
