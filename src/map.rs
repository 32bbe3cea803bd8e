//! Key/value storage behind every TOML table.
//!
//! This module provides [`Map`], a string-keyed map whose backing is chosen
//! per table with [`TableOrder`]:
//!
//! - **Insertion** ([`IndexMap`]): iteration follows the order keys were
//!   defined, so documents print back in their original order
//! - **Hashed** ([`hashbrown::HashMap`]): no ordering; the serializer sorts
//!   keys so output stays deterministic
//!
//! The backing is a performance/ordering knob only: two maps with the same
//! entries compare equal regardless of backing or order.
//!
//! ## Examples
//!
//! ```rust
//! use serde_tomlet::{Map, TableOrder, Value};
//!
//! let mut ordered = Map::new();
//! ordered.insert("b".to_string(), Value::from(2));
//! ordered.insert("a".to_string(), Value::from(1));
//!
//! let mut hashed = Map::with_order(TableOrder::Hashed);
//! hashed.insert("a".to_string(), Value::from(1));
//! hashed.insert("b".to_string(), Value::from(2));
//!
//! assert_eq!(ordered, hashed);
//! let keys: Vec<_> = ordered.keys().cloned().collect();
//! assert_eq!(keys, vec!["b", "a"]);
//! ```

use crate::Value;
use indexmap::IndexMap;
use std::borrow::Borrow;

/// Backing chosen for a table's entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum TableOrder {
    /// Entries iterate in definition order.
    #[default]
    Insertion,
    /// Entries are hashed; iteration order is unspecified.
    Hashed,
}

#[derive(Clone, Debug)]
enum Backing {
    Ordered(IndexMap<String, Value>),
    Hashed(hashbrown::HashMap<String, Value>),
}

/// A map of string keys to TOML values.
///
/// # Examples
///
/// ```rust
/// use serde_tomlet::{Map, Value};
///
/// let mut map = Map::new();
/// map.insert("first".to_string(), Value::from(1));
/// map.insert("second".to_string(), Value::from(2));
///
/// // Iteration maintains insertion order
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Clone, Debug)]
pub struct Map {
    backing: Backing,
}

impl Map {
    /// Creates an empty insertion-ordered map.
    #[must_use]
    pub fn new() -> Self {
        Self::with_order(TableOrder::Insertion)
    }

    /// Creates an empty map with the given backing.
    #[must_use]
    pub fn with_order(order: TableOrder) -> Self {
        let backing = match order {
            TableOrder::Insertion => Backing::Ordered(IndexMap::new()),
            TableOrder::Hashed => Backing::Hashed(hashbrown::HashMap::new()),
        };
        Map { backing }
    }

    #[must_use]
    pub fn order(&self) -> TableOrder {
        match self.backing {
            Backing::Ordered(_) => TableOrder::Insertion,
            Backing::Hashed(_) => TableOrder::Hashed,
        }
    }

    /// Moves the entries into the given backing, keeping the current order
    /// when switching to an insertion-ordered map.
    pub fn set_order(&mut self, order: TableOrder) {
        if self.order() == order {
            return;
        }
        let entries = std::mem::replace(self, Map::with_order(order));
        self.extend(entries);
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the old value is returned and
    /// the key keeps its position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tomlet::{Map, Value};
    ///
    /// let mut map = Map::new();
    /// assert!(map.insert("key".to_string(), Value::from(42)).is_none());
    /// assert!(map.insert("key".to_string(), Value::from(43)).is_some());
    /// ```
    pub fn insert(&mut self, key: String, value: Value) -> Option<Value> {
        match &mut self.backing {
            Backing::Ordered(map) => map.insert(key, value),
            Backing::Hashed(map) => map.insert(key, value),
        }
    }

    /// Returns the value for `key`, inserting `make()` first if absent.
    pub fn get_or_insert_with<F>(&mut self, key: &str, make: F) -> &mut Value
    where
        F: FnOnce() -> Value,
    {
        match &mut self.backing {
            Backing::Ordered(map) => map.entry(key.to_string()).or_insert_with(make),
            Backing::Hashed(map) => map.entry(key.to_string()).or_insert_with(make),
        }
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tomlet::{Map, Value};
    ///
    /// let mut map = Map::new();
    /// map.insert("key".to_string(), Value::from(42));
    /// assert_eq!(map.get("key").and_then(|v| v.as_integer()), Some(42));
    /// ```
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&Value>
    where
        String: Borrow<Q>,
        Q: std::hash::Hash + Eq + ?Sized,
    {
        match &self.backing {
            Backing::Ordered(map) => map.get(key),
            Backing::Hashed(map) => map.get(key),
        }
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut Value>
    where
        String: Borrow<Q>,
        Q: std::hash::Hash + Eq + ?Sized,
    {
        match &mut self.backing {
            Backing::Ordered(map) => map.get_mut(key),
            Backing::Hashed(map) => map.get_mut(key),
        }
    }

    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        String: Borrow<Q>,
        Q: std::hash::Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Removes `key`, preserving the order of the remaining entries.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<Value>
    where
        String: Borrow<Q>,
        Q: std::hash::Hash + Eq + ?Sized,
    {
        match &mut self.backing {
            Backing::Ordered(map) => map.shift_remove(key),
            Backing::Hashed(map) => map.remove(key),
        }
    }

    /// Returns the number of elements in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.backing {
            Backing::Ordered(map) => map.len(),
            Backing::Hashed(map) => map.len(),
        }
    }

    /// Returns `true` if the map contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over the key-value pairs of the map.
    pub fn iter(&self) -> Iter<'_> {
        match &self.backing {
            Backing::Ordered(map) => Iter::Ordered(map.iter()),
            Backing::Hashed(map) => Iter::Hashed(map.iter()),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_> {
        match &mut self.backing {
            Backing::Ordered(map) => IterMut::Ordered(map.iter_mut()),
            Backing::Hashed(map) => IterMut::Hashed(map.iter_mut()),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> + '_ {
        self.iter().map(|(_, v)| v)
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut Value> + '_ {
        self.iter_mut().map(|(_, v)| v)
    }

    /// Entries in a deterministic order: definition order for an
    /// insertion-ordered map, sorted by key for a hashed one.
    #[must_use]
    pub fn stable_entries(&self) -> Vec<(&String, &Value)> {
        let mut entries: Vec<_> = self.iter().collect();
        if self.order() == TableOrder::Hashed {
            entries.sort_by(|a, b| a.0.cmp(b.0));
        }
        entries
    }
}

impl Default for Map {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key.as_str()) == Some(value))
    }
}

/// Iterator over `(&String, &Value)` pairs of a [`Map`].
pub enum Iter<'a> {
    Ordered(indexmap::map::Iter<'a, String, Value>),
    Hashed(hashbrown::hash_map::Iter<'a, String, Value>),
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a String, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Iter::Ordered(it) => it.next(),
            Iter::Hashed(it) => it.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Iter::Ordered(it) => it.size_hint(),
            Iter::Hashed(it) => it.size_hint(),
        }
    }
}

/// Iterator over `(&String, &mut Value)` pairs of a [`Map`].
pub enum IterMut<'a> {
    Ordered(indexmap::map::IterMut<'a, String, Value>),
    Hashed(hashbrown::hash_map::IterMut<'a, String, Value>),
}

impl<'a> Iterator for IterMut<'a> {
    type Item = (&'a String, &'a mut Value);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            IterMut::Ordered(it) => it.next(),
            IterMut::Hashed(it) => it.next(),
        }
    }
}

/// Owning iterator over the entries of a [`Map`].
pub enum IntoIter {
    Ordered(indexmap::map::IntoIter<String, Value>),
    Hashed(hashbrown::hash_map::IntoIter<String, Value>),
}

impl Iterator for IntoIter {
    type Item = (String, Value);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            IntoIter::Ordered(it) => it.next(),
            IntoIter::Hashed(it) => it.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            IntoIter::Ordered(it) => it.size_hint(),
            IntoIter::Hashed(it) => it.size_hint(),
        }
    }
}

impl IntoIterator for Map {
    type Item = (String, Value);
    type IntoIter = IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        match self.backing {
            Backing::Ordered(map) => IntoIter::Ordered(map.into_iter()),
            Backing::Hashed(map) => IntoIter::Hashed(map.into_iter()),
        }
    }
}

impl<'a> IntoIterator for &'a Map {
    type Item = (&'a String, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Extend<(String, Value)> for Map {
    fn extend<T: IntoIterator<Item = (String, Value)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl FromIterator<(String, Value)> for Map {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        let mut map = Map::new();
        map.extend(iter);
        map
    }
}

impl From<IndexMap<String, Value>> for Map {
    fn from(map: IndexMap<String, Value>) -> Self {
        Map {
            backing: Backing::Ordered(map),
        }
    }
}

impl From<std::collections::HashMap<String, Value>> for Map {
    fn from(map: std::collections::HashMap<String, Value>) -> Self {
        let mut result = Map::with_order(TableOrder::Hashed);
        result.extend(map);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_ignores_order_and_backing() {
        let a: Map = vec![
            ("x".to_string(), Value::from(1)),
            ("y".to_string(), Value::from(2)),
        ]
        .into_iter()
        .collect();
        let mut b = Map::with_order(TableOrder::Hashed);
        b.insert("y".to_string(), Value::from(2));
        b.insert("x".to_string(), Value::from(1));
        assert_eq!(a, b);

        b.insert("z".to_string(), Value::from(3));
        assert_ne!(a, b);
    }

    #[test]
    fn test_get_or_insert_with() {
        let mut map = Map::new();
        *map.get_or_insert_with("n", || Value::from(1)) = Value::from(5);
        let existing = map.get_or_insert_with("n", || Value::from(9));
        assert_eq!(existing.as_integer(), Some(5));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut map: Map = ["a", "b", "c"]
            .iter()
            .map(|k| (k.to_string(), Value::from(true)))
            .collect();
        map.remove("b");
        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "c"]);
    }

    #[test]
    fn test_set_order_and_stable_entries() {
        let mut map: Map = ["b", "c", "a"]
            .iter()
            .map(|k| (k.to_string(), Value::from(1)))
            .collect();
        let keys: Vec<_> = map.stable_entries().into_iter().map(|(k, _)| k.clone()).collect();
        assert_eq!(keys, vec!["b", "c", "a"]);

        map.set_order(TableOrder::Hashed);
        assert_eq!(map.order(), TableOrder::Hashed);
        let keys: Vec<_> = map.stable_entries().into_iter().map(|(k, _)| k.clone()).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }
}
