use crate::{comparer::EqualityComparer, enumerable::Enumerator, error::Error};
use derive_more::Deref;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Debug;

///
/// KeyValuePair
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct KeyValuePair<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> KeyValuePair<K, V> {
    pub const fn new(key: K, value: V) -> Self {
        Self { key, value }
    }
}

impl<K, V> From<(K, V)> for KeyValuePair<K, V> {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

///
/// Dictionary
///
/// Deterministic key-ordered map of unique keys.
/// Entries are kept sorted by ascending key, so enumeration order is stable
/// regardless of insertion order.
///

#[derive(Clone, Debug, Default, Deref, Eq, PartialEq, Serialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct Dictionary<K, V>(Vec<(K, V)>);

impl<K, V> Dictionary<K, V> {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return an iterator over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.0.iter().map(|(k, v)| (k, v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&K, &mut V)> {
        self.0.iter_mut().map(|(k, v)| (&*k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.0.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.0.iter().map(|(_, v)| v)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl<K, V> Dictionary<K, V>
where
    K: Ord,
{
    /// Build a dictionary, rejecting repeated keys.
    pub fn from_pairs(entries: impl IntoIterator<Item = (K, V)>) -> Result<Self, Error>
    where
        K: Debug,
    {
        let mut dictionary = Self::new();
        for (key, value) in entries {
            dictionary.add(key, value)?;
        }

        Ok(dictionary)
    }

    /// Build a dictionary, keeping the last value for each key.
    #[must_use]
    pub fn from_vec_last_wins(entries: Vec<(K, V)>) -> Self {
        let mut dictionary = Self::new();
        for (key, value) in entries {
            dictionary.insert(key, value);
        }

        dictionary
    }

    /// Add a new entry. Fails with `DuplicateKey` if `key` is present.
    pub fn add(&mut self, key: K, value: V) -> Result<(), Error>
    where
        K: Debug,
    {
        match self.find_index(&key) {
            Ok(_) => Err(Error::duplicate_key(&key)),
            Err(index) => {
                self.0.insert(index, (key, value));
                Ok(())
            }
        }
    }

    /// Insert or replace a value for `key`, returning the old value if present.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.find_index(&key) {
            Ok(index) => Some(std::mem::replace(&mut self.0[index].1, value)),
            Err(index) => {
                self.0.insert(index, (key, value));
                None
            }
        }
    }

    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.find_index(key).ok().map(|idx| &self.0[idx].1)
    }

    #[must_use]
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.find_index(key).ok().map(|idx| &mut self.0[idx].1)
    }

    /// Like `get`, but a missing key is a `KeyNotFound` error.
    pub fn try_get(&self, key: &K) -> Result<&V, Error>
    where
        K: Debug,
    {
        self.get(key).ok_or_else(|| Error::key_not_found(key))
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        match self.find_index(key) {
            Ok(index) => Some(self.0.remove(index).1),
            Err(_) => None,
        }
    }

    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.find_index(key).is_ok()
    }

    // Locate a key in the sorted entries.
    fn find_index(&self, key: &K) -> Result<usize, usize> {
        self.0.binary_search_by(|(candidate, _)| candidate.cmp(key))
    }
}

impl<K, V: PartialEq + 'static> Dictionary<K, V> {
    /// Returns `true` if any value is structurally equal to `value`.
    #[must_use]
    pub fn contains_value(&self, value: &V) -> bool {
        self.contains_value_with(value, &EqualityComparer::structural())
    }
}

impl<K, V: 'static> Dictionary<K, V> {
    /// Returns `true` if any value is equal to `value` under `comparer`.
    #[must_use]
    pub fn contains_value_with(&self, value: &V, comparer: &EqualityComparer<V>) -> bool {
        self.values().any(|candidate| comparer.equals(candidate, value))
    }
}

impl<K, V> Dictionary<K, V>
where
    K: Clone + 'static,
    V: Clone + 'static,
{
    /// Deferred query over a snapshot of the entries, in key order.
    #[must_use]
    pub fn enumerate(&self) -> Enumerator<KeyValuePair<K, V>> {
        Enumerator::from_vec(
            self.0
                .iter()
                .map(|(k, v)| KeyValuePair::new(k.clone(), v.clone()))
                .collect(),
        )
    }
}

impl<K, V> IntoIterator for Dictionary<K, V> {
    type Item = (K, V);
    type IntoIter = std::vec::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, K, V> IntoIterator for &'a Dictionary<K, V> {
    type Item = &'a (K, V);
    type IntoIter = std::slice::Iter<'a, (K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<'de, K, V> Deserialize<'de> for Dictionary<K, V>
where
    K: Deserialize<'de> + Ord,
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries = Vec::<(K, V)>::deserialize(deserializer)?;

        Ok(Self::from_vec_last_wins(entries))
    }
}

///
/// TESTS
///
