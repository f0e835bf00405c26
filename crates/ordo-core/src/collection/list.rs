use crate::{
    comparer::EqualityComparer,
    enumerable::{Enumerator, OrderedEnumerator},
    error::Error,
};
use derive_more::Deref;
use serde::{Deserialize, Serialize};

///
/// List
///
/// Ordered, duplicate-friendly list. Preserves insertion order and
/// serializes identically to `Vec<T>`.
///
/// Positional mutation is checked and returns `ArgumentOutOfRange` instead of
/// panicking. `List` does not expose `DerefMut`.
///

#[repr(transparent)]
#[derive(Clone, Debug, Default, Deref, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct List<T>(Vec<T>);

impl<T> List<T> {
    /// Create an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Build a list from an existing vector.
    #[must_use]
    pub const fn from_vec(values: Vec<T>) -> Self {
        Self(values)
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub const fn as_slice(&self) -> &[T] {
        self.0.as_slice()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.0.iter_mut()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.0.get(index)
    }

    #[must_use]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.0.get_mut(index)
    }

    /// Replace the item at `index`, returning the previous one.
    pub fn set(&mut self, index: usize, value: T) -> Result<T, Error> {
        let len = self.0.len();
        let slot = self
            .0
            .get_mut(index)
            .ok_or_else(|| Error::argument_out_of_range("index", index, len))?;

        Ok(std::mem::replace(slot, value))
    }

    /// Append an item.
    pub fn push(&mut self, value: T) {
        self.0.push(value);
    }

    /// Append every item of `values`.
    pub fn extend_from(&mut self, values: impl IntoIterator<Item = T>) {
        self.0.extend(values);
    }

    /// Insert at `index`; `index == len` appends.
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), Error> {
        if index > self.0.len() {
            return Err(Error::argument_out_of_range("index", index, self.0.len()));
        }
        self.0.insert(index, value);

        Ok(())
    }

    /// Remove and return the item at `index`.
    pub fn remove_at(&mut self, index: usize) -> Result<T, Error> {
        if index >= self.0.len() {
            return Err(Error::argument_out_of_range("index", index, self.0.len()));
        }

        Ok(self.0.remove(index))
    }

    pub fn pop(&mut self) -> Option<T> {
        self.0.pop()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn retain<F>(&mut self, predicate: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.0.retain(predicate);
    }

    pub fn reverse(&mut self) {
        self.0.reverse();
    }

    /// Stable in-place sort by key.
    pub fn sort_by_key<K: Ord>(&mut self, key: impl FnMut(&T) -> K) {
        self.0.sort_by_key(key);
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
}

impl<T: PartialEq> List<T> {
    /// Remove the first item equal to `value`.
    pub fn remove(&mut self, value: &T) -> bool {
        match self.index_of(value) {
            Some(index) => {
                self.0.remove(index);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.0.iter().position(|item| item == value)
    }

    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.index_of(value).is_some()
    }
}

impl<T: 'static> List<T> {
    /// Position of the first item `comparer` considers equal to `value`.
    #[must_use]
    pub fn index_of_with(&self, value: &T, comparer: &EqualityComparer<T>) -> Option<usize> {
        self.0.iter().position(|item| comparer.equals(item, value))
    }
}

impl<T: Clone + 'static> List<T> {
    /// Deferred query over a snapshot of the current items.
    #[must_use]
    pub fn enumerate(&self) -> Enumerator<T> {
        Enumerator::from_vec(self.0.clone())
    }

    /// Ordered view over a snapshot of the current items.
    #[must_use]
    pub fn order_by<K>(&self, key_selector: impl Fn(&T) -> K + 'static) -> OrderedEnumerator<T>
    where
        K: PartialOrd + 'static,
    {
        self.enumerate().order_by(key_selector)
    }
}

impl<T> From<Vec<T>> for List<T> {
    fn from(values: Vec<T>) -> Self {
        Self(values)
    }
}

impl<T> From<List<T>> for Vec<T> {
    fn from(values: List<T>) -> Self {
        values.0
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut List<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter_mut()
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn positional_edits_are_checked() {
        let mut list: List<u8> = vec![10, 20, 30].into();

        list.insert(1, 11).expect("insert inside bounds");
        list.insert(4, 40).expect("insert at len appends");
        let err = list.insert(9, 0).expect_err("insert past len must fail");

        assert_eq!(err.kind, ErrorKind::ArgumentOutOfRange);
        assert_eq!(err.argument, Some("index"));
        assert_eq!(list.as_slice(), &[10, 11, 20, 30, 40]);
    }

    #[test]
    fn remove_at_and_set_reject_out_of_range() {
        let mut list: List<u8> = vec![1, 2].into();

        assert_eq!(list.set(0, 5), Ok(1));
        assert_eq!(list.remove_at(1), Ok(2));
        assert_eq!(
            list.remove_at(1).map_err(|err| err.kind),
            Err(ErrorKind::ArgumentOutOfRange)
        );
        assert_eq!(
            list.set(3, 0).map_err(|err| err.kind),
            Err(ErrorKind::ArgumentOutOfRange)
        );
        assert_eq!(list.as_slice(), &[5]);
    }

    #[test]
    fn remove_drops_first_match_only() {
        let mut list: List<&str> = vec!["a", "b", "a"].into();

        assert!(list.remove(&"a"));
        assert!(!list.remove(&"z"));
        assert_eq!(list.as_slice(), &["b", "a"]);
        assert_eq!(list.index_of(&"a"), Some(1));
    }

    #[test]
    fn index_of_with_uses_caller_comparer() {
        let list: List<String> = vec!["Alpha".to_string(), "beta".to_string()].into();
        let ci = EqualityComparer::from_fn(|a: &String, b: &String| a.eq_ignore_ascii_case(b));

        assert_eq!(list.index_of_with(&"BETA".to_string(), &ci), Some(1));
        assert_eq!(list.index_of(&"BETA".to_string()), None);
    }

    #[test]
    fn enumerate_snapshots_current_items() {
        let mut list: List<i32> = vec![3, 1, 2].into();
        let ordered = list.order_by(|n| *n);
        list.push(0);

        assert_eq!(ordered.to_vec(), vec![1, 2, 3]);
        assert_eq!(list.enumerate().count(), 4);
    }

    #[test]
    fn list_serializes_as_plain_array() {
        let list: List<u8> = vec![1, 2].into();

        let json = serde_json::to_string(&list).expect("serialize list");
        let back: List<u8> = serde_json::from_str(&json).expect("deserialize list");

        assert_eq!(json, "[1,2]");
        assert_eq!(back, list);
    }
}
