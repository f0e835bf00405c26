use crate::{
    collection::{Dictionary, List},
    comparer::Comparer,
    enumerable::{
        flatten::flatten,
        ordered::OrderedEnumerator,
        source::{BoxIter, Source},
    },
    error::Error,
};
use std::{fmt::Debug, rc::Rc};

///
/// Enumerator
///
/// Deferred, composable query over a `Source`. Operators build new
/// enumerators without running anything; each pass re-reads the source.
///

pub struct Enumerator<T> {
    source: Source<T>,
}

impl<T: 'static> Enumerator<T> {
    #[must_use]
    pub const fn new(source: Source<T>) -> Self {
        Self { source }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::new(Source::empty())
    }

    #[must_use]
    pub fn from_vec(items: Vec<T>) -> Self
    where
        T: Clone,
    {
        Self::new(Source::from_vec(items))
    }

    #[must_use]
    pub fn from_fn<I>(factory: impl Fn() -> I + 'static) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        Self::new(Source::from_fn(factory))
    }

    #[must_use]
    pub fn once<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        Self::new(Source::once(iter))
    }

    /// Borrow the underlying source.
    #[must_use]
    pub const fn source(&self) -> &Source<T> {
        &self.source
    }

    /// Start a fresh pass.
    #[must_use]
    pub fn iter(&self) -> BoxIter<T> {
        self.source.produce()
    }

    ///
    /// OPERATORS
    ///

    #[must_use]
    pub fn filter(&self, predicate: impl Fn(&T) -> bool + 'static) -> Self {
        let upstream = self.source.clone();
        let predicate = Rc::new(predicate);

        Self::from_fn(move || {
            let predicate = Rc::clone(&predicate);
            upstream.produce().filter(move |item| predicate(item))
        })
    }

    #[must_use]
    pub fn map<U: 'static>(&self, f: impl Fn(T) -> U + 'static) -> Enumerator<U> {
        let upstream = self.source.clone();
        let f = Rc::new(f);

        Enumerator::from_fn(move || {
            let f = Rc::clone(&f);
            upstream.produce().map(move |item| f(item))
        })
    }

    /// Project each element to a sequence and concatenate the results.
    #[must_use]
    pub fn flat_map<U, I>(&self, f: impl Fn(T) -> I + 'static) -> Enumerator<U>
    where
        U: 'static,
        I: IntoIterator<Item = U> + 'static,
        I::IntoIter: 'static,
    {
        let upstream = self.source.clone();
        let f = Rc::new(f);

        Enumerator::from_fn(move || {
            let f = Rc::clone(&f);
            flatten(upstream.produce().map(move |item| f(item)))
        })
    }

    #[must_use]
    pub fn take(&self, count: usize) -> Self {
        let upstream = self.source.clone();

        Self::from_fn(move || upstream.produce().take(count))
    }

    #[must_use]
    pub fn skip(&self, count: usize) -> Self {
        let upstream = self.source.clone();

        Self::from_fn(move || upstream.produce().skip(count))
    }

    #[must_use]
    pub fn concat(&self, other: &Self) -> Self {
        let first = self.source.clone();
        let second = other.source.clone();

        Self::from_fn(move || first.produce().chain(second.produce()))
    }

    ///
    /// ORDERING
    ///

    #[must_use]
    pub fn order_by<K>(&self, key_selector: impl Fn(&T) -> K + 'static) -> OrderedEnumerator<T>
    where
        K: PartialOrd + 'static,
    {
        self.order_by_with(key_selector, Comparer::natural())
    }

    #[must_use]
    pub fn order_by_with<K: 'static>(
        &self,
        key_selector: impl Fn(&T) -> K + 'static,
        comparer: Comparer<K>,
    ) -> OrderedEnumerator<T> {
        OrderedEnumerator::from_source(self.source.clone(), key_selector, comparer)
    }

    #[must_use]
    pub fn order_by_descending<K>(
        &self,
        key_selector: impl Fn(&T) -> K + 'static,
    ) -> OrderedEnumerator<T>
    where
        K: PartialOrd + 'static,
    {
        self.order_by_descending_with(key_selector, Comparer::natural())
    }

    #[must_use]
    pub fn order_by_descending_with<K: 'static>(
        &self,
        key_selector: impl Fn(&T) -> K + 'static,
        comparer: Comparer<K>,
    ) -> OrderedEnumerator<T> {
        self.order_by_with(key_selector, comparer.reverse())
    }

    ///
    /// MATERIALIZATION
    ///

    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }

    #[must_use]
    pub fn to_list(&self) -> List<T> {
        List::from_vec(self.to_vec())
    }

    /// Build a dictionary; a repeated key fails the whole conversion.
    pub fn to_dictionary<K, V>(
        &self,
        key_selector: impl Fn(&T) -> K,
        value_selector: impl Fn(T) -> V,
    ) -> Result<Dictionary<K, V>, Error>
    where
        K: Ord + Debug,
    {
        let mut dictionary = Dictionary::new();
        for item in self.iter() {
            let key = key_selector(&item);
            dictionary.add(key, value_selector(item))?;
        }

        Ok(dictionary)
    }

    ///
    /// TERMINALS
    ///

    #[must_use]
    pub fn count(&self) -> usize {
        self.iter().count()
    }

    #[must_use]
    pub fn first(&self) -> Option<T> {
        self.iter().next()
    }

    #[must_use]
    pub fn any(&self, predicate: impl Fn(&T) -> bool) -> bool {
        self.iter().any(|item| predicate(&item))
    }

    #[must_use]
    pub fn all(&self, predicate: impl Fn(&T) -> bool) -> bool {
        self.iter().all(|item| predicate(&item))
    }

    #[must_use]
    pub fn contains(&self, needle: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|item| &item == needle)
    }
}

impl<T> Clone for Enumerator<T> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
        }
    }
}

impl<T> Debug for Enumerator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Enumerator")
            .field("source", &self.source)
            .finish()
    }
}

impl<T: 'static> Default for Enumerator<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Clone + 'static> FromIterator<T> for Enumerator<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T: 'static> From<Source<T>> for Enumerator<T> {
    fn from(source: Source<T>) -> Self {
        Self::new(source)
    }
}

impl<T: 'static> From<OrderedEnumerator<T>> for Enumerator<T> {
    fn from(ordered: OrderedEnumerator<T>) -> Self {
        ordered.as_enumerator()
    }
}

impl<T: 'static> IntoIterator for &Enumerator<T> {
    type Item = T;
    type IntoIter = BoxIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
