use crate::{
    collection::List,
    comparer::Comparer,
    enumerable::{
        Enumerator,
        flatten::{Flatten, flatten_to_vec},
        partition::{EmptyChain, PartitionChain, PartitionSorter, Partitions, SinglePartition},
        source::Source,
    },
    obs::sink::{MetricsEvent, record},
};
use std::{fmt, rc::Rc};

///
/// OrderedEnumerator
///
/// Immutable, stably ordered view over a source. Each `then_by*` call layers
/// one more sort level on top of `self` and returns a new enumerator; `self`
/// stays usable and unchanged.
///
/// Nothing is sorted until the enumerator is iterated, and every pass starts
/// over from the source.
///

pub struct OrderedEnumerator<T> {
    chain: Rc<dyn PartitionChain<T>>,
}

impl<T: 'static> OrderedEnumerator<T> {
    /// Zero-element ordered enumerator.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            chain: Rc::new(EmptyChain),
        }
    }

    /// Order `source` by `key_selector` under `comparer`.
    #[must_use]
    pub fn from_source<K: 'static>(
        source: Source<T>,
        key_selector: impl Fn(&T) -> K + 'static,
        comparer: Comparer<K>,
    ) -> Self {
        let base: Rc<dyn PartitionChain<T>> = Rc::new(SinglePartition::new(source));

        Self::layer(base, Rc::new(key_selector), comparer)
    }

    fn layer<K: 'static>(
        upstream: Rc<dyn PartitionChain<T>>,
        key_selector: Rc<dyn Fn(&T) -> K>,
        comparer: Comparer<K>,
    ) -> Self {
        Self {
            chain: Rc::new(PartitionSorter::new(upstream, key_selector, comparer)),
        }
    }

    /// Refine ties of the current order by `key_selector`, ascending.
    #[must_use]
    pub fn then_by<K>(&self, key_selector: impl Fn(&T) -> K + 'static) -> Self
    where
        K: PartialOrd + 'static,
    {
        self.then_by_with(key_selector, Comparer::natural())
    }

    /// Refine ties of the current order by `key_selector` under `comparer`.
    #[must_use]
    pub fn then_by_with<K: 'static>(
        &self,
        key_selector: impl Fn(&T) -> K + 'static,
        comparer: Comparer<K>,
    ) -> Self {
        Self::layer(Rc::clone(&self.chain), Rc::new(key_selector), comparer)
    }

    /// Refine ties of the current order by `key_selector`, descending.
    #[must_use]
    pub fn then_by_descending<K>(&self, key_selector: impl Fn(&T) -> K + 'static) -> Self
    where
        K: PartialOrd + 'static,
    {
        self.then_by_descending_with(key_selector, Comparer::natural())
    }

    /// Refine ties of the current order by `key_selector` under the reverse of
    /// `comparer`. Equal keys still group together.
    #[must_use]
    pub fn then_by_descending_with<K: 'static>(
        &self,
        key_selector: impl Fn(&T) -> K + 'static,
        comparer: Comparer<K>,
    ) -> Self {
        self.then_by_with(key_selector, comparer.reverse())
    }

    /// Start a fresh pass over the final partition chain.
    #[must_use]
    pub fn partitions(&self) -> Partitions<T> {
        self.chain.partitions()
    }

    /// Start a fresh pass over the flattened order.
    #[must_use]
    pub fn iter(&self) -> Iter<T> {
        record(MetricsEvent::OrderedIteration);

        Iter {
            inner: Flatten::new(self.partitions()),
        }
    }

    /// Materialize the ordered sequence.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        record(MetricsEvent::OrderedIteration);

        flatten_to_vec(self.partitions())
    }

    /// Materialize the ordered sequence into a `List`.
    #[must_use]
    pub fn to_list(&self) -> List<T> {
        List::from_vec(self.to_vec())
    }

    /// Expose this order as a plain deferred enumerator.
    #[must_use]
    pub fn as_enumerator(&self) -> Enumerator<T> {
        Enumerator::new(Source::from_ordered(self.clone()))
    }

    /// Number of elements in one full pass.
    #[must_use]
    pub fn count(&self) -> usize {
        self.iter().count()
    }
}

impl<T> Clone for OrderedEnumerator<T> {
    fn clone(&self) -> Self {
        Self {
            chain: Rc::clone(&self.chain),
        }
    }
}

impl<T: 'static> Default for OrderedEnumerator<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> fmt::Debug for OrderedEnumerator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedEnumerator").finish_non_exhaustive()
    }
}

impl<T: 'static> IntoIterator for &OrderedEnumerator<T> {
    type Item = T;
    type IntoIter = Iter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

///
/// Iter
///
/// One pass over an ordered enumerator. Owns its buffers; dropping it early
/// releases everything.
///

pub struct Iter<T> {
    inner: Flatten<Partitions<T>>,
}

impl<T> Iterator for Iter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }
}

impl<T> fmt::Debug for Iter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter").finish_non_exhaustive()
    }
}
