//! Partition chains: the layered representation behind ordered enumeration.
//!
//! A chain yields partitions; flattening them in order gives the output order.
//! The base chain is one unsorted partition. Each sorter layer refines every
//! upstream partition independently and never compares elements that live in
//! different upstream partitions.

use crate::{
    comparer::Comparer,
    enumerable::source::{BoxIter, Source},
    obs::sink::{MetricsEvent, record},
};
use std::{cmp::Ordering, fmt, rc::Rc};

/// Lazy sequence of partitions produced by one pass over a chain.
pub type Partitions<T> = Box<dyn Iterator<Item = Partition<T>>>;

///
/// Partition
///
/// One run of elements sharing a key at the level that produced it.
///

pub struct Partition<T> {
    items: BoxIter<T>,
}

impl<T: 'static> Partition<T> {
    pub(crate) fn new(items: BoxIter<T>) -> Self {
        Self { items }
    }

    pub(crate) fn from_vec(items: Vec<T>) -> Self {
        Self::new(Box::new(items.into_iter()))
    }

    /// Drain the partition into a vector.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.items.collect()
    }
}

impl<T> Iterator for Partition<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.items.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl<T> fmt::Debug for Partition<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Partition").finish_non_exhaustive()
    }
}

///
/// PartitionChain
///
/// Anything that can start a fresh pass of partitions.
///

pub(crate) trait PartitionChain<T> {
    fn partitions(&self) -> Partitions<T>;
}

///
/// EmptyChain
///

pub(crate) struct EmptyChain;

impl<T: 'static> PartitionChain<T> for EmptyChain {
    fn partitions(&self) -> Partitions<T> {
        Box::new(std::iter::empty())
    }
}

///
/// SinglePartition
///
/// Base case: the whole source, unsorted, as exactly one partition.
///

pub(crate) struct SinglePartition<T> {
    source: Source<T>,
}

impl<T> SinglePartition<T> {
    pub(crate) const fn new(source: Source<T>) -> Self {
        Self { source }
    }
}

impl<T: 'static> PartitionChain<T> for SinglePartition<T> {
    fn partitions(&self) -> Partitions<T> {
        let source = self.source.clone();

        Box::new(std::iter::once_with(move || Partition::new(source.produce())))
    }
}

///
/// PartitionSorter
///
/// One sort level layered on an upstream chain.
///

pub(crate) struct PartitionSorter<T, K> {
    upstream: Rc<dyn PartitionChain<T>>,
    key_selector: Rc<dyn Fn(&T) -> K>,
    comparer: Comparer<K>,
}

impl<T, K> PartitionSorter<T, K> {
    pub(crate) fn new(
        upstream: Rc<dyn PartitionChain<T>>,
        key_selector: Rc<dyn Fn(&T) -> K>,
        comparer: Comparer<K>,
    ) -> Self {
        Self {
            upstream,
            key_selector,
            comparer,
        }
    }
}

impl<T: 'static, K: 'static> PartitionChain<T> for PartitionSorter<T, K> {
    fn partitions(&self) -> Partitions<T> {
        Box::new(SortedPartitions {
            upstream: self.upstream.partitions(),
            key_selector: Rc::clone(&self.key_selector),
            comparer: self.comparer.clone(),
            pending: Vec::new().into_iter(),
        })
    }
}

///
/// SortedPartitions
///
/// Iterator state for one pass of a sorter level: the upstream pass, plus the
/// already-split runs of the partition currently being emitted.
///

struct SortedPartitions<T, K> {
    upstream: Partitions<T>,
    key_selector: Rc<dyn Fn(&T) -> K>,
    comparer: Comparer<K>,
    pending: std::vec::IntoIter<Vec<T>>,
}

impl<T: 'static, K: 'static> Iterator for SortedPartitions<T, K> {
    type Item = Partition<T>;

    fn next(&mut self) -> Option<Partition<T>> {
        loop {
            if let Some(run) = self.pending.next() {
                return Some(Partition::from_vec(run));
            }

            // Empty upstream partitions produce no runs; keep pulling.
            let partition = self.upstream.next()?;
            self.pending =
                sort_into_runs(partition, &*self.key_selector, &self.comparer).into_iter();
        }
    }
}

/// Drain one partition, stable-sort it by key and split it into equal-key runs.
///
/// Keys are computed once per element. The comparer may be inconsistent
/// (NaN under `natural`, a non-transitive user function); the result is then
/// some permutation of the input, never a panic from the sort itself.
pub(crate) fn sort_into_runs<T, K>(
    items: impl IntoIterator<Item = T>,
    key_selector: &dyn Fn(&T) -> K,
    comparer: &Comparer<K>,
) -> Vec<Vec<T>> {
    let items: Vec<T> = items.into_iter().collect();
    let keys: Vec<K> = items.iter().map(key_selector).collect();
    let order = stable_order(&keys, comparer);

    let elements = items.len();
    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    let mut runs: Vec<Vec<T>> = Vec::new();
    let mut previous: Option<usize> = None;

    for index in order {
        let Some(item) = slots[index].take() else {
            continue;
        };
        let continues_run = previous
            .is_some_and(|prev| comparer.compare(&keys[prev], &keys[index]) == Ordering::Equal);

        match runs.last_mut() {
            Some(run) if continues_run => run.push(item),
            _ => runs.push(vec![item]),
        }
        previous = Some(index);
    }

    if elements > 0 {
        record(MetricsEvent::PartitionSorted {
            elements: elements as u64,
            partitions: runs.len() as u64,
        });
    }

    runs
}

// Bottom-up merge sort over positions. Ties keep the left (earlier) position,
// and every pass writes a full permutation whatever the comparer answers.
fn stable_order<K>(keys: &[K], comparer: &Comparer<K>) -> Vec<usize> {
    let len = keys.len();
    let mut order: Vec<usize> = (0..len).collect();
    let mut scratch: Vec<usize> = vec![0; len];
    let mut width = 1;

    while width < len {
        for start in (0..len).step_by(2 * width) {
            let mid = (start + width).min(len);
            let end = (start + 2 * width).min(len);
            merge_runs(
                &order[start..mid],
                &order[mid..end],
                &mut scratch[start..end],
                keys,
                comparer,
            );
        }
        std::mem::swap(&mut order, &mut scratch);
        width *= 2;
    }

    order
}

fn merge_runs<K>(
    left: &[usize],
    right: &[usize],
    out: &mut [usize],
    keys: &[K],
    comparer: &Comparer<K>,
) {
    let (mut i, mut j) = (0, 0);

    for slot in out {
        let take_right = j < right.len()
            && (i >= left.len()
                || comparer.compare(&keys[right[j]], &keys[left[i]]) == Ordering::Less);

        if take_right {
            *slot = right[j];
            j += 1;
        } else {
            *slot = left[i];
            i += 1;
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn first_char(value: &&'static str) -> char {
        value.chars().next().unwrap_or_default()
    }

    #[test]
    fn runs_group_ties_and_keep_input_order() {
        let runs = sort_into_runs(
            ["b1", "a1", "c1", "a2", "b2", "a3"],
            &first_char,
            &Comparer::natural(),
        );

        assert_eq!(
            runs,
            vec![vec!["a1", "a2", "a3"], vec!["b1", "b2"], vec!["c1"]]
        );
    }

    // Generic over the key with no lifetime bound on it.
    fn group_by_key<T, K>(
        items: Vec<T>,
        key_selector: &dyn Fn(&T) -> K,
        comparer: &Comparer<K>,
    ) -> Vec<Vec<T>> {
        sort_into_runs(items, key_selector, comparer)
    }

    #[test]
    fn runs_do_not_require_static_keys() {
        let runs = group_by_key(vec![3_u8, 1, 3, 2], &|n: &u8| *n, &Comparer::<u8>::natural());

        assert_eq!(runs, vec![vec![1], vec![2], vec![3, 3]]);
    }

    #[test]
    fn inconsistent_comparer_still_yields_a_permutation() {
        let items: Vec<i32> = (0..500).map(|n| (n * 7919) % 503).collect();
        let comparer = Comparer::<i32>::from_sign(|a, b| (a * 7 + b * 3) % 5 - 2);

        let runs = sort_into_runs(items.clone(), &|n: &i32| *n, &comparer);

        let mut seen: Vec<i32> = runs.into_iter().flatten().collect();
        let mut expected = items;
        seen.sort_unstable();
        expected.sort_unstable();
        assert_eq!(seen, expected);
    }

    #[test]
    fn empty_partition_yields_no_runs() {
        let runs = sort_into_runs(Vec::<&'static str>::new(), &first_char, &Comparer::natural());

        assert!(runs.is_empty());
    }

    #[test]
    fn singleton_partition_yields_one_run() {
        let runs = sort_into_runs(["z"], &first_char, &Comparer::natural());

        assert_eq!(runs, vec![vec!["z"]]);
    }

    #[test]
    fn reversed_comparer_orders_runs_but_not_run_contents() {
        let runs = sort_into_runs(
            ["a1", "b1", "a2", "b2"],
            &first_char,
            &Comparer::natural().reverse(),
        );

        assert_eq!(runs, vec![vec!["b1", "b2"], vec!["a1", "a2"]]);
    }

    #[test]
    fn single_partition_chain_yields_whole_source_once() {
        let chain = SinglePartition::new(Source::from_vec(vec![3, 1, 2]));
        let partitions: Vec<Vec<i32>> = chain.partitions().map(Partition::into_vec).collect();

        assert_eq!(partitions, vec![vec![3, 1, 2]]);
    }

    #[test]
    fn sorter_skips_empty_upstream_partition() {
        let base: Rc<dyn PartitionChain<i32>> =
            Rc::new(SinglePartition::new(Source::from_vec(Vec::new())));
        let sorter = PartitionSorter::new(base, Rc::new(|n: &i32| *n), Comparer::<i32>::natural());

        assert_eq!(sorter.partitions().count(), 0);
    }

    #[test]
    fn sorter_refines_each_upstream_partition_independently() {
        let base: Rc<dyn PartitionChain<(u8, u8)>> = Rc::new(SinglePartition::new(
            Source::from_vec(vec![(2, 1), (1, 9), (2, 0), (1, 3)]),
        ));
        let by_first: Rc<dyn PartitionChain<(u8, u8)>> = Rc::new(PartitionSorter::new(
            base,
            Rc::new(|pair: &(u8, u8)| pair.0),
            Comparer::<u8>::natural(),
        ));
        let by_second = PartitionSorter::new(
            by_first,
            Rc::new(|pair: &(u8, u8)| pair.1),
            Comparer::<u8>::natural(),
        );

        let partitions: Vec<Vec<(u8, u8)>> =
            by_second.partitions().map(Partition::into_vec).collect();

        assert_eq!(
            partitions,
            vec![vec![(1, 3)], vec![(1, 9)], vec![(2, 0)], vec![(2, 1)]]
        );
    }

    #[test]
    fn sorter_drains_only_requested_partitions() {
        use std::cell::Cell;

        let keys_taken = Rc::new(Cell::new(0_usize));
        let counter = Rc::clone(&keys_taken);

        let base: Rc<dyn PartitionChain<u32>> =
            Rc::new(SinglePartition::new(Source::from_vec(vec![1, 1, 2, 2, 3])));
        let coarse: Rc<dyn PartitionChain<u32>> = Rc::new(PartitionSorter::new(
            base,
            Rc::new(|n: &u32| *n),
            Comparer::<u32>::natural(),
        ));
        let fine = PartitionSorter::new(
            coarse,
            Rc::new(move |n: &u32| {
                counter.set(counter.get() + 1);
                *n
            }),
            Comparer::<u32>::natural(),
        );

        let mut pass = fine.partitions();
        let first = pass.next().map(Partition::into_vec);

        assert_eq!(first, Some(vec![1, 1]));
        assert_eq!(keys_taken.get(), 2);
    }
}
