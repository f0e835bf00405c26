use crate::enumerable::ordered::OrderedEnumerator;
use std::{cell::RefCell, fmt, rc::Rc};

/// Owned, type-erased element iterator produced by one pass over a source.
pub type BoxIter<T> = Box<dyn Iterator<Item = T>>;

///
/// Source
///
/// Uniform "produce a fresh iterator" capability over every sequence shape
/// the query layer accepts. Cloning a source shares the underlying sequence.
///

pub struct Source<T> {
    kind: Rc<SourceKind<T>>,
}

enum SourceKind<T> {
    Empty,
    Repeatable(Box<dyn Fn() -> BoxIter<T>>),
    OneShot(RefCell<Option<BoxIter<T>>>),
    Ordered(OrderedEnumerator<T>),
}

impl<T: 'static> Source<T> {
    #[must_use]
    pub fn empty() -> Self {
        Self::from_kind(SourceKind::Empty)
    }

    /// Materialized source; every pass yields clones of the stored items.
    #[must_use]
    pub fn from_vec(items: Vec<T>) -> Self
    where
        T: Clone,
    {
        let items: Rc<[T]> = items.into();

        Self::from_fn(move || {
            let items = Rc::clone(&items);
            (0..items.len()).map(move |index| items[index].clone())
        })
    }

    /// Generator-backed source; `factory` runs once per pass and may return an
    /// infinite iterator.
    #[must_use]
    pub fn from_fn<I>(factory: impl Fn() -> I + 'static) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        Self::from_kind(SourceKind::Repeatable(Box::new(move || -> BoxIter<T> {
            Box::new(factory().into_iter())
        })))
    }

    /// One-shot source; the first pass consumes `iter`, later passes are empty.
    #[must_use]
    pub fn once<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        let iter: BoxIter<T> = Box::new(iter.into_iter());

        Self::from_kind(SourceKind::OneShot(RefCell::new(Some(iter))))
    }

    /// Already-ordered source; every pass re-runs the ordering.
    #[must_use]
    pub fn from_ordered(ordered: OrderedEnumerator<T>) -> Self {
        Self::from_kind(SourceKind::Ordered(ordered))
    }

    fn from_kind(kind: SourceKind<T>) -> Self {
        Self { kind: Rc::new(kind) }
    }

    /// Start one pass over the sequence.
    #[must_use]
    pub fn produce(&self) -> BoxIter<T> {
        match self.kind.as_ref() {
            SourceKind::Empty => Box::new(std::iter::empty()),
            SourceKind::Repeatable(factory) => factory(),
            SourceKind::OneShot(slot) => match slot.borrow_mut().take() {
                Some(iter) => iter,
                None => Box::new(std::iter::empty()),
            },
            SourceKind::Ordered(ordered) => Box::new(ordered.iter()),
        }
    }

    /// Returns `true` if a second pass yields the same elements as the first.
    #[must_use]
    pub fn is_restartable(&self) -> bool {
        !matches!(self.kind.as_ref(), SourceKind::OneShot(_))
    }
}

impl<T> Clone for Source<T> {
    fn clone(&self) -> Self {
        Self {
            kind: Rc::clone(&self.kind),
        }
    }
}

impl<T> fmt::Debug for Source<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.kind.as_ref() {
            SourceKind::Empty => "Empty",
            SourceKind::Repeatable(_) => "Repeatable",
            SourceKind::OneShot(_) => "OneShot",
            SourceKind::Ordered(_) => "Ordered",
        };
        f.debug_tuple("Source").field(&label).finish()
    }
}

impl<T: Clone + 'static> From<Vec<T>> for Source<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_vec(items)
    }
}

///
/// TESTS
///
