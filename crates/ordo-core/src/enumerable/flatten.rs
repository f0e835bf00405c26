use crate::obs::sink::{MetricsEvent, record};

///
/// Flatten
///
/// Pull-based concatenation of a sequence of sequences.
/// The next inner sequence is requested only once the current one is exhausted.
///

pub struct Flatten<I>
where
    I: Iterator,
    I::Item: IntoIterator,
{
    outer: I,
    inner: Option<<I::Item as IntoIterator>::IntoIter>,
}

impl<I> Flatten<I>
where
    I: Iterator,
    I::Item: IntoIterator,
{
    pub const fn new(outer: I) -> Self {
        Self { outer, inner: None }
    }
}

impl<I> Iterator for Flatten<I>
where
    I: Iterator,
    I::Item: IntoIterator,
{
    type Item = <I::Item as IntoIterator>::Item;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(inner) = self.inner.as_mut() {
                if let Some(item) = inner.next() {
                    return Some(item);
                }
                self.inner = None;
            }

            let next_inner = self.outer.next()?;
            self.inner = Some(next_inner.into_iter());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (front, _) = self
            .inner
            .as_ref()
            .map_or((0, Some(0)), Iterator::size_hint);

        (front, None)
    }
}

/// Concatenate `outer` lazily, outer order first, inner order second.
pub fn flatten<O>(outer: O) -> Flatten<O::IntoIter>
where
    O: IntoIterator,
    O::Item: IntoIterator,
{
    Flatten::new(outer.into_iter())
}

/// Concatenate `outer` into one vector.
pub fn flatten_to_vec<O>(outer: O) -> Vec<<O::Item as IntoIterator>::Item>
where
    O: IntoIterator,
    O::Item: IntoIterator,
{
    let out: Vec<_> = flatten(outer).collect();
    record(MetricsEvent::Flattened {
        elements: out.len() as u64,
    });

    out
}

///
/// TESTS
///
