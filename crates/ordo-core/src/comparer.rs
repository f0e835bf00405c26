use std::{cmp::Ordering, fmt, rc::Rc};

///
/// Comparer
///
/// Shared ordering function over keys of type `K`.
/// `Less` sorts the first key before the second, `Equal` is a tie.
///

pub struct Comparer<K: ?Sized> {
    compare: Rc<dyn Fn(&K, &K) -> Ordering>,
}

impl<K: ?Sized> Comparer<K> {
    /// Compare two keys.
    #[must_use]
    pub fn compare(&self, left: &K, right: &K) -> Ordering {
        (self.compare)(left, right)
    }
}

impl<K: ?Sized + 'static> Comparer<K> {
    /// Build a comparer from an ordering function.
    #[must_use]
    pub fn from_fn(compare: impl Fn(&K, &K) -> Ordering + 'static) -> Self {
        Self {
            compare: Rc::new(compare),
        }
    }

    /// Build a comparer from a signed comparison function.
    /// Negative sorts first-before-second, zero is a tie, positive sorts after.
    #[must_use]
    pub fn from_sign(compare: impl Fn(&K, &K) -> i32 + 'static) -> Self {
        Self::from_fn(move |left, right| compare(left, right).cmp(&0))
    }

    /// Return a comparer with the opposite ordering. Ties stay ties.
    #[must_use]
    pub fn reverse(&self) -> Self {
        let inner = Rc::clone(&self.compare);

        Self::from_fn(move |left, right| inner(left, right).reverse())
    }
}

impl<K: PartialOrd + ?Sized + 'static> Comparer<K> {
    /// Natural ordering through the relational operators.
    /// Keys that are neither `<` nor `>` each other (NaN included) tie. That
    /// relation is not transitive; sorting stays total and panic-free, but the
    /// relative position of such keys is unspecified. Use
    /// `Comparer::from_fn(f64::total_cmp)` for a strict float order.
    #[must_use]
    pub fn natural() -> Self {
        Self::from_fn(natural_cmp::<K>)
    }
}

impl<K: PartialOrd + ?Sized + 'static> Default for Comparer<K> {
    fn default() -> Self {
        Self::natural()
    }
}

impl<K: ?Sized> Clone for Comparer<K> {
    fn clone(&self) -> Self {
        Self {
            compare: Rc::clone(&self.compare),
        }
    }
}

impl<K: ?Sized> fmt::Debug for Comparer<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Comparer").finish_non_exhaustive()
    }
}

/// Relational comparison mapped onto `Ordering`.
pub fn natural_cmp<K: PartialOrd + ?Sized>(left: &K, right: &K) -> Ordering {
    if left < right {
        Ordering::Less
    } else if left > right {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

///
/// EqualityComparer
///
/// Shared equality function. Structural by default; callers pick reference
/// equality (or anything else) explicitly.
///

pub struct EqualityComparer<T: ?Sized> {
    equals: Rc<dyn Fn(&T, &T) -> bool>,
}

impl<T: ?Sized> EqualityComparer<T> {
    #[must_use]
    pub fn equals(&self, left: &T, right: &T) -> bool {
        (self.equals)(left, right)
    }
}

impl<T: ?Sized + 'static> EqualityComparer<T> {
    #[must_use]
    pub fn from_fn(equals: impl Fn(&T, &T) -> bool + 'static) -> Self {
        Self {
            equals: Rc::new(equals),
        }
    }
}

impl<T: PartialEq + ?Sized + 'static> EqualityComparer<T> {
    /// Equality through `PartialEq`.
    #[must_use]
    pub fn structural() -> Self {
        Self::from_fn(|left: &T, right: &T| left == right)
    }
}

impl<X: ?Sized + 'static> EqualityComparer<Rc<X>> {
    /// Equality by allocation identity.
    #[must_use]
    pub fn reference() -> Self {
        Self::from_fn(|left: &Rc<X>, right: &Rc<X>| Rc::ptr_eq(left, right))
    }
}

impl<T: PartialEq + ?Sized + 'static> Default for EqualityComparer<T> {
    fn default() -> Self {
        Self::structural()
    }
}

impl<T: ?Sized> Clone for EqualityComparer<T> {
    fn clone(&self) -> Self {
        Self {
            equals: Rc::clone(&self.equals),
        }
    }
}

impl<T: ?Sized> fmt::Debug for EqualityComparer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EqualityComparer").finish_non_exhaustive()
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_comparer_ties_incomparable_floats() {
        let comparer = Comparer::<f64>::natural();

        assert_eq!(comparer.compare(&1.0, &2.0), Ordering::Less);
        assert_eq!(comparer.compare(&2.0, &1.0), Ordering::Greater);
        assert_eq!(comparer.compare(&f64::NAN, &1.0), Ordering::Equal);
    }

    #[test]
    fn sign_comparer_maps_integers_to_ordering() {
        let comparer = Comparer::<i32>::from_sign(|a, b| b - a);

        assert_eq!(comparer.compare(&1, &5), Ordering::Greater);
        assert_eq!(comparer.compare(&5, &5), Ordering::Equal);
        assert_eq!(comparer.compare(&5, &1), Ordering::Less);
    }

    #[test]
    fn reversed_comparer_keeps_ties() {
        let comparer = Comparer::<str>::natural().reverse();

        assert_eq!(comparer.compare("a", "b"), Ordering::Greater);
        assert_eq!(comparer.compare("a", "a"), Ordering::Equal);
    }

    #[test]
    fn reference_equality_distinguishes_equal_allocations() {
        let left = Rc::new(String::from("x"));
        let same = Rc::clone(&left);
        let other = Rc::new(String::from("x"));

        let by_ref = EqualityComparer::<Rc<String>>::reference();
        let by_value = EqualityComparer::<Rc<String>>::structural();

        assert!(by_ref.equals(&left, &same));
        assert!(!by_ref.equals(&left, &other));
        assert!(by_value.equals(&left, &other));
    }
}
