//! Ordering and disposal strategies plugged into an [`OrderedList`](crate::OrderedList).

use core::cmp::Ordering;

/// Three-way comparison used to keep a list sorted.
///
/// `Less`, `Equal` and `Greater` play the role of -1, 0 and +1.
pub trait Comparator<T> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// Orders elements by their [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default)]
pub struct NaturalOrder;

impl<T: Ord> Comparator<T> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

impl<T, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// What happens to an element the list gives up ownership of.
///
/// Called by [`OrderedList::remove`](crate::OrderedList::remove),
/// [`OrderedList::clear`](crate::OrderedList::clear) and when the list is dropped.
/// Elements handed back by `dequeue` are not disposed.
pub trait Disposal<T> {
    fn dispose(&mut self, item: T);
}

/// Drops the element.
#[derive(Clone, Copy, Debug, Default)]
pub struct DropDisposal;

impl<T> Disposal<T> for DropDisposal {
    #[inline]
    fn dispose(&mut self, item: T) {
        drop(item);
    }
}

impl<T, F> Disposal<T> for F
where
    F: FnMut(T),
{
    #[inline]
    fn dispose(&mut self, item: T) {
        self(item)
    }
}
