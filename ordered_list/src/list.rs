use core::cmp::Ordering;
use core::fmt;

use crate::cursor::Cursor;
use crate::policy::{Comparator, Disposal, DropDisposal, NaturalOrder};
use crate::storage::{ChunkedStore, GROWTH_CHUNK};

/// A sorted array of elements kept in non-descending order by a [`Comparator`].
///
/// Duplicates are allowed and sit next to each other. Searches land on the
/// first element of a run of equal elements.
///
/// The list owns its elements. When it gives one up through [`remove`](Self::remove),
/// [`clear`](Self::clear) or its own destruction, the [`Disposal`] policy
/// receives it.
///
/// # Examples
///
/// ```
/// use core::cmp::Ordering;
/// use ordered_list::OrderedList;
///
/// #[derive(Debug)]
/// struct Patch {
///     uid: u32,
///     start: u64,
/// }
///
/// let by_uid = |a: &Patch, b: &Patch| a.uid.cmp(&b.uid);
/// let mut patches = OrderedList::with_comparator(by_uid);
/// patches.insert(Patch { uid: 7, start: 0x401000 });
/// patches.insert(Patch { uid: 2, start: 0x402000 });
///
/// assert_eq!(patches.peek().map(|p| p.uid), Some(2));
/// let probe = Patch { uid: 7, start: 0 };
/// let at = patches.locate(&probe).unwrap();
/// assert_eq!(patches[at].start, 0x401000);
/// ```
pub struct OrderedList<T, C: Comparator<T> = NaturalOrder, D: Disposal<T> = DropDisposal> {
    store: ChunkedStore<T>,
    comparator: C,
    disposal: D,
}

impl<T: Ord> OrderedList<T> {
    /// Creates an empty list ordered by `Ord`, with room for one chunk.
    pub fn new() -> Self {
        Self::with_policies(NaturalOrder, DropDisposal)
    }
}

impl<T: Ord> Default for OrderedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: Comparator<T>> OrderedList<T, C> {
    /// Creates an empty list ordered by `comparator`.
    pub fn with_comparator(comparator: C) -> Self {
        Self::with_policies(comparator, DropDisposal)
    }
}

impl<T, C: Comparator<T>, D: Disposal<T>> OrderedList<T, C, D> {
    /// Creates an empty list with both strategies supplied.
    pub fn with_policies(comparator: C, disposal: D) -> Self {
        Self::with_chunk_size(GROWTH_CHUNK, comparator, disposal)
    }

    /// Creates an empty list that grows `chunk` slots at a time.
    ///
    /// A chunk of zero is treated as one.
    pub fn with_chunk_size(chunk: usize, comparator: C, disposal: D) -> Self {
        OrderedList {
            store: ChunkedStore::new(chunk),
            comparator,
            disposal,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Slots available before the backing array grows again.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// Slots added at each growth step.
    #[inline]
    pub fn chunk_size(&self) -> usize {
        self.store.chunk()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.store.as_slice().get(index)
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.store.as_slice()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// A traversal starting at the first element.
    pub fn cursor(&self) -> Cursor<'_, T> {
        Cursor::new(self.as_slice(), 0)
    }

    /// A traversal whose next `advance` yields the element at `index`.
    pub fn cursor_at(&self, index: usize) -> Cursor<'_, T> {
        Cursor::new(self.as_slice(), index)
    }

    /// Index of the element nearest to `item`.
    ///
    /// The nearest element is:
    /// - `None` if the list is empty
    /// - the first element if `item` is smaller than everything
    /// - the last element if `item` is larger than everything
    /// - the first element equal to `item`
    /// - otherwise the greatest element smaller than `item`
    pub fn locate(&self, item: &T) -> Option<usize> {
        let items = self.as_slice();
        if items.is_empty() {
            return None;
        }

        // i walks up from the front, j down from the back, until they meet
        let mut i = 0;
        let mut j = items.len() - 1;
        while i != j {
            let k = (i + j) / 2;
            match self.comparator.compare(&items[k], item) {
                Ordering::Less => {
                    if j - i == 1 {
                        // two left and k == i: settle on j unless it overshoots
                        if self.comparator.compare(&items[j], item) != Ordering::Greater {
                            i = j;
                        } else {
                            j = i;
                        }
                    } else {
                        i = k;
                    }
                }
                // keep narrowing down to the first of a run
                Ordering::Equal => j = k,
                Ordering::Greater => j = k,
            }
        }
        Some(i)
    }

    /// Index of the first element strictly greater than `item`.
    ///
    /// `None` if the list is empty or nothing is greater than `item`.
    pub fn locate_next(&self, item: &T) -> Option<usize> {
        let items = self.as_slice();
        let last = items.len().checked_sub(1)?;
        if self.comparator.compare(&items[last], item) != Ordering::Greater {
            return None;
        }

        // items[j] > item holds throughout
        let mut i = 0;
        let mut j = last;
        while i != j {
            let k = (i + j) / 2;
            match self.comparator.compare(&items[k], item) {
                Ordering::Greater => j = k,
                Ordering::Less | Ordering::Equal => i = k + 1,
            }
        }
        Some(i)
    }

    /// Inserts `item` in order and returns the index it landed at.
    ///
    /// The item goes after the located element only when that element is
    /// strictly smaller, so a new duplicate takes the place of the first
    /// equal element and pushes the existing run up by one.
    pub fn insert(&mut self, item: T) -> usize {
        let index = match self.locate(&item) {
            None => 0,
            Some(at) => {
                if self.comparator.compare(&self.as_slice()[at], &item) == Ordering::Less {
                    at + 1
                } else {
                    at
                }
            }
        };
        self.store.insert(index, item);
        index
    }

    /// Appends `item` after the last element if that keeps the order.
    ///
    /// Hands the item back when it is smaller than the current last element.
    /// Used to rebuild a list in exactly the order it was saved in.
    pub fn push_sorted(&mut self, item: T) -> Result<usize, T> {
        if let Some(last) = self.as_slice().last() {
            if self.comparator.compare(last, &item) == Ordering::Greater {
                return Err(item);
            }
        }
        self.store.push(item);
        Ok(self.len() - 1)
    }

    /// Removes and disposes the first element equal to `item`.
    ///
    /// Returns `false` if no element compares equal.
    pub fn remove(&mut self, item: &T) -> bool {
        let Some(at) = self.locate(item) else {
            return false;
        };
        if self.comparator.compare(&self.as_slice()[at], item) != Ordering::Equal {
            return false;
        }
        match self.store.remove(at) {
            Some(removed) => {
                self.disposal.dispose(removed);
                true
            }
            None => false,
        }
    }

    /// Takes the first element out of the list.
    ///
    /// The caller receives ownership, the disposal policy is not invoked.
    /// Every remaining element shifts down by one.
    pub fn dequeue(&mut self) -> Option<T> {
        self.store.remove(0)
    }

    /// The first element, left in place.
    pub fn peek(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// Disposes every element. Capacity is kept.
    pub fn clear(&mut self) {
        for item in self.store.drain() {
            self.disposal.dispose(item);
        }
    }
}

impl<T, C: Comparator<T>, D: Disposal<T>> Drop for OrderedList<T, C, D> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T, C: Comparator<T>, D: Disposal<T>> core::ops::Index<usize> for OrderedList<T, C, D> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl<'a, T, C: Comparator<T>, D: Disposal<T>> IntoIterator for &'a OrderedList<T, C, D> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug, C: Comparator<T>, D: Disposal<T>> fmt::Debug for OrderedList<T, C, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedList")
            .field("items", &self.as_slice())
            .field("capacity", &self.capacity())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn list_of(keys: &[i32]) -> OrderedList<i32> {
        let mut list = OrderedList::new();
        for &k in keys {
            list.insert(k);
        }
        list
    }

    #[test]
    fn insert_keeps_order() {
        let list = list_of(&[5, 1, 3, 1]);
        assert_eq!(list.as_slice(), &[1, 1, 3, 5]);
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn locate_scenarios() {
        let list = list_of(&[5, 1, 3, 1]);
        assert_eq!(list.locate(&1), Some(0));
        assert_eq!(list.locate(&3), Some(2));
        // below everything, above everything, in between
        assert_eq!(list.locate(&0), Some(0));
        assert_eq!(list.locate(&9), Some(3));
        assert_eq!(list.locate(&4), Some(2));
        assert_eq!(list.locate(&2), Some(1));
    }

    #[test]
    fn locate_next_scenarios() {
        let list = list_of(&[5, 1, 3, 1]);
        assert_eq!(list.locate_next(&1).map(|i| list[i]), Some(3));
        assert_eq!(list.locate_next(&0), Some(0));
        assert_eq!(list.locate_next(&3).map(|i| list[i]), Some(5));
        assert_eq!(list.locate_next(&4).map(|i| list[i]), Some(5));
        assert_eq!(list.locate_next(&5), None);
        assert_eq!(list.locate_next(&6), None);
    }

    #[test]
    fn empty_list_boundaries() {
        let mut list: OrderedList<i32> = OrderedList::new();
        assert_eq!(list.locate(&1), None);
        assert_eq!(list.locate_next(&1), None);
        assert_eq!(list.peek(), None);
        assert_eq!(list.dequeue(), None);
        assert!(!list.remove(&1));
        assert_eq!(list.cursor().position(), 0);
        assert_eq!(list.len(), 0);
        assert_eq!(list.capacity(), GROWTH_CHUNK);
    }

    #[test]
    fn new_duplicate_takes_first_slot_of_run() {
        let by_key = |a: &(u8, char), b: &(u8, char)| a.0.cmp(&b.0);
        let mut list = OrderedList::with_comparator(by_key);
        list.insert((0, 'x'));
        list.insert((1, 'a'));
        assert_eq!(list.insert((1, 'b')), 1);
        assert_eq!(list.insert((1, 'c')), 1);
        assert_eq!(list.insert((2, 'z')), 4);

        let tags: String = list.iter().map(|p| p.1).collect();
        assert_eq!(tags, "xcbaz");
        assert_eq!(list.locate(&(1, '?')), Some(1));
    }

    #[test]
    fn remove_only_on_match() {
        let mut list = list_of(&[1, 3, 5]);
        assert!(!list.remove(&4));
        assert!(list.remove(&3));
        assert_eq!(list.as_slice(), &[1, 5]);
        assert!(!list.remove(&3));
    }

    #[test]
    fn remove_disposes() {
        let disposed = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&disposed);
        let mut list: OrderedList<u32, _, _> =
            OrderedList::with_policies(NaturalOrder, move |x: u32| sink.borrow_mut().push(x));
        for k in [4, 2, 8, 6] {
            list.insert(k);
        }

        assert!(list.remove(&8));
        assert_eq!(*disposed.borrow(), vec![8]);

        // dequeue hands ownership back instead of disposing
        assert_eq!(list.dequeue(), Some(2));
        assert_eq!(*disposed.borrow(), vec![8]);

        drop(list);
        assert_eq!(*disposed.borrow(), vec![8, 4, 6]);
    }

    #[test]
    fn queue_operations() {
        let mut list = list_of(&[30, 10, 20]);
        assert_eq!(list.peek(), Some(&10));
        assert_eq!(list.dequeue(), Some(10));
        assert_eq!(list.dequeue(), Some(20));
        assert_eq!(list.peek(), Some(&30));
        assert_eq!(list.len(), 1);
        assert_eq!(list.dequeue(), Some(30));
        assert_eq!(list.dequeue(), None);
    }

    #[test]
    fn growth_past_one_chunk() {
        let mut list = OrderedList::new();
        for k in (0..(GROWTH_CHUNK as u32 + 1)).rev() {
            list.insert(k);
        }
        assert_eq!(list.len(), GROWTH_CHUNK + 1);
        assert_eq!(list.capacity(), 2 * GROWTH_CHUNK);
        assert!(list.as_slice().windows(2).all(|w| w[0] <= w[1]));

        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.capacity(), 2 * GROWTH_CHUNK);
    }

    #[test]
    fn cursor_after_locate() {
        let list = list_of(&[10, 20, 30]);
        let at = list.locate(&20).unwrap();
        let mut c = list.cursor_at(at);
        assert_eq!(c.advance(), Some(&20));
        assert_eq!(c.retreat(), Some(&20));
        assert_eq!(c.retreat(), Some(&10));
        assert_eq!(c.retreat(), None);
    }

    #[test]
    fn push_sorted_refuses_smaller() {
        let mut list = OrderedList::with_chunk_size(2, NaturalOrder, DropDisposal);
        assert_eq!(list.push_sorted(1), Ok(0));
        assert_eq!(list.push_sorted(1), Ok(1));
        assert_eq!(list.push_sorted(4), Ok(2));
        assert_eq!(list.push_sorted(3), Err(3));
        assert_eq!(list.as_slice(), &[1, 1, 4]);
        assert_eq!(list.capacity(), 4);
    }

    #[test]
    fn zero_chunk_grows_one_slot_at_a_time() {
        let mut list: OrderedList<u8> = OrderedList::with_chunk_size(0, NaturalOrder, DropDisposal);
        assert_eq!(list.chunk_size(), 1);
        assert_eq!(list.capacity(), 1);
        list.insert(2);
        list.insert(1);
        assert_eq!(list.capacity(), 2);
        assert_eq!(OrderedList::<u8>::new().chunk_size(), GROWTH_CHUNK);
    }

    #[test]
    fn debug_lists_items() {
        let list = list_of(&[2, 1]);
        let text = format!("{list:?}");
        assert!(text.contains("[1, 2]"));
    }
}
