use tracing::trace;

/// Number of slots added every time the store runs out of room.
pub const GROWTH_CHUNK: usize = 1024;

/// The backing array of an ordered list.
///
/// - Logical capacity starts at one chunk and grows by exactly one chunk when full
/// - Never shrinks, removals only close the gap
#[derive(Debug)]
pub struct ChunkedStore<T> {
    items: Vec<T>,
    capacity: usize,
    chunk: usize,
}

impl<T> ChunkedStore<T> {
    /// Create an empty store with one chunk of room
    pub fn new(chunk: usize) -> Self {
        let chunk = chunk.max(1);
        ChunkedStore {
            items: Vec::with_capacity(chunk),
            capacity: chunk,
            chunk,
        }
    }

    /// Return element count
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Slots available before the next growth step
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn chunk(&self) -> usize {
        self.chunk
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Insert at `index`, shifting everything from `index` up by one
    pub fn insert(&mut self, index: usize, value: T) {
        self.ensure_slot();
        self.items.insert(index, value);
    }

    /// Append after the last element
    pub fn push(&mut self, value: T) {
        self.ensure_slot();
        self.items.push(value);
    }

    /// Take the element at `index`, shifting the tail down by one
    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index >= self.items.len() {
            return None;
        }
        Some(self.items.remove(index))
    }

    /// Take every element out, front to back, keeping the capacity
    pub fn drain(&mut self) -> std::vec::Drain<'_, T> {
        self.items.drain(..)
    }

    fn ensure_slot(&mut self) {
        if self.items.len() < self.capacity {
            return;
        }
        let old = self.capacity;
        self.capacity += self.chunk;
        self.items.reserve_exact(self.capacity - self.items.len());
        trace!(from = old, to = self.capacity, "ordered list storage grown");
    }
}
