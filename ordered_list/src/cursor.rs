//! Caller-owned traversal position over an ordered list.

/// A forward/backward walker over the elements of a list.
///
/// The cursor borrows the list, so the list cannot change while a
/// traversal is in flight. Each traversal gets its own cursor.
#[derive(Clone, Debug)]
pub struct Cursor<'a, T> {
    items: &'a [T],
    pos: usize,
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn new(items: &'a [T], pos: usize) -> Self {
        Cursor {
            items,
            pos: pos.min(items.len()),
        }
    }

    /// Index of the element the next [`advance`](Self::advance) returns.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Move back to the first element.
    #[inline]
    pub fn reset(&mut self) {
        self.pos = 0;
    }

    /// Returns the element at the cursor and steps past it.
    ///
    /// At the end of the list returns `None` and rewinds to the start.
    pub fn advance(&mut self) -> Option<&'a T> {
        match self.items.get(self.pos) {
            Some(item) => {
                self.pos += 1;
                Some(item)
            }
            None => {
                self.pos = 0;
                None
            }
        }
    }

    /// Steps back one element and returns it.
    ///
    /// At the start of the list returns `None` and stays there.
    pub fn retreat(&mut self) -> Option<&'a T> {
        if self.pos == 0 {
            return None;
        }
        self.pos -= 1;
        self.items.get(self.pos)
    }
}
