use crate::error::SequenceError;
use crate::sequence::Sequence;
use std::cmp::Ordering;
use std::fmt;
use std::fmt::Formatter;

/// A detached, copyable handle to one node of a [`Sequence`].
///
/// A `Position` pairs the node's slot index with the slot's generation
/// counter at the time the handle was taken. Unlike a cursor it does not
/// borrow the sequence, so it survives arbitrary mutation in between uses.
/// Every use re-validates the generation: once the node is removed, the
/// handle reports [`SequenceError::Stale`] instead of silently addressing
/// whatever element reused the slot.
///
/// # Examples
///
/// ```
/// use seqlist::{Sequence, SequenceError};
///
/// let mut seq = Sequence::from(['a', 'b', 'c']);
/// let pos = seq.position(1).unwrap();
///
/// seq.push_back('d'); // the handle survives mutation
/// assert_eq!(seq.get_at(pos), Ok(&'b'));
///
/// assert_eq!(seq.remove_at(pos), Ok('b'));
/// assert_eq!(seq.get_at(pos), Err(SequenceError::Stale));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    slot: usize,
    generation: u32,
}

impl Position {
    pub(crate) fn new(slot: usize, generation: u32) -> Self {
        Self { slot, generation }
    }

    pub(crate) fn slot(&self) -> usize {
        self.slot
    }

    pub(crate) fn generation(&self) -> u32 {
        self.generation
    }
}

/// A cursor over a `Sequence`.
///
/// A `Cursor` is like an iterator, except that it can freely seek
/// back-and-forth.
///
/// In a sequence with length *n*, there are *n* + 1 valid locations for the
/// cursor, indexed by 0, 1, ..., *n*, where *n* is the past-the-end
/// position.
///
/// # Examples
///
/// ```
/// use seqlist::Sequence;
///
/// // Create a sequence: [ A B C D ]
/// let seq = Sequence::from(['A', 'B', 'C', 'D']);
///
/// // Create a cursor at start: [|A B C D ] (index = 0)
/// let mut cursor = seq.cursor_start();
/// assert_eq!(cursor.current(), Some(&'A'));
///
/// // Move cursor forward: [ A|B C D ] (index = 1)
/// assert!(cursor.move_next().is_ok());
/// assert_eq!(cursor.current(), Some(&'B'));
///
/// // Create a cursor in the end: [ A B C D|] (index = 4)
/// let mut cursor = seq.cursor_end();
/// assert_eq!(cursor.current(), None);
///
/// // Move cursor backward: [ A B C|D ] (index = 3)
/// assert!(cursor.move_prev().is_ok());
/// assert_eq!(cursor.current(), Some(&'D'));
///
/// // Moving past the boundary is an error, and the cursor stays put.
/// let mut cursor = seq.cursor_end();
/// assert!(cursor.move_next().is_err());
/// assert_eq!(cursor.index(), 4);
/// ```
#[derive(Clone)]
pub struct Cursor<'a, T: 'a> {
    index: usize,
    pub(crate) current: Option<usize>,
    pub(crate) sequence: &'a Sequence<T>,
}

/// Compare cursors by their position.
///
/// Only cursors belonging to the same sequence and at the same position are
/// considered equal.
///
/// # Examples
/// ```
/// use seqlist::Sequence;
///
/// let seq = Sequence::from([1, 2, 3]);
/// let cursor1 = seq.cursor_start();
/// let mut cursor2 = cursor1.clone();
/// // The same sequence, and the same position.
/// assert_eq!(cursor1, cursor2);
///
/// cursor2.move_next().unwrap();
/// // The same sequence, but different positions.
/// assert_ne!(cursor1, cursor2);
/// ```
impl<'a, T: 'a> PartialEq for Cursor<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        self.same_sequence_with(other) && self.index == other.index
    }
}

impl<'a, T: 'a> Eq for Cursor<'a, T> {}

/// Compare cursors by their position.
///
/// Only cursors belonging to the same sequence can compare, so it is
/// `PartialOrd` but not `Ord`.
///
/// # Examples
/// ```
/// use seqlist::Sequence;
///
/// let seq = Sequence::from([1, 2, 3]);
/// let cursor1 = seq.cursor_start();
/// let cursor2 = seq.cursor_end();
/// // They belong to the same sequence, can compare.
/// assert!(cursor1 < cursor2);
///
/// let another = seq.clone();
/// let cursor3 = another.cursor_end();
/// // They belong to different sequences, cannot compare.
/// assert_eq!(cursor1.partial_cmp(&cursor3), None);
/// ```
impl<'a, T: 'a> PartialOrd for Cursor<'a, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if !self.same_sequence_with(other) {
            return None;
        }
        Some(self.index().cmp(&other.index()))
    }
}

/// A cursor over a `Sequence` with editing operations.
///
/// A `CursorMut` is like an iterator, except that it can freely seek
/// back-and-forth, and can safely mutate the sequence during iteration. This
/// is because the lifetime of its yielded references is tied to its own
/// lifetime, instead of just the underlying sequence. This means cursors
/// cannot yield multiple elements at once.
///
/// For convenience, [`CursorMut::view`] provides a function to temporarily
/// borrow the sequence and returns an immutable reference whose lifetime is
/// shorter than the cursor. See the documents for details.
///
/// In a sequence with length *n*, there are *n* + 1 valid locations for the
/// cursor, indexed by 0, 1, ..., *n*, where *n* is the past-the-end
/// position.
///
/// # Examples
///
/// ```compile_fail
/// use seqlist::Sequence;
///
/// let mut seq = Sequence::from([1, 2, 3]);
/// let mut cursor = seq.cursor_start_mut();
/// println!("{:?}", seq.back());
/// println!("{:?}", cursor.current());
/// ```
pub struct CursorMut<'a, T: 'a> {
    index: usize,
    pub(crate) current: Option<usize>,
    pub(crate) sequence: &'a mut Sequence<T>,
}

macro_rules! impl_cursor {
    ($CURSOR:ident) => {
        // Private methods
        impl<'a, T: 'a> $CURSOR<'a, T> {
            /// The slot after the cursor's node. Absent when the cursor is
            /// on the last node or past-the-end.
            fn next_slot(&self) -> Option<usize> {
                self.current.and_then(|slot| self.sequence.node(slot).next)
            }

            /// The slot before the cursor's position. Past-the-end has the
            /// tail as its predecessor.
            fn prev_slot(&self) -> Option<usize> {
                match self.current {
                    Some(slot) => self.sequence.node(slot).prev,
                    None => self.sequence.tail,
                }
            }

            /// Move forward by `steps` without boundary checking. The caller
            /// must keep the walk within `0..=len`.
            fn seek_forward_fast(&mut self, steps: usize) {
                for _ in 0..steps {
                    self.current = self.next_slot();
                }
                self.index += steps;
            }

            /// Move backward by `steps` without boundary checking. The
            /// caller must keep the walk within `0..=len`.
            fn seek_backward_fast(&mut self, steps: usize) {
                for _ in 0..steps {
                    self.current = self.prev_slot();
                }
                self.index -= steps;
            }
        }

        impl<'a, T: 'a> $CURSOR<'a, T> {
            /// Return the index of the cursor.
            pub fn index(&self) -> usize {
                self.index
            }

            /// Returns `true` if the `Sequence` is empty. See
            /// [`Sequence::is_empty`].
            pub fn is_empty(&self) -> bool {
                self.sequence.is_empty()
            }

            /// Move the cursor to the next position, or return an error when
            /// it is already past-the-end.
            ///
            /// This operation should compute in *O*(1) time.
            ///
            /// # Examples
            ///
            /// ```
            /// use seqlist::Sequence;
            ///
            /// let seq = Sequence::from([1, 2, 3]);
            /// let mut cursor = seq.cursor_end();
            ///
            /// // The cursor is past-the-end
            /// assert_eq!(cursor.previous(), Some(&3));
            ///
            /// // Forbid to move across the boundary
            /// assert!(cursor.move_next().is_err());
            ///
            /// // The cursor is still past-the-end
            /// assert_eq!(cursor.previous(), Some(&3));
            /// ```
            pub fn move_next(&mut self) -> Result<(), SequenceError> {
                if self.index == self.sequence.len() {
                    return Err(SequenceError::Boundary);
                }
                self.current = self.next_slot();
                self.index += 1;
                Ok(())
            }

            /// Move the cursor to the previous position, or return an error
            /// when it is already at the first node.
            ///
            /// This operation should compute in *O*(1) time.
            ///
            /// # Examples
            ///
            /// ```
            /// use seqlist::Sequence;
            ///
            /// let seq = Sequence::from([1, 2, 3]);
            /// let mut cursor = seq.cursor_start();
            ///
            /// // The cursor is at the first node
            /// assert_eq!(cursor.current(), Some(&1));
            ///
            /// // Forbid to move across the boundary
            /// assert!(cursor.move_prev().is_err());
            ///
            /// // The cursor is still at the first node
            /// assert_eq!(cursor.current(), Some(&1));
            /// ```
            pub fn move_prev(&mut self) -> Result<(), SequenceError> {
                if self.index == 0 {
                    return Err(SequenceError::Boundary);
                }
                self.current = self.prev_slot();
                self.index -= 1;
                Ok(())
            }

            /// Move the cursor forward by the given steps, or return an
            /// error when the walk would cross the past-the-end boundary.
            ///
            /// If an error occurs, the cursor stops at the past-the-end
            /// position.
            ///
            /// This operation should compute in *O*(*n*) time.
            ///
            /// # Examples
            ///
            /// ```
            /// use seqlist::Sequence;
            ///
            /// let seq = Sequence::from([1, 2, 3]);
            /// let mut cursor = seq.cursor_start();
            ///
            /// assert!(cursor.seek_forward(5).is_err());
            /// assert_eq!(cursor.previous(), Some(&3));
            /// ```
            pub fn seek_forward(&mut self, steps: usize) -> Result<(), SequenceError> {
                (0..steps).try_for_each(|_| self.move_next())
            }

            /// Move the cursor backward by the given steps, or return an
            /// error when the walk would cross the front boundary.
            ///
            /// If an error occurs, the cursor stops at the first node.
            ///
            /// This operation should compute in *O*(*n*) time.
            ///
            /// # Examples
            ///
            /// ```
            /// use seqlist::Sequence;
            ///
            /// let seq = Sequence::from([1, 2, 3]);
            /// let mut cursor = seq.cursor_end();
            ///
            /// assert!(cursor.seek_backward(5).is_err());
            /// assert_eq!(cursor.current(), Some(&1));
            /// ```
            pub fn seek_backward(&mut self, steps: usize) -> Result<(), SequenceError> {
                (0..steps).try_for_each(|_| self.move_prev())
            }

            /// Move the cursor to the given position `target`, or return an
            /// error when `target > len`.
            ///
            /// If an error occurs, the cursor stays put. The walk takes the
            /// shorter route, from the cursor's position or from either end.
            ///
            /// This operation should compute in *O*(*n*) time.
            ///
            /// # Examples
            ///
            /// ```
            /// use seqlist::Sequence;
            ///
            /// let seq = Sequence::from([1, 2, 3]);
            /// let mut cursor = seq.cursor_start();
            ///
            /// assert!(cursor.seek_to(2).is_ok());
            /// assert_eq!(cursor.current(), Some(&3));
            ///
            /// assert!(cursor.seek_to(5).is_err());
            /// assert_eq!(cursor.current(), Some(&3));
            /// ```
            pub fn seek_to(&mut self, target: usize) -> Result<(), SequenceError> {
                if target == self.index {
                    return Ok(());
                }
                let len = self.sequence.len();
                match target {
                    target if target > len => {
                        return Err(SequenceError::OutOfBounds { index: target, len })
                    }
                    0 => self.move_to_start(),
                    target if target == len => self.move_to_end(),
                    _ => {
                        // current=c, target=t, past-the-end=|
                        if target > self.index {
                            if target - self.index <= len - target {
                                // near the right of current: [    c-->t     |]
                                self.seek_forward_fast(target - self.index);
                            } else {
                                // far from the right of current: [ c     t<--|]
                                self.move_to_end();
                                self.seek_backward_fast(len - target);
                            }
                        } else if self.index - target <= target {
                            // near the left of current: [    t<--c     |]
                            self.seek_backward_fast(self.index - target);
                        } else {
                            // far from the left of current: [-->t      c |]
                            self.move_to_start();
                            self.seek_forward_fast(target);
                        }
                    }
                }
                Ok(())
            }

            /// Set the cursor to the start of the sequence (i.e. the first
            /// node).
            ///
            /// This operation should compute in *O*(1) time.
            #[inline]
            pub fn move_to_start(&mut self) {
                self.index = 0;
                self.current = self.sequence.head;
            }

            /// Set the cursor to the past-the-end position.
            ///
            /// This operation should compute in *O*(1) time.
            #[inline]
            pub fn move_to_end(&mut self) {
                self.index = self.sequence.len();
                self.current = None;
            }

            /// Return an immutable reference to the element at the cursor,
            /// or return `None` if it is past-the-end.
            ///
            /// # Examples
            ///
            /// ```
            /// use seqlist::Sequence;
            ///
            /// let seq = Sequence::from([1, 2, 3]);
            /// assert_eq!(seq.cursor(0).current(), Some(&1));
            /// assert_eq!(seq.cursor(1).current(), Some(&2));
            /// assert_eq!(seq.cursor(2).current(), Some(&3));
            /// assert_eq!(seq.cursor(3).current(), None);
            /// ```
            pub fn current(&self) -> Option<&T> {
                let slot = self.current?;
                Some(&self.sequence.node(slot).value)
            }

            /// Return an immutable reference to the element before the
            /// cursor, or return `None` if it is at the first node.
            ///
            /// This is useful where using the cursor at the past-the-end
            /// position, whose `current` is `None`.
            ///
            /// # Examples
            ///
            /// ```
            /// use seqlist::Sequence;
            ///
            /// let seq = Sequence::from([1, 2, 3]);
            /// assert_eq!(seq.cursor(0).previous(), None);
            /// assert_eq!(seq.cursor(1).previous(), Some(&1));
            /// assert_eq!(seq.cursor(2).previous(), Some(&2));
            /// assert_eq!(seq.cursor(3).previous(), Some(&3));
            /// ```
            pub fn previous(&self) -> Option<&T> {
                if self.index == 0 {
                    return None;
                }
                let slot = self.prev_slot().expect("cursor has a predecessor");
                Some(&self.sequence.node(slot).value)
            }

            /// Return a detached [`Position`] handle to the node at the
            /// cursor, or `None` if it is past-the-end.
            pub fn position(&self) -> Option<Position> {
                let slot = self.current?;
                Some(Position::new(slot, self.sequence.generation(slot)))
            }
        }

        impl<'a, T: fmt::Debug + 'a> fmt::Debug for $CURSOR<'a, T> {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($CURSOR))
                    .field("sequence", &self.sequence)
                    .field("current", &self.current())
                    .field("index", &self.index)
                    .finish()
            }
        }
    };
}

impl_cursor!(CursorMut);
impl_cursor!(Cursor);

impl<'a, T: 'a> Cursor<'a, T> {
    pub(crate) fn new(sequence: &'a Sequence<T>, current: Option<usize>, index: usize) -> Self {
        Self {
            index,
            current,
            sequence,
        }
    }

    fn same_sequence_with(&self, other: &Self) -> bool {
        std::ptr::eq(self.sequence, other.sequence)
    }
}

// Methods that do not change the linking structure of the sequence.
impl<'a, T: 'a> CursorMut<'a, T> {
    pub(crate) fn new(sequence: &'a mut Sequence<T>, current: Option<usize>, index: usize) -> Self {
        Self {
            index,
            current,
            sequence,
        }
    }

    /// Return a mutable reference to the element at the cursor, or return
    /// `None` if it is past-the-end.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqlist::Sequence;
    ///
    /// let mut seq = Sequence::from([1, 2, 3]);
    ///
    /// // Create a cursor and mutate the element at it.
    /// let mut cursor = seq.cursor_mut(0);
    /// *cursor.current_mut().unwrap() *= 5;
    /// assert_eq!(cursor.current(), Some(&5));
    ///
    /// // Cannot mutate past-the-end.
    /// assert!(seq.cursor_mut(3).current_mut().is_none());
    /// ```
    pub fn current_mut(&mut self) -> Option<&mut T> {
        let slot = self.current?;
        Some(&mut self.sequence.node_mut(slot).value)
    }

    /// Return a mutable reference to the element before the cursor, or
    /// return `None` if it is at the first node.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqlist::Sequence;
    ///
    /// let mut seq = Sequence::from([1, 2, 3]);
    ///
    /// let mut cursor = seq.cursor_mut(3);
    /// *cursor.previous_mut().unwrap() *= 5;
    /// assert_eq!(cursor.previous(), Some(&15));
    ///
    /// assert!(seq.cursor_mut(0).previous_mut().is_none());
    /// ```
    pub fn previous_mut(&mut self) -> Option<&mut T> {
        if self.index == 0 {
            return None;
        }
        let slot = self.prev_slot().expect("cursor has a predecessor");
        Some(&mut self.sequence.node_mut(slot).value)
    }

    /// Re-borrow the mutable cursor as a short-lived immutable one.
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor::new(self.sequence, self.current, self.index)
    }

    /// Convert the mutable cursor to an immutable one.
    pub fn into_cursor(self) -> Cursor<'a, T> {
        Cursor::new(self.sequence, self.current, self.index)
    }

    /// Temporarily view the sequence via an immutable reference.
    ///
    /// This is useful where the sequence is not able to be read while a
    /// mutable cursor is created and being used.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqlist::Sequence;
    ///
    /// let mut seq = Sequence::from([1, 2, 3]);
    /// let mut cursor = seq.cursor_start_mut();
    ///
    /// // Temporarily view the sequence
    /// assert_eq!(cursor.view().back(), Some(&3));
    ///
    /// cursor.insert(4);
    /// assert_eq!(Vec::from_iter(seq), vec![4, 1, 2, 3]);
    /// ```
    pub fn view(&self) -> &Sequence<T> {
        self.sequence
    }
}

// Methods that change the linking structure of the sequence.
impl<'a, T: 'a> CursorMut<'a, T> {
    /// Add an element before the cursor position.
    ///
    /// After insertion, the cursor stays on its node but its `index`
    /// becomes `index + 1`. Inserting at the past-the-end position appends
    /// to the back.
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqlist::Sequence;
    ///
    /// let mut seq = Sequence::from([1, 2, 3]);
    /// let mut cursor = seq.cursor_mut(1);
    ///
    /// cursor.insert(4); // becomes [1, 4, 2, 3]
    /// assert_eq!(cursor.index(), 2);
    /// assert_eq!(cursor.current(), Some(&2));
    ///
    /// cursor.move_to_end();
    /// cursor.insert(5); // becomes [1, 4, 2, 3, 5]
    /// assert_eq!(cursor.index(), 5);
    /// assert_eq!(cursor.previous(), Some(&5));
    ///
    /// assert_eq!(Vec::from_iter(seq), vec![1, 4, 2, 3, 5]);
    /// ```
    pub fn insert(&mut self, value: T) {
        let prev = self.prev_slot();
        self.sequence.attach(prev, self.current, value);
        self.index += 1;
    }

    /// Remove the element at the cursor and return it, or return `None` if
    /// the cursor is past-the-end. After removal, the cursor is moved to
    /// the next node unless no removal happened.
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqlist::Sequence;
    ///
    /// let mut seq = Sequence::from_iter(0..10);
    /// let mut cursor = seq.cursor_mut(5);
    ///
    /// assert_eq!(cursor.remove(), Some(5)); // becomes [0, 1, 2, 3, 4, 6, 7, 8, 9]
    /// assert_eq!(cursor.index(), 5);
    /// assert_eq!(cursor.current(), Some(&6));
    ///
    /// cursor.move_to_start();
    /// assert_eq!(cursor.remove(), Some(0)); // becomes [1, 2, 3, 4, 6, 7, 8, 9]
    /// assert_eq!(cursor.index(), 0);
    /// assert_eq!(cursor.current(), Some(&1));
    ///
    /// cursor.move_to_end();
    /// assert_eq!(cursor.remove(), None);
    /// assert_eq!(cursor.index(), 8);
    /// assert_eq!(cursor.current(), None);
    ///
    /// assert_eq!(Vec::from_iter(seq), vec![1, 2, 3, 4, 6, 7, 8, 9]);
    /// ```
    pub fn remove(&mut self) -> Option<T> {
        let slot = self.current?;
        self.current = self.sequence.node(slot).next;
        Some(self.sequence.detach(slot))
    }

    /// Remove the element before the cursor and return it, or return `None`
    /// if the cursor is at the first node. After removal, the cursor is not
    /// moved, but its `index` becomes `index - 1`.
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqlist::Sequence;
    ///
    /// let mut seq = Sequence::from_iter(0..10);
    /// let mut cursor = seq.cursor_mut(5);
    ///
    /// assert_eq!(cursor.backspace(), Some(4)); // becomes [0, 1, 2, 3, 5, 6, 7, 8, 9]
    /// assert_eq!(cursor.index(), 4);
    /// assert_eq!(cursor.current(), Some(&5));
    ///
    /// cursor.move_to_start();
    /// assert_eq!(cursor.backspace(), None);
    ///
    /// cursor.move_to_end();
    /// assert_eq!(cursor.backspace(), Some(9)); // becomes [0, 1, 2, 3, 5, 6, 7, 8]
    /// assert_eq!(cursor.current(), None);
    ///
    /// assert_eq!(Vec::from_iter(seq), vec![0, 1, 2, 3, 5, 6, 7, 8]);
    /// ```
    pub fn backspace(&mut self) -> Option<T> {
        self.move_prev().ok().and_then(|_| self.remove())
    }
}

impl<'a, T: 'a> From<CursorMut<'a, T>> for Cursor<'a, T> {
    fn from(cursor: CursorMut<'a, T>) -> Self {
        cursor.into_cursor()
    }
}
