use std::fmt::{Debug, Formatter};
use std::ops::{Index, IndexMut};

use crate::error::SequenceError;
use crate::sequence::cursor::{Cursor, CursorMut, Position};
use crate::{Iter, IterMut};

pub mod cursor;
pub mod iterator;

mod algorithms;

/// The `Sequence` is a doubly-linked sequence container whose nodes live in a
/// generational arena. It allows inserting and removing elements at any given
/// position in constant time once the position is known. In compromise,
/// resolving an arbitrary index takes *O*(*n*) time.
///
/// The `Sequence` contains:
/// - a slot arena `slots` holding every node;
/// - `head` and `tail` slot indices (absent when the sequence is empty);
/// - an intrusive free list `free` threading through the vacant slots;
/// - a length field `len`.
///
/// # Naming Conventions
///
/// - "index" is a logical position in `0..len`;
/// - "slot" is a physical index into the arena, stable for the lifetime of
///   its node.
pub struct Sequence<T> {
    slots: Vec<Slot<T>>,
    head: Option<usize>,
    tail: Option<usize>,
    free: Option<usize>,
    len: usize,
}

/// One linked node. Neighbor links are slot indices, never pointers; an
/// absent link marks the corresponding end of the chain.
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) prev: Option<usize>,
    pub(crate) next: Option<usize>,
}

pub(crate) struct Slot<T> {
    /// Bumped every time the slot's occupant is removed, so detached
    /// [`Position`] handles to the old occupant can be told apart from
    /// handles to a later reuse of the slot.
    pub(crate) generation: u32,
    pub(crate) entry: Entry<T>,
}

pub(crate) enum Entry<T> {
    Occupied(Node<T>),
    Vacant { next_free: Option<usize> },
}

// private arena methods
impl<T> Sequence<T> {
    pub(crate) fn node(&self, slot: usize) -> &Node<T> {
        match &self.slots[slot].entry {
            Entry::Occupied(node) => node,
            Entry::Vacant { .. } => panic!("link refers to a vacant slot"),
        }
    }

    pub(crate) fn node_mut(&mut self, slot: usize) -> &mut Node<T> {
        match &mut self.slots[slot].entry {
            Entry::Occupied(node) => node,
            Entry::Vacant { .. } => panic!("link refers to a vacant slot"),
        }
    }

    pub(crate) fn generation(&self, slot: usize) -> u32 {
        self.slots[slot].generation
    }

    /// Take a slot off the free list, or grow the arena by one slot.
    fn allocate(&mut self, node: Node<T>) -> usize {
        match self.free {
            Some(slot) => {
                self.free = match self.slots[slot].entry {
                    Entry::Vacant { next_free } => next_free,
                    Entry::Occupied(_) => panic!("free list refers to an occupied slot"),
                };
                self.slots[slot].entry = Entry::Occupied(node);
                slot
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    entry: Entry::Occupied(node),
                });
                self.slots.len() - 1
            }
        }
    }

    /// Vacate a slot, bump its generation and push it onto the free list.
    fn release(&mut self, slot: usize) -> Node<T> {
        let entry = std::mem::replace(
            &mut self.slots[slot].entry,
            Entry::Vacant {
                next_free: self.free,
            },
        );
        self.slots[slot].generation = self.slots[slot].generation.wrapping_add(1);
        self.free = Some(slot);
        match entry {
            Entry::Occupied(node) => node,
            Entry::Vacant { .. } => panic!("released a vacant slot"),
        }
    }

    /// Splice a fresh node carrying `value` between the adjacent positions
    /// `prev` and `next`, either of which may be an absent end link.
    pub(crate) fn attach(&mut self, prev: Option<usize>, next: Option<usize>, value: T) -> usize {
        #[cfg(debug_assertions)]
        self.assert_adjacent(prev, next);
        let slot = self.allocate(Node { value, prev, next });
        match prev {
            Some(p) => self.node_mut(p).next = Some(slot),
            None => self.head = Some(slot),
        }
        match next {
            Some(n) => self.node_mut(n).prev = Some(slot),
            None => self.tail = Some(slot),
        }
        self.len += 1;
        slot
    }

    /// Splice the node in `slot` out of the chain and return its value.
    /// Both boundary nodes are handled: an absent neighbor means the head
    /// or tail link is redirected instead.
    pub(crate) fn detach(&mut self, slot: usize) -> T {
        let node = self.release(slot);
        match node.prev {
            Some(p) => self.node_mut(p).next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(n) => self.node_mut(n).prev = node.prev,
            None => self.tail = node.prev,
        }
        self.len -= 1;
        node.value
    }

    /// Resolve a logical index to its slot, walking from the nearer end.
    pub(crate) fn resolve(&self, index: usize) -> Option<usize> {
        if index >= self.len {
            return None;
        }
        if index <= self.len / 2 {
            let mut slot = self.head?;
            for _ in 0..index {
                slot = self.node(slot).next.expect("walk stays within the chain");
            }
            Some(slot)
        } else {
            let mut slot = self.tail?;
            for _ in 0..self.len - 1 - index {
                slot = self.node(slot).prev.expect("walk stays within the chain");
            }
            Some(slot)
        }
    }

    /// Swap the payloads of two distinct occupied slots. Links are not
    /// touched.
    pub(crate) fn swap_values(&mut self, a: usize, b: usize) {
        debug_assert_ne!(a, b);
        let (low, high) = if a < b { (a, b) } else { (b, a) };
        let (fore, aft) = self.slots.split_at_mut(high);
        match (&mut fore[low].entry, &mut aft[0].entry) {
            (Entry::Occupied(x), Entry::Occupied(y)) => std::mem::swap(&mut x.value, &mut y.value),
            _ => panic!("swap refers to a vacant slot"),
        }
    }

    /// Validate a detached position handle against the arena, returning the
    /// slot it refers to if its node is still present.
    fn live(&self, position: Position) -> Result<usize, SequenceError> {
        let slot = position.slot();
        match self.slots.get(slot) {
            Some(s) if s.generation == position.generation() => match s.entry {
                Entry::Occupied(_) => Ok(slot),
                Entry::Vacant { .. } => Err(SequenceError::Stale),
            },
            _ => Err(SequenceError::Stale),
        }
    }

    #[cfg(debug_assertions)]
    fn assert_adjacent(&self, prev: Option<usize>, next: Option<usize>) {
        match prev {
            Some(p) => debug_assert_eq!(self.node(p).next, next),
            None => debug_assert_eq!(self.head, next),
        }
        match next {
            Some(n) => debug_assert_eq!(self.node(n).prev, prev),
            None => debug_assert_eq!(self.tail, prev),
        }
    }
}

impl<T> Sequence<T> {
    /// Create an empty `Sequence`.
    ///
    /// # Examples
    /// ```
    /// use seqlist::Sequence;
    /// let seq: Sequence<u32> = Sequence::new();
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            head: None,
            tail: None,
            free: None,
            len: 0,
        }
    }

    /// Create an empty `Sequence` whose arena can hold `capacity` nodes
    /// before reallocating.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            head: None,
            tail: None,
            free: None,
            len: 0,
        }
    }

    /// Returns the number of elements in the `Sequence`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqlist::Sequence;
    ///
    /// let mut seq = Sequence::new();
    ///
    /// seq.push_back(2);
    /// assert_eq!(seq.len(), 1);
    ///
    /// seq.push_front(1);
    /// assert_eq!(seq.len(), 2);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the `Sequence` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqlist::Sequence;
    ///
    /// let mut seq = Sequence::new();
    /// assert!(seq.is_empty());
    ///
    /// seq.push_front("foo");
    /// assert!(!seq.is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of nodes the arena can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Removes all elements from the `Sequence`. A no-op on an
    /// already-empty sequence.
    ///
    /// Every node goes through the normal release path, so each slot's
    /// generation is bumped and any [`Position`] taken earlier reports
    /// [`SequenceError::Stale`](crate::SequenceError::Stale) afterwards,
    /// even if its slot is reused. The arena keeps its capacity.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqlist::Sequence;
    ///
    /// let mut seq = Sequence::from([1, 2]);
    /// seq.clear();
    /// assert!(seq.is_empty());
    /// assert_eq!(seq.front(), None);
    ///
    /// seq.clear(); // safe on an empty sequence
    /// ```
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }

    /// Provides a reference to the front element, or `None` if the sequence
    /// is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqlist::Sequence;
    ///
    /// let mut seq = Sequence::new();
    /// assert_eq!(seq.front(), None);
    ///
    /// seq.push_front(1);
    /// assert_eq!(seq.front(), Some(&1));
    /// ```
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.head.map(|slot| &self.node(slot).value)
    }

    /// Provides a mutable reference to the front element, or `None` if the
    /// sequence is empty.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.head.map(|slot| &mut self.node_mut(slot).value)
    }

    /// Provides a reference to the back element, or `None` if the sequence
    /// is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqlist::Sequence;
    ///
    /// let mut seq = Sequence::new();
    /// assert_eq!(seq.back(), None);
    ///
    /// seq.push_back(1);
    /// assert_eq!(seq.back(), Some(&1));
    /// ```
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.tail.map(|slot| &self.node(slot).value)
    }

    /// Provides a mutable reference to the back element, or `None` if the
    /// sequence is empty.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.tail.map(|slot| &mut self.node_mut(slot).value)
    }

    /// Adds an element first in the sequence.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqlist::Sequence;
    ///
    /// let mut seq = Sequence::new();
    ///
    /// seq.push_front(2);
    /// seq.push_front(1);
    /// assert_eq!(seq.front(), Some(&1));
    /// ```
    pub fn push_front(&mut self, value: T) {
        self.attach(None, self.head, value);
    }

    /// Appends an element to the back of the sequence. Establishes the sole
    /// node when the sequence is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqlist::Sequence;
    ///
    /// let mut seq = Sequence::new();
    /// seq.push_back(1);
    /// seq.push_back(3);
    /// assert_eq!(seq.back(), Some(&3));
    /// ```
    pub fn push_back(&mut self, value: T) {
        self.attach(self.tail, None, value);
    }

    /// Removes the first element and returns it, or `None` if the sequence
    /// is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqlist::Sequence;
    ///
    /// let mut seq = Sequence::new();
    /// assert_eq!(seq.pop_front(), None);
    ///
    /// seq.push_back(1);
    /// seq.push_back(3);
    /// assert_eq!(seq.pop_front(), Some(1));
    /// assert_eq!(seq.pop_front(), Some(3));
    /// assert_eq!(seq.pop_front(), None);
    /// ```
    pub fn pop_front(&mut self) -> Option<T> {
        let head = self.head?;
        Some(self.detach(head))
    }

    /// Removes the last element and returns it, or `None` if the sequence
    /// is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqlist::Sequence;
    ///
    /// let mut seq = Sequence::from([1, 3]);
    /// assert_eq!(seq.pop_back(), Some(3));
    /// assert_eq!(seq.pop_back(), Some(1));
    /// assert_eq!(seq.pop_back(), None);
    /// ```
    pub fn pop_back(&mut self) -> Option<T> {
        let tail = self.tail?;
        Some(self.detach(tail))
    }

    /// Provides a reference to the element at `index`, or `None` if the
    /// index is out of bounds.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time; the walk starts from
    /// the nearer end.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqlist::Sequence;
    ///
    /// let seq = Sequence::from([1, 2, 3]);
    /// assert_eq!(seq.get(1), Some(&2));
    /// assert_eq!(seq.get(3), None);
    /// ```
    pub fn get(&self, index: usize) -> Option<&T> {
        self.resolve(index).map(|slot| &self.node(slot).value)
    }

    /// Provides a mutable reference to the element at `index`, or `None` if
    /// the index is out of bounds.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        let slot = self.resolve(index)?;
        Some(&mut self.node_mut(slot).value)
    }

    /// Replaces the element at `index` with `value`, returning the previous
    /// element.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqlist::{Sequence, SequenceError};
    ///
    /// let mut seq = Sequence::from([1, 2, 3]);
    /// assert_eq!(seq.set(1, 5), Ok(2));
    /// assert_eq!(seq.to_vec(), vec![1, 5, 3]);
    ///
    /// assert_eq!(
    ///     seq.set(3, 9),
    ///     Err(SequenceError::OutOfBounds { index: 3, len: 3 }),
    /// );
    /// ```
    pub fn set(&mut self, index: usize, value: T) -> Result<T, SequenceError> {
        let slot = self.resolve(index).ok_or(SequenceError::OutOfBounds {
            index,
            len: self.len,
        })?;
        Ok(std::mem::replace(&mut self.node_mut(slot).value, value))
    }

    /// Adds an element at the given index, before the node currently at that
    /// position. `index == len` appends to the back.
    ///
    /// Unlike permissive designs that silently drop an out-of-range insert,
    /// `index > len` is reported as an error.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqlist::{Sequence, SequenceError};
    ///
    /// let mut seq = Sequence::from([1, 2, 3]);
    ///
    /// seq.insert(2, 4).unwrap();
    /// seq.insert(4, 5).unwrap();
    /// assert_eq!(seq.to_vec(), vec![1, 2, 4, 3, 5]);
    ///
    /// assert_eq!(
    ///     seq.insert(9, 6),
    ///     Err(SequenceError::OutOfBounds { index: 9, len: 5 }),
    /// );
    /// ```
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), SequenceError> {
        if index == self.len {
            self.push_back(value);
            return Ok(());
        }
        let next = self.resolve(index).ok_or(SequenceError::OutOfBounds {
            index,
            len: self.len,
        })?;
        let prev = self.node(next).prev;
        self.attach(prev, Some(next), value);
        Ok(())
    }

    /// Removes the element at the given index and returns it. Works at both
    /// boundaries; an absent neighbor redirects the head or tail link.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqlist::{Sequence, SequenceError};
    ///
    /// let mut seq = Sequence::from([1, 2, 3]);
    ///
    /// assert_eq!(seq.remove(1), Ok(2));
    /// assert_eq!(seq.remove(0), Ok(1));
    /// assert_eq!(seq.remove(0), Ok(3));
    /// assert_eq!(
    ///     seq.remove(0),
    ///     Err(SequenceError::OutOfBounds { index: 0, len: 0 }),
    /// );
    /// ```
    pub fn remove(&mut self, index: usize) -> Result<T, SequenceError> {
        let slot = self.resolve(index).ok_or(SequenceError::OutOfBounds {
            index,
            len: self.len,
        })?;
        Ok(self.detach(slot))
    }

    /// Appends a copy of every element of `other`, in order, to the back of
    /// this sequence in a single pass. Appending onto an empty sequence is
    /// handled like any other append.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqlist::Sequence;
    ///
    /// let mut seq = Sequence::from([1, 2, 3]);
    /// let other = Sequence::from([4, 5]);
    ///
    /// seq.extend_from_sequence(&other);
    /// assert_eq!(seq.to_vec(), vec![1, 2, 3, 4, 5]);
    /// assert_eq!(other.len(), 2); // untouched
    /// ```
    pub fn extend_from_sequence(&mut self, other: &Sequence<T>)
    where
        T: Clone,
    {
        for value in other {
            self.push_back(value.clone());
        }
    }

    /// Appends a copy of every element of a contiguous buffer, in order, to
    /// the back of this sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqlist::Sequence;
    ///
    /// let mut seq = Sequence::new();
    /// seq.extend_from_slice(&[1, 2, 3]);
    /// assert_eq!(seq.to_vec(), vec![1, 2, 3]);
    /// ```
    pub fn extend_from_slice(&mut self, values: &[T])
    where
        T: Clone,
    {
        for value in values {
            self.push_back(value.clone());
        }
    }

    /// Moves all elements from `other` to the end of this sequence. After
    /// this operation, `other` becomes empty.
    ///
    /// Nodes cannot migrate between arenas, so this reallocates each moved
    /// element in the destination arena.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqlist::Sequence;
    ///
    /// let mut seq = Sequence::from(['a']);
    /// let mut other = Sequence::from(['b', 'c']);
    ///
    /// seq.append(&mut other);
    ///
    /// assert_eq!(seq.to_vec(), vec!['a', 'b', 'c']);
    /// assert!(other.is_empty());
    /// ```
    pub fn append(&mut self, other: &mut Self) {
        while let Some(value) = other.pop_front() {
            self.push_back(value);
        }
    }

    /// Returns a detached [`Position`] handle for the node at `index`, or
    /// `None` if the index is out of bounds.
    ///
    /// The handle does not borrow the sequence; it is validated on every
    /// use and fails with [`SequenceError::Stale`] once its node has been
    /// removed.
    pub fn position(&self, index: usize) -> Option<Position> {
        let slot = self.resolve(index)?;
        Some(Position::new(slot, self.generation(slot)))
    }

    /// Provides a reference to the element a [`Position`] refers to.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqlist::{Sequence, SequenceError};
    ///
    /// let mut seq = Sequence::from([1, 2, 3]);
    /// let pos = seq.position(0).unwrap();
    ///
    /// assert_eq!(seq.get_at(pos), Ok(&1));
    /// seq.remove(0).unwrap();
    /// assert_eq!(seq.get_at(pos), Err(SequenceError::Stale));
    /// ```
    pub fn get_at(&self, position: Position) -> Result<&T, SequenceError> {
        let slot = self.live(position)?;
        Ok(&self.node(slot).value)
    }

    /// Provides a mutable reference to the element a [`Position`] refers to.
    pub fn get_at_mut(&mut self, position: Position) -> Result<&mut T, SequenceError> {
        let slot = self.live(position)?;
        Ok(&mut self.node_mut(slot).value)
    }

    /// Splices a new element in immediately before the node a [`Position`]
    /// refers to. The position stays valid and keeps referring to the same
    /// node, one place further along.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqlist::Sequence;
    ///
    /// let mut seq = Sequence::from([1, 3]);
    /// let pos = seq.position(1).unwrap();
    ///
    /// seq.insert_before(pos, 2).unwrap();
    /// assert_eq!(seq.to_vec(), vec![1, 2, 3]);
    /// assert_eq!(seq.get_at(pos), Ok(&3));
    /// ```
    pub fn insert_before(&mut self, position: Position, value: T) -> Result<(), SequenceError> {
        let slot = self.live(position)?;
        let prev = self.node(slot).prev;
        self.attach(prev, Some(slot), value);
        Ok(())
    }

    /// Removes the node a [`Position`] refers to and returns its value. The
    /// position is dead afterwards; further uses report
    /// [`SequenceError::Stale`].
    pub fn remove_at(&mut self, position: Position) -> Result<T, SequenceError> {
        let slot = self.live(position)?;
        Ok(self.detach(slot))
    }

    /// Provides a cursor at the node with the given index.
    ///
    /// By convention, the cursor is at the past-the-end position if
    /// `at == len`.
    ///
    /// # Panics
    ///
    /// Panics if `at > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqlist::Sequence;
    ///
    /// let seq = Sequence::from([1, 2, 3]);
    /// assert_eq!(seq.cursor(1).current(), Some(&2));
    /// assert_eq!(seq.cursor(3).current(), None);
    /// ```
    pub fn cursor(&self, at: usize) -> Cursor<'_, T> {
        assert!(at <= self.len, "cannot create cursor at a nonexistent index");
        let mut cursor = self.cursor_start();
        cursor
            .seek_to(at)
            .expect("cannot create cursor at a nonexistent index");
        cursor
    }

    /// Provides a cursor at the first node.
    ///
    /// The cursor is at the past-the-end position if the sequence is empty.
    pub fn cursor_start(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.head, 0)
    }

    /// Provides a cursor at the past-the-end position.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqlist::Sequence;
    ///
    /// let seq = Sequence::from([1, 2, 3]);
    /// let cursor = seq.cursor_end();
    /// assert_eq!(cursor.current(), None);
    /// assert_eq!(cursor.previous(), Some(&3));
    /// ```
    pub fn cursor_end(&self) -> Cursor<'_, T> {
        Cursor::new(self, None, self.len)
    }

    /// Provides a cursor with editing operations at the node with the given
    /// index.
    ///
    /// # Panics
    ///
    /// Panics if `at > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqlist::Sequence;
    ///
    /// let mut seq = Sequence::from([1, 2, 3]);
    /// let mut cursor = seq.cursor_mut(1);
    ///
    /// if let Some(x) = cursor.current_mut() {
    ///     *x *= 5;
    /// }
    /// assert_eq!(cursor.current(), Some(&10));
    /// ```
    pub fn cursor_mut(&mut self, at: usize) -> CursorMut<'_, T> {
        assert!(at <= self.len, "cannot create cursor at a nonexistent index");
        let mut cursor = self.cursor_start_mut();
        cursor
            .seek_to(at)
            .expect("cannot create cursor at a nonexistent index");
        cursor
    }

    /// Provides a cursor with editing operations at the first node.
    pub fn cursor_start_mut(&mut self) -> CursorMut<'_, T> {
        let head = self.head;
        CursorMut::new(self, head, 0)
    }

    /// Provides a cursor with editing operations at the past-the-end
    /// position.
    pub fn cursor_end_mut(&mut self) -> CursorMut<'_, T> {
        let len = self.len;
        CursorMut::new(self, None, len)
    }

    /// Provides a forward iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqlist::Sequence;
    ///
    /// let seq = Sequence::from([0, 1, 2]);
    ///
    /// let mut iter = seq.iter();
    /// assert_eq!(iter.next(), Some(&0));
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Provides a forward iterator with mutable references.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqlist::Sequence;
    ///
    /// let mut seq = Sequence::from([0, 1, 2]);
    ///
    /// for element in seq.iter_mut() {
    ///     *element += 10;
    /// }
    ///
    /// assert_eq!(seq.to_vec(), vec![10, 11, 12]);
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self)
    }
}

/// Indexed access. Resolves the index by walking from the nearer end.
///
/// # Panics
///
/// Panics if `index >= len`. Use [`Sequence::get`] for a reported failure
/// instead.
impl<T> Index<usize> for Sequence<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        self.get(index).expect("index out of bounds")
    }
}

impl<T> IndexMut<usize> for Sequence<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        self.get_mut(index).expect("index out of bounds")
    }
}

impl<T: Debug> Debug for Sequence<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for Sequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

// The arena owns every node; dropping `slots` releases each element exactly
// once, so no explicit `Drop` impl is needed.

// Ensure that `Sequence` and its read-only iterators are covariant in their
// type parameters.
#[allow(dead_code)]
fn assert_covariance() {
    fn a<'a>(x: Sequence<&'static str>) -> Sequence<&'a str> {
        x
    }
    fn b<'i, 'a>(x: Iter<'i, &'static str>) -> Iter<'i, &'a str> {
        x
    }
    fn c<'a>(x: crate::IntoIter<&'static str>) -> crate::IntoIter<&'a str> {
        x
    }
}

#[cfg(test)]
mod tests {
    use crate::error::SequenceError;
    use crate::sequence::Sequence;
    use std::cell::RefCell;
    use std::fmt::Debug;

    /// Walk the chain in both directions and check the structural shape.
    fn check_links<T>(seq: &Sequence<T>) {
        if seq.len() == 0 {
            assert!(seq.head.is_none());
            assert!(seq.tail.is_none());
            return;
        }
        let head = seq.head.expect("non-empty sequence must have a head");
        let tail = seq.tail.expect("non-empty sequence must have a tail");
        assert_eq!(seq.node(head).prev, None);
        assert_eq!(seq.node(tail).next, None);

        let mut slot = head;
        for _ in 0..seq.len() - 1 {
            let next = seq.node(slot).next.expect("forward walk fell short");
            assert_eq!(seq.node(next).prev, Some(slot));
            slot = next;
        }
        assert_eq!(slot, tail);

        let mut slot = tail;
        for _ in 0..seq.len() - 1 {
            let prev = seq.node(slot).prev.expect("backward walk fell short");
            assert_eq!(seq.node(prev).next, Some(slot));
            slot = prev;
        }
        assert_eq!(slot, head);
    }

    fn seq_eq<T, I>(seq: &Sequence<T>, expected: I)
    where
        T: Debug + Clone + Eq,
        I: IntoIterator<Item = T>,
    {
        check_links(seq);
        assert_eq!(
            Vec::from_iter(seq.iter().cloned()),
            Vec::from_iter(expected)
        );
    }

    #[test]
    fn sequence_create() {
        let mut seq = Sequence::<i32>::new();
        assert!(seq.is_empty());
        seq.push_back(1);
        assert!(!seq.is_empty());
        assert_eq!(seq.pop_back(), Some(1));
        assert!(seq.is_empty());
        check_links(&seq);
    }

    #[test]
    fn sequence_drop() {
        #[derive(Debug)]
        struct DropChecker<'a, T: Copy> {
            value: T,
            dropped: &'a RefCell<Vec<T>>,
        }
        impl<'a, T: Copy> DropChecker<'a, T> {
            fn new(value: T, dropped: &'a RefCell<Vec<T>>) -> Self {
                Self { value, dropped }
            }
        }
        impl<'a, T: Copy> Drop for DropChecker<'a, T> {
            fn drop(&mut self) {
                self.dropped.borrow_mut().push(self.value);
            }
        }
        let dropped = RefCell::new(Vec::<i32>::new());
        let mut seq = Sequence::new();
        seq.push_back(DropChecker::new(1, &dropped));
        seq.push_back(DropChecker::new(2, &dropped));
        seq.push_back(DropChecker::new(3, &dropped));
        drop(seq);
        let mut order = dropped.borrow().clone();
        order.sort_unstable();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn sequence_push_and_pop() {
        let mut seq = Sequence::new();
        assert_eq!(seq.len(), 0);
        assert_eq!(seq.front(), None);
        assert_eq!(seq.back(), None);
        assert_eq!(seq.pop_front(), None);
        assert_eq!(seq.pop_back(), None);

        seq.push_back(1);
        assert_eq!(seq.back(), Some(&1));
        assert_eq!(seq.pop_front(), Some(1));
        assert_eq!(seq.pop_back(), None);
        assert!(seq.is_empty());

        seq.push_front(1);
        seq.push_front(2);
        seq.push_back(3);
        check_links(&seq);
        assert_eq!(seq.back(), Some(&3));
        assert_eq!(seq.front(), Some(&2));
        assert_eq!(seq.pop_front(), Some(2));
        assert_eq!(seq.pop_back(), Some(3));

        assert_eq!(seq.front(), Some(&1));
        assert_eq!(seq.pop_front(), Some(1));
        assert_eq!(seq.front(), None);
        assert_eq!(seq.back(), None);
        assert!(seq.is_empty());
        check_links(&seq);
    }

    #[test]
    fn sequence_insert_and_remove() {
        let mut seq = Sequence::from_iter(0..10);
        seq.insert(5, 10).unwrap();
        seq_eq(&seq, (0..5).chain(Some(10)).chain(5..10));

        assert_eq!(seq.remove(10), Ok(9));
        assert_eq!(seq.back(), Some(&8));
        seq_eq(&seq, (0..5).chain(Some(10)).chain(5..9));

        seq.insert(0, 11).unwrap();
        assert_eq!(seq.front(), Some(&11));
        seq_eq(&seq, (11..=11).chain((0..5).chain(Some(10)).chain(5..9)));

        assert_eq!(seq.remove(0), Ok(11));
        assert_eq!(seq.front(), Some(&0));
        seq_eq(&seq, (0..5).chain(Some(10)).chain(5..9));

        seq.insert(10, 12).unwrap();
        assert_eq!(seq.back(), Some(&12));
        seq_eq(&seq, (0..5).chain(Some(10)).chain(5..9).chain(Some(12)));
    }

    #[test]
    fn sequence_bounds_policy() {
        let mut seq = Sequence::from([1, 2, 3]);

        // every boundary: first, last, one-past-the-end, far out
        assert_eq!(seq.get(0), Some(&1));
        assert_eq!(seq.get(2), Some(&3));
        assert_eq!(seq.get(3), None);
        assert_eq!(seq.get(17), None);

        assert_eq!(
            seq.set(3, 9),
            Err(SequenceError::OutOfBounds { index: 3, len: 3 })
        );
        assert_eq!(
            seq.remove(3),
            Err(SequenceError::OutOfBounds { index: 3, len: 3 })
        );

        // insert accepts `index == len` (append) but nothing beyond
        assert_eq!(seq.insert(3, 4), Ok(()));
        assert_eq!(
            seq.insert(5, 9),
            Err(SequenceError::OutOfBounds { index: 5, len: 4 })
        );
        seq_eq(&seq, vec![1, 2, 3, 4]);
    }

    #[test]
    fn sequence_set_and_index() {
        let mut seq = Sequence::from([1, 2, 3]);
        assert_eq!(seq.set(0, 7), Ok(1));
        assert_eq!(seq[0], 7);
        seq[2] = 9;
        assert_eq!(seq.get(2), Some(&9));
        seq_eq(&seq, vec![7, 2, 9]);
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn sequence_index_panics() {
        let seq = Sequence::from([1, 2, 3]);
        let _ = seq[3];
    }

    #[test]
    fn sequence_slot_reuse() {
        let mut seq = Sequence::from_iter(0..4);
        let slots_before = seq.slots.len();
        seq.remove(1).unwrap();
        seq.remove(1).unwrap();
        seq.push_back(4);
        seq.push_back(5);
        // removals feed the free list; no arena growth
        assert_eq!(seq.slots.len(), slots_before);
        seq_eq(&seq, vec![0, 3, 4, 5]);
    }

    #[test]
    fn sequence_positions() {
        let mut seq = Sequence::from([1, 2, 3]);
        let pos = seq.position(1).unwrap();
        assert_eq!(seq.get_at(pos), Ok(&2));

        seq.insert_before(pos, 9).unwrap();
        seq_eq(&seq, vec![1, 9, 2, 3]);
        // the handle still names the same node, now at index 2
        assert_eq!(seq.get_at(pos), Ok(&2));

        assert_eq!(seq.remove_at(pos), Ok(2));
        assert_eq!(seq.remove_at(pos), Err(SequenceError::Stale));
        assert_eq!(seq.get_at(pos), Err(SequenceError::Stale));
        seq_eq(&seq, vec![1, 9, 3]);

        // a recycled slot must not resurrect the old handle
        seq.push_back(4);
        assert_eq!(seq.get_at(pos), Err(SequenceError::Stale));
        assert!(seq.position(5).is_none());
    }

    #[test]
    fn sequence_extend_and_append() {
        let mut seq = Sequence::new();
        seq.extend_from_slice(&[1, 2, 3]);
        seq_eq(&seq, vec![1, 2, 3]);

        let other = Sequence::from([4, 5]);
        seq.extend_from_sequence(&other);
        seq_eq(&seq, vec![1, 2, 3, 4, 5]);
        seq_eq(&other, vec![4, 5]);

        let mut empty = Sequence::new();
        empty.extend_from_sequence(&other);
        seq_eq(&empty, vec![4, 5]);

        let mut moved = Sequence::from([6]);
        seq.append(&mut moved);
        assert!(moved.is_empty());
        seq_eq(&seq, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn sequence_clear() {
        let mut seq = Sequence::from_iter(0..5);
        let capacity = seq.capacity();
        seq.clear();
        assert!(seq.is_empty());
        assert_eq!(seq.capacity(), capacity);
        check_links(&seq);
        seq.clear();
        seq.push_back(1);
        seq_eq(&seq, vec![1]);
    }

    #[test]
    fn sequence_clear_invalidates_positions() {
        let mut seq = Sequence::from([1, 2, 3]);
        let pos = seq.position(0).unwrap();
        seq.clear();
        assert_eq!(seq.get_at(pos), Err(SequenceError::Stale));

        // a fresh occupant of the same slot must not revive the handle
        seq.push_back(9);
        assert_eq!(seq.get_at(pos), Err(SequenceError::Stale));
        assert_eq!(seq.get_at_mut(pos), Err(SequenceError::Stale));
        assert_eq!(seq.remove_at(pos), Err(SequenceError::Stale));
        assert_eq!(seq.insert_before(pos, 8), Err(SequenceError::Stale));
        seq_eq(&seq, vec![9]);
    }

    #[test]
    fn sequence_clone_from_invalidates_positions() {
        let mut seq = Sequence::from([1, 2, 3]);
        let pos = seq.position(1).unwrap();
        seq.clone_from(&Sequence::from([4, 5]));
        assert_eq!(seq.get_at(pos), Err(SequenceError::Stale));
        seq_eq(&seq, vec![4, 5]);
    }
}
