//! This crate provides a doubly-linked sequence container whose nodes live in
//! a generational arena.
//!
//! The [`Sequence`] allows inserting and removing elements at any given
//! position in constant time once the position is known. In compromise,
//! resolving an arbitrary index takes *O*(*n*) time.
//!
//! Here is a quick example showing how the sequence works.
//!
//! ```
//! use seqlist::Sequence;
//!
//! let mut seq = Sequence::from([3, 1, 8, 4]);
//!
//! seq.sort();
//! assert_eq!(seq.to_vec(), vec![1, 3, 4, 8]);
//!
//! seq.push_back(6);
//! seq.reverse();
//! assert_eq!(seq.to_vec(), vec![6, 8, 4, 3, 1]);
//! ```
//!
//! # Memory Layout
//!
//! Every node is a slot in a `Vec`-backed arena, and the "previous"/"next"
//! relations are plain slot indices:
//!
//! ```text
//!             slots: Vec<Slot<T>>
//!   ┌───────────┬───────────┬───────────┬───────────┐
//!   │ gen: 0    │ gen: 2    │ gen: 0    │ gen: 1    │
//!   │ Occupied  │ Vacant    │ Occupied  │ Occupied  │
//!   │ prev: ─   │ free: ─   │ prev: 3   │ prev: 0   │
//!   │ next: 3   │           │ next: ─   │ next: 2   │
//!   │ value: T  │           │ value: T  │ value: T  │
//!   └───────────┴───────────┴───────────┴───────────┘
//!         ↑                       ↑
//!       head = 0               tail = 2        (logical order: 0 → 3 → 2)
//! ```
//!
//! Removing a node marks its slot vacant, pushes it onto an intrusive free
//! list, and bumps the slot's generation counter. Inserting reuses a vacant
//! slot when one exists. Because neighbors are addressed by index rather than
//! by pointer, no relinking step can dangle, and a [`Position`] handle taken
//! before a removal is rejected afterwards instead of reading recycled
//! memory.
//!
//! # Iteration
//!
//! Iterating over a sequence is by the [`Iter`] and [`IterMut`] iterators.
//! These are fused, double-ended iterators that iterate the sequence like an
//! array. [`IterMut`] provides mutability of the elements (but not of the
//! linked structure).
//!
//! ## Examples
//!
//! ```
//! use seqlist::Sequence;
//!
//! let mut seq = Sequence::from([1, 2, 3]);
//! let mut iter = seq.iter();
//! assert_eq!(iter.next(), Some(&1));
//! assert_eq!(iter.next_back(), Some(&3));
//! assert_eq!(iter.next(), Some(&2));
//! assert_eq!(iter.next(), None);
//!
//! seq.iter_mut().for_each(|item| *item *= 2);
//! assert_eq!(Vec::from_iter(seq), vec![2, 4, 6]);
//! ```
//!
//! # Cursor Views
//!
//! Beside iteration, the cursors [`Cursor`] and [`CursorMut`] provide more
//! flexible ways of viewing a sequence.
//!
//! As the names suggest, they can move forward or backward over the sequence.
//! In a sequence with length *n*, there are *n* + 1 valid locations for a
//! cursor, indexed by 0, 1, ..., *n*, where *n* is the past-the-end position.
//! Moving across the past-the-end boundary is reported as an error rather
//! than wrapping around.
//!
//! ## Examples
//!
//! ```
//! use seqlist::Sequence;
//!
//! let mut seq = Sequence::from([1, 2, 3, 4]);
//!
//! let mut cursor = seq.cursor_start_mut();
//!
//! cursor.insert(0); // insert 0 at the beginning of the sequence
//! assert_eq!(cursor.current(), Some(&1));
//!
//! cursor.seek_to(3).unwrap(); // move the cursor to position 3, and remove it
//! assert_eq!(cursor.remove(), Some(3));
//!
//! assert_eq!(Vec::from_iter(seq), vec![0, 1, 2, 4]);
//! ```
//!
//! # Positions
//!
//! A [`Position`] is a detached, copyable handle to one node: a slot index
//! paired with the slot's generation counter. Unlike a cursor it does not
//! borrow the sequence, so it stays around across mutations. Because of the
//! generation check, using it after its node was removed fails loudly with
//! [`SequenceError::Stale`] instead of silently addressing whatever reused
//! the slot.
//!
//! ```
//! use seqlist::{Sequence, SequenceError};
//!
//! let mut seq = Sequence::from(['a', 'b', 'c']);
//! let pos = seq.position(1).unwrap();
//!
//! assert_eq!(seq.get_at(pos), Ok(&'b'));
//! assert_eq!(seq.remove_at(pos), Ok('b'));
//! assert_eq!(seq.get_at(pos), Err(SequenceError::Stale));
//! ```
//!
//! [`Sequence`]: crate::Sequence
//! [`Iter`]: crate::Iter
//! [`IterMut`]: crate::IterMut
//! [`Cursor`]: crate::sequence::cursor::Cursor
//! [`CursorMut`]: crate::sequence::cursor::CursorMut
//! [`Position`]: crate::sequence::cursor::Position

#[doc(inline)]
pub use sequence::cursor::{Cursor, CursorMut, Position};
#[doc(inline)]
pub use sequence::iterator::{IntoIter, Iter, IterMut};
#[doc(inline)]
pub use sequence::Sequence;

pub use error::SequenceError;

pub mod sequence;

mod error;
mod experiments;
