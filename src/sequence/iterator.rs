use crate::sequence::{Entry, Sequence, Slot};
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;

/// An iterator over the elements of a `Sequence`.
///
/// It holds a pair of slots `front..=back` denoting the subrange of the
/// chain that has not been yielded yet, together with the number of
/// remaining elements.
///
/// # Examples
///
/// ```compile_fail
/// use seqlist::Sequence;
///
/// let mut seq = Sequence::from([1, 2, 3]);
/// let mut iter = seq.iter();
///
/// // Won't compile, because the sequence is already borrowed immutably.
/// seq.push_back(4);
/// println!("{:?}", iter.next());
/// ```
#[derive(Clone)]
pub struct Iter<'a, T: 'a> {
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
    sequence: &'a Sequence<T>,
}

impl<'a, T: 'a> Iter<'a, T> {
    pub(crate) fn new(sequence: &'a Sequence<T>) -> Self {
        Self {
            front: sequence.head,
            back: sequence.tail,
            remaining: sequence.len(),
            sequence,
        }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for Iter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_tuple("Iter");
        let mut slot = self.front;
        for _ in 0..self.remaining {
            let s = slot.expect("iterator length matches the chain");
            let node = self.sequence.node(s);
            f.field(&node.value);
            slot = node.next;
        }
        f.finish()
    }
}

impl<'a, T: 'a> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let slot = self.front.expect("iterator length matches the chain");
        let node = self.sequence.node(slot);
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let slot = self.back.expect("iterator length matches the chain");
        let node = self.sequence.node(slot);
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.value)
    }
}

impl<'a, T: 'a> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T: 'a> FusedIterator for Iter<'a, T> {}

/// A mutable iterator over the elements of a `Sequence`.
///
/// Though the `IterMut` holds a raw pointer to the arena instead of a
/// reference, it actually *borrows* (mutably) from the sequence, so a
/// phantom marker of `&'a mut Sequence<T>` is added to protect the
/// sequence from being read.
///
/// # Examples
///
/// `Sequence` is not readable after an `IterMut` is created.
/// ```compile_fail
/// use seqlist::Sequence;
///
/// let mut seq = Sequence::from([1, 2, 3]);
/// let mut iter = seq.iter_mut();
/// println!("{:?}", seq.back());
/// println!("{:?}", iter.next());
/// ```
pub struct IterMut<'a, T: 'a> {
    slots: *mut Slot<T>,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
    _marker: PhantomData<&'a mut Sequence<T>>,
}

impl<'a, T: 'a> IterMut<'a, T> {
    pub(crate) fn new(sequence: &'a mut Sequence<T>) -> Self {
        Self {
            front: sequence.head,
            back: sequence.tail,
            remaining: sequence.len(),
            slots: sequence.slots.as_mut_ptr(),
            _marker: PhantomData,
        }
    }

    /// Dereference one occupied slot of the borrowed arena.
    ///
    /// # Safety
    ///
    /// `slot` must lie within the arena, and the caller must not hold
    /// another live reference into the same slot.
    unsafe fn node_mut(&mut self, slot: usize) -> &'a mut crate::sequence::Node<T> {
        match &mut (*self.slots.add(slot)).entry {
            Entry::Occupied(node) => node,
            Entry::Vacant { .. } => panic!("link refers to a vacant slot"),
        }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for IterMut<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_tuple("IterMut");
        let mut slot = self.front;
        for _ in 0..self.remaining {
            let s = slot.expect("iterator length matches the chain");
            // SAFETY: `s` is a chain slot of the mutably borrowed arena, and
            // only shared references are created here.
            let node = unsafe {
                match &(*self.slots.add(s)).entry {
                    Entry::Occupied(node) => node,
                    Entry::Vacant { .. } => panic!("link refers to a vacant slot"),
                }
            };
            f.field(&node.value);
            slot = node.next;
        }
        f.finish()
    }
}

impl<'a, T: 'a> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let slot = self.front.expect("iterator length matches the chain");
        // SAFETY: the iterator mutably borrows the sequence for 'a, and the
        // walk visits every chain slot at most once, so the yielded
        // references never alias.
        let node = unsafe { self.node_mut(slot) };
        self.front = node.next;
        self.remaining -= 1;
        Some(&mut node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let slot = self.back.expect("iterator length matches the chain");
        // SAFETY: same as `next`; the front and back walks are kept apart
        // by `remaining`, so the two ends never yield the same slot.
        let node = unsafe { self.node_mut(slot) };
        self.back = node.prev;
        self.remaining -= 1;
        Some(&mut node.value)
    }
}

impl<'a, T: 'a> ExactSizeIterator for IterMut<'a, T> {}

impl<'a, T: 'a> FusedIterator for IterMut<'a, T> {}

/// An owning iterator over the elements of a `Sequence`.
///
/// This `struct` is created by the [`into_iter`] method on [`Sequence`]
/// (provided by the `IntoIterator` trait). See its documentation for more.
///
/// [`into_iter`]: Sequence::into_iter
pub struct IntoIter<T> {
    sequence: Sequence<T>,
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter")
            .field("sequence", &self.sequence)
            .finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.sequence.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.sequence.len();
        (len, Some(len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.sequence.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for Sequence<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { sequence: self }
    }
}

impl<'a, T> IntoIterator for &'a Sequence<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Sequence<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut sequence = Sequence::new();
        sequence.extend(iter);
        sequence
    }
}

impl<T, const N: usize> From<[T; N]> for Sequence<T> {
    fn from(values: [T; N]) -> Self {
        Self::from_iter(values)
    }
}

impl<T> Extend<T> for Sequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|value| self.push_back(value));
    }
}

impl<'a, T: 'a + Copy> Extend<&'a T> for Sequence<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

unsafe impl<T: Send> Send for IterMut<'_, T> {}

unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

#[cfg(test)]
mod tests {
    use crate::Sequence;
    use std::fmt::Debug;

    fn check_iter<T, I>(input: I, mid: usize)
    where
        T: Eq + Debug + Clone,
        I: IntoIterator<Item = T>,
    {
        let vec = Vec::from_iter(input);
        let seq = Sequence::from_iter(vec.iter().cloned());
        let len = vec.len();

        // forward
        let mut iter = seq.iter();
        for (i, item) in vec.iter().enumerate() {
            assert_eq!(iter.next(), Some(item));
            assert_eq!(iter.len(), len - i - 1);
        }
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);

        // forward up to `mid`, then backward for the rest
        let mut iter = seq.iter();
        for item in vec.iter().take(mid) {
            assert_eq!(iter.next(), Some(item));
        }
        for item in vec.iter().skip(mid).rev() {
            assert_eq!(iter.next_back(), Some(item));
        }
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
        assert_eq!(iter.len(), 0);

        // owning, from both ends
        let mut iter = seq.into_iter();
        for item in vec.iter().take(mid) {
            assert_eq!(iter.next().as_ref(), Some(item));
        }
        for item in vec.iter().skip(mid).rev() {
            assert_eq!(iter.next_back().as_ref(), Some(item));
        }
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn iter_cases() {
        check_iter(0..10, 10);
        check_iter(0..10, 5);
        check_iter(0..10, 0);
        check_iter(0..2, 1);
        check_iter(0..1, 1);
        check_iter(0..1, 0);
        check_iter(0..0, 0);
    }

    #[test]
    fn iter_mut_mutation() {
        let mut seq = Sequence::from_iter(0..5);
        for item in seq.iter_mut() {
            *item *= 10;
        }
        assert_eq!(Vec::from_iter(&seq), vec![&0, &10, &20, &30, &40]);

        let mut iter = seq.iter_mut();
        *iter.next().unwrap() += 1;
        *iter.next_back().unwrap() += 1;
        assert_eq!(iter.len(), 3);
        drop(iter);
        assert_eq!(Vec::from_iter(seq), vec![1, 10, 20, 30, 41]);
    }

    #[test]
    fn iter_mut_meets_in_the_middle() {
        let mut seq = Sequence::from([1, 2, 3]);
        let mut iter = seq.iter_mut();
        assert_eq!(iter.next(), Some(&mut 1));
        assert_eq!(iter.next_back(), Some(&mut 3));
        assert_eq!(iter.next(), Some(&mut 2));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn from_iterator_and_extend() {
        let mut seq = Sequence::from_iter(0..3);
        seq.extend(3..5);
        seq.extend(&[5, 6]); // by-reference extend for Copy elements
        assert_eq!(Vec::from_iter(seq), Vec::from_iter(0..7));

        let seq = Sequence::from(["a", "b"]);
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.back(), Some(&"b"));
    }

    #[test]
    fn iter_last_and_size_hint() {
        let seq = Sequence::from([1, 2, 3]);
        assert_eq!(seq.iter().last(), Some(&3));
        assert_eq!(seq.iter().size_hint(), (3, Some(3)));
        assert_eq!(seq.iter().rev().collect::<Vec<_>>(), vec![&3, &2, &1]);
    }
}
