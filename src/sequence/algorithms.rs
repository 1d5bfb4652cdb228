use crate::sequence::Sequence;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::ops::{Add, AddAssign};

impl<T: PartialEq> PartialEq for Sequence<T> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other)
    }
}

impl<T: Eq> Eq for Sequence<T> {}

impl<T: PartialOrd> PartialOrd for Sequence<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other)
    }
}

impl<T: Ord> Ord for Sequence<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other)
    }
}

/// Deep copy: the clone is value-equal to the original but shares no
/// storage, so mutating one never affects the other.
impl<T: Clone> Clone for Sequence<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }

    fn clone_from(&mut self, other: &Self) {
        self.clear();
        self.extend(other.iter().cloned());
    }
}

impl<T: Hash> Hash for Sequence<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut len = 0_usize;
        for elt in self {
            elt.hash(state);
            len += 1;
        }
        len.hash(state);
    }
}

impl<T> Sequence<T> {
    /// Returns `true` if the `Sequence` contains an element equal to the
    /// given value.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqlist::Sequence;
    ///
    /// let seq = Sequence::from([0, 1, 2]);
    ///
    /// assert_eq!(seq.contains(&0), true);
    /// assert_eq!(seq.contains(&10), false);
    /// ```
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        self.iter().any(|e| e == x)
    }

    /// Returns the index of the first element equal to the given value, or
    /// `None` if no element matches.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time; the scan starts from
    /// the front.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqlist::Sequence;
    ///
    /// let seq = Sequence::from([5, 3, 5]);
    ///
    /// assert_eq!(seq.position_of(&5), Some(0));
    /// assert_eq!(seq.position_of(&3), Some(1));
    /// assert_eq!(seq.position_of(&4), None);
    /// ```
    pub fn position_of(&self, x: &T) -> Option<usize>
    where
        T: PartialEq<T>,
    {
        self.iter().position(|e| e == x)
    }

    /// Sort the sequence.
    ///
    /// This sort is stable (i.e., does not reorder equal elements).
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*²) time and *O*(1) memory.
    ///
    /// # Current Implementation
    ///
    /// The current algorithm is an adjacent-swap (bubble) sort over the
    /// chain. Each pass bubbles the largest remaining element to the back
    /// and shrinks the scanned window by one; a pass without swaps
    /// terminates early. Only payload values are exchanged, the links are
    /// never rewired.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqlist::Sequence;
    /// let mut seq = Sequence::from([5, 2, 4, 3, 1]);
    ///
    /// seq.sort();
    ///
    /// assert_eq!(seq.into_vec(), vec![1, 2, 3, 4, 5]);
    /// ```
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        self.sort_by(Ord::cmp);
    }

    /// Sort the sequence with a comparator function.
    ///
    /// This sort is stable (i.e., does not reorder equal elements): two
    /// elements are swapped only when the comparator orders them strictly
    /// greater.
    ///
    /// The comparator function must define a total ordering for the
    /// elements in the sequence. If the ordering is not total, the order of
    /// the elements is unspecified.
    ///
    /// For example, while [`f64`] doesn't implement [`Ord`] because
    /// `NaN != NaN`, we can use `partial_cmp` as our sort function when we
    /// know the sequence doesn't contain a `NaN`.
    /// ```
    /// use seqlist::Sequence;
    /// let mut floats = Sequence::from([5f64, 4.0, 1.0, 3.0, 2.0]);
    /// floats.sort_by(|a, b| a.partial_cmp(b).unwrap());
    /// assert_eq!(floats.into_vec(), vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    /// ```
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*²) time and *O*(1) memory.
    /// On an already-sorted sequence it performs a single pass.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqlist::Sequence;
    /// let mut v = Sequence::from([5, 4, 1, 3, 2]);
    /// v.sort_by(|a, b| a.cmp(b));
    /// assert_eq!(v.to_vec(), vec![1, 2, 3, 4, 5]);
    ///
    /// // reverse sorting
    /// v.sort_by(|a, b| b.cmp(a));
    /// assert_eq!(v.to_vec(), vec![5, 4, 3, 2, 1]);
    /// ```
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        if self.len() < 2 {
            return;
        }
        let mut window = self.len() - 1;
        loop {
            let mut swapped = false;
            let mut slot = self.head.expect("non-empty sequence has a head");
            for _ in 0..window {
                let next = self.node(slot).next.expect("walk stays within the chain");
                if compare(&self.node(slot).value, &self.node(next).value) == Ordering::Greater {
                    self.swap_values(slot, next);
                    swapped = true;
                }
                slot = next;
            }
            window -= 1;
            if !swapped || window == 0 {
                break;
            }
        }
    }

    /// Reverse the order of the elements in place.
    ///
    /// Two walks start from both ends and swap payload values pairwise,
    /// meeting after `len / 2` swaps. The middle element of an odd-length
    /// sequence stays put, and the links are never rewired.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqlist::Sequence;
    /// let mut seq = Sequence::from([1, 2, 3, 4, 5]);
    ///
    /// seq.reverse();
    ///
    /// assert_eq!(seq.into_vec(), vec![5, 4, 3, 2, 1]);
    /// ```
    pub fn reverse(&mut self) {
        if self.len() < 2 {
            return;
        }
        let mut front = self.head.expect("non-empty sequence has a head");
        let mut back = self.tail.expect("non-empty sequence has a tail");
        for _ in 0..self.len() / 2 {
            self.swap_values(front, back);
            front = self.node(front).next.expect("walk stays within the chain");
            back = self.node(back).prev.expect("walk stays within the chain");
        }
    }

    /// Copies the elements into a newly allocated contiguous `Vec`, in
    /// forward order. The sequence is untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqlist::Sequence;
    /// let seq = Sequence::from([1, 2, 3]);
    /// assert_eq!(seq.to_vec(), vec![1, 2, 3]);
    /// assert_eq!(seq.len(), 3);
    /// ```
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Moves the elements into a newly allocated contiguous `Vec`, in
    /// forward order, consuming the sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqlist::Sequence;
    /// let seq = Sequence::from([1, 2, 3]);
    /// assert_eq!(seq.into_vec(), vec![1, 2, 3]);
    /// ```
    pub fn into_vec(self) -> Vec<T> {
        Vec::from_iter(self)
    }
}

/// Concatenation: a new sequence holding `self`'s elements followed by
/// `rhs`'s. Both operands are untouched.
///
/// # Examples
///
/// ```
/// use seqlist::Sequence;
///
/// let a = Sequence::from([1, 2]);
/// let b = Sequence::from([3]);
///
/// let c = &a + &b;
/// assert_eq!(c.to_vec(), vec![1, 2, 3]);
/// assert_eq!(a.len(), 2);
/// assert_eq!(b.len(), 1);
/// ```
impl<T: Clone> Add for &Sequence<T> {
    type Output = Sequence<T>;

    fn add(self, rhs: Self) -> Sequence<T> {
        let mut out = Sequence::with_capacity(self.len() + rhs.len());
        out.extend(self.iter().cloned());
        out.extend(rhs.iter().cloned());
        out
    }
}

/// In-place concatenation of clones, equivalent to
/// [`Sequence::extend_from_sequence`].
///
/// # Examples
///
/// ```
/// use seqlist::Sequence;
///
/// let mut a = Sequence::from([1, 2, 3]);
/// let b = a.clone();
///
/// a += &b;
/// assert_eq!(a.to_vec(), vec![1, 2, 3, 1, 2, 3]);
/// ```
impl<T: Clone> AddAssign<&Sequence<T>> for Sequence<T> {
    fn add_assign(&mut self, rhs: &Sequence<T>) {
        self.extend_from_sequence(rhs);
    }
}

#[cfg(test)]
mod tests {
    use crate::Sequence;
    use quickcheck_macros::quickcheck;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    #[test]
    fn sort_ascending() {
        let mut seq = Sequence::from([3, 1, 8, 4, 9, 12, 5, 7]);
        seq.sort();
        assert_eq!(seq.to_vec(), vec![1, 3, 4, 5, 7, 8, 9, 12]);
    }

    #[test]
    fn sort_then_push_square_reverse() {
        let mut seq = Sequence::from([3, 1, 8, 4, 9, 12, 5, 7]);
        seq.sort();
        seq.push_back(6);
        assert_eq!(seq.to_vec(), vec![1, 3, 4, 5, 7, 8, 9, 12, 6]);

        let squares: Vec<i32> = seq.iter().map(|x| x * x).collect();
        assert_eq!(squares, vec![1, 9, 16, 25, 49, 64, 81, 144, 36]);

        seq.reverse();
        assert_eq!(seq.to_vec(), vec![6, 12, 9, 8, 7, 5, 4, 3, 1]);

        let squares: Vec<i32> = seq.iter().map(|x| x * x).collect();
        assert_eq!(squares, vec![36, 144, 81, 64, 49, 25, 16, 9, 1]);
    }

    #[test]
    fn concatenate_with_copy_of_itself() {
        let mut seq = Sequence::from([1, 2, 3]);
        let copy = seq.clone();
        seq += &copy;
        assert_eq!(seq.to_vec(), vec![1, 2, 3, 1, 2, 3]);
        assert_eq!(seq.len(), 6);
    }

    #[test]
    fn sort_stability() {
        // sort by the first component only; ties keep their original order
        let mut seq = Sequence::from([(1, 'b'), (0, 'a'), (1, 'a'), (0, 'b')]);
        seq.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(
            seq.to_vec(),
            vec![(0, 'a'), (0, 'b'), (1, 'b'), (1, 'a')],
        );
    }

    #[test]
    fn sort_boundaries() {
        let mut empty = Sequence::<i32>::new();
        empty.sort();
        assert!(empty.is_empty());

        let mut single = Sequence::from([1]);
        single.sort();
        assert_eq!(single.to_vec(), vec![1]);

        let mut sorted = Sequence::from_iter(0..6);
        sorted.sort();
        assert_eq!(sorted.to_vec(), Vec::from_iter(0..6));
    }

    #[test]
    fn reverse_boundaries() {
        let mut empty = Sequence::<i32>::new();
        empty.reverse();
        assert!(empty.is_empty());

        let mut single = Sequence::from([1]);
        single.reverse();
        assert_eq!(single.to_vec(), vec![1]);

        // odd length: the middle element stays put
        let mut odd = Sequence::from([1, 2, 3]);
        odd.reverse();
        assert_eq!(odd.to_vec(), vec![3, 2, 1]);
    }

    #[test]
    fn search() {
        let seq = Sequence::from([5, 3, 5, 8]);
        assert_eq!(seq.position_of(&5), Some(0));
        assert_eq!(seq.position_of(&8), Some(3));
        assert_eq!(seq.position_of(&4), None);
        assert!(seq.contains(&3));
        assert!(!seq.contains(&4));
        assert_eq!(Sequence::<i32>::new().position_of(&1), None);
    }

    #[test]
    fn compare_and_hash() {
        let a = Sequence::from([1, 2, 3]);
        let b = Sequence::from([1, 2, 3]);
        let c = Sequence::from([1, 2, 4]);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a < c);
        assert!(Sequence::<i32>::new() < a);

        fn hash_of<T: Hash>(value: &T) -> u64 {
            let mut hasher = DefaultHasher::new();
            value.hash(&mut hasher);
            hasher.finish()
        }
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn clone_is_deep() {
        let original = Sequence::from([1, 2, 3]);
        let mut copy = original.clone();
        assert_eq!(original, copy);

        copy.push_back(4);
        *copy.front_mut().unwrap() = 9;
        assert_eq!(original.to_vec(), vec![1, 2, 3]);
        assert_eq!(copy.to_vec(), vec![9, 2, 3, 4]);

        let mut target = Sequence::from_iter(0..10);
        target.clone_from(&original);
        assert_eq!(target, original);
    }

    #[quickcheck]
    fn prop_round_trip(values: Vec<i32>) -> bool {
        let seq = Sequence::from_iter(values.clone());
        seq.len() == values.len() && seq.into_vec() == values
    }

    #[quickcheck]
    fn prop_to_vec_round_trip(values: Vec<i32>) -> bool {
        let seq = Sequence::from_iter(values.clone());
        Sequence::from_iter(seq.to_vec()) == seq
    }

    #[quickcheck]
    fn prop_reverse_involution(values: Vec<i32>) -> bool {
        let mut seq = Sequence::from_iter(values.clone());
        seq.reverse();
        let mut reversed = values.clone();
        reversed.reverse();
        if seq.to_vec() != reversed {
            return false;
        }
        seq.reverse();
        seq.into_vec() == values
    }

    #[quickcheck]
    fn prop_concatenation(a: Vec<i32>, b: Vec<i32>) -> bool {
        let sa = Sequence::from_iter(a.clone());
        let sb = Sequence::from_iter(b.clone());
        let sum = &sa + &sb;
        let expected: Vec<i32> = a.iter().chain(b.iter()).copied().collect();
        sum.len() == a.len() + b.len()
            && sum.into_vec() == expected
            && sa.into_vec() == a
            && sb.into_vec() == b
    }

    #[quickcheck]
    fn prop_sort_matches_slice_sort(values: Vec<i32>) -> bool {
        let mut seq = Sequence::from_iter(values.clone());
        seq.sort();
        let mut expected = values;
        expected.sort();
        if seq.to_vec() != expected {
            return false;
        }
        // idempotence
        seq.sort();
        seq.into_vec() == expected
    }

    #[quickcheck]
    fn prop_position_of(values: Vec<u8>, needle: u8) -> bool {
        let seq = Sequence::from_iter(values.clone());
        seq.position_of(&needle) == values.iter().position(|v| *v == needle)
    }

    #[quickcheck]
    fn prop_clone_disjoint(values: Vec<i32>) -> bool {
        let original = Sequence::from_iter(values.clone());
        let mut copy = original.clone();
        copy.push_back(0);
        copy.reverse();
        original.into_vec() == values
    }
}
