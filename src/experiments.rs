//! A prototype of the chain on branded tokens and fractional ownership,
//! with no arena underneath. Each cell is owned by two `StaticRc` halves,
//! held by whichever neighbors (or chain ends) reach it from either side.

use ghost_cell::{GhostCell, GhostToken};
use static_rc::StaticRc;
use std::ops::Deref;

type Half<T> = StaticRc<T, 1, 2>;
type Full<T> = StaticRc<T, 2, 2>;
type CellPtr<'brand, T> = Half<GhostCell<'brand, Cell<'brand, T>>>;

struct Cell<'brand, T> {
    value: T,
    prev: Option<CellPtr<'brand, T>>,
    next: Option<CellPtr<'brand, T>>,
}

impl<'brand, T> Cell<'brand, T> {
    fn new(value: T) -> Self {
        Self {
            value,
            prev: None,
            next: None,
        }
    }
}

pub struct TokenChain<'brand, T> {
    head: Option<CellPtr<'brand, T>>,
    tail: Option<CellPtr<'brand, T>>,
    len: usize,
}

impl<'brand, T> Default for TokenChain<'brand, T> {
    fn default() -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
        }
    }
}

impl<'brand, T> TokenChain<'brand, T> {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn front<'a>(&'a self, token: &'a GhostToken<'brand>) -> Option<&'a T> {
        self.head
            .as_ref()
            .map(|half| &half.deref().borrow(token).value)
    }

    pub fn back<'a>(&'a self, token: &'a GhostToken<'brand>) -> Option<&'a T> {
        self.tail
            .as_ref()
            .map(|half| &half.deref().borrow(token).value)
    }

    pub fn push_back(&mut self, value: T, token: &mut GhostToken<'brand>) {
        let (left, right) = Full::split(Full::new(GhostCell::new(Cell::new(value))));
        match self.tail.take() {
            Some(old_tail) => {
                old_tail.deref().borrow_mut(token).next = Some(left);
                right.deref().borrow_mut(token).prev = Some(old_tail);
            }
            None => self.head = Some(left),
        }
        self.tail = Some(right);
        self.len += 1;
    }

    pub fn push_front(&mut self, value: T, token: &mut GhostToken<'brand>) {
        let (left, right) = Full::split(Full::new(GhostCell::new(Cell::new(value))));
        match self.head.take() {
            Some(old_head) => {
                old_head.deref().borrow_mut(token).prev = Some(left);
                right.deref().borrow_mut(token).next = Some(old_head);
            }
            None => self.tail = Some(left),
        }
        self.head = Some(right);
        self.len += 1;
    }

    pub fn pop_back(&mut self, token: &mut GhostToken<'brand>) -> Option<T> {
        let right = self.tail.take()?;
        let left = match right.deref().borrow_mut(token).prev.take() {
            Some(prev_half) => {
                let left = prev_half
                    .deref()
                    .borrow_mut(token)
                    .next
                    .take()
                    .expect("chain halves stay paired");
                self.tail = Some(prev_half);
                left
            }
            None => self.head.take().expect("chain halves stay paired"),
        };
        self.len -= 1;
        Some(Full::into_box(Full::join(left, right)).into_inner().value)
    }

    pub fn pop_front(&mut self, token: &mut GhostToken<'brand>) -> Option<T> {
        let right = self.head.take()?;
        let left = match right.deref().borrow_mut(token).next.take() {
            Some(next_half) => {
                let left = next_half
                    .deref()
                    .borrow_mut(token)
                    .prev
                    .take()
                    .expect("chain halves stay paired");
                self.head = Some(next_half);
                left
            }
            None => self.tail.take().expect("chain halves stay paired"),
        };
        self.len -= 1;
        Some(Full::into_box(Full::join(left, right)).into_inner().value)
    }

    /// Pop every cell, rejoining the halves so nothing leaks.
    pub fn clear(&mut self, token: &mut GhostToken<'brand>) {
        while self.pop_front(token).is_some() {}
    }

    pub fn to_vec(&self, token: &GhostToken<'brand>) -> Vec<T>
    where
        T: Clone,
    {
        let mut out = Vec::with_capacity(self.len);
        let mut cursor = self.head.as_deref();
        while let Some(cell) = cursor {
            let node = cell.borrow(token);
            out.push(node.value.clone());
            cursor = node.next.as_deref();
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use crate::experiments::TokenChain;
    use ghost_cell::GhostToken;

    #[test]
    fn chain_push_pop() {
        GhostToken::new(|mut token| {
            let mut chain = TokenChain::new();
            assert!(chain.is_empty());

            chain.push_back(2, &mut token);
            chain.push_front(1, &mut token);
            chain.push_back(3, &mut token);
            assert_eq!(chain.len(), 3);
            assert_eq!(chain.to_vec(&token), vec![1, 2, 3]);
            assert_eq!(chain.front(&token), Some(&1));
            assert_eq!(chain.back(&token), Some(&3));

            assert_eq!(chain.pop_back(&mut token), Some(3));
            assert_eq!(chain.pop_front(&mut token), Some(1));
            assert_eq!(chain.pop_front(&mut token), Some(2));
            assert_eq!(chain.pop_front(&mut token), None);
            assert!(chain.is_empty());
        })
    }

    #[test]
    fn chain_clear() {
        GhostToken::new(|mut token| {
            let mut chain = TokenChain::new();
            for i in 0..10 {
                chain.push_back(i, &mut token);
            }
            assert_eq!(chain.len(), 10);
            chain.clear(&mut token);
            assert!(chain.is_empty());
            assert_eq!(chain.front(&token), None);
        })
    }
}
