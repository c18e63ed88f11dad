//! Binary max-heap with in-place priority changes.
//!
//! Unlike `std::collections::BinaryHeap`, elements here do not own their
//! key: the heap asks its [`Policy`] for the priority of an element every
//! time it compares two slots. That lets a caller change the state a
//! priority is derived from and then repair the heap around that single
//! element with [`Heap::update_priority`].

use crate::error::EmptyContainer;
use crate::traits::Policy;

/// Mutable-priority max-heap. See the [module docs](self).
#[derive(Debug, Clone)]
pub struct Heap<T, P> {
    data: Vec<T>,
    policy: P,
}

/// Parent slot of `i` (`i > 0`).
#[inline]
fn parent(i: usize) -> usize {
    if i % 2 == 0 { (i - 2) / 2 } else { (i - 1) / 2 }
}

impl<T, P> Heap<T, P>
where
    T: Clone + PartialEq,
    P: Policy<T>,
{
    /// Create an empty heap ordered by `policy`.
    pub fn new(policy: P) -> Self {
        Self {
            data: Vec::new(),
            policy,
        }
    }

    #[inline]
    fn priority_at(&self, ctx: &P::Context, i: usize) -> f64 {
        self.policy.priority(ctx, &self.data[i])
    }

    fn sift_up(&mut self, ctx: &P::Context, mut i: usize) {
        while i > 0 {
            let p = parent(i);
            if self.priority_at(ctx, i) > self.priority_at(ctx, p) {
                self.data.swap(i, p);
                i = p;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, ctx: &P::Context, mut i: usize) {
        let len = self.data.len();
        loop {
            let left = 2 * i + 1;
            let right = 2 * i + 2;
            let mut top = i;
            if left < len && self.priority_at(ctx, left) > self.priority_at(ctx, top) {
                top = left;
            }
            if right < len && self.priority_at(ctx, right) > self.priority_at(ctx, top) {
                top = right;
            }
            if top == i {
                break;
            }
            self.data.swap(i, top);
            i = top;
        }
    }

    /// Insert `item`.
    pub fn add(&mut self, ctx: &P::Context, item: T) {
        self.data.push(item);
        let last = self.data.len() - 1;
        self.sift_up(ctx, last);
    }

    /// Remove and return the element with the highest priority.
    pub fn pop(&mut self, ctx: &P::Context) -> Result<T, EmptyContainer> {
        if self.data.is_empty() {
            return Err(EmptyContainer);
        }
        let last = self.data.len() - 1;
        self.data.swap(0, last);
        let top = self.data.pop().ok_or(EmptyContainer)?;
        self.sift_down(ctx, 0);
        Ok(top)
    }

    /// Whether an element equal to `item` is stored.
    pub fn contains(&self, item: &T) -> bool {
        self.data.contains(item)
    }

    /// Apply the policy's update to `item` and move it to its new place.
    ///
    /// Does nothing and returns `false` if `item` is not in the heap. An
    /// update that leaves the priority unchanged does not reorder anything.
    pub fn update_priority(&mut self, ctx: &mut P::Context, item: &T, args: P::Args) -> bool {
        let Some(i) = self.data.iter().position(|x| x == item) else {
            return false;
        };
        let old = self.priority_at(ctx, i);
        let updated = self.policy.update(ctx, self.data[i].clone(), args);
        self.data[i] = updated;
        let new = self.priority_at(ctx, i);
        if new > old {
            self.sift_up(ctx, i);
        } else {
            self.sift_down(ctx, i);
        }
        true
    }

    /// Number of stored elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the heap is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Stored elements in heap (array) order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}
