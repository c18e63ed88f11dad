//! LIFO container with the same surface as [`Heap`](crate::Heap).
//!
//! [`Stack::update_priority`] moves the updated element to the top, so the
//! most recently (re)discovered element is always the next one popped.
//! Depth-first search relies on this to share the priority-based driver.

use crate::error::EmptyContainer;
use crate::traits::Policy;

/// Last-in, first-out container. See the [module docs](self).
#[derive(Debug, Clone)]
pub struct Stack<T, P> {
    data: Vec<T>,
    policy: P,
}

impl<T, P> Stack<T, P>
where
    T: PartialEq,
    P: Policy<T>,
{
    /// Create an empty stack. Only the policy's update function is used.
    pub fn new(policy: P) -> Self {
        Self {
            data: Vec::new(),
            policy,
        }
    }

    /// Push `item` on top.
    pub fn add(&mut self, item: T) {
        self.data.push(item);
    }

    /// Remove and return the top element.
    pub fn pop(&mut self) -> Result<T, EmptyContainer> {
        self.data.pop().ok_or(EmptyContainer)
    }

    /// Whether an element equal to `item` is stored.
    pub fn contains(&self, item: &T) -> bool {
        self.data.contains(item)
    }

    /// Apply the policy's update to `item` and move it to the top.
    ///
    /// Returns `false`, without calling the policy, if `item` is absent.
    pub fn update_priority(&mut self, ctx: &mut P::Context, item: &T, args: P::Args) -> bool {
        let Some(i) = self.data.iter().position(|x| x == item) else {
            return false;
        };
        let taken = self.data.remove(i);
        let updated = self.policy.update(ctx, taken, args);
        self.data.push(updated);
        true
    }

    /// Number of stored elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the stack is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Stored elements, bottom first.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}
