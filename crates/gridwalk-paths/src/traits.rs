use gridwalk_core::Point;

/// Ordering and mutation rules for the elements of a [`Heap`](crate::Heap)
/// or [`Stack`](crate::Stack).
///
/// Elements do not carry their priority; it is derived from external state
/// (`Context`) every time it is needed. [`update`](Policy::update) is the
/// only way a container changes that state.
pub trait Policy<T> {
    /// State the priority is derived from.
    type Context: ?Sized;
    /// Extra data handed to [`update`](Policy::update).
    type Args;

    /// Priority of `item`. Containers are max-first; negate for min-first.
    fn priority(&self, ctx: &Self::Context, item: &T) -> f64;

    /// Apply a change to `item` and return the updated element.
    fn update(&self, ctx: &mut Self::Context, item: T, args: Self::Args) -> T;
}

/// Estimate of the remaining distance between two node positions.
///
/// Estimators used for A* must never overestimate the true edge count.
pub trait Estimator {
    fn estimate(&self, from: Point, goal: Point) -> f64;
}

impl<F: Fn(Point, Point) -> f64> Estimator for F {
    fn estimate(&self, from: Point, goal: Point) -> f64 {
        self(from, goal)
    }
}
