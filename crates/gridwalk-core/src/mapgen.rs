//! Random obstacle placement for grid graphs.

use rand::{Rng, RngExt};

use crate::grid::GridGraph;

/// Default share of cells turned into walls by [`WallGen::scatter`].
pub const DEFAULT_WALL_PROBABILITY: f64 = 0.3;

/// Wall generator driven by a caller-supplied random number generator.
pub struct WallGen<R: Rng> {
    pub rng: R,
}

impl<R: Rng> WallGen<R> {
    /// Create a generator around `rng`.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Independently block each cell with the given probability, leaving
    /// the other cells open.
    ///
    /// `probability` is clamped to `[0, 1]`. Returns the number of walls.
    pub fn scatter(&mut self, grid: &mut GridGraph, probability: f64) -> usize {
        let p = if probability.is_nan() { 0.0 } else { probability.clamp(0.0, 1.0) };
        let mut walls = 0;
        for cell in grid.bounds() {
            let Some(id) = grid.id_at(cell) else {
                continue;
            };
            let r: f64 = self.rng.random();
            let blocked = r < p;
            grid.set_blocked(id, blocked);
            if blocked {
                walls += 1;
            }
        }
        log::debug!("scattered {walls} walls over {} cells (p = {p})", grid.len());
        walls
    }

    /// Remove every wall.
    pub fn clear(&mut self, grid: &mut GridGraph) {
        for cell in grid.bounds() {
            if let Some(id) = grid.id_at(cell) {
                grid.set_blocked(id, false);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Topology;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn walls(g: &GridGraph) -> usize {
        g.iter().filter(|(_, n)| n.is_blocked()).count()
    }

    #[test]
    fn scatter_extremes() {
        let mut g = GridGraph::new(10, 10, Topology::Four, 1);
        let mut wg = WallGen::new(StdRng::seed_from_u64(7));
        assert_eq!(wg.scatter(&mut g, 0.0), 0);
        assert_eq!(walls(&g), 0);
        assert_eq!(wg.scatter(&mut g, 1.0), 100);
        assert_eq!(walls(&g), 100);
        // Out-of-range probabilities clamp.
        assert_eq!(wg.scatter(&mut g, -3.0), 0);
        assert_eq!(wg.scatter(&mut g, 4.0), 100);
    }

    #[test]
    fn scatter_default_is_mixed() {
        let mut g = GridGraph::new(40, 40, Topology::Eight, 1);
        let mut wg = WallGen::new(StdRng::seed_from_u64(42));
        let n = wg.scatter(&mut g, DEFAULT_WALL_PROBABILITY);
        assert_eq!(n, walls(&g));
        // 1600 cells at p = 0.3: far from both ends.
        assert!(n > 300 && n < 700, "unexpected wall count {n}");
    }

    #[test]
    fn scatter_is_reproducible_with_seed() {
        let mut a = GridGraph::new(16, 16, Topology::Four, 1);
        let mut b = GridGraph::new(16, 16, Topology::Four, 1);
        WallGen::new(StdRng::seed_from_u64(3)).scatter(&mut a, 0.5);
        WallGen::new(StdRng::seed_from_u64(3)).scatter(&mut b, 0.5);
        let blocked = |g: &GridGraph| -> Vec<bool> { g.iter().map(|(_, n)| n.is_blocked()).collect() };
        assert_eq!(blocked(&a), blocked(&b));
    }

    #[test]
    fn clear_removes_walls() {
        let mut g = GridGraph::new(5, 5, Topology::Four, 1);
        let mut wg = WallGen::new(StdRng::seed_from_u64(1));
        wg.scatter(&mut g, 1.0);
        wg.clear(&mut g);
        assert_eq!(walls(&g), 0);
    }
}
