//! Visualiser state and input handling, independent of the terminal.

use std::time::Duration;

use gridwalk_core::{GridGraph, NodeId, Point, Topology, WallGen};
use gridwalk_paths::{Algorithm, Pacer, SearchDriver, SearchError, SearchResult, Snapshot};
use rand::Rng;
use rand::rngs::StdRng;

use crate::config::DemoConfig;
use crate::paint::{Canvas, Layout};

/// Spacing of node positions. Only the ratio to the estimator matters.
pub const CELL_SIZE: i32 = 10;

/// User input, already decoded from the terminal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Move(i32, i32),
    Click(Point),
    SetStart,
    SetEnd,
    ToggleWall,
    Search(Algorithm),
    Reset,
    Regenerate,
    Quit,
}

/// Work the front-end has to carry out after an update.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    Search(Algorithm),
    Quit,
}

/// Forwards to another pacer and keeps the open set of the latest snapshot.
struct KeepOpen<P> {
    inner: P,
    open: Vec<NodeId>,
}

impl<P: Pacer> Pacer for KeepOpen<P> {
    fn observe(&mut self, snapshot: &Snapshot<'_>) {
        self.open.clear();
        self.open.extend_from_slice(snapshot.open);
        self.inner.observe(snapshot);
    }

    fn pause(&mut self, delay: Duration) {
        self.inner.pause(delay);
    }
}

pub struct Visualizer<R: Rng = StdRng> {
    grid: GridGraph,
    walls: WallGen<R>,
    wall_probability: f64,
    delay: Duration,
    start: Option<NodeId>,
    end: Option<NodeId>,
    cursor: Point,
    last: Option<(Algorithm, SearchResult)>,
    /// Frontier left behind by the last search.
    open: Vec<NodeId>,
}

impl Visualizer<StdRng> {
    pub fn new(config: &DemoConfig) -> Self {
        Self::with_rng(
            config.cols,
            config.rows,
            config.topology(),
            config.walls,
            config.delay(),
            config.rng(),
        )
    }
}

impl<R: Rng> Visualizer<R> {
    pub fn with_rng(
        cols: i32,
        rows: i32,
        topology: Topology,
        wall_probability: f64,
        delay: Duration,
        rng: R,
    ) -> Self {
        let mut grid = GridGraph::new(cols, rows, topology, CELL_SIZE);
        let mut walls = WallGen::new(rng);
        walls.scatter(&mut grid, wall_probability);
        Self {
            grid,
            walls,
            wall_probability,
            delay,
            start: None,
            end: None,
            cursor: Point::ZERO,
            last: None,
            open: Vec::new(),
        }
    }

    pub fn grid(&self) -> &GridGraph {
        &self.grid
    }

    pub fn start(&self) -> Option<NodeId> {
        self.start
    }

    pub fn end(&self) -> Option<NodeId> {
        self.end
    }

    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// The most recent completed search.
    pub fn last(&self) -> Option<(Algorithm, SearchResult)> {
        self.last
    }

    /// Open nodes at the end of the last search, shown until the next run
    /// or reset.
    pub fn open_set(&self) -> &[NodeId] {
        &self.open
    }

    pub fn layout(&self) -> Layout {
        Layout {
            cols: self.grid.cols(),
            rows: self.grid.rows(),
            cell_size: self.grid.cell_size(),
            start: self.start,
            end: self.end,
        }
    }

    /// Paint the current grid state.
    pub fn canvas(&self) -> Canvas {
        let mut c = Canvas::new(self.layout());
        c.paint(&self.grid, &self.open);
        c
    }

    /// One-line summary of the last search.
    pub fn status(&self) -> String {
        match self.last {
            None => "a: A*  d: Dijkstra  p: DFS  s/e: start/end  w: wall  r: reset  g: new walls  q: quit"
                .to_owned(),
            Some((algo, res)) => {
                let outcome = if res.found { "found" } else { "no path" };
                let mut s = format!(
                    "{algo}: {outcome} in {:.3}s, {} expanded",
                    res.elapsed_secs(),
                    res.expanded
                );
                if let Some(end) = self.end.filter(|_| res.found) {
                    s.push_str(&format!(", length {}", self.grid[end].path_cost()));
                }
                s
            }
        }
    }

    fn cursor_node(&self) -> Option<NodeId> {
        self.grid.id_at(self.cursor)
    }

    pub fn update(&mut self, cmd: Command) -> Option<Effect> {
        match cmd {
            Command::Quit => return Some(Effect::Quit),
            Command::Search(algo) => return Some(Effect::Search(algo)),
            Command::Move(dx, dy) => {
                self.cursor = self.grid.bounds().clamp(self.cursor.shift(dx, dy));
            }
            Command::Click(cell) => {
                if self.grid.bounds().contains(cell) {
                    self.cursor = cell;
                }
            }
            Command::SetStart | Command::SetEnd => {
                let id = self.cursor_node()?;
                if self.grid[id].is_blocked() {
                    log::info!("{} is a wall", self.cursor);
                    return None;
                }
                if cmd == Command::SetStart {
                    self.start = Some(id);
                } else {
                    self.end = Some(id);
                }
            }
            Command::ToggleWall => {
                let id = self.cursor_node()?;
                if self.start == Some(id) || self.end == Some(id) {
                    log::info!("cannot wall off an endpoint");
                    return None;
                }
                self.grid.toggle_blocked(id);
            }
            Command::Reset => {
                self.grid.reset();
                self.open.clear();
                self.start = None;
                self.end = None;
                self.last = None;
            }
            Command::Regenerate => {
                self.grid.reset();
                self.open.clear();
                self.walls.scatter(&mut self.grid, self.wall_probability);
                for id in [self.start, self.end].into_iter().flatten() {
                    self.grid.set_blocked(id, false);
                }
                self.last = None;
            }
        }
        None
    }

    /// Clear previous search state and run `algo`, reporting each
    /// iteration to `pacer`.
    pub fn search<P: Pacer>(&mut self, algo: Algorithm, pacer: P) -> Option<SearchResult> {
        self.grid.reset();
        self.last = None;
        let tap = KeepOpen {
            inner: pacer,
            open: Vec::new(),
        };
        let mut driver = SearchDriver::new(self.delay).with_pacer(tap);
        let outcome = algo.run(&mut driver, &mut self.grid, self.start, self.end);
        self.open = driver.into_pacer().open;
        match outcome {
            Ok(res) => {
                let outcome = if res.found { "found" } else { "no path" };
                log::info!("{algo}: {outcome} in {:.3}s", res.elapsed_secs());
                self.last = Some((algo, res));
                Some(res)
            }
            Err(SearchError::InvalidInvocation(why)) => {
                log::warn!("Make sure to select both start and end nodes! ({why})");
                None
            }
            Err(e) => {
                log::error!("{algo} failed: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Paint;
    use rand::SeedableRng;

    #[derive(Default)]
    struct Count(usize);

    impl Pacer for Count {
        fn pause(&mut self, delay: Duration) {
            assert_eq!(delay, Duration::ZERO);
            self.0 += 1;
        }
    }

    fn open(cols: i32, rows: i32) -> Visualizer {
        Visualizer::with_rng(cols, rows, Topology::Four, 0.0, Duration::ZERO, StdRng::seed_from_u64(1))
    }

    #[test]
    fn cursor_stays_on_grid() {
        let mut v = open(4, 3);
        v.update(Command::Move(-1, 0));
        assert_eq!(v.cursor(), Point::ZERO);
        v.update(Command::Move(10, 10));
        assert_eq!(v.cursor(), Point::new(3, 2));
        v.update(Command::Click(Point::new(40, 0)));
        assert_eq!(v.cursor(), Point::new(3, 2));
        v.update(Command::Click(Point::new(1, 1)));
        assert_eq!(v.cursor(), Point::new(1, 1));
    }

    #[test]
    fn search_without_endpoints_is_refused() {
        let mut v = open(4, 4);
        assert_eq!(v.update(Command::Search(Algorithm::AStar)), Some(Effect::Search(Algorithm::AStar)));
        assert_eq!(v.search(Algorithm::AStar, Count::default()), None);
        assert!(v.last().is_none());
    }

    #[test]
    fn endpoints_then_search() {
        let mut v = open(5, 5);
        v.update(Command::SetStart);
        v.update(Command::Move(4, 4));
        v.update(Command::SetEnd);
        let mut pacer = Count::default();
        let res = v.search(Algorithm::Dijkstra, &mut pacer).unwrap();
        assert!(res.found);
        assert_eq!(pacer.0, res.expanded - 1);
        assert_eq!(v.grid()[v.end().unwrap()].path_cost(), 8.0);
        assert!(v.status().starts_with("Dijkstra: found"));

        // A second run starts from a clean slate.
        let again = v.search(Algorithm::Dijkstra, Count::default()).unwrap();
        assert_eq!(again.expanded, res.expanded);
    }

    #[test]
    fn frontier_stays_visible_until_reset() {
        let mut v = open(5, 5);
        v.update(Command::SetStart);
        v.update(Command::Move(4, 4));
        v.update(Command::SetEnd);
        assert!(v.search(Algorithm::AStar, Count::default()).unwrap().found);

        let end = v.end().unwrap();
        assert!(v.open_set().contains(&end));
        let canvas = v.canvas();
        let open_cells = v.grid().bounds().iter().filter(|&c| canvas.at(c) == Paint::Open).count();
        assert!(open_cells > 0);
        assert_eq!(canvas.at(Point::new(4, 4)), Paint::End);

        v.update(Command::Reset);
        assert!(v.open_set().is_empty());
        let canvas = v.canvas();
        assert!(v.grid().bounds().iter().all(|c| canvas.at(c) == Paint::Empty));
    }

    #[test]
    fn walls_do_not_take_endpoints() {
        let mut v = open(3, 3);
        v.update(Command::ToggleWall);
        assert!(v.grid()[v.grid().id_at(Point::ZERO).unwrap()].is_blocked());
        v.update(Command::SetStart);
        assert_eq!(v.start(), None);

        v.update(Command::ToggleWall);
        v.update(Command::SetStart);
        v.update(Command::ToggleWall);
        assert_eq!(v.start(), v.grid().id_at(Point::ZERO));
        assert!(!v.grid()[v.start().unwrap()].is_blocked());
    }

    #[test]
    fn reset_clears_endpoints_and_search() {
        let mut v = open(3, 1);
        v.update(Command::SetStart);
        v.update(Command::Move(2, 0));
        v.update(Command::SetEnd);
        v.search(Algorithm::Dfs, Count::default());
        v.update(Command::Reset);
        assert_eq!((v.start(), v.end(), v.last()), (None, None, None));
        assert_eq!(v.grid().visited_count(), 0);
    }

    #[test]
    fn regenerate_keeps_endpoints_open() {
        let mut v = Visualizer::with_rng(6, 6, Topology::Eight, 1.0, Duration::ZERO, StdRng::seed_from_u64(9));
        v.update(Command::Regenerate);
        assert!(v.grid().iter().all(|(_, n)| n.is_blocked()));
        assert_eq!(v.update(Command::Quit), Some(Effect::Quit));

        let mut v = open(6, 6);
        v.update(Command::SetStart);
        v.wall_probability = 1.0;
        v.update(Command::Regenerate);
        let s = v.start().unwrap();
        assert!(!v.grid()[s].is_blocked());
        assert_eq!(v.grid().iter().filter(|(_, n)| n.is_blocked()).count(), 35);
    }
}
