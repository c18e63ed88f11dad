//! Interactive terminal visualiser for the gridwalk searches.
//!
//! Move the cursor with the arrow keys (or `hjkl`, or a mouse click), mark
//! the start with `s` and the end with `e`, toggle walls with `w`, then
//! press `a` (A*), `d` (Dijkstra) or `p` (depth-first) to watch the search.

pub mod app;
pub mod config;
pub mod logger;
pub mod paint;
pub mod term;

use std::time::Duration;

pub use app::{Command, Effect, Visualizer};
pub use config::DemoConfig;
pub use logger::LogFeed;

use term::{LivePacer, Terminal};

/// Run the visualiser until the user quits.
pub fn run(config: &DemoConfig, feed: LogFeed) -> Result<(), Box<dyn std::error::Error>> {
    let mut vis = Visualizer::new(config);
    let mut term = Terminal::init()?;

    loop {
        let last = feed.last();
        term.draw(&vis.canvas(), Some(vis.cursor()), &vis.status(), last.as_deref())?;

        let Some(cmd) = term.next_command(Duration::from_millis(250))? else {
            continue;
        };
        match vis.update(cmd) {
            Some(Effect::Quit) => break,
            Some(Effect::Search(algo)) => {
                let mut pacer = LivePacer::new(&mut term, vis.layout(), feed.clone());
                vis.search(algo, &mut pacer);
                pacer.finish()?;
            }
            None => {}
        }
    }

    term.close();
    Ok(())
}
