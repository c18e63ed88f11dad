//! A `log` backend that keeps recent records for the status bar.
//!
//! The terminal is in raw mode on the alternate screen while the demo runs,
//! so records cannot go to stderr.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

const KEEP: usize = 64;

/// Shared buffer of formatted log lines, newest last.
#[derive(Clone, Debug, Default)]
pub struct LogFeed(Arc<Mutex<VecDeque<String>>>);

impl LogFeed {
    fn lock(&self) -> MutexGuard<'_, VecDeque<String>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push(&self, line: String) {
        let mut q = self.lock();
        if q.len() == KEEP {
            q.pop_front();
        }
        q.push_back(line);
    }

    /// The most recent line.
    pub fn last(&self) -> Option<String> {
        self.lock().back().cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

/// [`Log`] implementation writing into a [`LogFeed`].
#[derive(Debug)]
pub struct StatusLog {
    level: LevelFilter,
    feed: LogFeed,
}

impl StatusLog {
    pub fn new(level: LevelFilter) -> Self {
        Self {
            level,
            feed: LogFeed::default(),
        }
    }

    pub fn feed(&self) -> LogFeed {
        self.feed.clone()
    }
}

impl Log for StatusLog {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            self.feed.push(format!("{:<5} {}", record.level(), record.args()));
        }
    }

    fn flush(&self) {}
}

/// Install a [`StatusLog`] as the global logger and return its feed.
pub fn install(level: LevelFilter) -> Result<LogFeed, SetLoggerError> {
    let logger = StatusLog::new(level);
    let feed = logger.feed();
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(level);
    Ok(feed)
}
