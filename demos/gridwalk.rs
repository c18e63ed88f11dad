//! Terminal search visualiser.
//!
//! Run: cargo run --bin gridwalk -- --help

use clap::Parser;
use gridwalk_demos::{DemoConfig, logger};

fn main() {
    let config = DemoConfig::parse();
    let feed = match logger::install(config.log_level.into()) {
        Ok(feed) => feed,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = gridwalk_demos::run(&config, feed) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
