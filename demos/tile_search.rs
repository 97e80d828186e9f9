//! Animated A* / Dijkstra on a tile map in the terminal.
//!
//! Run: cargo run --bin tile-search -- --diagonals --wait-ms 50

use clap::Parser;
use tilesearch_demos::{DemoConfig, run};

fn main() {
    let cfg = DemoConfig::parse();

    if let Err(e) = run(&cfg, std::io::stdout()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
