//! Benchmark support for the GDP decoder crates.

pub mod utils;
