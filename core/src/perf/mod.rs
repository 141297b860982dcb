//! Iteration strategy benchmark: the five summation loops, the runner that
//! times them, and the statistics reported for each.
//!
//! The Criterion bench and the CLI both go through these types so the two
//! never time different loops.

pub mod runner;
pub mod stats;
pub mod strategies;


pub use runner::{
    BenchRun, DEFAULT_LEN, Measurement, RunConfig, StrategySummary, measure_iteration_strategies, measure_once,
    run_benchmark,
};
pub use stats::TimeStats;
pub use strategies::Strategy;
