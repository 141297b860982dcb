pub mod error;
pub mod perf;
pub mod report;
pub mod sequence;


pub use error::BenchError;
