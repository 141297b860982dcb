use super::stats::TimeStats;
use super::strategies::Strategy;
use crate::error::BenchError;
use crate::sequence::{Sequence, checked_len};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub const DEFAULT_LEN: i64 = 1_000_000;

/// Parameters of one benchmark run.
///
/// The default reproduces a single cold pass over a million elements with
/// every strategy, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub len: i64,
    /// Passes over every strategy whose timings are discarded.
    pub warmup_rounds: usize,
    /// Timed passes over every strategy.
    pub rounds: usize,
    pub strategies: Vec<Strategy>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            len: DEFAULT_LEN,
            warmup_rounds: 0,
            rounds: 1,
            strategies: Strategy::ALL.to_vec(),
        }
    }
}

impl RunConfig {
    pub fn new(len: i64) -> Self {
        Self {
            len,
            ..Self::default()
        }
    }

    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }

    pub fn with_warmup(mut self, warmup_rounds: usize) -> Self {
        self.warmup_rounds = warmup_rounds;
        self
    }

    pub fn with_strategies(mut self, strategies: impl IntoIterator<Item = Strategy>) -> Self {
        self.strategies = strategies.into_iter().collect();
        self
    }

    pub fn validate(&self) -> Result<(), BenchError> {
        checked_len(self.len)?;
        if self.rounds == 0 {
            return Err(BenchError::invalid_input("rounds must be at least 1"));
        }
        if self.strategies.is_empty() {
            return Err(BenchError::invalid_input("at least one strategy must be selected"));
        }
        Ok(())
    }

    /// Configured strategies with duplicates removed, first occurrence wins.
    pub fn ordered_strategies(&self) -> Vec<Strategy> {
        let mut ordered: Vec<Strategy> = Vec::with_capacity(self.strategies.len());
        for strategy in &self.strategies {
            if !ordered.contains(strategy) {
                ordered.push(*strategy);
            }
        }
        ordered
    }
}

/// Timing of one strategy over one pass of the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    pub strategy: Strategy,
    pub elapsed: Duration,
    pub sum: u128,
}

#[derive(Debug, Clone)]
pub struct StrategySummary {
    pub strategy: Strategy,
    /// Sum observed in the first timed round.
    pub sum: u128,
    pub samples: Vec<Duration>,
    pub stats: TimeStats,
    stable: bool,
}

impl StrategySummary {
    fn new(strategy: Strategy, rounds: usize) -> Self {
        Self {
            strategy,
            sum: 0,
            samples: Vec::with_capacity(rounds),
            stats: TimeStats::default(),
            stable: true,
        }
    }

    fn record(&mut self, measurement: Measurement) {
        if self.samples.is_empty() {
            self.sum = measurement.sum;
        } else if measurement.sum != self.sum {
            warn!(
                target: "loopbench::runner",
                strategy = measurement.strategy.key(),
                first = %self.sum,
                observed = %measurement.sum,
                "sum changed between rounds"
            );
            self.stable = false;
        }
        self.samples.push(measurement.elapsed);
    }

    fn finish(&mut self) {
        self.stats = TimeStats::from_samples(&self.samples);
    }

    /// Representative measurement: the median of the timed samples.
    pub fn measurement(&self) -> Measurement {
        Measurement {
            strategy: self.strategy,
            elapsed: self.stats.median(),
            sum: self.sum,
        }
    }

    /// True when every round produced the same sum.
    pub fn is_stable(&self) -> bool {
        self.stable
    }
}

#[derive(Debug, Clone)]
pub struct BenchRun {
    pub len: usize,
    pub warmup_rounds: usize,
    pub rounds: usize,
    pub expected_sum: u128,
    pub summaries: Vec<StrategySummary>,
}

impl BenchRun {
    /// Every strategy agreed with itself across rounds and with `N * (N + 1) / 2`.
    pub fn is_consistent(&self) -> bool {
        self.summaries
            .iter()
            .all(|s| s.is_stable() && s.sum == self.expected_sum)
    }

    /// Summaries ordered by median time, fastest first. Ties keep run order.
    pub fn ranking(&self) -> Vec<&StrategySummary> {
        let mut ranked: Vec<&StrategySummary> = self.summaries.iter().collect();
        ranked.sort_by(|a, b| {
            a.stats
                .median_ns
                .partial_cmp(&b.stats.median_ns)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked
    }

    pub fn measurements(&self) -> Vec<Measurement> {
        self.summaries.iter().map(StrategySummary::measurement).collect()
    }
}

/// Time a single strategy over the sequence. Construction is not included.
pub fn measure_once(strategy: Strategy, sequence: &Sequence) -> Measurement {
    let start = Instant::now();
    let sum = strategy.sum(sequence.as_slice());
    let elapsed = start.elapsed();
    Measurement { strategy, elapsed, sum }
}

/// Single cold pass of all five strategies over `1..=n`.
pub fn measure_iteration_strategies(n: i64) -> Result<Vec<Measurement>, BenchError> {
    run_benchmark(&RunConfig::new(n)).map(|run| run.measurements())
}

pub fn run_benchmark(config: &RunConfig) -> Result<BenchRun, BenchError> {
    config.validate()?;
    let strategies = config.ordered_strategies();
    let sequence = Sequence::build(config.len)?;
    let expected_sum = sequence.expected_sum();

    info!(
        target: "loopbench::runner",
        len = sequence.len(),
        warmup_rounds = config.warmup_rounds,
        rounds = config.rounds,
        strategies = strategies.len(),
        "starting benchmark run"
    );

    for round in 0..config.warmup_rounds {
        for &strategy in &strategies {
            let warm = measure_once(strategy, &sequence);
            debug!(
                target: "loopbench::runner",
                round,
                strategy = strategy.key(),
                elapsed_ns = warm.elapsed.as_nanos() as u64,
                "warm-up sample discarded"
            );
        }
    }

    let mut summaries: Vec<StrategySummary> = strategies
        .iter()
        .map(|&strategy| StrategySummary::new(strategy, config.rounds))
        .collect();

    for round in 0..config.rounds {
        for summary in summaries.iter_mut() {
            let measurement = measure_once(summary.strategy, &sequence);
            debug!(
                target: "loopbench::runner",
                round,
                strategy = measurement.strategy.key(),
                elapsed_ns = measurement.elapsed.as_nanos() as u64,
                sum = %measurement.sum,
                "timed sample"
            );
            summary.record(measurement);
        }
    }

    for summary in summaries.iter_mut() {
        summary.finish();
        if summary.sum != expected_sum {
            warn!(
                target: "loopbench::runner",
                strategy = summary.strategy.key(),
                expected = %expected_sum,
                observed = %summary.sum,
                "strategy sum disagrees with closed form"
            );
        }
    }

    info!(target: "loopbench::runner", len = sequence.len(), "benchmark run finished");

    Ok(BenchRun {
        len: sequence.len(),
        warmup_rounds: config.warmup_rounds,
        rounds: config.rounds,
        expected_sum,
        summaries,
    })
}
