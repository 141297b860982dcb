use std::io::Write;
use std::sync::Once;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use loopbench_core::{
    perf::{DEFAULT_LEN, RunConfig, Strategy, run_benchmark},
    report::{self, ReportFormat},
};


static TRACE_INIT: Once = Once::new();
const TRACE_ENV: &str = "LOOPBENCH_TRACE";
const DEFAULT_TRACE_FILTER: &str = "loopbench::runner=debug,loopbench=info";

#[derive(Debug, Parser)]
#[command(
    name = "loopbench",
    version,
    about = "Time equivalent summation loops over the sequence 1..=N",
    long_about = None,
    after_help = "Timings are environment specific; only the sums are comparable across machines."
)]
struct CliArgs {
    /// Length of the sequence to sum
    #[arg(value_name = "N", default_value_t = DEFAULT_LEN, allow_negative_numbers = true)]
    len: i64,

    /// Timed passes over every strategy
    #[arg(long, default_value_t = 1)]
    rounds: usize,

    /// Untimed passes run before measuring
    #[arg(long, default_value_t = 0)]
    warmup: usize,

    /// Only run the given strategy (repeat to select several)
    #[arg(long = "strategy", value_enum, value_name = "STRATEGY")]
    strategies: Vec<StrategyArg>,

    /// Report format written to stdout
    #[arg(long, value_enum, default_value_t = FormatArg::Text)]
    format: FormatArg,

    /// Override the `generated_at` timestamp of JSON reports (RFC3339)
    #[arg(long, value_parser = parse_timestamp)]
    timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    #[value(name = "indexed_counter", alias = "for")]
    IndexedCounter,
    #[value(name = "pre_test_while", alias = "while")]
    PreTestWhile,
    #[value(name = "sequence_iter", alias = "for_of")]
    SequenceIter,
    #[value(name = "key_enumeration", alias = "for_in")]
    KeyEnumeration,
    #[value(name = "callback_for_each", alias = "for_each")]
    CallbackForEach,
}

impl From<StrategyArg> for Strategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::IndexedCounter => Strategy::IndexedCounter,
            StrategyArg::PreTestWhile => Strategy::PreTestWhile,
            StrategyArg::SequenceIter => Strategy::SequenceIter,
            StrategyArg::KeyEnumeration => Strategy::KeyEnumeration,
            StrategyArg::CallbackForEach => Strategy::CallbackForEach,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Text,
    Json,
    Csv,
}

impl From<FormatArg> for ReportFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Text => ReportFormat::Text,
            FormatArg::Json => ReportFormat::Json,
            FormatArg::Csv => ReportFormat::Csv,
        }
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| format!("expected RFC3339 timestamp: {}", e))
}

impl CliArgs {
    fn run_config(&self) -> RunConfig {
        let config = RunConfig::new(self.len)
            .with_rounds(self.rounds)
            .with_warmup(self.warmup);
        if self.strategies.is_empty() {
            config
        } else {
            config.with_strategies(self.strategies.iter().copied().map(Strategy::from))
        }
    }
}

/// False for an empty value or "0"/"false"/"off" (any case).
fn env_toggle_enabled(raw: &str) -> bool {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return false;
    }
    !(trimmed.eq_ignore_ascii_case("0") || trimmed.eq_ignore_ascii_case("false") || trimmed.eq_ignore_ascii_case("off"))
}

/// Treat the toggle value as an `EnvFilter` expression unless it is a plain
/// "1"/"true"/"on".
fn filter_expr_from(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("1")
        || trimmed.eq_ignore_ascii_case("true")
        || trimmed.eq_ignore_ascii_case("on")
    {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Install a stderr subscriber when `LOOPBENCH_TRACE` is enabled. Falls back
/// to `RUST_LOG`, then to `DEFAULT_TRACE_FILTER`.
fn maybe_init_tracing() {
    let raw = match std::env::var(TRACE_ENV) {
        Ok(value) => value,
        Err(_) => return,
    };

    if !env_toggle_enabled(&raw) {
        return;
    }

    TRACE_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        use tracing_subscriber::fmt;

        let filter_expr = filter_expr_from(&raw).or_else(|| std::env::var("RUST_LOG").ok());

        // stdout carries the report; traces go to stderr
        let builder = fmt().with_writer(std::io::stderr);

        let builder = match filter_expr.and_then(|expr| EnvFilter::try_new(expr).ok()) {
            Some(filter) => builder.with_env_filter(filter),
            None => builder.with_env_filter(DEFAULT_TRACE_FILTER),
        };

        let _ = builder.try_init();
    });
}

fn main() -> anyhow::Result<()> {
    maybe_init_tracing();

    let args = CliArgs::parse();
    let config = args.run_config();
    tracing::info!(len = config.len, rounds = config.rounds, "running loop benchmark");

    let run = run_benchmark(&config).context("benchmark run failed")?;
    let timestamp = args.timestamp.unwrap_or_else(Utc::now);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    report::render(&run, args.format.into(), timestamp, &mut out).context("write report to stdout")?;
    out.flush()?;

    if !run.is_consistent() {
        anyhow::bail!(
            "strategies disagree on the sum of 1..={} (expected {})",
            run.len,
            run.expected_sum
        );
    }
    Ok(())
}
