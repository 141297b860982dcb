use crate::perf::{BenchRun, StrategySummary};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(Debug, Serialize)]
pub struct StrategyMetrics {
    pub strategy: String,
    pub label: String,
    pub sum: u128,
    pub samples: usize,
    pub min_ns: f64,
    pub mean_ns: f64,
    pub median_ns: f64,
    pub p95_ns: f64,
    pub max_ns: f64,
    pub std_dev_ns: f64,
}

impl From<&StrategySummary> for StrategyMetrics {
    fn from(summary: &StrategySummary) -> Self {
        Self {
            strategy: summary.strategy.key().to_string(),
            label: summary.strategy.label().to_string(),
            sum: summary.sum,
            samples: summary.samples.len(),
            min_ns: summary.stats.min_ns,
            mean_ns: summary.stats.mean_ns,
            median_ns: summary.stats.median_ns,
            p95_ns: summary.stats.p95_ns,
            max_ns: summary.stats.max_ns,
            std_dev_ns: summary.stats.std_dev_ns,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RunRecord {
    pub generated_at: String,
    pub len: usize,
    pub warmup_rounds: usize,
    pub rounds: usize,
    pub expected_sum: u128,
    pub consistent: bool,
    pub metrics: Vec<StrategyMetrics>,
}

impl RunRecord {
    pub fn new(run: &BenchRun, timestamp: DateTime<Utc>) -> Self {
        Self {
            generated_at: timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            len: run.len,
            warmup_rounds: run.warmup_rounds,
            rounds: run.rounds,
            expected_sum: run.expected_sum,
            consistent: run.is_consistent(),
            metrics: run.summaries.iter().map(StrategyMetrics::from).collect(),
        }
    }
}

pub fn render<W: Write>(run: &BenchRun, format: ReportFormat, timestamp: DateTime<Utc>, writer: &mut W) -> io::Result<()> {
    match format {
        ReportFormat::Text => write_text(run, writer),
        ReportFormat::Json => write_json(&RunRecord::new(run, timestamp), writer),
        ReportFormat::Csv => write_csv(&RunRecord::new(run, timestamp).metrics, writer),
    }
}

pub fn write_text<W: Write>(run: &BenchRun, writer: &mut W) -> io::Result<()> {
    writeln!(
        writer,
        "Length of the sequence: {} (expected sum {}, {} timed round{}, {} warm-up)",
        run.len,
        run.expected_sum,
        run.rounds,
        if run.rounds == 1 { "" } else { "s" },
        run.warmup_rounds
    )?;
    for summary in &run.summaries {
        writeln!(
            writer,
            "{}: {:?} (sum {})",
            summary.strategy.label(),
            summary.stats.median(),
            summary.sum
        )?;
    }

    let ranked = run.ranking();
    let fastest_ns = ranked.first().map(|s| s.stats.median_ns).unwrap_or(0.0);
    writeln!(writer)?;
    writeln!(writer, "Fastest to slowest:")?;
    for (pos, summary) in ranked.iter().enumerate() {
        writeln!(
            writer,
            "  {}. {:<30} {:>12}  {}",
            pos + 1,
            summary.strategy.label(),
            format!("{:?}", summary.stats.median()),
            relative(summary.stats.median_ns, fastest_ns)
        )?;
    }
    writeln!(
        writer,
        "Sums consistent: {}",
        if run.is_consistent() { "yes" } else { "NO" }
    )?;
    writer.flush()
}

fn relative(median_ns: f64, fastest_ns: f64) -> String {
    if fastest_ns > 0.0 {
        format!("{:.2}x", median_ns / fastest_ns)
    } else {
        "-".to_string()
    }
}

pub fn write_json<W: Write>(record: &RunRecord, writer: &mut W) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, record)?;
    writeln!(writer)?;
    writer.flush()
}

pub fn write_csv<W: Write>(metrics: &[StrategyMetrics], writer: &mut W) -> io::Result<()> {
    writeln!(
        writer,
        "strategy,label,sum,samples,min_ns,mean_ns,median_ns,p95_ns,max_ns,std_dev_ns"
    )?;
    for metric in metrics {
        writeln!(
            writer,
            "{},{},{},{},{:.3},{:.3},{:.3},{:.3},{:.3},{:.3}",
            metric.strategy,
            metric.label,
            metric.sum,
            metric.samples,
            metric.min_ns,
            metric.mean_ns,
            metric.median_ns,
            metric.p95_ns,
            metric.max_ns,
            metric.std_dev_ns
        )?;
    }
    writer.flush()
}
