use serde::Serialize;
use std::fmt;
use std::hint::black_box;

/// Iteration construct used to walk the sequence and accumulate its sum.
///
/// All five compute the same value; they differ only in per-element overhead
/// (bounds checks, closure calls, key formatting).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// `for (let i = 0; i < len; i++)` style counter loop.
    IndexedCounter,
    /// Counter advanced by hand inside a condition-checked `while`.
    PreTestWhile,
    /// Consumes the elements directly (`for v in seq`).
    SequenceIter,
    /// Enumerates decimal string keys and looks each element up by key.
    KeyEnumeration,
    /// One closure call per element (`for_each`).
    CallbackForEach,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::IndexedCounter,
        Strategy::PreTestWhile,
        Strategy::SequenceIter,
        Strategy::KeyEnumeration,
        Strategy::CallbackForEach,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Strategy::IndexedCounter => "indexed_counter",
            Strategy::PreTestWhile => "pre_test_while",
            Strategy::SequenceIter => "sequence_iter",
            Strategy::KeyEnumeration => "key_enumeration",
            Strategy::CallbackForEach => "callback_for_each",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Strategy::IndexedCounter => "Accumulator with a for",
            Strategy::PreTestWhile => "Accumulator with a while",
            Strategy::SequenceIter => "Accumulator with a for of",
            Strategy::KeyEnumeration => "Accumulator with a for in",
            Strategy::CallbackForEach => "Accumulator with a for each",
        }
    }

    /// Sum every element exactly once, in ascending index order.
    pub fn sum(self, values: &[u64]) -> u128 {
        let values = black_box(values);
        let total = match self {
            Strategy::IndexedCounter => sum_indexed_counter(values),
            Strategy::PreTestWhile => sum_pre_test_while(values),
            Strategy::SequenceIter => sum_sequence_iter(values),
            Strategy::KeyEnumeration => sum_key_enumeration(values),
            Strategy::CallbackForEach => sum_callback_for_each(values),
        };
        black_box(total)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[allow(clippy::needless_range_loop)]
fn sum_indexed_counter(values: &[u64]) -> u128 {
    let mut total = 0u128;
    for i in 0..values.len() {
        total += u128::from(values[i]);
    }
    total
}

fn sum_pre_test_while(values: &[u64]) -> u128 {
    let mut total = 0u128;
    let mut i = 0usize;
    while i < values.len() {
        total += u128::from(values[i]);
        i += 1;
    }
    total
}

fn sum_sequence_iter(values: &[u64]) -> u128 {
    let mut total = 0u128;
    for &value in values {
        total += u128::from(value);
    }
    total
}

// Measures index->string->index round trips; not an idiom to copy.
fn sum_key_enumeration(values: &[u64]) -> u128 {
    let mut total = 0u128;
    for key in (0..values.len()).map(|i| i.to_string()) {
        // A key that fails to parse leaves the sum short, which the runner's
        // consistency check reports.
        if let Ok(index) = key.parse::<usize>()
            && let Some(&value) = values.get(index)
        {
            total += u128::from(value);
        }
    }
    total
}

fn sum_callback_for_each(values: &[u64]) -> u128 {
    let mut total = 0u128;
    values.iter().for_each(|&value| {
        total += u128::from(value);
    });
    total
}
