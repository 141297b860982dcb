use crate::error::BenchError;

/// Ordered container under test: position `i` holds the value `i + 1`.
///
/// Built once per run and only read while strategies are being timed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    values: Vec<u64>,
}

impl Sequence {
    /// Build a sequence of `len` elements.
    ///
    /// The buffer is zero-filled first and then every slot is mapped to its
    /// one-based position, so construction cost stays outside any timing.
    pub fn build(len: i64) -> Result<Self, BenchError> {
        let len = checked_len(len)?;
        let mut values: Vec<u64> = Vec::new();
        values.try_reserve_exact(len).map_err(|err| {
            BenchError::invalid_input(format!("cannot allocate a sequence of {} elements: {}", len, err))
        })?;
        values.resize(len, 0);
        for (index, slot) in values.iter_mut().enumerate() {
            *slot = index as u64 + 1;
        }
        Ok(Self { values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.values
    }

    /// Closed-form sum `N * (N + 1) / 2`, widened to `u128`.
    pub fn expected_sum(&self) -> u128 {
        expected_sum(self.values.len())
    }
}

/// Closed-form sum of `1..=len`.
///
/// `u128` holds the result for every length a `Vec<u64>` can reach, so the
/// accumulators never overflow.
pub fn expected_sum(len: usize) -> u128 {
    let n = len as u128;
    n * (n + 1) / 2
}

pub(crate) fn checked_len(len: i64) -> Result<usize, BenchError> {
    if len <= 0 {
        return Err(BenchError::invalid_input(format!(
            "sequence length must be a positive integer, got {}",
            len
        )));
    }
    usize::try_from(len).map_err(|_| {
        BenchError::invalid_input(format!("sequence length {} does not fit this platform's address space", len))
    })
}
