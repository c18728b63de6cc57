//! Comparison of an accelerated kernel's output against a reference output.
//!
//! Two policies: [`exact_match`] for kernels that must reproduce the
//! reference bit-exact up to an integer tolerance (dilation, threshold), and
//! [`with_tolerance`] for kernels where a bounded fraction of pixels may
//! differ by rounding (Gaussian blur).

use rk_core::Error;

/// Outcome of comparing two buffers of identical geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub passed: bool,
    /// Number of elements compared (`width * height`).
    pub total: usize,
    /// Elements whose absolute difference exceeded the tolerance.
    pub mismatches: usize,
    /// Largest absolute difference seen anywhere, tolerated or not.
    pub max_error: f32,
    /// Flat index of the first element exceeding the tolerance.
    pub first_mismatch: Option<usize>,
}

impl Comparison {
    pub fn mismatch_rate(&self) -> f32 {
        self.mismatches as f32 / self.total as f32
    }
}

/// Compares element-wise with an integer tolerance; passes only if no
/// element differs by more than `tolerance` (use 0 for bit-exact kernels).
pub fn exact_match(
    actual: &[u8],
    reference: &[u8],
    width: usize,
    height: usize,
    tolerance: u8,
) -> Result<Comparison, Error> {
    let total = checked_total(actual, reference, width, height)?;
    let mut cmp = compare(actual, reference, total, f32::from(tolerance));
    cmp.passed = cmp.mismatches == 0;
    Ok(cmp)
}

/// Compares element-wise with a float tolerance; passes if the fraction of
/// elements differing by more than `tolerance` does not exceed
/// `max_mismatch_rate`.
pub fn with_tolerance(
    actual: &[u8],
    reference: &[u8],
    width: usize,
    height: usize,
    tolerance: f32,
    max_mismatch_rate: f32,
) -> Result<Comparison, Error> {
    let total = checked_total(actual, reference, width, height)?;
    let mut cmp = compare(actual, reference, total, tolerance);
    cmp.passed = cmp.mismatch_rate() <= max_mismatch_rate;
    Ok(cmp)
}

fn checked_total(
    actual: &[u8],
    reference: &[u8],
    width: usize,
    height: usize,
) -> Result<usize, Error> {
    if width == 0 || height == 0 {
        return Err(Error::EmptyImage);
    }

    let total = width.checked_mul(height).ok_or(Error::SizeMismatch {
        expected: usize::MAX,
        actual: actual.len(),
    })?;

    for len in [actual.len(), reference.len()] {
        if len < total {
            return Err(Error::SizeMismatch {
                expected: total,
                actual: len,
            });
        }
    }

    Ok(total)
}

fn compare(actual: &[u8], reference: &[u8], total: usize, tolerance: f32) -> Comparison {
    let mut mismatches = 0usize;
    let mut max_error = 0.0f32;
    let mut first_mismatch = None;

    for (i, (&a, &r)) in actual[..total].iter().zip(&reference[..total]).enumerate() {
        let diff = (f32::from(a) - f32::from(r)).abs();
        if diff > max_error {
            max_error = diff;
        }
        if diff > tolerance {
            mismatches += 1;
            if first_mismatch.is_none() {
                first_mismatch = Some(i);
            }
        }
    }

    Comparison {
        passed: false,
        total,
        mismatches,
        max_error,
        first_mismatch,
    }
}
