// src/validate.rs

use crate::common::{Result, VerifyError};
use std::fmt;
use tracing::{debug, info};

/// Largest relative error a single output value may have.
pub const SAMPLE_ERROR_THRESHOLD: f32 = 0.05;
/// Largest fraction of mismatches per complex point for a passing run.
pub const RUN_ERROR_THRESHOLD: f64 = 0.001;

/// What to do when the golden value is exactly zero and the relative error
/// is undefined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ZeroPolicy {
    /// Compare `|actual|` against the same threshold as an absolute error.
    #[default]
    AbsoluteFallback,
    /// Any nonzero actual value is a mismatch.
    StrictMismatch,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValidationReport {
    /// Values whose error exceeded the threshold
    pub errors: usize,
    /// Values compared
    pub total: usize,
    pub threshold: f32,
}

/// Outcome of a whole run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    /// PASS iff `errors / points <= threshold`. `points` is the number of
    /// complex points, not the number of compared values.
    pub fn from_ratio(errors: usize, points: usize, threshold: f64) -> Self {
        if points == 0 {
            return if errors == 0 { Verdict::Pass } else { Verdict::Fail };
        }
        if errors as f64 / points as f64 > threshold {
            Verdict::Fail
        } else {
            Verdict::Pass
        }
    }

    pub fn is_pass(self) -> bool {
        self == Verdict::Pass
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Pass => write!(f, "PASS"),
            Verdict::Fail => write!(f, "FAIL"),
        }
    }
}

/// Counts golden/actual pairs whose relative error is above a threshold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Validator {
    threshold: f32,
    zero_policy: ZeroPolicy,
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            threshold: SAMPLE_ERROR_THRESHOLD,
            zero_policy: ZeroPolicy::default(),
        }
    }
}

impl Validator {
    pub fn new(threshold: f32, zero_policy: ZeroPolicy) -> Result<Self> {
        if !(threshold.is_finite() && threshold > 0.0) {
            return Err(VerifyError::invalid_config(format!(
                "sample error threshold {threshold} must be positive"
            )));
        }
        Ok(Self {
            threshold,
            zero_policy,
        })
    }

    pub fn is_mismatch(&self, golden: f32, actual: f32) -> bool {
        let diff = (golden - actual).abs();
        if golden == 0.0 {
            return match self.zero_policy {
                ZeroPolicy::AbsoluteFallback => !(diff <= self.threshold),
                ZeroPolicy::StrictMismatch => actual != 0.0,
            };
        }
        // NaN compares false, so it lands on the mismatch side
        !(diff / golden.abs() <= self.threshold)
    }

    pub fn validate(&self, golden: &[f32], actual: &[f32]) -> Result<ValidationReport> {
        if golden.len() != actual.len() {
            return Err(VerifyError::size_mismatch(golden.len(), actual.len()));
        }

        let mut errors = 0;
        for (j, (&gold, &out)) in golden.iter().zip(actual).enumerate() {
            let flag = self.is_mismatch(gold, out);
            if flag {
                errors += 1;
            }
            debug!(
                "[{}]: {} (expected {}){}",
                j,
                out,
                gold,
                if flag { " !!!" } else { "" }
            );
        }

        info!(
            "relative error > {:.2} for {} output values out of {}",
            self.threshold,
            errors,
            golden.len()
        );

        Ok(ValidationReport {
            errors,
            total: golden.len(),
            threshold: self.threshold,
        })
    }
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
