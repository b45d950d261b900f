//! Experiment grid options.
//!
//! Plain data validated once, before any cell runs. Violations are fatal
//! configuration errors; nothing numerical lives here.

use crate::core::precision::Precision;
use crate::error::LabError;
use crate::matrix::family::{Family, FamilyParams};

/// Grid configuration for one family of experiments.
#[derive(Debug, Clone)]
pub struct LabOptions {
    /// Matrix generator rule.
    pub family: Family,
    /// Ascending problem sizes, one per cell.
    pub sizes: Vec<usize>,
    /// Working precisions to run each size at.
    pub precisions: Vec<Precision>,
    /// Seed for the reference-solution generator.
    pub seed: u64,
    /// Family parameters (tridiagonal diagonal coefficients).
    pub params: FamilyParams,
}

impl LabOptions {
    /// Options with the default grid parameters (seed 30, m = 4, k = 5,
    /// both precisions).
    pub fn new(family: Family, sizes: Vec<usize>) -> Self {
        LabOptions {
            family,
            sizes,
            precisions: vec![Precision::Single, Precision::Double],
            seed: 30,
            params: FamilyParams::default(),
        }
    }

    /// Check the grid before running: non-empty strictly ascending positive
    /// sizes and a non-empty precision list.
    pub fn validate(&self) -> Result<(), LabError> {
        if self.sizes.is_empty() {
            return Err(LabError::InvalidConfig("empty size list".into()));
        }
        if self.sizes[0] < 1 {
            return Err(LabError::InvalidConfig(format!(
                "size {} is below the minimum of 1",
                self.sizes[0]
            )));
        }
        for w in self.sizes.windows(2) {
            if w[1] <= w[0] {
                return Err(LabError::InvalidConfig(format!(
                    "sizes must be strictly ascending ({} follows {})",
                    w[1], w[0]
                )));
            }
        }
        if self.precisions.is_empty() {
            return Err(LabError::InvalidConfig("empty precision list".into()));
        }
        Ok(())
    }
}
