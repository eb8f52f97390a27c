// In crates/strategies/src/types.rs

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::moving_average::SmaPolicy;
use crate::signal::ComparisonPolicy;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MACrossoverSettings {
    /// Days in the fast average.
    #[serde(default = "default_short_period")]
    pub short_period: usize,
    /// Days in the slow average.
    #[serde(default = "default_long_period")]
    pub long_period: usize,

    #[serde(default)]
    pub sma_policy: SmaPolicy,
    #[serde(default)]
    pub comparison: ComparisonPolicy,
}

impl Default for MACrossoverSettings {
    fn default() -> Self {
        Self {
            short_period: default_short_period(),
            long_period: default_long_period(),
            sma_policy: SmaPolicy::default(),
            comparison: ComparisonPolicy::default(),
        }
    }
}

impl MACrossoverSettings {
    pub fn validate(&self) -> Result<()> {
        if self.short_period == 0 || self.long_period == 0 {
            return Err(Error::InvalidSettings(format!(
                "periods must be at least 1 (short = {}, long = {})",
                self.short_period, self.long_period
            )));
        }
        if self.short_period >= self.long_period {
            return Err(Error::InvalidSettings(format!(
                "short period {} must be shorter than long period {}",
                self.short_period, self.long_period
            )));
        }
        if let ComparisonPolicy::Tolerance { epsilon } = self.comparison {
            if !epsilon.is_finite() || epsilon < 0.0 {
                return Err(Error::InvalidSettings(format!(
                    "comparison epsilon must be a finite, non-negative number, got {epsilon}"
                )));
            }
        }
        Ok(())
    }
}

/// Helper functions for serde defaults
fn default_short_period() -> usize { 50 }
fn default_long_period() -> usize { 200 }
