// In crates/strategies/src/signal.rs

use std::cmp::Ordering;

use core_types::Signal;
use serde::{Deserialize, Serialize};

/// When two averages count as equal.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ComparisonPolicy {
    /// Only bit-for-bit equal values are a tie. Derived averages rarely are.
    #[default]
    Exact,
    /// Values within `epsilon` of each other are a tie.
    Tolerance { epsilon: f64 },
}

/// Maps a short-window and long-window average to a crossover signal.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalEvaluator {
    policy: ComparisonPolicy,
}

impl SignalEvaluator {
    pub fn new(policy: ComparisonPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ComparisonPolicy {
        self.policy
    }

    /// `Buy` when the short average is above the long one, `Sell` when below,
    /// `Hold` on a tie. A NaN on either side is never a crossover.
    pub fn evaluate(&self, short_value: f64, long_value: f64) -> Signal {
        if let ComparisonPolicy::Tolerance { epsilon } = self.policy {
            if (short_value - long_value).abs() <= epsilon {
                return Signal::Hold;
            }
        }

        match short_value.partial_cmp(&long_value) {
            Some(Ordering::Greater) => Signal::Buy,
            Some(Ordering::Less) => Signal::Sell,
            Some(Ordering::Equal) | None => Signal::Hold,
        }
    }
}

/// Exact-comparison evaluation.
pub fn evaluate(short_value: f64, long_value: f64) -> Signal {
    SignalEvaluator::default().evaluate(short_value, long_value)
}
