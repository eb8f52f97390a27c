// In crates/strategies/src/lib.rs

use core_types::{AverageFamily, PriceSeries, Result};

pub mod error;
pub mod ma_crossover;
pub mod moving_average;
pub mod signal;
pub mod types;

pub use error::Error;
pub use ma_crossover::{Assessment, CrossoverReport, EmaCrossover, MACrossover, SmaCrossover};
pub use moving_average::{MovingAverageEngine, SmaPolicy, SmaReport, compute_ema, compute_sma};
pub use signal::{ComparisonPolicy, SignalEvaluator, evaluate};
pub use types::MACrossoverSettings;

/// The universal interface for a crossover strategy.
///
/// A strategy reads a newest-first price series and turns one family of
/// averages into a trading `Signal`. Strategies hold no state between calls,
/// so the same instance can assess any number of series.
pub trait Strategy {
    /// The name of the strategy.
    fn name(&self) -> &'static str;

    /// Which family of moving averages the strategy compares.
    fn family(&self) -> AverageFamily;

    fn assess(&self, series: &PriceSeries) -> Result<Assessment>;
}
