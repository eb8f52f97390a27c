// In crates/strategies/src/ma_crossover.rs

use std::collections::BTreeSet;

use core_types::{AverageFamily, EmaSeries, Error, PriceSeries, Result, Signal, Window};

use crate::error;
use crate::moving_average::MovingAverageEngine;
use crate::signal::SignalEvaluator;
use crate::types::MACrossoverSettings;
use crate::Strategy;

/// The short/long comparison produced by one average family.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub family: AverageFamily,
    pub short_value: f64,
    pub long_value: f64,
    pub signal: Signal,
    /// Indices the SMA had to skip as non-numeric. Always empty for the EMA.
    pub skipped: Vec<usize>,
    /// Full trajectories, only present for the EMA family.
    pub short_trajectory: Option<EmaSeries>,
    pub long_trajectory: Option<EmaSeries>,
}

/// Compares the SMA over the latest `short_period` days with the SMA over the
/// latest `long_period` days.
#[derive(Debug, Clone)]
pub struct SmaCrossover {
    engine: MovingAverageEngine,
    evaluator: SignalEvaluator,
    short_period: usize,
    long_period: usize,
}

impl SmaCrossover {
    pub fn new(settings: &MACrossoverSettings) -> Self {
        Self {
            engine: MovingAverageEngine::new(settings.sma_policy),
            evaluator: SignalEvaluator::new(settings.comparison),
            short_period: settings.short_period,
            long_period: settings.long_period,
        }
    }
}

impl Strategy for SmaCrossover {
    fn name(&self) -> &'static str {
        "SmaCrossover"
    }

    fn family(&self) -> AverageFamily {
        AverageFamily::Sma
    }

    fn assess(&self, series: &PriceSeries) -> Result<Assessment> {
        let short = self.engine.sma_report(series, Window::leading(self.short_period)?)?;
        let long = self.engine.sma_report(series, Window::leading(self.long_period)?)?;

        let skipped: BTreeSet<usize> = short.skipped.iter().chain(&long.skipped).copied().collect();

        Ok(Assessment {
            family: self.family(),
            short_value: short.value,
            long_value: long.value,
            signal: self.evaluator.evaluate(short.value, long.value),
            skipped: skipped.into_iter().collect(),
            short_trajectory: None,
            long_trajectory: None,
        })
    }
}

/// Compares the most recent values of the short and long EMA trajectories.
#[derive(Debug, Clone)]
pub struct EmaCrossover {
    engine: MovingAverageEngine,
    evaluator: SignalEvaluator,
    short_period: usize,
    long_period: usize,
}

impl EmaCrossover {
    pub fn new(settings: &MACrossoverSettings) -> Self {
        Self {
            engine: MovingAverageEngine::new(settings.sma_policy),
            evaluator: SignalEvaluator::new(settings.comparison),
            short_period: settings.short_period,
            long_period: settings.long_period,
        }
    }
}

impl Strategy for EmaCrossover {
    fn name(&self) -> &'static str {
        "EmaCrossover"
    }

    fn family(&self) -> AverageFamily {
        AverageFamily::Ema
    }

    fn assess(&self, series: &PriceSeries) -> Result<Assessment> {
        let short = self.engine.ema(series, self.short_period)?;
        let long = self.engine.ema(series, self.long_period)?;

        let short_value = short.latest().ok_or(Error::EmptySeries)?;
        let long_value = long.latest().ok_or(Error::EmptySeries)?;

        Ok(Assessment {
            family: self.family(),
            short_value,
            long_value,
            signal: self.evaluator.evaluate(short_value, long_value),
            skipped: Vec::new(),
            short_trajectory: Some(short),
            long_trajectory: Some(long),
        })
    }
}

/// Everything one pass over a price series produces.
///
/// Each family carries its own result, so a window that is too long for the
/// EMA (or a malformed price it cannot skip) still leaves the SMA signal usable.
#[derive(Debug, Clone)]
pub struct CrossoverReport {
    pub current_price: Result<f64>,
    pub sma: Result<Assessment>,
    pub ema: Result<Assessment>,
}

/// Runs the SMA and EMA crossovers side by side over the same series.
#[derive(Debug, Clone)]
pub struct MACrossover {
    settings: MACrossoverSettings,
    sma: SmaCrossover,
    ema: EmaCrossover,
}

impl MACrossover {
    /// Creates a new `MACrossover` from validated settings.
    pub fn new(settings: MACrossoverSettings) -> error::Result<Self> {
        settings.validate()?;
        Ok(Self {
            sma: SmaCrossover::new(&settings),
            ema: EmaCrossover::new(&settings),
            settings,
        })
    }

    pub fn settings(&self) -> &MACrossoverSettings {
        &self.settings
    }

    pub fn assess(&self, series: &PriceSeries) -> CrossoverReport {
        CrossoverReport {
            current_price: series.latest(),
            sma: self.sma.assess(series),
            ema: self.ema.assess(series),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moving_average::SmaPolicy;

    fn settings(short: usize, long: usize) -> MACrossoverSettings {
        MACrossoverSettings {
            short_period: short,
            long_period: long,
            ..Default::default()
        }
    }

    #[test]
    fn rising_prices_are_a_buy() {
        // Newest first: the latest days are the most expensive.
        let series = PriceSeries::from_values(&[10.0, 9.0, 8.0, 7.0, 6.0, 5.0]).unwrap();
        let report = MACrossover::new(settings(2, 4)).unwrap().assess(&series);

        assert_eq!(report.current_price, Ok(10.0));
        let sma = report.sma.unwrap();
        assert_eq!(sma.short_value, 9.5);
        assert_eq!(sma.long_value, 8.5);
        assert_eq!(sma.signal, Signal::Buy);
        assert!(sma.short_trajectory.is_none());

        let ema = report.ema.unwrap();
        assert_eq!(ema.family, AverageFamily::Ema);
        assert_eq!(ema.short_value, 9.5);
        assert_eq!(ema.long_value, 8.5);
        assert_eq!(ema.signal, Signal::Buy);
        assert_eq!(ema.short_trajectory.as_ref().map(EmaSeries::len), Some(6));
        assert_eq!(ema.long_trajectory.as_ref().map(EmaSeries::period), Some(4));
    }

    #[test]
    fn falling_prices_are_a_sell() {
        let series = PriceSeries::from_values(&[5.0, 6.0, 7.0, 8.0, 9.0, 10.0]).unwrap();
        let report = MACrossover::new(settings(2, 4)).unwrap().assess(&series);
        assert_eq!(report.sma.unwrap().signal, Signal::Sell);
        assert_eq!(report.ema.unwrap().signal, Signal::Sell);
    }

    #[test]
    fn flat_prices_hold() {
        let series = PriceSeries::from_values(&[50.0; 5]).unwrap();
        let report = MACrossover::new(settings(2, 3)).unwrap().assess(&series);
        assert_eq!(report.sma.unwrap().signal, Signal::Hold);
        assert_eq!(report.ema.unwrap().signal, Signal::Hold);
    }

    #[test]
    fn families_fail_independently() {
        let series = PriceSeries::from_strings(["12", "11", "10", "oops"]).unwrap();
        let report = MACrossover::new(settings(2, 3)).unwrap().assess(&series);

        let sma = report.sma.unwrap();
        assert_eq!(sma.signal, Signal::Buy);
        assert!(sma.skipped.is_empty());

        assert_eq!(
            report.ema.unwrap_err(),
            Error::Conversion {
                index: 3,
                value: "oops".to_string()
            }
        );
    }

    #[test]
    fn short_series_fails_both_families_with_typed_errors() {
        let series = PriceSeries::from_values(&[1.0, 2.0]).unwrap();
        let report = MACrossover::new(settings(2, 3)).unwrap().assess(&series);
        assert!(matches!(report.sma, Err(Error::OutOfRange { .. })));
        assert!(matches!(report.ema, Err(Error::InsufficientData { .. })));
    }

    #[test]
    fn sma_reports_skipped_entries() {
        let series = PriceSeries::from_strings(["9", "n/a", "9", "9"]).unwrap();
        let crossover = SmaCrossover::new(&MACrossoverSettings {
            sma_policy: SmaPolicy::Legacy,
            ..settings(2, 4)
        });
        let assessment = crossover.assess(&series).unwrap();
        assert_eq!(assessment.skipped, vec![1]);
        assert_eq!(assessment.short_value, 4.5);
        assert_eq!(assessment.long_value, 6.75);
    }

    #[test]
    fn invalid_settings_are_rejected() {
        assert!(MACrossover::new(settings(5, 5)).is_err());
    }

    #[test]
    fn strategies_are_usable_as_trait_objects() {
        let cfg = settings(2, 3);
        let strategies: Vec<Box<dyn Strategy + Send + Sync>> =
            vec![Box::new(SmaCrossover::new(&cfg)), Box::new(EmaCrossover::new(&cfg))];
        let series = PriceSeries::from_values(&[3.0, 2.0, 1.0]).unwrap();

        let names: Vec<_> = strategies.iter().map(|s| s.name()).collect();
        assert_eq!(names, ["SmaCrossover", "EmaCrossover"]);
        for strategy in &strategies {
            assert_eq!(strategy.assess(&series).unwrap().signal, Signal::Buy);
        }
    }
}
