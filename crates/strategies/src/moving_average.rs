// In crates/strategies/src/moving_average.rs

use core_types::{EmaSeries, Error, PriceSeries, Result, Window};
use serde::{Deserialize, Serialize};

/// How a simple moving average treats entries that do not parse as numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmaPolicy {
    /// Skip malformed entries but still divide by the full window length.
    /// Each skipped entry pulls the average towards zero.
    #[default]
    Legacy,
    /// Skip malformed entries and divide by the number of entries that parsed.
    Lenient,
    /// Abort on the first malformed entry.
    Strict,
}

/// The outcome of one SMA computation, including what had to be skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct SmaReport {
    pub value: f64,
    pub window: Window,
    /// Number of entries that contributed to the sum.
    pub parsed: usize,
    /// Series indices of entries excluded from the sum.
    pub skipped: Vec<usize>,
}

/// Pure moving-average arithmetic over a newest-first price series.
#[derive(Debug, Clone, Copy, Default)]
pub struct MovingAverageEngine {
    sma_policy: SmaPolicy,
}

impl MovingAverageEngine {
    pub fn new(sma_policy: SmaPolicy) -> Self {
        Self { sma_policy }
    }

    pub fn sma_policy(&self) -> SmaPolicy {
        self.sma_policy
    }

    /// Arithmetic mean of `series[window.offset() .. window.offset() + window.length())`.
    pub fn sma(&self, series: &PriceSeries, window: Window) -> Result<f64> {
        self.sma_report(series, window).map(|report| report.value)
    }

    /// Same as [`sma`](Self::sma), but also reports which entries were skipped.
    ///
    /// A window that runs past the end of the series fails with
    /// `Error::OutOfRange` before any entry is read.
    pub fn sma_report(&self, series: &PriceSeries, window: Window) -> Result<SmaReport> {
        if window.length() == 0 {
            return Err(Error::InvalidWindow { length: 0 });
        }
        let entries = series.slice(window)?;

        let mut sum = 0.0;
        let mut parsed = 0;
        let mut skipped = Vec::new();

        for (index, entry) in (window.offset()..).zip(entries) {
            match entry.value() {
                Ok(price) => {
                    sum += price;
                    parsed += 1;
                }
                Err(_) if self.sma_policy == SmaPolicy::Strict => {
                    return Err(Error::Conversion {
                        index,
                        value: entry.as_str().to_string(),
                    });
                }
                Err(_) => skipped.push(index),
            }
        }

        let divisor = match self.sma_policy {
            SmaPolicy::Legacy | SmaPolicy::Strict => window.length(),
            SmaPolicy::Lenient if parsed == 0 => {
                // Nothing to average; surface the first offending entry.
                let index = window.offset();
                let value = entries.first().map(|e| e.as_str().to_string()).unwrap_or_default();
                return Err(Error::Conversion { index, value });
            }
            SmaPolicy::Lenient => parsed,
        };

        Ok(SmaReport {
            value: sum / divisor as f64,
            window,
            parsed,
            skipped,
        })
    }

    /// Full EMA trajectory over `series`, index-aligned with it.
    ///
    /// The most recent slot is seeded with the `period`-day SMA ending at index 0,
    /// then `EMA[i] = (price[i] - EMA[i-1]) * k + EMA[i-1]` walks towards older
    /// prices with `k = 2 / (period + 1)`. Unlike the SMA, any malformed entry
    /// aborts the whole trajectory.
    pub fn ema(&self, series: &PriceSeries, period: usize) -> Result<EmaSeries> {
        let seed_window = Window::leading(period)?;
        if series.len() < period {
            return Err(Error::InsufficientData {
                required: period,
                available: series.len(),
            });
        }

        let prices = (0..series.len())
            .map(|index| series.value_at(index))
            .collect::<Result<Vec<f64>>>()?;

        let k = multiplier(period);
        let seed = self.sma(series, seed_window)?;

        let mut values = Vec::with_capacity(prices.len());
        values.push(seed);
        let mut previous = seed;
        for price in &prices[1..] {
            previous = (price - previous) * k + previous;
            values.push(previous);
        }

        Ok(EmaSeries::new(values, period, k))
    }
}

/// The EMA smoothing factor for a window of `period` prices.
pub fn multiplier(period: usize) -> f64 {
    2.0 / (period as f64 + 1.0)
}

/// SMA over `length` prices starting `offset` days back, using the legacy skip policy.
pub fn compute_sma(series: &PriceSeries, length: usize, offset: usize) -> Result<f64> {
    MovingAverageEngine::default().sma(series, Window::new(length, offset)?)
}

pub fn compute_ema(series: &PriceSeries, period: usize) -> Result<EmaSeries> {
    MovingAverageEngine::default().ema(series, period)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(raw: &[&str]) -> PriceSeries {
        PriceSeries::from_strings(raw.iter().copied()).unwrap()
    }

    #[test]
    fn sma_of_leading_window() {
        let prices = PriceSeries::from_values(&[110.0, 100.0, 90.0, 80.0, 70.0]).unwrap();
        assert_eq!(compute_sma(&prices, 3, 0).unwrap(), 100.0);
    }

    #[test]
    fn sma_with_offset_reads_only_its_slice() {
        let prices = PriceSeries::from_values(&[1000.0, 10.0, 20.0, 30.0, -5000.0]).unwrap();
        assert_eq!(compute_sma(&prices, 3, 1).unwrap(), 20.0);
    }

    #[test]
    fn sma_window_past_end_is_out_of_range() {
        let prices = PriceSeries::from_values(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(
            compute_sma(&prices, 3, 1),
            Err(Error::OutOfRange {
                length: 3,
                offset: 1,
                series_len: 3
            })
        );
        assert!(matches!(
            compute_sma(&prices, 4, 0),
            Err(Error::OutOfRange { .. })
        ));
    }

    #[test]
    fn sma_zero_length_is_invalid() {
        let prices = PriceSeries::from_values(&[1.0]).unwrap();
        assert_eq!(
            compute_sma(&prices, 0, 0),
            Err(Error::InvalidWindow { length: 0 })
        );
    }

    #[test]
    fn deserialized_zero_length_window_never_reaches_the_engine() {
        let prices = PriceSeries::from_values(&[1.0, 2.0, 3.0]).unwrap();
        for policy in [SmaPolicy::Legacy, SmaPolicy::Lenient, SmaPolicy::Strict] {
            let parsed: std::result::Result<Window, _> =
                serde_json::from_str(r#"{"length": 0, "offset": 1}"#);
            assert!(parsed.is_err(), "{policy:?}");

            let window: Window = serde_json::from_str(r#"{"length": 2, "offset": 1}"#).unwrap();
            let value = MovingAverageEngine::new(policy).sma(&prices, window).unwrap();
            assert_eq!(value, 2.5);
            assert!(!value.is_nan());
        }
    }

    #[test]
    fn legacy_policy_divides_by_full_window() {
        let prices = series(&["30", "oops", "30", "30"]);
        let engine = MovingAverageEngine::new(SmaPolicy::Legacy);
        let report = engine
            .sma_report(&prices, Window::leading(4).unwrap())
            .unwrap();

        // 90 / 4, not 90 / 3.
        assert_eq!(report.value, 22.5);
        assert_eq!(report.parsed, 3);
        assert_eq!(report.skipped, vec![1]);
    }

    #[test]
    fn lenient_policy_divides_by_parsed_count() {
        let prices = series(&["30", "oops", "30", "30"]);
        let engine = MovingAverageEngine::new(SmaPolicy::Lenient);
        assert_eq!(engine.sma(&prices, Window::leading(4).unwrap()).unwrap(), 30.0);
    }

    #[test]
    fn lenient_policy_without_numbers_fails() {
        let prices = series(&["1", "x", "y"]);
        let engine = MovingAverageEngine::new(SmaPolicy::Lenient);
        assert_eq!(
            engine.sma(&prices, Window::new(2, 1).unwrap()),
            Err(Error::Conversion {
                index: 1,
                value: "x".to_string()
            })
        );
    }

    #[test]
    fn strict_policy_aborts_on_malformed_entry() {
        let prices = series(&["30", "30", "bad", "30"]);
        let engine = MovingAverageEngine::new(SmaPolicy::Strict);
        assert_eq!(
            engine.sma(&prices, Window::leading(4).unwrap()),
            Err(Error::Conversion {
                index: 2,
                value: "bad".to_string()
            })
        );
        // A window that avoids the bad entry is unaffected.
        assert_eq!(engine.sma(&prices, Window::leading(2).unwrap()).unwrap(), 30.0);
    }

    #[test]
    fn skipped_indices_are_absolute() {
        let prices = series(&["1", "2", "3", "-", "5"]);
        let report = MovingAverageEngine::default()
            .sma_report(&prices, Window::new(3, 2).unwrap())
            .unwrap();
        assert_eq!(report.skipped, vec![3]);
    }

    #[test]
    fn multiplier_matches_period() {
        assert_eq!(multiplier(3), 0.5);
        assert_eq!(multiplier(1), 1.0);
        assert!((multiplier(9) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn ema_of_constant_series_is_constant() {
        let prices = PriceSeries::from_values(&[50.0; 5]).unwrap();
        let ema = compute_ema(&prices, 3).unwrap();
        assert_eq!(ema.values(), &[50.0; 5]);
        assert_eq!(ema.multiplier(), 0.5);
        assert_eq!(ema.period(), 3);
    }

    #[test]
    fn ema_walks_from_newest_to_oldest() {
        // seed = (6 + 4 + 2) / 3 = 4, k = 0.5
        let prices = PriceSeries::from_values(&[6.0, 4.0, 2.0, 8.0]).unwrap();
        let ema = compute_ema(&prices, 3).unwrap();
        assert_eq!(ema.values(), &[4.0, 4.0, 3.0, 5.5]);
    }

    #[test]
    fn ema_seed_equals_sma() {
        let prices = PriceSeries::from_values(&[10.1, 10.7, 9.3, 11.9, 10.2, 9.8]).unwrap();
        let ema = compute_ema(&prices, 4).unwrap();
        assert_eq!(ema.len(), prices.len());
        assert_eq!(ema.latest(), Some(compute_sma(&prices, 4, 0).unwrap()));
    }

    #[test]
    fn ema_with_period_equal_to_length() {
        let prices = PriceSeries::from_values(&[3.0, 1.0]).unwrap();
        let ema = compute_ema(&prices, 2).unwrap();
        assert_eq!(ema.values()[0], 2.0);
        assert_eq!(ema.len(), 2);
    }

    #[test]
    fn ema_requires_enough_data() {
        let prices = PriceSeries::from_values(&[1.0, 2.0]).unwrap();
        assert_eq!(
            compute_ema(&prices, 3),
            Err(Error::InsufficientData {
                required: 3,
                available: 2
            })
        );
    }

    #[test]
    fn ema_rejects_zero_period() {
        let prices = PriceSeries::from_values(&[1.0]).unwrap();
        assert_eq!(compute_ema(&prices, 0), Err(Error::InvalidWindow { length: 0 }));
    }

    #[test]
    fn ema_aborts_on_malformed_entry_outside_seed() {
        let prices = series(&["1", "2", "3", "4", "garbage"]);
        assert_eq!(
            compute_ema(&prices, 2),
            Err(Error::Conversion {
                index: 4,
                value: "garbage".to_string()
            })
        );
    }

    #[test]
    fn ema_checks_length_before_parsing() {
        let prices = series(&["x"]);
        assert_eq!(
            compute_ema(&prices, 2),
            Err(Error::InsufficientData {
                required: 2,
                available: 1
            })
        );
    }
}
