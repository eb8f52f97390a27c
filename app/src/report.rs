// In app/src/report.rs

use std::fmt;

use core_types::{AverageFamily, EmaSeries};
use strategies::{Assessment, CrossoverReport, MACrossoverSettings};

/// Renders a crossover report the way it is shown on the console.
///
/// `trajectory_len` controls how many of the most recent EMA values are listed
/// for each window; zero hides them.
pub fn render(report: &CrossoverReport, settings: &MACrossoverSettings, trajectory_len: usize) -> String {
    ReportView {
        report,
        settings,
        trajectory_len,
    }
    .to_string()
}

struct ReportView<'a> {
    report: &'a CrossoverReport,
    settings: &'a MACrossoverSettings,
    trajectory_len: usize,
}

impl fmt::Display for ReportView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.report.current_price {
            Ok(price) => writeln!(f, "Current price: {price}")?,
            Err(e) => writeln!(f, "Current price: unavailable ({e})")?,
        }

        for (family, assessment) in [
            (AverageFamily::Sma, &self.report.sma),
            (AverageFamily::Ema, &self.report.ema),
        ] {
            writeln!(
                f,
                "\n{family} crossing strategy ({}/{} days data):",
                self.settings.short_period, self.settings.long_period
            )?;
            match assessment {
                Ok(assessment) => write_assessment(f, assessment, self.trajectory_len)?,
                Err(e) => writeln!(f, "  unavailable: {e}")?,
            }
        }

        Ok(())
    }
}

fn write_assessment(f: &mut fmt::Formatter<'_>, assessment: &Assessment, trajectory_len: usize) -> fmt::Result {
    writeln!(f, "  short: {:.4}", assessment.short_value)?;
    writeln!(f, "  long:  {:.4}", assessment.long_value)?;
    if !assessment.skipped.is_empty() {
        writeln!(f, "  skipped non-numeric prices at {:?}", assessment.skipped)?;
    }
    writeln!(f, "Signal: {}", assessment.signal)?;

    if trajectory_len == 0 {
        return Ok(());
    }
    for (label, trajectory) in [("short", &assessment.short_trajectory), ("long", &assessment.long_trajectory)] {
        if let Some(trajectory) = trajectory {
            writeln!(f, "  {label} EMA, newest first: {}", leading_values(trajectory, trajectory_len))?;
        }
    }
    Ok(())
}

fn leading_values(trajectory: &EmaSeries, n: usize) -> String {
    let shown: Vec<String> = trajectory.values().iter().take(n).map(|v| format!("{v:.4}")).collect();
    let mut line = shown.join(", ");
    if trajectory.len() > n {
        line.push_str(", ...");
    }
    line
}
