//! Line-chart data for a finished run.
//!
//! This is only the data shape a charting frontend needs: x labels `1..=num_plays`
//! and one dataset per curve, coloured by evenly spaced hues. Drawing is left to
//! whatever consumes [`LineChart::to_json`] (or the text summary).

use std::fmt::Write as _;

use crate::SimulationReport;

/// One series in the chart.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub fill: bool,
    pub border_color: String,
    pub tension: f64,
}

/// Chart description: x labels, datasets, and axis options.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct LineChart {
    pub labels: Vec<usize>,
    pub datasets: Vec<Dataset>,
    pub y_begin_at_zero: bool,
    #[cfg_attr(feature = "serde", serde(skip))]
    optimal_shares: Vec<f64>,
}

/// `hsl(index * 360 / n, 100%, 50%)`.
pub fn series_color(index: usize, n: usize) -> String {
    let hue = index as f64 * 360.0 / n.max(1) as f64;
    format!("hsl({hue}, 100%, 50%)")
}

impl LineChart {
    pub fn from_report(report: &SimulationReport) -> Self {
        let n = report.curves.len();
        let datasets = report
            .curves
            .iter()
            .enumerate()
            .map(|(i, c)| Dataset {
                label: format!("Bandit {}", c.label),
                data: c.running_average.clone(),
                fill: false,
                border_color: series_color(i, n),
                tension: 0.1,
            })
            .collect();
        Self {
            labels: (1..=report.num_plays).collect(),
            datasets,
            y_begin_at_zero: true,
            optimal_shares: report.curves.iter().map(|c| c.optimal_share()).collect(),
        }
    }

    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Plain-text table: one row per series with its final average and the
    /// share of plays spent on the best arm.
    pub fn render_summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{:<12} {:>14} {:>12}", "series", "final avg", "optimal %");
        for (i, d) in self.datasets.iter().enumerate() {
            let last = d.data.last().copied().unwrap_or(0.0);
            let share = self.optimal_shares.get(i).copied().unwrap_or(0.0);
            let _ = writeln!(out, "{:<12} {:>14.4} {:>11.1}%", d.label, last, share * 100.0);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Curve;

    fn report() -> SimulationReport {
        SimulationReport {
            num_plays: 3,
            seed: 1,
            epsilon: 0.1,
            curves: vec![
                Curve {
                    label: 1,
                    running_average: vec![1.0, 1.5, 2.0],
                    optimal_pulls: 3,
                },
                Curve {
                    label: 2,
                    running_average: vec![0.0, -0.5, 0.25],
                    optimal_pulls: 0,
                },
            ],
        }
    }

    #[test]
    fn colours_spread_evenly_over_the_wheel() {
        assert_eq!(series_color(0, 4), "hsl(0, 100%, 50%)");
        assert_eq!(series_color(1, 4), "hsl(90, 100%, 50%)");
        assert_eq!(series_color(3, 4), "hsl(270, 100%, 50%)");
    }

    #[test]
    fn chart_has_one_label_per_play_and_one_dataset_per_curve() {
        let chart = LineChart::from_report(&report());
        assert_eq!(chart.labels, vec![1, 2, 3]);
        assert_eq!(chart.datasets.len(), 2);
        assert_eq!(chart.datasets[1].label, "Bandit 2");
        assert_eq!(chart.datasets[1].data, vec![0.0, -0.5, 0.25]);
        assert!(!chart.datasets[0].fill);
        assert!(chart.y_begin_at_zero);
    }

    #[test]
    fn summary_lists_every_series() {
        let text = LineChart::from_report(&report()).render_summary();
        assert!(text.contains("Bandit 1"));
        assert!(text.contains("100.0%"));
        assert!(text.contains("0.2500"));
        assert_eq!(text.lines().count(), 3);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_uses_chart_field_names() {
        let json = LineChart::from_report(&report()).to_json().unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["datasets"][0]["borderColor"], "hsl(0, 100%, 50%)");
        assert_eq!(v["datasets"][1]["tension"], 0.1);
        assert_eq!(v["yBeginAtZero"], true);
        assert!(v.get("optimalShares").is_none());
    }
}
