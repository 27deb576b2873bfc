//! @ai:module:intent Metric types for retention analysis results
//! @ai:module:layer domain
//! @ai:module:public_api MetricsResult, PeriodMetrics, PeriodDelta, PeriodExtreme
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};

/// @ai:intent Gap analysis for a single period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodMetrics {
    pub label: String,
    pub rate: f64,
    /// Benchmark minus rate. Positive means underperformance.
    pub gap: f64,
    pub cumulative_gap: f64,
    /// Rate as a percentage of the benchmark; absent when the benchmark is zero.
    pub achievement_pct: Option<f64>,
    /// Change from the previous period; absent for the first period.
    pub delta: Option<f64>,
}

/// @ai:intent Change between two consecutive periods
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodDelta {
    pub from: String,
    pub to: String,
    pub change: f64,
}

/// @ai:intent Label and rate of the best or worst period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodExtreme {
    pub label: String,
    pub rate: f64,
}

/// @ai:intent Immutable snapshot of summary statistics and gap analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsResult {
    pub benchmark: f64,
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation (divides by N).
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub range: f64,
    pub coefficient_of_variation: f64,
    /// Benchmark minus mean.
    pub average_gap: f64,
    pub best_period: PeriodExtreme,
    pub worst_period: PeriodExtreme,
    pub periods: Vec<PeriodMetrics>,
    pub deltas: Vec<PeriodDelta>,
}

impl MetricsResult {
    /// @ai:intent Cumulative gap at the final period
    /// @ai:effects pure
    pub fn cumulative_gap(&self) -> f64 {
        self.periods
            .last()
            .map(|p| p.cumulative_gap)
            .unwrap_or(0.0)
    }

    /// @ai:intent Per-period gaps in sequence order
    /// @ai:effects pure
    pub fn gaps(&self) -> Vec<f64> {
        self.periods.iter().map(|p| p.gap).collect()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.periods.iter().map(|p| p.label.as_str()).collect()
    }

    pub fn rates(&self) -> Vec<f64> {
        self.periods.iter().map(|p| p.rate).collect()
    }

    /// @ai:intent Find the largest period-over-period decline
    /// @ai:post result.change < 0 when present
    /// @ai:effects pure
    pub fn steepest_decline(&self) -> Option<&PeriodDelta> {
        self.deltas
            .iter()
            .filter(|d| d.change < 0.0)
            .min_by(|a, b| a.change.total_cmp(&b.change))
    }
}
