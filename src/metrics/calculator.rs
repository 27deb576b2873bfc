//! @ai:module:intent Descriptive statistics and benchmark gap analysis
//! @ai:module:layer application
//! @ai:module:public_api RetentionMetrics, RetentionMetricsTrait
//! @ai:module:stateless true

use crate::error::{Error, Result};
use crate::metrics::types::{MetricsResult, PeriodDelta, PeriodExtreme, PeriodMetrics};
use crate::series::period::validate_periods;
use crate::series::{Benchmark, Period, Series};

/// @ai:intent Trait for retention metric computation
pub trait RetentionMetricsTrait: Send + Sync {
    /// @ai:intent Compute summary statistics and gap analysis for a series
    fn compute(&self, series: &Series, benchmark: Benchmark) -> Result<MetricsResult>;
}

/// @ai:intent Computes retention statistics against a benchmark
pub struct RetentionMetrics;

impl RetentionMetrics {
    /// @ai:intent Create a new calculator
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Compute metrics for unlabelled rates
    /// @ai:pre rates is non-empty
    /// @ai:effects pure
    pub fn compute_rates(&self, rates: &[f64], benchmark: Benchmark) -> Result<MetricsResult> {
        let series = Series::unlabelled(rates)?;
        self.compute(&series, benchmark)
    }

    /// @ai:intent Compute metrics over raw periods
    /// @ai:effects pure
    fn compute_periods(periods: &[Period], benchmark: f64) -> Result<MetricsResult> {
        validate_periods(periods)?;

        let rates: Vec<f64> = periods.iter().map(|p| p.rate).collect();
        let count = rates.len();

        let mean = mean(&rates);
        let median = median(&rates);
        let std_dev = population_std_dev(&rates, mean);

        let (worst_idx, best_idx) = extreme_indices(&rates);
        let min = rates[worst_idx];
        let max = rates[best_idx];

        let coefficient_of_variation = coefficient_of_variation(std_dev, mean)?;

        let mut cumulative_gap = 0.0;
        let rows: Vec<PeriodMetrics> = periods
            .iter()
            .enumerate()
            .map(|(i, period)| {
                let gap = benchmark - period.rate;
                cumulative_gap += gap;

                PeriodMetrics {
                    label: period.label.clone(),
                    rate: period.rate,
                    gap,
                    cumulative_gap,
                    achievement_pct: achievement(period.rate, benchmark),
                    delta: i.checked_sub(1).map(|prev| period.rate - rates[prev]),
                }
            })
            .collect();

        let deltas: Vec<PeriodDelta> = periods
            .windows(2)
            .map(|pair| PeriodDelta {
                from: pair[0].label.clone(),
                to: pair[1].label.clone(),
                change: pair[1].rate - pair[0].rate,
            })
            .collect();

        let result = MetricsResult {
            benchmark,
            count,
            mean,
            median,
            std_dev,
            min,
            max,
            range: max - min,
            coefficient_of_variation,
            average_gap: benchmark - mean,
            best_period: PeriodExtreme {
                label: periods[best_idx].label.clone(),
                rate: max,
            },
            worst_period: PeriodExtreme {
                label: periods[worst_idx].label.clone(),
                rate: min,
            },
            periods: rows,
            deltas,
        };

        ensure_finite(&result)?;
        tracing::debug!(count, mean, std_dev, "Computed retention metrics");

        Ok(result)
    }
}

impl Default for RetentionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl RetentionMetricsTrait for RetentionMetrics {
    /// @ai:intent Compute summary statistics and gap analysis
    /// @ai:pre series is non-empty
    /// @ai:post result.std_dev >= 0 and result.coefficient_of_variation >= 0
    /// @ai:effects pure
    /// @ai:idempotent true
    fn compute(&self, series: &Series, benchmark: Benchmark) -> Result<MetricsResult> {
        Self::compute_periods(series.periods(), benchmark.value())
    }
}

/// @ai:intent Largest magnitude in a slice, used to keep sums in range
/// @ai:effects pure
fn magnitude(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc: f64, v| acc.max(v.abs()))
}

/// @ai:intent Arithmetic mean of a non-empty slice
/// @ai:post result is finite when every value is finite
/// @ai:effects pure
fn mean(values: &[f64]) -> f64 {
    let sum = values.iter().sum::<f64>();
    if sum.is_finite() {
        return sum / values.len() as f64;
    }

    let scale = magnitude(values);

    let scaled = values.iter().map(|v| v / scale).sum::<f64>() / values.len() as f64;
    scaled * scale
}

/// @ai:intent Middle value, averaging the two middles for even counts
/// @ai:effects pure
fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        sorted[mid - 1] / 2.0 + sorted[mid] / 2.0
    } else {
        sorted[mid]
    }
}

/// @ai:intent Population standard deviation
/// @ai:post result >= 0 and finite when every value is finite
/// @ai:effects pure
fn population_std_dev(values: &[f64], mean: f64) -> f64 {
    let squares = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
    if squares.is_finite() {
        return (squares / values.len() as f64).sqrt();
    }

    let scale = magnitude(values);
    if scale == 0.0 {
        return 0.0;
    }

    let scaled_mean = mean / scale;
    let variance = values
        .iter()
        .map(|v| (v / scale - scaled_mean).powi(2))
        .sum::<f64>()
        / values.len() as f64;

    variance.sqrt() * scale
}

/// @ai:intent Standard deviation as a percentage of the mean
/// @ai:effects pure
fn coefficient_of_variation(std_dev: f64, mean: f64) -> Result<f64> {
    if mean == 0.0 {
        return Err(Error::DivisionByZero("coefficient of variation"));
    }
    Ok(std_dev / mean.abs() * 100.0)
}

/// @ai:intent Reject results whose derived values left the f64 range
/// @ai:effects pure
fn ensure_finite(result: &MetricsResult) -> Result<()> {
    let summary = [
        ("mean", result.mean),
        ("median", result.median),
        ("std_dev", result.std_dev),
        ("range", result.range),
        ("coefficient_of_variation", result.coefficient_of_variation),
        ("average_gap", result.average_gap),
    ];

    let rows = result.periods.iter().flat_map(|p| {
        [
            ("gap", Some(p.gap)),
            ("cumulative_gap", Some(p.cumulative_gap)),
            ("achievement_pct", p.achievement_pct),
            ("delta", p.delta),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
    });

    match summary.into_iter().chain(rows).find(|(_, v)| !v.is_finite()) {
        Some((name, value)) => Err(Error::InvalidInput(format!(
            "{} is out of range ({}) for the supplied rates",
            name, value
        ))),
        None => Ok(()),
    }
}

fn achievement(rate: f64, benchmark: f64) -> Option<f64> {
    (benchmark != 0.0).then(|| rate / benchmark * 100.0)
}

/// @ai:intent Indices of the first minimum and first maximum
/// @ai:pre values is non-empty
/// @ai:effects pure
fn extreme_indices(values: &[f64]) -> (usize, usize) {
    let mut min_idx = 0;
    let mut max_idx = 0;

    for (i, v) in values.iter().enumerate().skip(1) {
        if *v < values[min_idx] {
            min_idx = i;
        }
        if *v > values[max_idx] {
            max_idx = i;
        }
    }

    (min_idx, max_idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn quarterly() -> Series {
        Series::from_rates(&["Q1", "Q2", "Q3", "Q4"], &[71.68, 72.07, 69.67, 71.91]).unwrap()
    }

    fn benchmark() -> Benchmark {
        Benchmark::new(85.0).unwrap()
    }

    #[test]
    fn test_mean_of_quarterly_data() {
        let result = RetentionMetrics::new().compute(&quarterly(), benchmark()).unwrap();
        assert_eq!(format!("{:.2}", result.mean), "71.33");
    }

    #[test]
    fn test_quarterly_statistics() {
        let result = RetentionMetrics::new().compute(&quarterly(), benchmark()).unwrap();

        assert!((result.median - 71.795).abs() < 1e-9);
        assert!((result.std_dev - 0.9698).abs() < 1e-3);
        assert_eq!(result.min, 69.67);
        assert_eq!(result.max, 72.07);
        assert!((result.range - 2.4).abs() < 1e-9);
        assert!((result.coefficient_of_variation - 1.3596).abs() < 1e-3);
        assert!((result.average_gap - 13.6675).abs() < 1e-9);
        assert_eq!(result.best_period.label, "Q2");
        assert_eq!(result.worst_period.label, "Q3");
    }

    #[test]
    fn test_gap_is_exact() {
        let series = quarterly();
        let result = RetentionMetrics::new().compute(&series, benchmark()).unwrap();

        for (row, period) in result.periods.iter().zip(series.periods()) {
            assert_eq!(row.gap, 85.0 - period.rate);
        }
    }

    #[test]
    fn test_cumulative_gap_equals_sum_of_gaps() {
        let result = RetentionMetrics::new().compute(&quarterly(), benchmark()).unwrap();

        let mut running = 0.0;
        for gap in result.gaps() {
            running += gap;
        }
        assert_eq!(result.cumulative_gap(), running);
        assert!((result.cumulative_gap() - result.gaps().iter().sum::<f64>()).abs() < 1e-9);
    }

    #[test]
    fn test_deltas_omit_first_period() {
        let result = RetentionMetrics::new().compute(&quarterly(), benchmark()).unwrap();

        assert_eq!(result.periods[0].delta, None);
        assert_eq!(result.deltas.len(), 3);
        assert_eq!(result.deltas[0].from, "Q1");
        assert_eq!(result.deltas[0].to, "Q2");
        assert_eq!(result.periods[2].delta, Some(69.67 - 72.07));
        assert_eq!(result.deltas[1].change, 69.67 - 72.07);
    }

    #[test]
    fn test_single_period() {
        let series = Series::from_rates(&["Q1"], &[70.0]).unwrap();
        let result = RetentionMetrics::new().compute(&series, benchmark()).unwrap();

        assert_eq!(result.std_dev, 0.0);
        assert_eq!(result.range, 0.0);
        assert_eq!(result.coefficient_of_variation, 0.0);
        assert!(result.deltas.is_empty());
        assert_eq!(result.periods[0].delta, None);
        assert_eq!(result.median, 70.0);
    }

    #[test]
    fn test_empty_rates_fail() {
        let err = RetentionMetrics::new()
            .compute_rates(&[], benchmark())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_zero_mean_fails() {
        let err = RetentionMetrics::new()
            .compute_rates(&[0.0, 0.0], benchmark())
            .unwrap_err();
        assert!(matches!(err, Error::DivisionByZero(_)));
    }

    #[test]
    fn test_negative_mean_gives_non_negative_cv() {
        let result = RetentionMetrics::new()
            .compute_rates(&[-2.0, -4.0], benchmark())
            .unwrap();
        assert!(result.std_dev >= 0.0);
        assert!(result.coefficient_of_variation >= 0.0);
    }

    #[test]
    fn test_statistics_stay_finite_for_large_rates() {
        let rates = [1e308, 1e308];
        let mean = mean(&rates);

        assert_eq!(mean, 1e308);
        assert_eq!(median(&rates), 1e308);
        assert_eq!(population_std_dev(&rates, mean), 0.0);

        let spread = [-1e308, 1e308];
        let std_dev = population_std_dev(&spread, super::mean(&spread));
        assert!(std_dev.is_finite());
        assert!((std_dev - 1e308).abs() <= 1e293);
    }

    #[test]
    fn test_overflowing_gaps_are_rejected() {
        let err = RetentionMetrics::new()
            .compute_rates(&[1e308, 1e308], benchmark())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_large_rates_produce_finite_result() {
        let result = RetentionMetrics::new()
            .compute_rates(&[1e307, 1e307], benchmark())
            .unwrap();

        assert_eq!(result.mean, 1e307);
        assert_eq!(result.median, 1e307);
        assert_eq!(result.std_dev, 0.0);
        assert_eq!(result.coefficient_of_variation, 0.0);
        assert!(result.cumulative_gap().is_finite());

        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("\"mean\":null"));
        let back: MetricsResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.count, 2);
    }

    #[test]
    fn test_median_odd_count() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
    }

    #[test]
    fn test_achievement_absent_for_zero_benchmark() {
        let result = RetentionMetrics::new()
            .compute_rates(&[50.0], Benchmark::new(0.0).unwrap())
            .unwrap();
        assert_eq!(result.periods[0].achievement_pct, None);
        assert_eq!(result.periods[0].gap, -50.0);
    }

    #[test]
    fn test_ties_pick_first_occurrence() {
        let series = Series::from_rates(&["A", "B", "C"], &[70.0, 72.0, 72.0]).unwrap();
        let result = RetentionMetrics::new().compute(&series, benchmark()).unwrap();
        assert_eq!(result.best_period.label, "B");
        assert_eq!(result.worst_period.label, "A");
    }

    #[test]
    fn test_steepest_decline() {
        let result = RetentionMetrics::new().compute(&quarterly(), benchmark()).unwrap();
        let decline = result.steepest_decline().unwrap();
        assert_eq!(decline.from, "Q2");
        assert_eq!(decline.to, "Q3");

        let rising = RetentionMetrics::new()
            .compute_rates(&[60.0, 61.0], benchmark())
            .unwrap();
        assert!(rising.steepest_decline().is_none());
    }

    #[test]
    fn test_compute_is_idempotent() {
        let calculator = RetentionMetrics::new();
        let first = calculator.compute(&quarterly(), benchmark()).unwrap();
        let second = calculator.compute(&quarterly(), benchmark()).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.std_dev.to_bits(), second.std_dev.to_bits());
        assert_eq!(
            first.coefficient_of_variation.to_bits(),
            second.coefficient_of_variation.to_bits()
        );
    }
}
