//! @ai:module:intent Chart data projections for plotting sinks
//! @ai:module:layer infrastructure
//! @ai:module:public_api ChartSeries, PlotSink, render_charts
//! @ai:module:stateless true

use crate::error::Result;
use crate::metrics::MetricsResult;
use serde::Serialize;

/// @ai:intent Trait for plotting surfaces that draw a labelled series with a reference line
pub trait PlotSink: Send + Sync {
    /// @ai:intent Draw one series
    fn plot(&self, series: &ChartSeries) -> Result<()>;
}

/// @ai:intent Labels, values and optional reference line for one chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub reference: Option<f64>,
}

impl ChartSeries {
    fn from_points<'a, I>(title: &str, points: I, reference: Option<f64>) -> Self
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let (labels, values): (Vec<_>, Vec<_>) = points
            .into_iter()
            .map(|(label, value)| (label.to_string(), value))
            .unzip();

        Self {
            title: title.to_string(),
            labels,
            values,
            reference,
        }
    }
}

impl MetricsResult {
    /// @ai:intent Rates per period with the benchmark as reference line
    /// @ai:effects pure
    pub fn trend_series(&self) -> ChartSeries {
        ChartSeries::from_points(
            "Retention Rate",
            self.periods.iter().map(|p| (p.label.as_str(), p.rate)),
            Some(self.benchmark),
        )
    }

    /// @ai:intent Gap to benchmark per period, zero as reference
    /// @ai:effects pure
    pub fn gap_series(&self) -> ChartSeries {
        ChartSeries::from_points(
            "Gap to Benchmark",
            self.periods.iter().map(|p| (p.label.as_str(), p.gap)),
            Some(0.0),
        )
    }

    pub fn cumulative_gap_series(&self) -> ChartSeries {
        ChartSeries::from_points(
            "Cumulative Gap",
            self.periods.iter().map(|p| (p.label.as_str(), p.cumulative_gap)),
            None,
        )
    }

    /// @ai:intent Period-over-period change, labelled by the later period
    /// @ai:post result.values.len() == self.periods.len() - 1
    /// @ai:effects pure
    pub fn delta_series(&self) -> ChartSeries {
        ChartSeries::from_points(
            "Period-over-Period Change",
            self.deltas.iter().map(|d| (d.to.as_str(), d.change)),
            Some(0.0),
        )
    }

    /// @ai:intent Rate as a percentage of the benchmark, 100 as reference
    /// @ai:effects pure
    pub fn achievement_series(&self) -> ChartSeries {
        ChartSeries::from_points(
            "Target Achievement",
            self.periods
                .iter()
                .filter_map(|p| p.achievement_pct.map(|pct| (p.label.as_str(), pct))),
            Some(100.0),
        )
    }
}

/// @ai:intent Feed every chart projection of a result to a plotting sink
/// @ai:effects io (through sink)
pub fn render_charts<P: PlotSink + ?Sized>(result: &MetricsResult, sink: &P) -> Result<usize> {
    let charts = [
        result.trend_series(),
        result.gap_series(),
        result.cumulative_gap_series(),
        result.delta_series(),
        result.achievement_series(),
    ];

    for chart in &charts {
        sink.plot(chart)?;
    }

    Ok(charts.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{RetentionMetrics, RetentionMetricsTrait};
    use crate::series::{Benchmark, Series};
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        plotted: Mutex<Vec<ChartSeries>>,
    }

    impl PlotSink for RecordingSink {
        fn plot(&self, series: &ChartSeries) -> Result<()> {
            self.plotted.lock().unwrap().push(series.clone());
            Ok(())
        }
    }

    fn compute(benchmark: f64) -> MetricsResult {
        let series = Series::from_rates(&["Q1", "Q2", "Q3"], &[70.0, 75.0, 72.0]).unwrap();
        RetentionMetrics::new()
            .compute(&series, Benchmark::new(benchmark).unwrap())
            .unwrap()
    }

    #[test]
    fn test_render_charts_feeds_all_projections() {
        let result = compute(80.0);

        let sink = RecordingSink::default();
        let count = render_charts(&result, &sink).unwrap();
        let plotted = sink.plotted.into_inner().unwrap();

        assert_eq!(count, 5);
        assert_eq!(plotted.len(), 5);
        assert_eq!(plotted[0].labels, vec!["Q1", "Q2", "Q3"]);
        assert_eq!(plotted[0].values, vec![70.0, 75.0, 72.0]);
        assert_eq!(plotted[0].reference, Some(80.0));
        assert_eq!(plotted[1].values, vec![10.0, 5.0, 8.0]);
        assert_eq!(plotted[2].values, vec![10.0, 15.0, 23.0]);
        assert_eq!(plotted[2].reference, None);
        assert_eq!(plotted[3].labels, vec!["Q2", "Q3"]);
        assert_eq!(plotted[3].values, vec![5.0, -3.0]);
        assert_eq!(plotted[4].values, vec![87.5, 93.75, 90.0]);
        assert_eq!(plotted[4].reference, Some(100.0));
    }

    #[test]
    fn test_sink_usable_as_trait_object() {
        let result = compute(80.0);
        let sink = RecordingSink::default();
        let dyn_sink: &dyn PlotSink = &sink;

        assert_eq!(render_charts(&result, dyn_sink).unwrap(), 5);
    }

    #[test]
    fn test_achievement_series_empty_for_zero_benchmark() {
        let result = compute(0.0);
        let chart = result.achievement_series();

        assert!(chart.labels.is_empty());
        assert!(chart.values.is_empty());
    }
}
