//! @ai:module:intent Retention metrics library
//! @ai:module:layer application
//! @ai:module:public_api config, error, series, metrics, report
//!
//! Computes descriptive statistics and a benchmark gap analysis for an
//! ordered series of retention rates.
//!
//! ```rust
//! use retention_metrics::{Benchmark, RetentionMetrics, RetentionMetricsTrait, Series};
//!
//! let series = Series::from_rates(&["Q1", "Q2", "Q3", "Q4"], &[71.68, 72.07, 69.67, 71.91]).unwrap();
//! let result = RetentionMetrics::new().compute(&series, Benchmark::new(85.0).unwrap()).unwrap();
//! assert_eq!(format!("{:.2}", result.mean), "71.33");
//! ```

pub mod config;
pub mod error;
pub mod metrics;
pub mod report;
pub mod series;

pub use config::{AssessmentConfig, DatasetConfig, RetentionConfig};
pub use error::{Error, Result};
pub use metrics::{
    assess, Assessment, MetricsResult, PeriodDelta, PeriodMetrics, RetentionMetrics,
    RetentionMetricsTrait,
};
pub use report::{AnalysisReport, JsonReporter, MetricTable, PlotSink, TabularSink};
pub use series::{Benchmark, Period, Series};
