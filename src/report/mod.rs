//! @ai:module:intent Export sinks and report envelope for retention analysis
//! @ai:module:layer infrastructure
//! @ai:module:public_api AnalysisReport, JsonReporter, MetricTable, TabularSink, ChartSeries, PlotSink

pub mod chart;
pub mod json_report;
pub mod table;

pub use chart::{render_charts, ChartSeries, PlotSink};
pub use json_report::JsonReporter;
pub use table::{MetricTable, TabularSink};

use crate::metrics::{Assessment, MetricsResult};
use serde::{Deserialize, Serialize};

/// @ai:intent Timestamped envelope around a metrics result and its assessment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub generated_at: String,
    pub result: MetricsResult,
    pub assessment: Assessment,
}

impl AnalysisReport {
    /// @ai:intent Wrap a result with the current UTC time
    /// @ai:effects time
    pub fn new(result: MetricsResult, assessment: Assessment) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            result,
            assessment,
        }
    }
}
