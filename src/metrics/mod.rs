//! @ai:module:intent Retention statistics, gap analysis and assessment
//! @ai:module:layer application
//! @ai:module:public_api RetentionMetrics, MetricsResult, PeriodMetrics, PeriodDelta, Assessment

pub mod assessment;
pub mod calculator;
pub mod types;

pub use assessment::{assess, Assessment, GapSeverity, StagedTarget, VolatilityLevel};
pub use calculator::{RetentionMetrics, RetentionMetricsTrait};
pub use types::{MetricsResult, PeriodDelta, PeriodExtreme, PeriodMetrics};
