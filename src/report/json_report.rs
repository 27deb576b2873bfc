//! @ai:module:intent JSON export of metric tables and full analysis reports
//! @ai:module:layer infrastructure
//! @ai:module:public_api JsonReporter
//! @ai:module:stateless false

use crate::error::Result;
use crate::report::table::{MetricTable, TabularSink};
use crate::report::AnalysisReport;
use std::io::Write;
use std::sync::Mutex;

/// @ai:intent Writes JSON documents to any writer
pub struct JsonReporter<W: Write + Send> {
    writer: Mutex<W>,
    pretty: bool,
}

impl<W: Write + Send> JsonReporter<W> {
    /// @ai:intent Create a reporter writing pretty-printed JSON
    /// @ai:effects pure
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            pretty: true,
        }
    }

    /// @ai:intent Create a reporter writing single-line JSON
    /// @ai:effects pure
    pub fn compact(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            pretty: false,
        }
    }

    /// @ai:intent Write the full analysis report
    /// @ai:effects io
    pub fn write_report(&self, report: &AnalysisReport) -> Result<()> {
        self.write_value(report)
    }

    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// @ai:intent Serialize one document followed by a newline
    /// @ai:effects io, state:write
    fn write_value<T: serde::Serialize>(&self, value: &T) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, value)?;
        } else {
            serde_json::to_writer(&mut *writer, value)?;
        }
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

impl<W: Write + Send> TabularSink for JsonReporter<W> {
    /// @ai:intent Write the metric table as a JSON object
    /// @ai:effects io
    fn write_table(&self, table: &MetricTable) -> Result<()> {
        self.write_value(table)
    }
}
