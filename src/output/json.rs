use super::{Formatter, SegmentationReport};

/// One JSON object per report, on a single line
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, report: &SegmentationReport) -> String {
        serde_json::to_string(report).unwrap_or_else(|e| {
            serde_json::json!({ "filename": report.filename, "error": e.to_string() }).to_string()
        })
    }
}
