use super::{Formatter, SegmentationReport};

/// One row per segment
pub struct CsvFormatter;

fn write_rows(report: &SegmentationReport) -> ::csv::Result<Vec<u8>> {
    let mut writer = ::csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(::csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    if let Some(ref error) = report.error {
        writer.write_record([report.filename.as_str(), "", "", "", "", error.as_str()])?;
    } else {
        for segment in &report.segments {
            writer.write_record([
                report.filename.clone(),
                segment.start.to_string(),
                segment.end.to_string(),
                segment.len().to_string(),
                format!("{:.6}", segment.mean),
                String::new(),
            ])?;
        }
    }

    writer.into_inner().map_err(|e| e.into_error().into())
}

impl Formatter for CsvFormatter {
    fn format(&self, report: &SegmentationReport) -> String {
        match write_rows(report) {
            Ok(bytes) => {
                let rows = String::from_utf8_lossy(&bytes);
                rows.strip_suffix('\n').unwrap_or(&rows).to_string()
            }
            Err(e) => {
                log::error!("{}: failed to format CSV rows: {}", report.filename, e);
                String::new()
            }
        }
    }

    fn header(&self) -> Option<&'static str> {
        Some("file,start,end,length,mean,error")
    }
}
