use super::{Formatter, SegmentationReport};

pub struct TextFormatter {
    verbose: bool,
}

impl TextFormatter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, report: &SegmentationReport) -> String {
        if let Some(ref error) = report.error {
            return format!("{}: error: {}", report.filename, error);
        }

        let sigma = report
            .noise_sigma
            .map_or("-".to_string(), |s| format!("{:.4}", s));
        let mut lines = vec![format!(
            "{}: {} samples{}, noise sigma: {}, {} breakpoints, {} segments",
            report.filename,
            report.sample_count,
            if report.weighted { " (weighted)" } else { "" },
            sigma,
            report.breakpoints.len(),
            report.segments.len()
        )];

        if self.verbose {
            for level in &report.levels {
                lines.push(format!(
                    "  level {:>2} (step {:>5}): {:>5} candidates, {:>5} above {:.4}",
                    level.level,
                    level.step_half_size,
                    level.candidates,
                    level.retained,
                    level.threshold
                ));
            }
            if let Some(ref lengths) = report.segment_length {
                lines.push(format!(
                    "  segment length: mean {:.1}, std {:.1}, min {:.0}, max {:.0}",
                    lengths.mean, lengths.std_dev, lengths.min, lengths.max
                ));
            }
        }

        for segment in &report.segments {
            lines.push(format!(
                "  [{:>8}, {:>8})  len {:>7}  mean {:>10.4}",
                segment.start,
                segment.end,
                segment.len(),
                segment.mean
            ));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::tests::sample_report;

    #[test]
    fn test_summary_line() {
        let text = TextFormatter::new(false).format(&sample_report());
        let first = text.lines().next().unwrap();
        assert_eq!(
            first,
            "probe.csv: 8 samples, noise sigma: 0.1250, 1 breakpoints, 2 segments"
        );
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_verbose_adds_levels() {
        let text = TextFormatter::new(true).format(&sample_report());
        assert!(text.contains("level  1 (step     2)"));
        assert!(text.contains("segment length: mean 4.0"));
    }
}
