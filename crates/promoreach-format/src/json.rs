//! JSON report of estimate records.
//!
//! A report is either one JSON document holding every record, or one record
//! per line (NDJSON) for streaming into other tools.

use std::io::Write;

use crate::{EstimateRecord, FormatError, Formatter, OutputFormat};

/// Layout of a JSON report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonLayout {
    /// A single array of records.
    Document {
        /// Indent the document for reading.
        pretty: bool,
    },
    /// One compact record per line.
    Lines,
}

impl JsonLayout {
    const fn output_format(self) -> OutputFormat {
        match self {
            Self::Document { .. } => OutputFormat::Json,
            Self::Lines => OutputFormat::Ndjson,
        }
    }
}

impl Default for JsonLayout {
    fn default() -> Self {
        Self::Document { pretty: false }
    }
}

/// Writes estimate records as JSON.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    layout: JsonLayout,
}

impl JsonFormatter {
    /// Creates a formatter writing a compact array of records.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            layout: JsonLayout::Document { pretty: false },
        }
    }

    /// Creates a formatter writing one record per line.
    #[must_use]
    pub const fn ndjson() -> Self {
        Self {
            layout: JsonLayout::Lines,
        }
    }

    /// Indents the array. Line output is always compact.
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        if let JsonLayout::Document { .. } = self.layout {
            self.layout = JsonLayout::Document { pretty };
        }
        self
    }

    /// Returns the layout this formatter writes.
    #[must_use]
    pub const fn layout(&self) -> JsonLayout {
        self.layout
    }

    fn write_document<W: Write>(
        records: &[EstimateRecord],
        pretty: bool,
        mut writer: W,
    ) -> Result<(), FormatError> {
        if pretty {
            serde_json::to_writer_pretty(&mut writer, records)?;
        } else {
            serde_json::to_writer(&mut writer, records)?;
        }
        writeln!(writer)?;
        Ok(())
    }

    fn write_lines<W: Write>(records: &[EstimateRecord], mut writer: W) -> Result<(), FormatError> {
        for record in records {
            serde_json::to_writer(&mut writer, record)?;
            writer.write_all(b"\n")?;
        }
        Ok(())
    }
}

impl Formatter for JsonFormatter {
    fn write_estimates<W: Write + Send>(
        &self,
        records: &[EstimateRecord],
        writer: W,
    ) -> Result<(), FormatError> {
        match self.layout {
            JsonLayout::Document { pretty } => Self::write_document(records, pretty, writer),
            JsonLayout::Lines => Self::write_lines(records, writer),
        }
    }

    fn extension(&self) -> &str {
        self.layout.output_format().extension()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use promoreach_estimate::ReachEstimator;
    use promoreach_types::{CampaignConfig, CampaignPeriod, Objective};

    fn records() -> Vec<EstimateRecord> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let estimator = ReachEstimator::default();
        [Objective::Awareness, Objective::Traffic]
            .into_iter()
            .map(|objective| {
                let config = CampaignConfig::new(50.0, CampaignPeriod::starting(start, 7), objective);
                EstimateRecord::new(objective.as_str(), &config, estimator.estimate(&config))
            })
            .collect()
    }

    fn render(formatter: &JsonFormatter, records: &[EstimateRecord]) -> String {
        let mut output = Vec::new();
        formatter.write_estimates(records, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_document_reads_back() {
        let records = records();
        let result = render(&JsonFormatter::new(), &records);

        assert_eq!(result.lines().count(), 1);
        assert!(result.contains("\"impressions\":52500"));
        assert!(result.contains("\"cpm\":\"0.95\""));
        assert!(result.contains("\"durationDays\":7"));

        let parsed: Vec<EstimateRecord> = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn test_lines_one_record_each() {
        let records = records();
        let result = render(&JsonFormatter::ndjson(), &records);

        let lines: Vec<_> = result.lines().collect();
        assert_eq!(lines.len(), records.len());
        let parsed: EstimateRecord = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(parsed.scenario, "traffic");
        assert_eq!(parsed, records[1]);
    }

    #[test]
    fn test_pretty_document() {
        let result = render(&JsonFormatter::new().with_pretty(true), &records());
        assert!(result.lines().count() > 2);
        assert!(result.contains("\n  {"));
    }

    #[test]
    fn test_lines_ignore_pretty() {
        let formatter = JsonFormatter::ndjson().with_pretty(true);
        assert_eq!(formatter.layout(), JsonLayout::Lines);
        assert_eq!(render(&formatter, &records()).lines().count(), 2);
    }

    #[test]
    fn test_extension_follows_layout() {
        assert_eq!(JsonFormatter::new().extension(), OutputFormat::Json.extension());
        assert_eq!(JsonFormatter::ndjson().extension(), "ndjson");
    }

    #[test]
    fn test_empty_report() {
        assert_eq!(render(&JsonFormatter::new(), &[]), "[]\n");
        assert_eq!(render(&JsonFormatter::ndjson(), &[]), "");
    }
}
