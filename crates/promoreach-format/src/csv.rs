//! CSV output format.

use std::io::Write;

use crate::{EstimateRecord, FormatError, Formatter};

/// CSV formatter.
#[derive(Debug, Clone, Default)]
pub struct CsvFormatter {
    /// Field delimiter (default: comma).
    delimiter: char,
    /// Whether to include header row.
    include_header: bool,
}

impl CsvFormatter {
    /// Creates a new CSV formatter with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Creates a tab-separated values (TSV) formatter.
    #[must_use]
    pub const fn tsv() -> Self {
        Self {
            delimiter: '\t',
            include_header: true,
        }
    }

    /// Quotes a free-text field if it contains the delimiter, a quote or a
    /// line break.
    fn field(&self, value: &str) -> String {
        if value.contains(self.delimiter) || value.contains(['"', '\n', '\r']) {
            format!("\"{}\"", value.replace('"', "\"\""))
        } else {
            value.to_string()
        }
    }
}

impl Formatter for CsvFormatter {
    fn write_estimates<W: Write + Send>(
        &self,
        records: &[EstimateRecord],
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter;

        if self.include_header {
            writeln!(
                writer,
                "scenario{d}budget{d}duration_days{d}objective{d}impressions{d}impressions_per_day{d}clicks{d}cpm{d}cpc{d}targeting_score"
            )?;
        }

        for record in records {
            let est = &record.estimate;
            writeln!(
                writer,
                "{}{d}{:.2}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}",
                self.field(&record.scenario),
                record.budget,
                record.duration_days,
                record.objective,
                est.impressions,
                est.impressions_per_day,
                est.clicks,
                est.cpm,
                est.cpc,
                est.targeting_score,
            )?;
        }

        Ok(())
    }

    fn extension(&self) -> &str {
        "csv"
    }
}
