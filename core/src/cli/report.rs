use crate::compare::{FieldComparison, SeriesComparison, SessionComparison};
use std::fmt;

const HIGHLIGHT: &str = "\x1b[1;31m";
const RESET: &str = "\x1b[0m";

/// Text report of a session comparison
///
/// One line per field: label, reference value, new value, in fixed
/// columns. With colour enabled, differing lines are printed bold red.
pub struct TextReport<'a> {
    comparison: &'a SessionComparison,
    color: bool,
}

impl<'a> TextReport<'a> {
    /// Creates a new text report
    pub fn new(comparison: &'a SessionComparison) -> Self {
        Self {
            comparison,
            color: false,
        }
    }

    /// Builder: Highlight differing lines
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    fn write_field(&self, f: &mut fmt::Formatter<'_>, field: &FieldComparison) -> fmt::Result {
        let line = format!(
            "{:>25}: {:>30} {:>30}",
            field.label,
            field.reference.as_deref().unwrap_or(""),
            field.new.as_deref().unwrap_or("")
        );
        if self.color && field.differs() {
            writeln!(f, "{}{}{}", HIGHLIGHT, line, RESET)
        } else {
            writeln!(f, "{}", line)
        }
    }

    fn write_series(&self, f: &mut fmt::Formatter<'_>, series: &SeriesComparison) -> fmt::Result {
        writeln!(
            f,
            "Series '{}'",
            series.description.as_deref().unwrap_or("(no description)")
        )?;
        writeln!(f, "{}", "-".repeat(88))?;
        match &series.reference_uid {
            Some(uid) => writeln!(f, "{:>25}: {:>30} {:>30}", "Series UID", uid, series.new_uid)?,
            None => writeln!(
                f,
                "{:>25}: {:>30} {:>30}",
                "Series UID", "(no reference match)", series.new_uid
            )?,
        }
        for field in series.fields.iter().chain(series.parameters.iter()) {
            self.write_field(f, field)?;
        }
        writeln!(f)
    }
}

impl<'a> fmt::Display for TextReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>25}  {:>30} {:>30}", "", "Reference", "New")?;
        writeln!(f)?;

        writeln!(f, "Patient")?;
        writeln!(f, "{}", "-".repeat(88))?;
        for field in &self.comparison.patient {
            self.write_field(f, field)?;
        }
        writeln!(f)?;

        writeln!(f, "Scanner")?;
        writeln!(f, "{}", "-".repeat(88))?;
        for field in &self.comparison.scanner {
            self.write_field(f, field)?;
        }
        writeln!(f)?;

        if self.comparison.series.is_empty() {
            writeln!(f, "No comparable series found")?;
        }
        for series in &self.comparison.series {
            self.write_series(f, series)?;
        }

        write!(
            f,
            "{} difference(s) in {} series",
            self.comparison.difference_count(),
            self.comparison.series.len()
        )
    }
}
