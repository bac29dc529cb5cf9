//! Tabular normalization
//!
//! Turns a raw table plus a column-role mapping into the canonical 5-field
//! record set. Category and group cells are kept as text; the three numeric
//! roles are coerced to finite floats, and any row with a missing or
//! unparseable numeric value is dropped and counted. The layout engine
//! downstream assumes fully-numeric records and is never called otherwise.

use crate::config::ColumnMap;
use crate::error::Result;
use crate::table::RawTable;

/// One retained observation: a point estimate with its confidence interval
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub category: String,
    pub group: String,
    pub estimate: f64,
    pub interval_low: f64,
    pub interval_high: f64,
}

impl Record {
    /// Downward whisker magnitude, clamped to zero for malformed intervals
    pub fn error_low(&self) -> f64 {
        (self.estimate - self.interval_low).max(0.0)
    }

    /// Upward whisker magnitude, clamped to zero for malformed intervals
    pub fn error_high(&self) -> f64 {
        (self.interval_high - self.estimate).max(0.0)
    }
}

/// Coerce a cell to a finite numeric value; None means missing
fn coerce_numeric(cell: Option<&String>) -> Option<f64> {
    let text = cell?.trim();
    if text.is_empty() {
        return None;
    }
    let value: f64 = text.parse().ok()?;
    value.is_finite().then_some(value)
}

/// Normalize a raw table into records using the given column roles
///
/// Returns the retained records in row order plus the number of rows dropped
/// because a numeric cell was missing or would not coerce. The dropped count
/// is surfaced to the user as a data-quality warning; it is not an error.
///
/// Fails with `PlotError::Config` before producing any record when the
/// column map is invalid (duplicate roles or unknown column names).
pub fn normalize(table: &RawTable, columns: &ColumnMap) -> Result<(Vec<Record>, usize)> {
    columns.validate(table)?;

    let mut records = Vec::with_capacity(table.n_rows());
    let mut dropped = 0usize;

    for row in &table.rows {
        let estimate = coerce_numeric(row.get(&columns.estimate));
        let interval_low = coerce_numeric(row.get(&columns.interval_low));
        let interval_high = coerce_numeric(row.get(&columns.interval_high));

        match (estimate, interval_low, interval_high) {
            (Some(estimate), Some(interval_low), Some(interval_high)) => {
                records.push(Record {
                    category: row.get(&columns.category).cloned().unwrap_or_default(),
                    group: row.get(&columns.group).cloned().unwrap_or_default(),
                    estimate,
                    interval_low,
                    interval_high,
                });
            }
            _ => dropped += 1,
        }
    }

    Ok((records, dropped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlotError;

    fn column_map() -> ColumnMap {
        ColumnMap {
            category: "Effect".to_string(),
            group: "Arm".to_string(),
            estimate: "TI".to_string(),
            interval_low: "Low".to_string(),
            interval_high: "High".to_string(),
        }
    }

    fn sample_table() -> RawTable {
        RawTable::from_csv(
            b"Effect,Arm,TI,Low,High\n\
              Nausea,Drug A,0.20,0.15,0.28\n\
              Nausea,Drug B,0.10,0.05,0.18\n\
              Headache,Drug A,n/a,0.01,0.09\n\
              Headache,Drug B,0.04,,0.08\n",
        )
        .unwrap()
    }

    #[test]
    fn test_normalize_drops_bad_numeric_rows() {
        let (records, dropped) = normalize(&sample_table(), &column_map()).unwrap();

        // Both Headache rows have a missing/unparseable numeric value
        assert_eq!(records.len(), 2);
        assert_eq!(dropped, 2);
        assert_eq!(records[0].category, "Nausea");
        assert_eq!(records[0].group, "Drug A");
        assert_eq!(records[0].estimate, 0.20);
        assert_eq!(records[1].group, "Drug B");
    }

    #[test]
    fn test_normalize_preserves_row_order() {
        let (records, _) = normalize(&sample_table(), &column_map()).unwrap();
        let groups: Vec<&str> = records.iter().map(|r| r.group.as_str()).collect();
        assert_eq!(groups, vec!["Drug A", "Drug B"]);
    }

    #[test]
    fn test_normalize_rejects_duplicate_roles() {
        let mut columns = column_map();
        columns.group = "Effect".to_string(); // same column for two roles

        let result = normalize(&sample_table(), &columns);
        assert!(matches!(result, Err(PlotError::Config(_))));
    }

    #[test]
    fn test_normalize_rejects_unknown_column() {
        let mut columns = column_map();
        columns.estimate = "Rate".to_string();

        let result = normalize(&sample_table(), &columns);
        assert!(matches!(result, Err(PlotError::Config(_))));
    }

    #[test]
    fn test_normalize_rejects_non_finite() {
        let table = RawTable::from_csv(b"Effect,Arm,TI,Low,High\nNausea,Drug A,inf,0.1,0.2\n")
            .unwrap();
        let (records, dropped) = normalize(&table, &column_map()).unwrap();
        assert!(records.is_empty());
        assert_eq!(dropped, 1);
    }

    #[test]
    fn test_error_magnitudes_clamped() {
        let record = Record {
            category: "Nausea".to_string(),
            group: "Drug A".to_string(),
            estimate: 0.10,
            interval_low: 0.15, // malformed: lower bound above the estimate
            interval_high: 0.08,
        };
        assert_eq!(record.error_low(), 0.0);
        assert_eq!(record.error_high(), 0.0);
    }

    #[test]
    fn test_error_magnitudes_asymmetric() {
        let record = Record {
            category: "Nausea".to_string(),
            group: "Drug A".to_string(),
            estimate: 0.20,
            interval_low: 0.15,
            interval_high: 0.28,
        };
        assert!((record.error_low() - 0.05).abs() < 1e-12);
        assert!((record.error_high() - 0.08).abs() < 1e-12);
    }
}
