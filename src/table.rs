//! Raw tabular input
//!
//! The file-reading collaborator delivers uploaded data as a row-major table:
//! each row maps a column name to its cell text. Column order is kept for
//! preview and export purposes. Format detection and parse failures belong to
//! the collaborator; the CSV constructor here is the in-process boundary
//! adapter for it.

use crate::error::{PlotError, Result};
use csv::ReaderBuilder;
use std::collections::HashMap;

/// A raw table as delivered by the file-reading collaborator
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    /// Column names in original order
    pub columns: Vec<String>,
    /// Rows in original order; each maps column name to cell text
    pub rows: Vec<HashMap<String, String>>,
}

impl RawTable {
    /// Create a table from pre-parsed columns and rows
    pub fn new(columns: Vec<String>, rows: Vec<HashMap<String, String>>) -> Self {
        RawTable { columns, rows }
    }

    /// Parse CSV bytes into a raw table
    pub fn from_csv(csv_data: &[u8]) -> Result<Self> {
        let mut reader = ReaderBuilder::new().has_headers(true).from_reader(csv_data);

        let headers = reader
            .headers()
            .map_err(|e| PlotError::Table(format!("Failed to read CSV headers: {}", e)))?;
        let columns: Vec<String> = headers.iter().map(|s| s.to_string()).collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result
                .map_err(|e| PlotError::Table(format!("Failed to parse CSV row: {}", e)))?;

            let row: HashMap<String, String> = columns
                .iter()
                .zip(record.iter())
                .map(|(name, cell)| (name.clone(), cell.to_string()))
                .collect();
            rows.push(row);
        }

        Ok(RawTable { columns, rows })
    }

    /// Number of data rows
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Check whether a column exists
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Get a cell by row index and column name
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(column)).map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_csv() {
        let csv = b"Effect,Arm,TI,Low,High\nNausea,Drug A,0.20,0.15,0.28\nNausea,Drug B,0.10,0.05,0.18\n";
        let table = RawTable::from_csv(csv).unwrap();

        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.n_columns(), 5);
        assert!(table.has_column("TI"));
        assert!(!table.has_column("ti"));
        assert_eq!(table.cell(0, "Effect"), Some("Nausea"));
        assert_eq!(table.cell(1, "Arm"), Some("Drug B"));
        assert_eq!(table.cell(2, "Arm"), None);
    }

    #[test]
    fn test_from_csv_empty_body() {
        let table = RawTable::from_csv(b"a,b,c\n").unwrap();
        assert_eq!(table.n_rows(), 0);
        assert_eq!(table.columns, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_from_csv_ragged_row_fails() {
        let result = RawTable::from_csv(b"a,b\n1,2,3\n");
        assert!(matches!(result, Err(PlotError::Table(_))));
    }
}
