//! Shared recomputation pipeline
//!
//! One user interaction (upload or control change) triggers one synchronous
//! pass: Normalize → Filter → Layout → Build. Each stage is a pure function;
//! the pass produces a fresh `PlotRun` and nothing persists between passes.

use crate::chart::{build_chart, ChartDescriptor};
use crate::config::PlotConfig;
use crate::error::{PlotError, Result};
use crate::layout::compute_layout;
use crate::palettes::group_colors;
use crate::record::{normalize, Record};
use crate::select::{category_order, filter, group_order};
use crate::table::RawTable;

/// Result of one computation pass
#[derive(Debug, Clone)]
pub struct PlotRun {
    /// Filtered, normalized records (the view exposed for raw-data export)
    pub records: Vec<Record>,

    /// Rows dropped during normalization (data-quality warning count)
    pub dropped_rows: usize,

    /// Distinct categories of the filtered set, first-appearance order
    pub category_order: Vec<String>,

    /// Distinct groups of the filtered set, first-appearance order
    pub group_order: Vec<String>,

    /// The chart description, or `None` when there is nothing to display
    pub chart: Option<ChartDescriptor>,
}

impl PlotRun {
    /// Whether this pass produced a chart
    pub fn has_chart(&self) -> bool {
        self.chart.is_some()
    }

    /// Largest point estimate among retained records (for metric display)
    pub fn max_estimate(&self) -> Option<f64> {
        self.records
            .iter()
            .map(|r| r.estimate)
            .fold(None, |acc, v| Some(acc.map_or(v, |a: f64| a.max(v))))
    }

    /// Export the filtered, normalized view as CSV text
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        writer
            .write_record(["category", "group", "estimate", "interval_low", "interval_high"])
            .map_err(|e| PlotError::Table(format!("Failed to write CSV header: {}", e)))?;

        for r in &self.records {
            writer
                .write_record([
                    r.category.as_str(),
                    r.group.as_str(),
                    &r.estimate.to_string(),
                    &r.interval_low.to_string(),
                    &r.interval_high.to_string(),
                ])
                .map_err(|e| PlotError::Table(format!("Failed to write CSV row: {}", e)))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| PlotError::Table(format!("Failed to flush CSV: {}", e)))?;
        String::from_utf8(bytes).map_err(|e| PlotError::Other(e.to_string()))
    }
}

/// Run one full pass over a raw table with the given configuration
///
/// Configuration problems (duplicate or unknown column roles) abort the pass
/// before the layout engine runs. Dropped rows and an empty selection are
/// reported on the output, not raised as errors.
pub fn run(table: &RawTable, config: &PlotConfig) -> Result<PlotRun> {
    let (records, dropped_rows) = normalize(table, &config.columns)?;

    // Resolve inclusion sets; None means everything available
    let allowed_categories = match &config.selection.categories {
        Some(set) => set.clone(),
        None => category_order(&records).into_iter().collect(),
    };
    let allowed_groups = match &config.selection.groups {
        Some(set) => set.clone(),
        None => group_order(&records).into_iter().collect(),
    };

    let filtered = filter(&records, &allowed_categories, &allowed_groups);

    // Orderings come from the retained records only, so the layout compacts
    let categories = category_order(&filtered);
    let groups = group_order(&filtered);

    let slots = compute_layout(&filtered, &categories, &groups);
    let colors = group_colors(&groups, &config.palette);
    let chart = build_chart(&filtered, &slots, &groups, &colors, config);

    Ok(PlotRun {
        records: filtered,
        dropped_rows,
        category_order: categories,
        group_order: groups,
        chart,
    })
}
