//! Plot configuration
//!
//! Everything the UI collaborator collects from the user: which raw columns
//! play which role, which categories/groups to keep, the reference value,
//! zone toggle, palette, marker style and target pixel dimensions. All of it
//! flows into the pure pipeline functions; the crate holds no widget or
//! session state.

use crate::error::{PlotError, Result};
use crate::palettes::DEFAULT_PALETTE;
use crate::table::RawTable;
use serde::Serialize;
use std::collections::HashSet;

/// Marker size slider range and default
const MARKER_SIZE_MIN: f64 = 4.0;
const MARKER_SIZE_MAX: f64 = 16.0;
const MARKER_SIZE_DEFAULT: f64 = 10.0;

/// Assignment of five raw column names to the five canonical roles
#[derive(Debug, Clone)]
pub struct ColumnMap {
    pub category: String,
    pub group: String,
    pub estimate: String,
    pub interval_low: String,
    pub interval_high: String,
}

impl ColumnMap {
    /// The five (role, column) pairs in canonical order
    fn roles(&self) -> [(&'static str, &str); 5] {
        [
            ("category", &self.category),
            ("group", &self.group),
            ("estimate", &self.estimate),
            ("interval_low", &self.interval_low),
            ("interval_high", &self.interval_high),
        ]
    }

    /// Check the mapping against a raw table
    ///
    /// The five roles must reference pairwise distinct columns, and every
    /// mapped name must exist in the table. Both violations halt the
    /// computation pass before any record is produced.
    pub fn validate(&self, table: &RawTable) -> Result<()> {
        let mut seen = HashSet::new();
        for (role, column) in self.roles() {
            if !seen.insert(column) {
                return Err(PlotError::Config(format!(
                    "Column '{}' is mapped to more than one role (second: {})",
                    column, role
                )));
            }
            if !table.has_column(column) {
                return Err(PlotError::Config(format!(
                    "Column '{}' (role: {}) not found in the uploaded table",
                    column, role
                )));
            }
        }
        Ok(())
    }
}

/// Marker symbol shown at each point estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerSymbol {
    #[default]
    Circle,
    Diamond,
    Square,
    Cross,
}

impl MarkerSymbol {
    /// Parse from string value; unknown values fall back to circle
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "diamond" => Self::Diamond,
            "square" => Self::Square,
            "cross" => Self::Cross,
            _ => Self::Circle,
        }
    }
}

/// Marker shape and pixel size for every series
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MarkerStyle {
    pub symbol: MarkerSymbol,
    pub size: f64,
}

impl MarkerStyle {
    /// Create a style, clamping the size to the UI slider range [4, 16]
    pub fn new(symbol: MarkerSymbol, size: f64) -> Self {
        MarkerStyle {
            symbol,
            size: size.clamp(MARKER_SIZE_MIN, MARKER_SIZE_MAX),
        }
    }
}

impl Default for MarkerStyle {
    fn default() -> Self {
        MarkerStyle {
            symbol: MarkerSymbol::Circle,
            size: MARKER_SIZE_DEFAULT,
        }
    }
}

/// Plot dimension - either explicit pixels or "auto" (derived from the data)
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PlotDimension {
    #[default]
    Auto,
    Pixels(i32),
}

impl PlotDimension {
    /// Parse from a string property value
    ///
    /// Valid formats:
    /// - "auto" or "" (empty) → Auto
    /// - "1300" → Pixels(1300) if inside [min, max]
    pub fn from_str(value: &str, min: i32, max: i32, default: PlotDimension) -> Self {
        let trimmed = value.trim();

        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("auto") {
            return PlotDimension::Auto;
        }

        match trimmed.parse::<i32>() {
            Ok(px) if (min..=max).contains(&px) => PlotDimension::Pixels(px),
            Ok(px) => {
                eprintln!(
                    "⚠ Plot dimension {} out of valid range [{}-{}], using default: {:?}",
                    px, min, max, default
                );
                default
            }
            Err(_) => {
                eprintln!(
                    "⚠ Invalid plot dimension '{}', using default: {:?}",
                    trimmed, default
                );
                default
            }
        }
    }

    /// Resolve the plot width in pixels; Auto uses the standard width
    pub fn resolve_width(&self) -> i32 {
        match self {
            PlotDimension::Pixels(px) => *px,
            PlotDimension::Auto => 1300,
        }
    }

    /// Resolve the plot height in pixels
    ///
    /// Auto derives from the category count, since each category occupies a
    /// vertical block: 400px base + 60px per category, capped at 1500px.
    pub fn resolve_height(&self, n_categories: usize) -> i32 {
        match self {
            PlotDimension::Pixels(px) => *px,
            PlotDimension::Auto => {
                const BASE_HEIGHT: i32 = 400;
                const HEIGHT_PER_CATEGORY: i32 = 60;
                const MAX_HEIGHT: i32 = 1500;

                let computed = BASE_HEIGHT + n_categories as i32 * HEIGHT_PER_CATEGORY;
                computed.min(MAX_HEIGHT)
            }
        }
    }
}

/// Category/group inclusion sets; `None` keeps everything available
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub categories: Option<HashSet<String>>,
    pub groups: Option<HashSet<String>>,
}

impl Selection {
    /// Keep every available category and group
    pub fn all() -> Self {
        Selection::default()
    }
}

/// Full configuration for one computation pass
#[derive(Debug, Clone)]
pub struct PlotConfig {
    /// Column-role assignment
    pub columns: ColumnMap,

    /// Category/group inclusion sets
    pub selection: Selection,

    /// Vertical reference value estimates are compared against
    pub reference_line: f64,

    /// Tint the regions below/above the reference line
    pub show_zones: bool,

    /// Named palette used for per-group colors
    pub palette: String,

    /// Marker shape and size
    pub marker: MarkerStyle,

    /// Target pixel dimensions
    pub width: PlotDimension,
    pub height: PlotDimension,

    /// Plot title (optional)
    pub title: Option<String>,

    /// Value-axis label (optional)
    pub x_label: Option<String>,

    /// Category-axis label (optional)
    pub y_label: Option<String>,
}

impl PlotConfig {
    /// Create a configuration with the usual defaults: everything selected,
    /// reference at 1.0, zones on, Classic palette, auto dimensions.
    pub fn new(columns: ColumnMap) -> Self {
        PlotConfig {
            columns,
            selection: Selection::all(),
            reference_line: 1.0,
            show_zones: true,
            palette: DEFAULT_PALETTE.to_string(),
            marker: MarkerStyle::default(),
            width: PlotDimension::Auto,
            height: PlotDimension::Auto,
            title: None,
            x_label: None,
            y_label: None,
        }
    }
}
