//! Forest plot layout and chart description engine
//!
//! Turns a raw table (category, group, estimate, confidence interval) plus
//! user-chosen options into a declarative forest-plot description: per-group
//! scatter series with asymmetric error bars, categorical tick placements, a
//! reference line and optional tinted zones. Rendering, file parsing and the
//! widget layer are external collaborators; this crate is the pure
//! data-to-layout core they share.

pub mod chart;
pub mod config;
pub mod error;
pub mod layout;
pub mod palettes;
pub mod pipeline;
pub mod record;
pub mod select;
pub mod table;

pub use chart::ChartDescriptor;
pub use config::{ColumnMap, MarkerStyle, MarkerSymbol, PlotConfig, PlotDimension, Selection};
pub use error::{PlotError, Result};
pub use pipeline::{run, PlotRun};
pub use record::Record;
pub use table::RawTable;
