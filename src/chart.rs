//! Chart descriptor builder
//!
//! Combines the filtered records, their layout slots, per-group colors and
//! the user configuration into a declarative chart description: one scatter
//! series with asymmetric error bars per group, axis ranges, categorical tick
//! placements, a vertical reference line and optional tinted zones. The
//! descriptor is a plain value object; drawing it is the rendering
//! collaborator's job.

use crate::config::{MarkerStyle, PlotConfig};
use crate::layout::LayoutSlot;
use crate::record::Record;
use serde::Serialize;
use std::collections::HashMap;

/// Fractional padding applied on each side of the value axis
const AXIS_BUFFER: f64 = 0.1;

/// Vertical padding above the topmost and below the bottommost block
const Y_AXIS_PAD: f64 = 1.5;

/// Zone tints and opacity
const FAVORABLE_FILL: &str = "#90EE90";
const UNFAVORABLE_FILL: &str = "#F08080";
const ZONE_OPACITY: f64 = 0.15;

/// Series color when a group has no palette assignment
const FALLBACK_SERIES_COLOR: &str = "#1f77b4";

/// Inclusive axis range
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

/// A tick on the category axis
#[derive(Debug, Clone, Serialize)]
pub struct AxisTick {
    pub position: f64,
    pub label: String,
}

/// Vertical reference line with its display label
#[derive(Debug, Clone, Serialize)]
pub struct ReferenceLine {
    pub value: f64,
    pub label: String,
}

/// Which side of the reference line a zone tints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneKind {
    Favorable,
    Unfavorable,
}

/// A shaded vertical band behind the data
#[derive(Debug, Clone, Serialize)]
pub struct Zone {
    pub start: f64,
    pub end: f64,
    pub fill: String,
    pub opacity: f64,
    pub kind: ZoneKind,
}

/// Tooltip payload for one point
#[derive(Debug, Clone, Serialize)]
pub struct HoverInfo {
    pub category: String,
    pub interval_low: f64,
    pub interval_high: f64,
}

/// One scatter-with-error-bars series (one per group)
#[derive(Debug, Clone, Serialize)]
pub struct Series {
    pub name: String,
    pub color: String,
    pub marker: MarkerStyle,
    /// Point estimates
    pub x: Vec<f64>,
    /// Layout positions
    pub y: Vec<f64>,
    /// Upward whisker magnitudes (clamped >= 0)
    pub error_high: Vec<f64>,
    /// Downward whisker magnitudes (clamped >= 0)
    pub error_low: Vec<f64>,
    pub hover: Vec<HoverInfo>,
}

/// The declarative chart description consumed by the renderer
#[derive(Debug, Clone, Serialize)]
pub struct ChartDescriptor {
    pub series: Vec<Series>,
    pub x_axis: AxisRange,
    pub y_axis: AxisRange,
    pub y_ticks: Vec<AxisTick>,
    pub reference_line: ReferenceLine,
    pub zones: Vec<Zone>,
    pub width: i32,
    pub height: i32,
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
}

/// Build a chart descriptor from filtered records and their layout slots
///
/// `slots` must be parallel to `records` (one slot per record, same order).
/// Returns `None` for an empty record set: nothing to render, not an error.
pub fn build_chart(
    records: &[Record],
    slots: &[LayoutSlot],
    group_order: &[String],
    colors: &HashMap<String, String>,
    config: &PlotConfig,
) -> Option<ChartDescriptor> {
    if records.is_empty() {
        return None;
    }

    let x_axis = value_axis_range(records);

    // One series per group, in group order
    let mut series = Vec::with_capacity(group_order.len());
    for group in group_order {
        let mut s = Series {
            name: group.clone(),
            color: colors
                .get(group)
                .cloned()
                .unwrap_or_else(|| FALLBACK_SERIES_COLOR.to_string()),
            marker: config.marker,
            x: Vec::new(),
            y: Vec::new(),
            error_high: Vec::new(),
            error_low: Vec::new(),
            hover: Vec::new(),
        };

        for (record, slot) in records.iter().zip(slots) {
            if &record.group != group {
                continue;
            }
            s.x.push(record.estimate);
            s.y.push(slot.y);
            s.error_high.push(record.error_high());
            s.error_low.push(record.error_low());
            s.hover.push(HoverInfo {
                category: record.category.clone(),
                interval_low: record.interval_low,
                interval_high: record.interval_high,
            });
        }

        if !s.x.is_empty() {
            series.push(s);
        }
    }

    // Ticks sit exactly at the labeled slots, one per category
    let y_ticks: Vec<AxisTick> = slots
        .iter()
        .filter(|slot| !slot.label.is_empty())
        .map(|slot| AxisTick {
            position: slot.y,
            label: slot.label.clone(),
        })
        .collect();

    let y_max = slots.iter().map(|s| s.y).fold(f64::NEG_INFINITY, f64::max);
    let y_axis = AxisRange {
        min: -Y_AXIS_PAD,
        max: y_max + Y_AXIS_PAD,
    };

    let zones = if config.show_zones {
        vec![
            Zone {
                start: x_axis.min,
                end: config.reference_line,
                fill: FAVORABLE_FILL.to_string(),
                opacity: ZONE_OPACITY,
                kind: ZoneKind::Favorable,
            },
            Zone {
                start: config.reference_line,
                end: x_axis.max,
                fill: UNFAVORABLE_FILL.to_string(),
                opacity: ZONE_OPACITY,
                kind: ZoneKind::Unfavorable,
            },
        ]
    } else {
        Vec::new()
    };

    let n_categories = y_ticks.len();

    Some(ChartDescriptor {
        series,
        x_axis,
        y_axis,
        y_ticks,
        reference_line: ReferenceLine {
            value: config.reference_line,
            label: format!("Reference = {}", config.reference_line),
        },
        zones,
        width: config.width.resolve_width(),
        height: config.height.resolve_height(n_categories),
        title: config.title.clone(),
        x_label: config.x_label.clone(),
        y_label: config.y_label.clone(),
    })
}

/// Value-axis range: data extent padded 10% each side, floored at zero
/// (incidence rates are non-negative)
fn value_axis_range(records: &[Record]) -> AxisRange {
    let min_low = records
        .iter()
        .map(|r| r.interval_low)
        .fold(f64::INFINITY, f64::min);
    let max_high = records
        .iter()
        .map(|r| r.interval_high)
        .fold(f64::NEG_INFINITY, f64::max);

    let buffer = (max_high - min_low) * AXIS_BUFFER;
    AxisRange {
        min: (min_low - buffer).max(0.0),
        max: max_high + buffer,
    }
}
