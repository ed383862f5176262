use crate::scale::Scale;

use super::types::ValueRange;

/// Explicit bound when the caller gave one, otherwise the value under
/// the plot edge.
fn bound_or_edge(scale: &dyn Scale, explicit: Option<f64>, edge_pixel: f32) -> f64 {
    match explicit {
        Some(value) => value,
        None => scale.value_for_pixel(edge_pixel),
    }
}

/// Data range covered on one axis, normalized so min <= max even when
/// the caller swapped the bounds or the scale runs in reverse.
pub(super) fn axis_range(
    scale: &dyn Scale,
    min: Option<f64>,
    max: Option<f64>,
    lo_edge_pixel: f32,
    hi_edge_pixel: f32,
) -> ValueRange {
    ValueRange::normalized(
        bound_or_edge(scale, min, lo_edge_pixel),
        bound_or_edge(scale, max, hi_edge_pixel),
    )
}

/// Range for a single value with an optional end value.
pub(super) fn value_span(value: f64, end_value: Option<f64>) -> ValueRange {
    ValueRange::normalized(value, end_value.unwrap_or(value))
}
