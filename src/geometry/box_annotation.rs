use super::*;

/// Resolve a box annotation. Each axis bound is an explicit data value
/// when given, otherwise the matching plot edge; either axis may run
/// without a scale, in which case it covers the whole plot. A bound
/// that maps to a non-finite pixel skips the annotation for the pass.
pub(super) fn resolve(options: &BoxOptions, state: &ChartState) -> Option<BoxViewModel> {
    let area = &state.area;
    let x_scale = options.x_scale_id.as_deref().and_then(|id| state.scale(id));
    let y_scale = options.y_scale_id.as_deref().and_then(|id| state.scale(id));

    let (left, right) = axis_span(x_scale, options.x_min, options.x_max, area.left, area.right)?;
    let (top, bottom) = axis_span(y_scale, options.y_min, options.y_max, area.bottom, area.top)?;

    let label = label::box_label(
        &options.label,
        state,
        left,
        top,
        x_scale.is_some(),
        y_scale.is_some(),
    );

    let mut range_map = RangeMap::new();
    if let (Some(id), Some(s)) = (options.x_scale_id.as_deref(), x_scale) {
        range_map.insert(
            id.to_string(),
            ranges::axis_range(s, options.x_min, options.x_max, area.left, area.right),
        );
    }
    if let (Some(id), Some(s)) = (options.y_scale_id.as_deref(), y_scale) {
        range_map.insert(
            id.to_string(),
            ranges::axis_range(s, options.y_min, options.y_max, area.bottom, area.top),
        );
    }

    Some(BoxViewModel {
        left,
        top,
        right,
        bottom,
        clip: clip::plot_area(area),
        border_color: options.border_color.clone(),
        border_width: options.border_width,
        border_dash: options.border_dash.clone(),
        background_color: options.background_color.clone(),
        label,
        ranges: range_map,
    })
}

/// Ordered pixel edges for one axis. Without a scale the plot edges
/// apply directly; with one, each explicit bound maps through it and a
/// non-finite result drops the whole annotation.
fn axis_span(
    scale: Option<&dyn Scale>,
    min: Option<f64>,
    max: Option<f64>,
    lo_edge: f32,
    hi_edge: f32,
) -> Option<(f32, f32)> {
    let Some(scale) = scale else {
        return Some((lo_edge.min(hi_edge), lo_edge.max(hi_edge)));
    };
    let a = match min {
        Some(v) => scale.pixel_for_value(v, None),
        None => lo_edge,
    };
    let b = match max {
        Some(v) => scale.pixel_for_value(v, None),
        None => hi_edge,
    };
    (a.is_finite() && b.is_finite()).then(|| (a.min(b), a.max(b)))
}
