use super::*;

/// Resolve a line annotation against the current scales. The value axis
/// is named by `scale_id`; the orthogonal span covers the plot area
/// unless a span scale narrows it. Returns None when the controlling
/// scale is missing or yields a non-finite pixel, in which case nothing
/// is drawn or hit-tested this pass.
pub(super) fn resolve(options: &LineOptions, state: &ChartState) -> Option<LineViewModel> {
    let scale_id = options.scale_id.as_deref()?;
    let scale = state.scale(scale_id)?;
    let value = options.value?;
    let pixel = scale.pixel_for_value(value, options.value_index);
    let end_pixel = match options.end_value {
        Some(end) => scale.pixel_for_value(end, options.value_index),
        None => pixel,
    };
    if !pixel.is_finite() || !end_pixel.is_finite() {
        return None;
    }

    let area = &state.area;
    let span_scale = options.span_scale_id.as_deref();
    let (x1, y1, x2, y2) = match options.orientation {
        Orientation::Horizontal => {
            let x1 = span_pixel(state, span_scale, options.span_min).unwrap_or(area.left);
            let x2 = span_pixel(state, span_scale, options.span_max).unwrap_or(area.right);
            (x1, pixel, x2, end_pixel)
        }
        Orientation::Vertical => {
            let y1 = span_pixel(state, span_scale, options.span_min).unwrap_or(area.top);
            let y2 = span_pixel(state, span_scale, options.span_max).unwrap_or(area.bottom);
            (pixel, y1, end_pixel, y2)
        }
    };

    let line = LinearMap::new(x1, y1, x2, y2);
    let label = label::segment_label(
        &options.label,
        state,
        options.orientation,
        x1,
        y1,
        x2,
        y2,
        &line,
    );

    let mut range_map = RangeMap::new();
    range_map.insert(
        scale_id.to_string(),
        ranges::value_span(value, options.end_value),
    );

    Some(LineViewModel {
        orientation: options.orientation,
        x1,
        y1,
        x2,
        y2,
        line,
        clip: clip::extended(area, options.extend),
        border_color: options.border_color.clone(),
        border_width: options.border_width,
        border_dash: options.border_dash.clone(),
        border_dash_offset: options.border_dash_offset,
        shadow: options.shadow.map(|offsets| LineShadow {
            offsets,
            width: options.shadow_width,
            color: options.shadow_color.clone(),
        }),
        label,
        ranges: range_map,
    })
}

/// Pixel for a span bound, when the bound, the span scale, and a finite
/// mapping all exist. Anything missing falls back to the plot edge at
/// the call site.
fn span_pixel(state: &ChartState, scale_id: Option<&str>, bound: Option<f64>) -> Option<f32> {
    let scale = state.scale(scale_id?)?;
    let pixel = scale.pixel_for_value(bound?, None);
    pixel.is_finite().then_some(pixel)
}
