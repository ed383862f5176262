use super::*;

/// Resolve a point annotation. Both scales and both values are
/// required; either mapping to a non-finite pixel skips the pass.
pub(super) fn resolve(options: &PointOptions, state: &ChartState) -> Option<PointViewModel> {
    let x_scale = state.scale(options.x_scale_id.as_deref()?)?;
    let y_scale = state.scale(options.y_scale_id.as_deref()?)?;
    let x_value = options.x_value?;
    let y_value = options.y_value?;
    let x = x_scale.pixel_for_value(x_value, None);
    let y = y_scale.pixel_for_value(y_value, None);
    if !x.is_finite() || !y.is_finite() {
        return None;
    }

    let area = &state.area;
    let horizontal_guide = options.draw_horizontal_line.then(|| {
        if options.draw_horizontal_line_over_point {
            vec![Segment {
                x1: area.left,
                y1: y,
                x2: area.right,
                y2: y,
            }]
        } else {
            vec![
                Segment {
                    x1: area.left,
                    y1: y,
                    x2: x - options.radius,
                    y2: y,
                },
                Segment {
                    x1: x + options.radius,
                    y1: y,
                    x2: area.right,
                    y2: y,
                },
            ]
        }
    });
    let vertical_guide = options.draw_vertical_line.then(|| {
        if options.draw_vertical_line_over_point {
            vec![Segment {
                x1: x,
                y1: area.top,
                x2: x,
                y2: area.bottom,
            }]
        } else {
            vec![
                Segment {
                    x1: x,
                    y1: area.top,
                    x2: x,
                    y2: y - options.radius,
                },
                Segment {
                    x1: x,
                    y1: y + options.radius,
                    x2: x,
                    y2: area.bottom,
                },
            ]
        }
    });

    let label = label::point_label(&options.label, state, x, y);

    let mut range_map = RangeMap::new();
    if let Some(id) = options.x_scale_id.as_deref() {
        range_map.insert(id.to_string(), ranges::value_span(x_value, None));
    }
    if let Some(id) = options.y_scale_id.as_deref() {
        range_map.insert(id.to_string(), ranges::value_span(y_value, None));
    }

    Some(PointViewModel {
        x,
        y,
        radius: options.radius,
        style: options.style,
        rotation: options.rotation,
        clip: clip::plot_area(area),
        border_color: options.border_color.clone(),
        border_width: options.border_width,
        border_dash: options.border_dash.clone(),
        background_color: options.background_color.clone(),
        horizontal_guide,
        vertical_guide,
        label,
        ranges: range_map,
    })
}
