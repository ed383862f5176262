use super::*;

/// Cap length along a horizontal span.
pub(crate) const CAP_LENGTH: f32 = 10.0;
/// Cap length along a vertical span.
pub(crate) const CAP_LENGTH_VERTICAL: f32 = 11.0;
/// Half the cap base, perpendicular to the span.
pub(crate) const CAP_HALF_WIDTH: f32 = 10.0;
/// Caps may poke past the clip by up to a cap length, and the connector
/// butts one more pixel; drawing widens the clip rect by this much.
pub(crate) const CAP_CLIP_MARGIN: f32 = CAP_LENGTH_VERTICAL + 1.0;
/// Nudge keeping an on-point cap tip just short of its anchor pixel.
const ON_POINT_OFFSET: f32 = 5.0;

/// Cap layout, resolved once from `align` and the mirror flags so the
/// drawing side never re-derives the combinatorics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArrowVariant {
    /// Align points at neither end and no mirror: nothing to cap.
    Uncapped,
    /// Cap at the span start.
    Head,
    /// Cap at the span end (or the mirror anchor).
    Tail,
    /// Caps at both ends.
    Both,
    /// Tail cap with the connector stroke back to the start.
    TailConnected,
    /// Caps at both ends joined by the connector stroke.
    BothConnected,
}

fn variant_for(options: &ArrowOptions) -> ArrowVariant {
    let (near_side, far_side) = match options.orientation {
        Orientation::Horizontal => (Align::Left, Align::Right),
        Orientation::Vertical => (Align::Top, Align::Bottom),
    };
    let near = options.align == near_side;
    let far = options.mirror || options.align == far_side;
    match (near, far, far && options.connect_mirror) {
        (true, true, true) => ArrowVariant::BothConnected,
        (true, true, false) => ArrowVariant::Both,
        (true, false, _) => ArrowVariant::Head,
        (false, true, true) => ArrowVariant::TailConnected,
        (false, true, false) => ArrowVariant::Tail,
        (false, false, _) => ArrowVariant::Uncapped,
    }
}

/// Resolve an arrow annotation. Arrows run like lines but carry
/// triangular caps; when `scale_id` names no scale the cross-axis scale
/// takes over (the y scale for horizontal arrows, the x scale for
/// vertical ones).
pub(super) fn resolve(options: &ArrowOptions, state: &ChartState) -> Option<ArrowViewModel> {
    let x_scale = options.x_scale_id.as_deref().and_then(|id| state.scale(id));
    let y_scale = options.y_scale_id.as_deref().and_then(|id| state.scale(id));
    let scale = options
        .scale_id
        .as_deref()
        .and_then(|id| state.scale(id))
        .or(match options.orientation {
            Orientation::Horizontal => y_scale,
            Orientation::Vertical => x_scale,
        })?;

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
    let padding = options.padding * if options.align == Align::Left { -1.0 } else { 1.0 };
    let y_padding = options.y_padding * if options.align == Align::Top { -1.0 } else { 1.0 };

    let mut mirror_pixel = None;
    let (x1, y1, x2, y2) = match options.orientation {
        Orientation::Horizontal => {
            let mut x1 = area.left + padding;
            let x2 = area.right + padding;
            if let Some(on_point) = options.on_point
                && let Some(cross) = x_scale
            {
                x1 += cross.pixel_for_value(on_point, None) - ON_POINT_OFFSET;
                mirror_pixel = options
                    .mirror_point
                    .map(|v| cross.pixel_for_value(v, None));
            }
            (x1, pixel + y_padding, x2, end_pixel + y_padding)
        }
        Orientation::Vertical => {
            let mut y1 = area.top + y_padding;
            let y2 = area.bottom + y_padding;
            if let Some(on_point) = options.on_point
                && let Some(cross) = y_scale
            {
                y1 += cross.pixel_for_value(on_point, None) - ON_POINT_OFFSET;
                mirror_pixel = options
                    .mirror_point
                    .map(|v| cross.pixel_for_value(v, None));
            }
            (pixel + padding, y1, end_pixel + padding, y2)
        }
    };

    let variant = variant_for(options);
    let (caps, connector) = cap_layout(options, variant, x1, y1, x2, y2, mirror_pixel);

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
    if let Some(id) = options.scale_id.as_deref() {
        range_map.insert(id.to_string(), ranges::value_span(value, options.end_value));
    }
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

    Some(ArrowViewModel {
        orientation: options.orientation,
        x1,
        y1,
        x2,
        y2,
        line,
        clip: clip::shifted(area, padding, y_padding),
        caps,
        connector,
        border_color: options.border_color.clone(),
        border_width: options.border_width,
        border_dash: options.border_dash.clone(),
        border_dash_offset: options.border_dash_offset,
        fill_color: options.background_color.clone(),
        label,
        ranges: range_map,
    })
}

fn cap_layout(
    options: &ArrowOptions,
    variant: ArrowVariant,
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    mirror_pixel: Option<f32>,
) -> (Vec<ArrowCap>, Option<Segment>) {
    use ArrowVariant::*;
    let near = matches!(variant, Head | Both | BothConnected);
    let far = matches!(variant, Tail | Both | TailConnected | BothConnected);
    let connect = matches!(variant, TailConnected | BothConnected);

    let mut caps = Vec::new();
    let mut connector = None;
    match options.orientation {
        Orientation::Horizontal => {
            // Inside caps point back into the span from one cap length in.
            let shift = if options.inside { CAP_LENGTH } else { 0.0 };
            if near {
                caps.push(ArrowCap {
                    tip_x: x1 + shift,
                    tip_y: y1,
                    direction: CapDirection::Right,
                });
            }
            if far {
                let anchor = if options.on_point.is_some() {
                    mirror_pixel.unwrap_or(x1)
                } else {
                    x2
                };
                caps.push(ArrowCap {
                    tip_x: anchor - shift,
                    tip_y: y1,
                    direction: CapDirection::Left,
                });
                if connect {
                    connector = Some(Segment {
                        x1: x1 + shift - 1.0,
                        y1,
                        x2: anchor - shift + 1.0,
                        y2: y1,
                    });
                }
            }
        }
        Orientation::Vertical => {
            let shift = if options.inside { CAP_LENGTH_VERTICAL } else { 0.0 };
            if near {
                caps.push(ArrowCap {
                    tip_x: x1,
                    tip_y: y1 + shift,
                    direction: CapDirection::Down,
                });
            }
            if far {
                let anchor = if options.on_point.is_some() {
                    mirror_pixel.unwrap_or(y1)
                } else {
                    y2
                };
                caps.push(ArrowCap {
                    tip_x: x1,
                    tip_y: anchor - shift,
                    direction: CapDirection::Up,
                });
                if connect {
                    connector = Some(Segment {
                        x1,
                        y1: y1 + shift - 1.0,
                        x2: x1,
                        y2: anchor - shift + 1.0,
                    });
                }
            }
        }
    }
    (caps, connector)
}
