use crate::options::{LabelOptions, LabelPosition, Orientation};
use crate::scale::ChartState;

use super::linear_map::LinearMap;
use super::types::LabelLayout;

/// Offset keeping a clamped label off the plot edge.
const EDGE_MARGIN: f32 = 10.0;

pub(super) struct MeasuredText {
    pub lines: Vec<String>,
    pub width: f32,
    pub height: f32,
}

/// Width of the first rendered line plus the reference-glyph height.
/// The height deliberately reuses the measured width of `M`, which
/// tracks the em box closely enough for single-line label frames.
pub(super) fn measure(options: &LabelOptions, state: &ChartState) -> MeasuredText {
    let font = options.resolved_font();
    let lines: Vec<String> = options
        .content
        .as_deref()
        .unwrap_or("")
        .split('\n')
        .map(|line| line.to_string())
        .collect();
    let width = match lines.first() {
        Some(first) if !first.is_empty() => state.measure_width(first, font.size, &font.family),
        _ => 0.0,
    };
    let height = state.measure_width("M", font.size, &font.family);
    MeasuredText {
        lines,
        width,
        height,
    }
}

/// Content anchor for a label attached to a line or arrow segment. The
/// anchor is the text origin; the caller subtracts the paddings to get
/// the box origin.
pub(super) fn segment_anchor(
    orientation: Orientation,
    options: &LabelOptions,
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    line: &LinearMap,
    width: f32,
    height: f32,
) -> (f32, f32) {
    match (orientation, options.position) {
        (Orientation::Vertical, LabelPosition::Top) => {
            let ya = options.y_padding + options.y_adjust;
            let xa = width / 2.0 + options.x_adjust;
            let y = y1 + ya;
            let x = if line.m.is_finite() { line.x_for_y(y) } else { x1 } - xa;
            (x, y)
        }
        (Orientation::Vertical, LabelPosition::Bottom) => {
            let ya = height + options.y_padding + options.y_adjust;
            let xa = width / 2.0 + options.x_adjust;
            let y = y2 - ya;
            let x = if line.m.is_finite() { line.x_for_y(y) } else { x1 } - xa;
            (x, y)
        }
        (Orientation::Horizontal, LabelPosition::Left) => {
            let xa = options.x_padding + options.x_adjust;
            let ya = -(height / 2.0) + options.y_adjust;
            let x = x1 + xa;
            (x, line.y_for_x(x) + ya)
        }
        (Orientation::Horizontal, LabelPosition::Right) => {
            let xa = width + options.x_padding + options.x_adjust;
            let ya = -(height / 2.0) + options.y_adjust;
            let x = x2 - xa;
            (x, line.y_for_x(x) + ya)
        }
        _ => (
            (x1 + x2 - width) / 2.0 + options.x_adjust,
            (y1 + y2 - height) / 2.0 + options.y_adjust,
        ),
    }
}

/// Content anchor for a label attached to a point marker.
pub(super) fn point_anchor(
    options: &LabelOptions,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
) -> (f32, f32) {
    match options.position {
        LabelPosition::Top => (
            x - (width / 2.0 + options.x_adjust),
            y + options.y_padding + options.y_adjust,
        ),
        LabelPosition::Bottom => (
            x - (width / 2.0 + options.x_adjust),
            y - (height + options.y_padding + options.y_adjust),
        ),
        LabelPosition::Left => (
            x + options.x_padding + options.x_adjust,
            y - height / 2.0 + options.y_adjust,
        ),
        LabelPosition::Right => (
            x - (width + options.x_padding + options.x_adjust),
            y - height / 2.0 + options.y_adjust,
        ),
        LabelPosition::Center => (
            (x - width) / 2.0 + options.x_adjust,
            (y - height) / 2.0 + options.y_adjust,
        ),
    }
}

/// Label for a line or arrow, box origin already clamped below the top
/// plot edge. None when there is no content to lay out.
pub(super) fn segment_label(
    options: &LabelOptions,
    state: &ChartState,
    orientation: Orientation,
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    line: &LinearMap,
) -> Option<LabelLayout> {
    if !options.has_content() {
        return None;
    }
    let text = measure(options, state);
    let (anchor_x, anchor_y) = segment_anchor(
        orientation, options, x1, y1, x2, y2, line, text.width, text.height,
    );
    let x = anchor_x - options.x_padding;
    let y = (anchor_y - options.y_padding).max(state.area.top + EDGE_MARGIN);
    Some(build_layout(options, text, x, y))
}

/// Label for a point marker, clamped like segment labels.
pub(super) fn point_label(
    options: &LabelOptions,
    state: &ChartState,
    x: f32,
    y: f32,
) -> Option<LabelLayout> {
    if !options.has_content() {
        return None;
    }
    let text = measure(options, state);
    let (anchor_x, anchor_y) = point_anchor(options, x, y, text.width, text.height);
    let box_x = anchor_x - options.x_padding;
    let box_y = (anchor_y - options.y_padding).max(state.area.top + EDGE_MARGIN);
    Some(build_layout(options, text, box_x, box_y))
}

/// Label for a box annotation, anchored to the resolved top-left corner
/// and clamped into the plot area on each axis that has a scale. Box
/// labels stack their lines, so the frame grows with the line count.
pub(super) fn box_label(
    options: &LabelOptions,
    state: &ChartState,
    left: f32,
    top: f32,
    clamp_x: bool,
    clamp_y: bool,
) -> Option<LabelLayout> {
    if !options.has_content() {
        return None;
    }
    let text = measure(options, state);
    let centering = if options.position == LabelPosition::Center {
        text.width / 2.0
    } else {
        0.0
    };
    let mut x = left - options.x_padding - centering + options.x_adjust;
    let mut y = top - options.y_padding + options.y_adjust;
    let width = text.width + 2.0 * options.x_padding;
    let height = text.height * text.lines.len() as f32 + 2.0 * options.y_padding;
    if clamp_x {
        x = clamp_span(x, width, state.area.left, state.area.right);
    }
    if clamp_y {
        y = clamp_span(y, height, state.area.top, state.area.bottom);
    }
    let mut layout = build_layout(options, text, x, y);
    layout.height = height;
    Some(layout)
}

/// Pull a span of the given length back inside `[lo, hi]`, with the edge
/// margin applied on whichever side overflowed.
pub(super) fn clamp_span(start: f32, length: f32, lo: f32, hi: f32) -> f32 {
    let mut start = start;
    if start < lo {
        start = lo + EDGE_MARGIN;
    }
    if start + length > hi {
        start = hi - length - EDGE_MARGIN;
    }
    start
}

fn build_layout(options: &LabelOptions, text: MeasuredText, x: f32, y: f32) -> LabelLayout {
    let font = options.resolved_font();
    LabelLayout {
        x,
        y,
        width: text.width + 2.0 * options.x_padding,
        height: text.height + 2.0 * options.y_padding,
        lines: text.lines,
        font_size: font.size,
        font_style: font.style,
        font_family: font.family,
        font_color: options.font_color.clone(),
        background_color: options.background_color.clone(),
        corner_radius: options.corner_radius,
        text_align: options.text_align,
        shadow: options.shadow,
        stroke_color: options.stroke_color.clone(),
        stroke_width: options.stroke_width,
        box_border_width: options.box_border_width,
        box_border_color: options.box_border_color.clone(),
        box_border_dash: options.box_border_dash.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::PlotArea;
    use crate::text_metrics::FontMeasurer;

    fn test_state() -> ChartState {
        ChartState::new(PlotArea::new(0.0, 0.0, 200.0, 100.0))
            .with_measurer(Box::new(FontMeasurer::fast()))
    }

    fn label_with(content: &str, position: LabelPosition) -> LabelOptions {
        LabelOptions {
            content: Some(content.to_string()),
            position,
            ..LabelOptions::default()
        }
    }

    #[test]
    fn placement_is_idempotent() {
        let options = label_with("threshold", LabelPosition::Left);
        let line = LinearMap::new(0.0, 30.0, 200.0, 30.0);
        let first = segment_anchor(
            Orientation::Horizontal,
            &options,
            0.0,
            30.0,
            200.0,
            30.0,
            &line,
            50.0,
            10.0,
        );
        let second = segment_anchor(
            Orientation::Horizontal,
            &options,
            0.0,
            30.0,
            200.0,
            30.0,
            &line,
            50.0,
            10.0,
        );
        assert_eq!(first, second);
    }

    #[test]
    fn horizontal_left_anchor_tracks_the_segment() {
        let options = label_with("hi", LabelPosition::Left);
        let line = LinearMap::new(0.0, 30.0, 200.0, 30.0);
        let (x, y) = segment_anchor(
            Orientation::Horizontal,
            &options,
            0.0,
            30.0,
            200.0,
            30.0,
            &line,
            20.0,
            10.0,
        );
        assert!((x - 6.0).abs() < 1e-4, "x padding offsets the anchor");
        assert!((y - 25.0).abs() < 1e-4, "text centers on the segment");
    }

    #[test]
    fn vertical_top_anchor_projects_through_the_line() {
        let options = label_with("hi", LabelPosition::Top);
        let line = LinearMap::new(40.0, 0.0, 40.0, 100.0);
        let (x, y) = segment_anchor(
            Orientation::Vertical,
            &options,
            40.0,
            0.0,
            40.0,
            100.0,
            &line,
            20.0,
            10.0,
        );
        assert!((y - 6.0).abs() < 1e-4);
        assert!((x - 30.0).abs() < 1e-4, "half the width left of the line");
    }

    #[test]
    fn center_anchor_straddles_the_midpoint() {
        let options = label_with("hi", LabelPosition::Center);
        let line = LinearMap::new(0.0, 30.0, 200.0, 30.0);
        let (x, y) = segment_anchor(
            Orientation::Horizontal,
            &options,
            0.0,
            30.0,
            200.0,
            30.0,
            &line,
            20.0,
            10.0,
        );
        assert!((x - 90.0).abs() < 1e-4);
        assert!((y - 25.0).abs() < 1e-4);
    }

    #[test]
    fn clamp_pulls_overflow_back_with_margin() {
        assert!((clamp_span(-5.0, 20.0, 0.0, 100.0) - 10.0).abs() < 1e-4);
        assert!((clamp_span(90.0, 20.0, 0.0, 100.0) - 70.0).abs() < 1e-4);
        assert!((clamp_span(40.0, 20.0, 0.0, 100.0) - 40.0).abs() < 1e-4);
    }

    #[test]
    fn segment_label_adds_padding_to_both_sides() {
        let state = test_state();
        let options = label_with("threshold", LabelPosition::Center);
        let line = LinearMap::new(0.0, 50.0, 200.0, 50.0);
        let layout = segment_label(
            &options,
            &state,
            Orientation::Horizontal,
            0.0,
            50.0,
            200.0,
            50.0,
            &line,
        )
        .expect("content present");
        let text_width = state.measure_width("threshold", 12.0, "sans-serif");
        assert!((layout.width - (text_width + 12.0)).abs() < 1e-3);
        assert!(layout.height > 0.0);
    }

    #[test]
    fn segment_label_clamps_below_the_top_edge() {
        let state = test_state();
        let options = label_with("up", LabelPosition::Center);
        // A segment right on the top edge pushes the label out of the area.
        let line = LinearMap::new(0.0, 0.0, 200.0, 0.0);
        let layout = segment_label(
            &options,
            &state,
            Orientation::Horizontal,
            0.0,
            0.0,
            200.0,
            0.0,
            &line,
        )
        .expect("content present");
        assert!((layout.y - 10.0).abs() < 1e-4);
    }

    #[test]
    fn missing_content_yields_no_layout() {
        let state = test_state();
        let options = LabelOptions::default();
        let line = LinearMap::new(0.0, 50.0, 200.0, 50.0);
        assert!(
            segment_label(
                &options,
                &state,
                Orientation::Horizontal,
                0.0,
                50.0,
                200.0,
                50.0,
                &line,
            )
            .is_none()
        );
    }

    #[test]
    fn box_label_counts_every_line() {
        let state = test_state();
        let options = LabelOptions {
            content: Some("one\ntwo\nthree".to_string()),
            position: LabelPosition::Left,
            ..LabelOptions::default()
        };
        let layout = box_label(&options, &state, 50.0, 40.0, true, true).expect("content present");
        let line_height = state.measure_width("M", 12.0, "sans-serif");
        assert!((layout.height - (line_height * 3.0 + 12.0)).abs() < 1e-3);
        assert_eq!(layout.lines.len(), 3);
    }

    #[test]
    fn point_label_left_sits_right_of_the_point() {
        let state = test_state();
        let options = LabelOptions {
            content: Some("here".to_string()),
            position: LabelPosition::Left,
            x_padding: 0.0,
            y_padding: 0.0,
            ..LabelOptions::default()
        };
        let layout = point_label(&options, &state, 80.0, 50.0).expect("content present");
        assert!((layout.x - 80.0).abs() < 1e-4);
        let height = state.measure_width("M", 12.0, "sans-serif");
        assert!((layout.y - (50.0 - height / 2.0)).abs() < 1e-3);
    }
}
