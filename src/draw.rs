//! Drawing emission. Resolved view models are turned into calls on a
//! canvas-style [`Surface`]; the surface owns rasterization, this module
//! only decides what to draw and in which order.

use crate::geometry::{
    ArrowCap, ArrowViewModel, BoxViewModel, CAP_CLIP_MARGIN, CAP_HALF_WIDTH, CAP_LENGTH,
    CAP_LENGTH_VERTICAL, CapDirection, ClipRect, LabelLayout, LineViewModel, PointViewModel,
    Segment, ViewModel,
};
use crate::options::{Orientation, PointStyle, TextAlign};

/// Stroke style for segments and outlines.
#[derive(Debug, Clone)]
pub struct Stroke {
    pub color: String,
    pub width: f32,
    pub dash: Vec<f32>,
    pub dash_offset: f32,
}

impl Stroke {
    pub fn solid(color: &str, width: f32) -> Self {
        Self {
            color: color.to_string(),
            width,
            dash: Vec::new(),
            dash_offset: 0.0,
        }
    }
}

/// Text style for label lines. A halo stroke, when set, paints behind
/// the fill; `shadow` asks the surface for a soft backdrop.
#[derive(Debug, Clone)]
pub struct TextStyle {
    pub size: f32,
    pub font_style: String,
    pub family: String,
    pub color: String,
    pub align: TextAlign,
    pub halo_color: Option<String>,
    pub halo_width: f32,
    pub shadow: bool,
}

/// Canvas-style sink the drawing code emits into. Clip pushes nest;
/// every push is balanced by a pop before a draw call returns.
pub trait Surface {
    fn push_clip(&mut self, clip: &ClipRect);
    fn pop_clip(&mut self);
    fn stroke_segment(&mut self, segment: &Segment, stroke: &Stroke);
    fn polygon(&mut self, points: &[(f32, f32)], fill: Option<&str>, stroke: Option<&Stroke>);
    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32, fill: Option<&str>, stroke: Option<&Stroke>);
    fn round_rect(&mut self, x: f32, y: f32, width: f32, height: f32, radius: f32, fill: Option<&str>, stroke: Option<&Stroke>);
    fn circle(&mut self, cx: f32, cy: f32, radius: f32, fill: Option<&str>, stroke: Option<&Stroke>);
    fn text(&mut self, content: &str, x: f32, y: f32, style: &TextStyle);
}

/// Emit one resolved annotation.
pub fn draw(model: &ViewModel, surface: &mut dyn Surface) {
    match model {
        ViewModel::Line(line) => draw_line(line, surface),
        ViewModel::Arrow(arrow) => draw_arrow(arrow, surface),
        ViewModel::Box(rect) => draw_box(rect, surface),
        ViewModel::Point(point) => draw_point(point, surface),
    }
}

fn draw_line(model: &LineViewModel, surface: &mut dyn Surface) {
    surface.push_clip(&model.clip);
    let stroke = Stroke {
        color: model.border_color.clone(),
        width: model.border_width,
        dash: model.border_dash.clone(),
        dash_offset: model.border_dash_offset,
    };
    let segment = Segment {
        x1: model.x1,
        y1: model.y1,
        x2: model.x2,
        y2: model.y2,
    };
    surface.stroke_segment(&segment, &stroke);

    if let Some(shadow) = &model.shadow {
        let echo = Stroke::solid(&shadow.color, shadow.width);
        let (before, after) = match model.orientation {
            Orientation::Horizontal => ((0.0, -shadow.offsets[0]), (0.0, shadow.offsets[1])),
            Orientation::Vertical => ((-shadow.offsets[0], 0.0), (shadow.offsets[1], 0.0)),
        };
        surface.stroke_segment(&offset_segment(&segment, before), &echo);
        surface.stroke_segment(&offset_segment(&segment, after), &echo);
    }

    if let Some(label) = &model.label {
        draw_label(label, surface);
    }
    surface.pop_clip();
}

fn offset_segment(segment: &Segment, (dx, dy): (f32, f32)) -> Segment {
    Segment {
        x1: segment.x1 + dx,
        y1: segment.y1 + dy,
        x2: segment.x2 + dx,
        y2: segment.y2 + dy,
    }
}

fn draw_arrow(model: &ArrowViewModel, surface: &mut dyn Surface) {
    // Caps overhang the span ends, so they get a widened clip; the
    // label stays inside the plain one.
    surface.push_clip(&model.clip.expanded(CAP_CLIP_MARGIN));
    for cap in &model.caps {
        surface.polygon(&cap_triangle(cap), Some(&model.fill_color), None);
    }
    if let Some(connector) = &model.connector {
        let stroke = Stroke {
            color: model.border_color.clone(),
            width: model.border_width,
            dash: model.border_dash.clone(),
            dash_offset: model.border_dash_offset,
        };
        surface.stroke_segment(connector, &stroke);
    }
    surface.pop_clip();

    if let Some(label) = &model.label {
        surface.push_clip(&model.clip);
        draw_label(label, surface);
        surface.pop_clip();
    }
}

/// Triangle for one cap: tip plus a base one cap length behind it.
fn cap_triangle(cap: &ArrowCap) -> [(f32, f32); 3] {
    let (tx, ty) = (cap.tip_x, cap.tip_y);
    match cap.direction {
        CapDirection::Right => {
            let base = tx - CAP_LENGTH;
            [(tx, ty), (base, ty - CAP_HALF_WIDTH), (base, ty + CAP_HALF_WIDTH)]
        }
        CapDirection::Left => {
            let base = tx + CAP_LENGTH;
            [(tx, ty), (base, ty - CAP_HALF_WIDTH), (base, ty + CAP_HALF_WIDTH)]
        }
        CapDirection::Down => {
            let base = ty - CAP_LENGTH_VERTICAL;
            [(tx, ty), (tx + CAP_HALF_WIDTH, base), (tx - CAP_HALF_WIDTH, base)]
        }
        CapDirection::Up => {
            let base = ty + CAP_LENGTH_VERTICAL;
            [(tx, ty), (tx + CAP_HALF_WIDTH, base), (tx - CAP_HALF_WIDTH, base)]
        }
    }
}

fn draw_box(model: &BoxViewModel, surface: &mut dyn Surface) {
    surface.push_clip(&model.clip);
    let stroke = Stroke {
        color: model.border_color.clone(),
        width: model.border_width,
        dash: model.border_dash.clone(),
        dash_offset: 0.0,
    };
    surface.rect(
        model.left,
        model.top,
        model.right - model.left,
        model.bottom - model.top,
        Some(&model.background_color),
        Some(&stroke),
    );
    if let Some(label) = &model.label {
        draw_label(label, surface);
    }
    surface.pop_clip();
}

fn draw_point(model: &PointViewModel, surface: &mut dyn Surface) {
    surface.push_clip(&model.clip);
    let stroke = Stroke {
        color: model.border_color.clone(),
        width: model.border_width,
        dash: model.border_dash.clone(),
        dash_offset: 0.0,
    };

    // Guides share the marker's stroke.
    for guide in model
        .horizontal_guide
        .iter()
        .chain(model.vertical_guide.iter())
        .flatten()
    {
        surface.stroke_segment(guide, &stroke);
    }

    draw_marker(model, &stroke, surface);

    if let Some(label) = &model.label {
        draw_label(label, surface);
    }
    surface.pop_clip();
}

fn draw_marker(model: &PointViewModel, stroke: &Stroke, surface: &mut dyn Surface) {
    let (x, y, r) = (model.x, model.y, model.radius);
    let rad = model.rotation.to_radians();
    let fill = model.background_color.as_str();
    let quarter = std::f32::consts::FRAC_PI_2;

    match model.style {
        PointStyle::Circle => {
            surface.circle(x, y, r, Some(fill), Some(stroke));
        }
        PointStyle::Rect => {
            // Square inscribed in the radius circle; rotation spins it
            // about the center like the diamond below.
            let points = spoke_points(x, y, r, rad + quarter / 2.0, 4, quarter);
            surface.polygon(&points, Some(fill), Some(stroke));
        }
        PointStyle::RectRot => {
            let points = spoke_points(x, y, r, rad, 4, quarter);
            surface.polygon(&points, Some(fill), Some(stroke));
        }
        PointStyle::Triangle => {
            let third = 2.0 * std::f32::consts::PI / 3.0;
            let points = spoke_points(x, y, r, rad, 3, third);
            surface.polygon(&points, Some(fill), Some(stroke));
        }
        PointStyle::Cross => {
            cross_segments(x, y, r, rad, stroke, surface);
        }
        PointStyle::CrossRot => {
            cross_segments(x, y, r, rad + quarter / 2.0, stroke, surface);
        }
        PointStyle::Star => {
            cross_segments(x, y, r, rad, stroke, surface);
            cross_segments(x, y, r, rad + quarter / 2.0, stroke, surface);
        }
        PointStyle::Line => {
            surface.stroke_segment(
                &Segment {
                    x1: x - rad.cos() * r,
                    y1: y - rad.sin() * r,
                    x2: x + rad.cos() * r,
                    y2: y + rad.sin() * r,
                },
                stroke,
            );
        }
        PointStyle::Dash => {
            surface.stroke_segment(
                &Segment {
                    x1: x,
                    y1: y,
                    x2: x + rad.cos() * r,
                    y2: y + rad.sin() * r,
                },
                stroke,
            );
        }
    }
}

/// Vertices of a regular polygon: `count` spokes of length `r` starting
/// at `start` (measured from straight up, clockwise) and stepping by
/// `step`.
fn spoke_points(x: f32, y: f32, r: f32, start: f32, count: usize, step: f32) -> Vec<(f32, f32)> {
    (0..count)
        .map(|k| {
            let angle = start + k as f32 * step;
            (x + angle.sin() * r, y - angle.cos() * r)
        })
        .collect()
}

fn cross_segments(x: f32, y: f32, r: f32, rad: f32, stroke: &Stroke, surface: &mut dyn Surface) {
    let (dx, dy) = (rad.cos() * r, rad.sin() * r);
    surface.stroke_segment(
        &Segment {
            x1: x - dx,
            y1: y - dy,
            x2: x + dx,
            y2: y + dy,
        },
        stroke,
    );
    surface.stroke_segment(
        &Segment {
            x1: x + dy,
            y1: y - dx,
            x2: x - dy,
            y2: y + dx,
        },
        stroke,
    );
}

/// Shared label pipeline: round-rect frame, then each content line with
/// a middle baseline stepping down one font size per line.
fn draw_label(label: &LabelLayout, surface: &mut dyn Surface) {
    let frame_stroke = (label.box_border_width > 0.0).then(|| Stroke {
        color: label.box_border_color.clone(),
        width: label.box_border_width,
        dash: label.box_border_dash.clone(),
        dash_offset: 0.0,
    });
    surface.round_rect(
        label.x,
        label.y,
        label.width,
        label.height,
        label.corner_radius,
        Some(&label.background_color),
        frame_stroke.as_ref(),
    );

    let anchor_x = match label.text_align {
        TextAlign::Left => label.x,
        TextAlign::Right => label.x + label.width,
        TextAlign::Center => label.x + label.width / 2.0,
    };
    let style = TextStyle {
        size: label.font_size,
        font_style: label.font_style.clone(),
        family: label.font_family.clone(),
        color: label.font_color.clone(),
        align: label.text_align,
        halo_color: (label.stroke_width > 0.0).then(|| label.stroke_color.clone()),
        halo_width: label.stroke_width,
        shadow: label.shadow,
    };
    for (i, line) in label.lines.iter().enumerate() {
        let y = label.y + label.height / 2.0 + i as f32 * label.font_size;
        surface.text(line, anchor_x, y, &style);
    }
}


#[cfg(test)]
mod tests {
    use super::test_surface::RecordingSurface;
    use super::*;
    use crate::geometry::{LinearMap, RangeMap};

    fn plain_line() -> LineViewModel {
        LineViewModel {
            orientation: Orientation::Horizontal,
            x1: 0.0,
            y1: 30.0,
            x2: 200.0,
            y2: 30.0,
            line: LinearMap::new(0.0, 30.0, 200.0, 30.0),
            clip: ClipRect {
                x1: 0.0,
                y1: 0.0,
                x2: 200.0,
                y2: 100.0,
            },
            border_color: "black".to_string(),
            border_width: 1.0,
            border_dash: Vec::new(),
            border_dash_offset: 0.0,
            shadow: None,
            label: None,
            ranges: RangeMap::new(),
        }
    }

    #[test]
    fn line_emits_one_clipped_stroke() {
        let mut surface = RecordingSurface::default();
        draw(&ViewModel::Line(plain_line()), &mut surface);
        assert_eq!(
            surface.ops,
            vec![
                "clip+ 0 0 200 100".to_string(),
                "seg 0 30 200 30 black".to_string(),
                "clip-".to_string(),
            ]
        );
    }

    #[test]
    fn shadow_adds_an_echo_stroke_per_side() {
        let mut surface = RecordingSurface::default();
        let mut model = plain_line();
        model.shadow = Some(crate::geometry::LineShadow {
            offsets: [2.0, 3.0],
            width: 1.0,
            color: "white".to_string(),
        });
        draw(&ViewModel::Line(model), &mut surface);
        assert!(surface.ops.contains(&"seg 0 28 200 28 white".to_string()));
        assert!(surface.ops.contains(&"seg 0 33 200 33 white".to_string()));
    }

    #[test]
    fn cap_triangles_grow_from_the_tip() {
        let cap = ArrowCap {
            tip_x: 50.0,
            tip_y: 20.0,
            direction: CapDirection::Right,
        };
        let triangle = cap_triangle(&cap);
        assert_eq!(triangle[0], (50.0, 20.0));
        assert_eq!(triangle[1], (40.0, 10.0));
        assert_eq!(triangle[2], (40.0, 30.0));

        let cap = ArrowCap {
            tip_x: 50.0,
            tip_y: 20.0,
            direction: CapDirection::Up,
        };
        let triangle = cap_triangle(&cap);
        assert_eq!(triangle[1], (60.0, 31.0));
        assert_eq!(triangle[2], (40.0, 31.0));
    }

    #[test]
    fn multi_line_labels_step_down_one_font_size() {
        let mut surface = RecordingSurface::default();
        let label = LabelLayout {
            x: 10.0,
            y: 20.0,
            width: 60.0,
            height: 24.0,
            lines: vec!["one".to_string(), "two".to_string()],
            font_size: 12.0,
            font_style: "bold".to_string(),
            font_family: "sans-serif".to_string(),
            font_color: "#fff".to_string(),
            background_color: "rgba(0,0,0,0.8)".to_string(),
            corner_radius: 6.0,
            text_align: TextAlign::Center,
            shadow: false,
            stroke_color: "white".to_string(),
            stroke_width: 0.0,
            box_border_width: 0.0,
            box_border_color: "black".to_string(),
            box_border_dash: Vec::new(),
        };
        draw_label(&label, &mut surface);
        assert_eq!(surface.ops[0], "roundrect 10 20 60 24");
        assert_eq!(surface.ops[1], "text 40 32 one");
        assert_eq!(surface.ops[2], "text 40 44 two");
    }

    #[test]
    fn gapped_guides_stroke_both_halves() {
        let mut surface = RecordingSurface::default();
        let model = PointViewModel {
            x: 80.0,
            y: 50.0,
            radius: 10.0,
            style: PointStyle::Circle,
            rotation: 0.0,
            clip: ClipRect {
                x1: 0.0,
                y1: 0.0,
                x2: 200.0,
                y2: 100.0,
            },
            border_color: "red".to_string(),
            border_width: 2.0,
            border_dash: Vec::new(),
            background_color: "yellow".to_string(),
            horizontal_guide: None,
            vertical_guide: Some(vec![
                Segment {
                    x1: 80.0,
                    y1: 0.0,
                    x2: 80.0,
                    y2: 40.0,
                },
                Segment {
                    x1: 80.0,
                    y1: 60.0,
                    x2: 80.0,
                    y2: 100.0,
                },
            ]),
            label: None,
            ranges: RangeMap::new(),
        };
        draw(&ViewModel::Point(model), &mut surface);
        assert!(surface.ops.contains(&"seg 80 0 80 40 red".to_string()));
        assert!(surface.ops.contains(&"seg 80 60 80 100 red".to_string()));
        assert!(surface.ops.contains(&"circle 80 50 10".to_string()));
    }
}
