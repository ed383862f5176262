use std::collections::BTreeMap;

use crate::options::{Orientation, PointStyle, TextAlign};

use super::linear_map::LinearMap;

/// Data-space extent an annotation claims on one axis. Always normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn normalized(a: f64, b: f64) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }
}

/// Axis id -> claimed extent, published for host autoscaling.
pub type RangeMap = BTreeMap<String, ValueRange>;

/// Rectangle drawing is confined to. Hit-testing ignores it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipRect {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl ClipRect {
    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    /// Grown by `margin` on every side.
    pub fn expanded(&self, margin: f32) -> Self {
        Self {
            x1: self.x1 - margin,
            y1: self.y1 - margin,
            x2: self.x2 + margin,
            y2: self.y2 + margin,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

/// Resolved label box plus everything needed to paint it. `x`/`y` is the
/// box origin; the text region sits inside the paddings.
#[derive(Debug, Clone)]
pub struct LabelLayout {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub lines: Vec<String>,
    pub font_size: f32,
    pub font_style: String,
    pub font_family: String,
    pub font_color: String,
    pub background_color: String,
    pub corner_radius: f32,
    pub text_align: TextAlign,
    pub shadow: bool,
    pub stroke_color: String,
    pub stroke_width: f32,
    pub box_border_width: f32,
    pub box_border_color: String,
    pub box_border_dash: Vec<f32>,
}

impl LabelLayout {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// Paired echo strokes offset to either side of a line.
#[derive(Debug, Clone)]
pub struct LineShadow {
    pub offsets: [f32; 2],
    pub width: f32,
    pub color: String,
}

#[derive(Debug, Clone)]
pub struct LineViewModel {
    pub orientation: Orientation,
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub line: LinearMap,
    pub clip: ClipRect,
    pub border_color: String,
    pub border_width: f32,
    pub border_dash: Vec<f32>,
    pub border_dash_offset: f32,
    pub shadow: Option<LineShadow>,
    pub label: Option<LabelLayout>,
    pub ranges: RangeMap,
}

/// Which way an arrow cap points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapDirection {
    Left,
    Right,
    Up,
    Down,
}

/// One resolved cap: the tip pixel and the pointing direction. The
/// triangle itself is derived at draw time.
#[derive(Debug, Clone, Copy)]
pub struct ArrowCap {
    pub tip_x: f32,
    pub tip_y: f32,
    pub direction: CapDirection,
}

#[derive(Debug, Clone)]
pub struct ArrowViewModel {
    pub orientation: Orientation,
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub line: LinearMap,
    pub clip: ClipRect,
    pub caps: Vec<ArrowCap>,
    pub connector: Option<Segment>,
    pub border_color: String,
    pub border_width: f32,
    pub border_dash: Vec<f32>,
    pub border_dash_offset: f32,
    pub fill_color: String,
    pub label: Option<LabelLayout>,
    pub ranges: RangeMap,
}

#[derive(Debug, Clone)]
pub struct BoxViewModel {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub clip: ClipRect,
    pub border_color: String,
    pub border_width: f32,
    pub border_dash: Vec<f32>,
    pub background_color: String,
    pub label: Option<LabelLayout>,
    pub ranges: RangeMap,
}

#[derive(Debug, Clone)]
pub struct PointViewModel {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub style: PointStyle,
    pub rotation: f32,
    pub clip: ClipRect,
    pub border_color: String,
    pub border_width: f32,
    pub border_dash: Vec<f32>,
    pub background_color: String,
    /// Guide segments, one when drawn over the marker, two when split
    /// around it.
    pub horizontal_guide: Option<Vec<Segment>>,
    pub vertical_guide: Option<Vec<Segment>>,
    pub label: Option<LabelLayout>,
    pub ranges: RangeMap,
}

/// Fully resolved pixel geometry for one annotation. Rebuilt wholesale
/// every layout pass.
#[derive(Debug, Clone)]
pub enum ViewModel {
    Line(LineViewModel),
    Arrow(ArrowViewModel),
    Box(BoxViewModel),
    Point(PointViewModel),
}

impl ViewModel {
    pub fn ranges(&self) -> &RangeMap {
        match self {
            ViewModel::Line(model) => &model.ranges,
            ViewModel::Arrow(model) => &model.ranges,
            ViewModel::Box(model) => &model.ranges,
            ViewModel::Point(model) => &model.ranges,
        }
    }

    pub fn label(&self) -> Option<&LabelLayout> {
        match self {
            ViewModel::Line(model) => model.label.as_ref(),
            ViewModel::Arrow(model) => model.label.as_ref(),
            ViewModel::Box(model) => model.label.as_ref(),
            ViewModel::Point(model) => model.label.as_ref(),
        }
    }
}
