use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static FONT_SHORTHAND_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*(?:(?P<style>(?:italic|oblique|bold|bolder|lighter|normal|[1-9]00)(?:\s+(?:italic|oblique|bold|bolder|lighter|normal|[1-9]00))*)\s+)?(?P<size>\d+(?:\.\d+)?)px\s+(?P<family>.+)$",
    )
    .unwrap()
});

/// Caller-supplied description of one annotation. Defaults live on these
/// types; by the time geometry runs, every field is concrete.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AnnotationOptions {
    Line(LineOptions),
    Arrow(ArrowOptions),
    Box(BoxOptions),
    Point(PointOptions),
}

impl AnnotationOptions {
    /// Lowercase tag, matching the serialized `type` field.
    pub fn kind(&self) -> &'static str {
        match self {
            AnnotationOptions::Line(_) => "line",
            AnnotationOptions::Arrow(_) => "arrow",
            AnnotationOptions::Box(_) => "box",
            AnnotationOptions::Point(_) => "point",
        }
    }
}

/// Which plot axis a line or arrow annotation runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Default for Orientation {
    fn default() -> Self {
        Orientation::Horizontal
    }
}

/// Cap anchoring side for arrow annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Right,
    Top,
    Bottom,
}

impl Default for Align {
    fn default() -> Self {
        Align::Left
    }
}

/// Label anchor relative to the annotation shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelPosition {
    Top,
    Bottom,
    Left,
    Right,
    Center,
}

impl Default for LabelPosition {
    fn default() -> Self {
        LabelPosition::Center
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl Default for TextAlign {
    fn default() -> Self {
        TextAlign::Center
    }
}

/// Marker shape for point annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PointStyle {
    Circle,
    Rect,
    RectRot,
    Triangle,
    Cross,
    CrossRot,
    Star,
    Line,
    Dash,
}

impl Default for PointStyle {
    fn default() -> Self {
        PointStyle::Circle
    }
}

/// Shared label block. Absent or empty `content` disables the label
/// without touching the owning shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LabelOptions {
    pub enabled: bool,
    pub content: Option<String>,
    /// CSS-style shorthand, e.g. `"italic 14px Inter, sans-serif"`.
    /// Overrides the three discrete font fields when it parses.
    pub font: Option<String>,
    pub font_size: f32,
    pub font_style: String,
    pub font_family: String,
    pub font_color: String,
    pub background_color: String,
    pub x_padding: f32,
    pub y_padding: f32,
    pub corner_radius: f32,
    pub position: LabelPosition,
    pub x_adjust: f32,
    pub y_adjust: f32,
    pub text_align: TextAlign,
    pub shadow: bool,
    pub stroke_color: String,
    pub stroke_width: f32,
    pub box_border_width: f32,
    pub box_border_color: String,
    pub box_border_dash: Vec<f32>,
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            content: None,
            font: None,
            font_size: 12.0,
            font_style: "bold".to_string(),
            font_family: "sans-serif".to_string(),
            font_color: "#fff".to_string(),
            background_color: "rgba(0,0,0,0.8)".to_string(),
            x_padding: 6.0,
            y_padding: 6.0,
            corner_radius: 6.0,
            position: LabelPosition::Center,
            x_adjust: 0.0,
            y_adjust: 0.0,
            text_align: TextAlign::Center,
            shadow: false,
            stroke_color: "white".to_string(),
            stroke_width: 0.0,
            box_border_width: 0.0,
            box_border_color: "black".to_string(),
            box_border_dash: Vec::new(),
        }
    }
}

/// Font triple after shorthand resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFont {
    pub style: String,
    pub size: f32,
    pub family: String,
}

impl LabelOptions {
    /// The font the label renders with: the shorthand when present and
    /// parsable, the discrete fields otherwise.
    pub fn resolved_font(&self) -> ResolvedFont {
        if let Some(shorthand) = self.font.as_deref()
            && let Some(parsed) = parse_font_shorthand(shorthand)
        {
            return parsed;
        }
        ResolvedFont {
            style: self.font_style.clone(),
            size: self.font_size,
            family: self.font_family.clone(),
        }
    }

    /// Whether there is anything to lay out.
    pub fn has_content(&self) -> bool {
        self.enabled && self.content.as_deref().is_some_and(|text| !text.is_empty())
    }
}

fn parse_font_shorthand(shorthand: &str) -> Option<ResolvedFont> {
    let caps = FONT_SHORTHAND_RE.captures(shorthand)?;
    let size: f32 = caps.name("size")?.as_str().parse().ok()?;
    let style = caps
        .name("style")
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| "normal".to_string());
    let family = caps.name("family")?.as_str().trim().to_string();
    Some(ResolvedFont {
        style,
        size,
        family,
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineOptions {
    pub scale_id: Option<String>,
    pub orientation: Orientation,
    pub value: Option<f64>,
    pub end_value: Option<f64>,
    /// Ordinal slot for band scales; continuous scales ignore it.
    pub value_index: Option<usize>,
    /// Secondary axis bounding the span orthogonal to the value axis.
    pub span_scale_id: Option<String>,
    pub span_min: Option<f64>,
    pub span_max: Option<f64>,
    pub border_color: String,
    pub border_width: f32,
    pub border_dash: Vec<f32>,
    pub border_dash_offset: f32,
    /// Extra clip width beyond the plot edges, `[left, right]`.
    pub extend: [f32; 2],
    /// Offsets of the paired echo strokes on either side of the line.
    pub shadow: Option<[f32; 2]>,
    pub shadow_width: f32,
    pub shadow_color: String,
    pub label: LabelOptions,
}

impl Default for LineOptions {
    fn default() -> Self {
        Self {
            scale_id: None,
            orientation: Orientation::Horizontal,
            value: None,
            end_value: None,
            value_index: None,
            span_scale_id: None,
            span_min: None,
            span_max: None,
            border_color: "black".to_string(),
            border_width: 1.0,
            border_dash: Vec::new(),
            border_dash_offset: 0.0,
            extend: [0.0, 0.0],
            shadow: None,
            shadow_width: 1.0,
            shadow_color: "#ffffff".to_string(),
            label: LabelOptions::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArrowOptions {
    pub scale_id: Option<String>,
    pub orientation: Orientation,
    pub value: Option<f64>,
    pub end_value: Option<f64>,
    pub value_index: Option<usize>,
    pub x_scale_id: Option<String>,
    pub y_scale_id: Option<String>,
    pub x_min: Option<f64>,
    pub x_max: Option<f64>,
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
    pub border_color: String,
    pub border_width: f32,
    pub border_dash: Vec<f32>,
    pub border_dash_offset: f32,
    /// Cap fill.
    pub background_color: String,
    pub align: Align,
    /// Clip shift along the span axis; the sign follows `align`.
    pub padding: f32,
    pub y_padding: f32,
    /// Point the caps into the span instead of out of it.
    pub inside: bool,
    pub mirror: bool,
    /// Data value on the span scale anchoring the mirror cap.
    pub mirror_point: Option<f64>,
    pub connect_mirror: bool,
    /// Data value on the span scale the near cap starts from.
    pub on_point: Option<f64>,
    pub label: LabelOptions,
}

impl Default for ArrowOptions {
    fn default() -> Self {
        Self {
            scale_id: None,
            orientation: Orientation::Horizontal,
            value: None,
            end_value: None,
            value_index: None,
            x_scale_id: None,
            y_scale_id: None,
            x_min: None,
            x_max: None,
            y_min: None,
            y_max: None,
            border_color: "black".to_string(),
            border_width: 1.0,
            border_dash: Vec::new(),
            border_dash_offset: 0.0,
            background_color: "black".to_string(),
            align: Align::Left,
            padding: 0.0,
            y_padding: 0.0,
            inside: false,
            mirror: false,
            mirror_point: None,
            connect_mirror: false,
            on_point: None,
            label: LabelOptions::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BoxOptions {
    pub x_scale_id: Option<String>,
    pub y_scale_id: Option<String>,
    /// Missing bounds fall back to the matching plot edge.
    pub x_min: Option<f64>,
    pub x_max: Option<f64>,
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
    pub border_color: String,
    pub border_width: f32,
    pub border_dash: Vec<f32>,
    pub background_color: String,
    pub label: LabelOptions,
}

impl Default for BoxOptions {
    fn default() -> Self {
        Self {
            x_scale_id: None,
            y_scale_id: None,
            x_min: None,
            x_max: None,
            y_min: None,
            y_max: None,
            border_color: "black".to_string(),
            border_width: 1.0,
            border_dash: Vec::new(),
            background_color: "transparent".to_string(),
            label: LabelOptions::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PointOptions {
    pub x_scale_id: Option<String>,
    pub y_scale_id: Option<String>,
    pub x_value: Option<f64>,
    pub y_value: Option<f64>,
    pub radius: f32,
    pub style: PointStyle,
    pub rotation: f32,
    pub border_color: String,
    pub border_width: f32,
    pub border_dash: Vec<f32>,
    pub background_color: String,
    pub draw_horizontal_line: bool,
    pub draw_vertical_line: bool,
    /// Run the guide through the marker instead of leaving a gap.
    pub draw_horizontal_line_over_point: bool,
    pub draw_vertical_line_over_point: bool,
    pub label: LabelOptions,
}

impl Default for PointOptions {
    fn default() -> Self {
        Self {
            x_scale_id: None,
            y_scale_id: None,
            x_value: None,
            y_value: None,
            radius: 10.0,
            style: PointStyle::Circle,
            rotation: 0.0,
            border_color: "red".to_string(),
            border_width: 2.0,
            border_dash: Vec::new(),
            background_color: "yellow".to_string(),
            draw_horizontal_line: false,
            draw_vertical_line: false,
            draw_horizontal_line_over_point: false,
            draw_vertical_line_over_point: false,
            label: LabelOptions {
                position: LabelPosition::Left,
                font_style: "regular".to_string(),
                font_family: "arial".to_string(),
                font_color: "black".to_string(),
                background_color: "white".to_string(),
                x_padding: 0.0,
                y_padding: 0.0,
                corner_radius: 0.0,
                ..LabelOptions::default()
            },
        }
    }
}
