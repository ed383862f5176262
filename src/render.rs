use std::path::Path;

use anyhow::Result;

use crate::annotation::Annotation;
use crate::config::ChartSpec;
use crate::draw::{Stroke, Surface, TextStyle};
use crate::geometry::{ClipRect, Segment};
use crate::options::TextAlign;
use crate::theme::Theme;

/// SVG-building drawing sink. Clip pushes become nested `<g
/// clip-path=..>` groups backed by `<clipPath>` defs; `finish` wraps
/// body and defs into a complete document.
pub struct SvgSurface {
    width: f32,
    height: f32,
    background: String,
    defs: String,
    body: String,
    open_groups: usize,
    next_clip: usize,
    text_shadow_defined: bool,
}

impl SvgSurface {
    pub fn new(width: f32, height: f32, background: &str) -> Self {
        Self {
            width,
            height,
            background: background.to_string(),
            defs: String::new(),
            body: String::new(),
            open_groups: 0,
            next_clip: 0,
            text_shadow_defined: false,
        }
    }

    pub fn finish(mut self) -> String {
        while self.open_groups > 0 {
            self.body.push_str("</g>");
            self.open_groups -= 1;
        }

        let mut svg = String::new();
        let (width, height) = (self.width, self.height);
        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
        ));
        svg.push_str(&format!(
            "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
            self.background
        ));
        if !self.defs.is_empty() {
            svg.push_str("<defs>");
            svg.push_str(&self.defs);
            svg.push_str("</defs>");
        }
        svg.push_str(&self.body);
        svg.push_str("</svg>");
        svg
    }

    fn ensure_text_shadow(&mut self) {
        if !self.text_shadow_defined {
            self.defs.push_str(
                "<filter id=\"text-shadow\" x=\"-50%\" y=\"-50%\" width=\"200%\" height=\"200%\"><feDropShadow dx=\"0\" dy=\"0\" stdDeviation=\"2\" flood-color=\"#ffffff\"/></filter>",
            );
            self.text_shadow_defined = true;
        }
    }
}

fn stroke_attrs(stroke: &Stroke) -> String {
    let mut attrs = format!(
        " stroke=\"{}\" stroke-width=\"{:.2}\"",
        stroke.color, stroke.width
    );
    if !stroke.dash.is_empty() {
        let dashes: Vec<String> = stroke.dash.iter().map(|d| format!("{d:.2}")).collect();
        attrs.push_str(&format!(" stroke-dasharray=\"{}\"", dashes.join(" ")));
        if stroke.dash_offset != 0.0 {
            attrs.push_str(&format!(" stroke-dashoffset=\"{:.2}\"", stroke.dash_offset));
        }
    }
    attrs
}

fn paint_attrs(fill: Option<&str>, stroke: Option<&Stroke>) -> String {
    let mut attrs = format!(" fill=\"{}\"", fill.unwrap_or("none"));
    if let Some(stroke) = stroke {
        attrs.push_str(&stroke_attrs(stroke));
    }
    attrs
}

/// Split a canvas-style font word list into SVG weight/style attributes.
fn font_style_attrs(style: &str) -> String {
    let mut weight = Vec::new();
    let mut slant = Vec::new();
    for word in style.split_whitespace() {
        match word {
            "italic" | "oblique" => slant.push(word),
            "normal" => {}
            other => weight.push(other),
        }
    }
    let mut attrs = String::new();
    if !weight.is_empty() {
        attrs.push_str(&format!(" font-weight=\"{}\"", weight.join(" ")));
    }
    if !slant.is_empty() {
        attrs.push_str(&format!(" font-style=\"{}\"", slant.join(" ")));
    }
    attrs
}

impl Surface for SvgSurface {
    fn push_clip(&mut self, clip: &ClipRect) {
        let id = self.next_clip;
        self.next_clip += 1;
        self.defs.push_str(&format!(
            "<clipPath id=\"clip{id}\"><rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\"/></clipPath>",
            clip.x1,
            clip.y1,
            clip.width(),
            clip.height()
        ));
        self.body
            .push_str(&format!("<g clip-path=\"url(#clip{id})\">"));
        self.open_groups += 1;
    }

    fn pop_clip(&mut self) {
        if self.open_groups > 0 {
            self.body.push_str("</g>");
            self.open_groups -= 1;
        }
    }

    fn stroke_segment(&mut self, segment: &Segment, stroke: &Stroke) {
        self.body.push_str(&format!(
            "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\"{}/>",
            segment.x1,
            segment.y1,
            segment.x2,
            segment.y2,
            stroke_attrs(stroke)
        ));
    }

    fn polygon(&mut self, points: &[(f32, f32)], fill: Option<&str>, stroke: Option<&Stroke>) {
        let coords: Vec<String> = points
            .iter()
            .map(|(x, y)| format!("{x:.2},{y:.2}"))
            .collect();
        self.body.push_str(&format!(
            "<polygon points=\"{}\"{}/>",
            coords.join(" "),
            paint_attrs(fill, stroke)
        ));
    }

    fn rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Option<&str>,
        stroke: Option<&Stroke>,
    ) {
        self.body.push_str(&format!(
            "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{width:.2}\" height=\"{height:.2}\"{}/>",
            paint_attrs(fill, stroke)
        ));
    }

    fn round_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        radius: f32,
        fill: Option<&str>,
        stroke: Option<&Stroke>,
    ) {
        self.body.push_str(&format!(
            "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{width:.2}\" height=\"{height:.2}\" rx=\"{radius:.2}\" ry=\"{radius:.2}\"{}/>",
            paint_attrs(fill, stroke)
        ));
    }

    fn circle(&mut self, cx: f32, cy: f32, radius: f32, fill: Option<&str>, stroke: Option<&Stroke>) {
        self.body.push_str(&format!(
            "<circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{radius:.2}\"{}/>",
            paint_attrs(fill, stroke)
        ));
    }

    fn text(&mut self, content: &str, x: f32, y: f32, style: &TextStyle) {
        let anchor = match style.align {
            TextAlign::Left => "start",
            TextAlign::Center => "middle",
            TextAlign::Right => "end",
        };
        let mut attrs = format!(
            " font-family=\"{}\" font-size=\"{:.2}\"{} fill=\"{}\" text-anchor=\"{anchor}\" dominant-baseline=\"middle\"",
            escape_xml(&style.family),
            style.size,
            font_style_attrs(&style.font_style),
            style.color
        );
        if let Some(halo) = &style.halo_color {
            // Halo paints behind the glyph fill.
            attrs.push_str(&format!(
                " stroke=\"{halo}\" stroke-width=\"{:.2}\" paint-order=\"stroke\"",
                style.halo_width
            ));
        }
        if style.shadow {
            self.ensure_text_shadow();
            attrs.push_str(" filter=\"url(#text-shadow)\"");
        }
        self.body.push_str(&format!(
            "<text x=\"{x:.2}\" y=\"{y:.2}\"{attrs}>{}</text>",
            escape_xml(content)
        ));
    }
}

/// Lay out and draw a whole chart spec.
pub fn render_chart(spec: &ChartSpec) -> String {
    let state = spec.build_state();
    let mut annotations: Vec<Annotation> = spec
        .annotations
        .iter()
        .cloned()
        .map(Annotation::new)
        .collect();
    for annotation in &mut annotations {
        annotation.configure(&state);
    }
    render_annotations(spec, &annotations)
}

/// Draw already-configured annotations over the chart chrome.
pub fn render_annotations(spec: &ChartSpec, annotations: &[Annotation]) -> String {
    let theme = spec.theme();
    let mut surface = SvgSurface::new(spec.width, spec.height, &theme.background);
    draw_chrome(&mut surface, spec, &theme);
    for annotation in annotations {
        annotation.draw(&mut surface);
    }
    surface.finish()
}

const GRID_STEPS: usize = 4;

fn draw_chrome(surface: &mut SvgSurface, spec: &ChartSpec, theme: &Theme) {
    let area = spec.plot_area();
    surface.rect(
        area.left,
        area.top,
        area.width(),
        area.height(),
        Some(&theme.plot_background),
        None,
    );

    let grid = Stroke::solid(&theme.grid_color, 1.0);
    for step in 1..GRID_STEPS {
        let fraction = step as f32 / GRID_STEPS as f32;
        let x = area.left + fraction * area.width();
        surface.stroke_segment(
            &Segment {
                x1: x,
                y1: area.top,
                x2: x,
                y2: area.bottom,
            },
            &grid,
        );
        let y = area.top + fraction * area.height();
        surface.stroke_segment(
            &Segment {
                x1: area.left,
                y1: y,
                x2: area.right,
                y2: y,
            },
            &grid,
        );
    }

    let frame = Stroke::solid(&theme.frame_color, 1.0);
    surface.rect(
        area.left,
        area.top,
        area.width(),
        area.height(),
        None,
        Some(&frame),
    );

    if let Some(title) = &spec.title {
        let style = TextStyle {
            size: theme.font_size + 2.0,
            font_style: "bold".to_string(),
            family: theme.font_family.clone(),
            color: theme.title_color.clone(),
            align: TextAlign::Center,
            halo_color: None,
            halo_width: 0.0,
            shadow: false,
        };
        surface.text(title, spec.width / 2.0, spec.padding / 2.0, &style);
    }
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{svg}");
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, spec: &ChartSpec) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = "Inter".to_string();
    opt.default_size = usvg::Size::from_wh(spec.width, spec.height)
        .unwrap_or(usvg::Size::from_wh(640.0, 400.0).unwrap());

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
