//! Annotation facade: the caller-supplied options plus the view model
//! from the latest layout pass. Hit-testing, measurement, and drawing
//! read the model only, so an annotation that failed to resolve stays
//! inert until a later pass succeeds.

use crate::draw::{self, Surface};
use crate::geometry::{self, RangeMap, ViewModel};
use crate::options::AnnotationOptions;
use crate::scale::ChartState;

#[derive(Debug, Clone)]
pub struct Annotation {
    options: AnnotationOptions,
    model: Option<ViewModel>,
}

impl Annotation {
    pub fn new(options: AnnotationOptions) -> Self {
        Self {
            options,
            model: None,
        }
    }

    pub fn options(&self) -> &AnnotationOptions {
        &self.options
    }

    /// Run one layout pass against the current scales. The model is
    /// replaced wholesale: a complete fresh view, or nothing when any
    /// required input is missing or maps to a non-finite pixel.
    pub fn configure(&mut self, state: &ChartState) {
        self.model = geometry::resolve(&self.options, state);
        if self.model.is_none() {
            log::debug!(
                "{} annotation skipped: placement did not resolve",
                self.options.kind()
            );
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.model.is_some()
    }

    pub fn model(&self) -> Option<&ViewModel> {
        self.model.as_ref()
    }

    /// Value ranges published by the latest pass, keyed by scale id.
    pub fn ranges(&self) -> Option<&RangeMap> {
        self.model.as_ref().map(ViewModel::ranges)
    }

    /// Whether a pixel position hits the annotation body or its label.
    pub fn in_range(&self, x: f32, y: f32) -> bool {
        let Some(model) = &self.model else {
            return false;
        };
        let label_hit = model
            .label()
            .is_some_and(|label| label.contains(x, y));
        match model {
            ViewModel::Line(line) => {
                line.line.intersects(x, y, line.border_width.max(1.0)) || label_hit
            }
            ViewModel::Arrow(arrow) => {
                arrow.line.intersects(x, y, arrow.border_width.max(1.0)) || label_hit
            }
            ViewModel::Box(rect) => {
                x >= rect.left && x <= rect.right && y >= rect.top && y <= rect.bottom
            }
            ViewModel::Point(point) => {
                ((x - point.x).abs() <= point.radius && (y - point.y).abs() <= point.radius)
                    || label_hit
            }
        }
    }

    /// Midpoint for segments, rect center for boxes, marker center for
    /// points. The origin while unresolved.
    pub fn center_point(&self) -> (f32, f32) {
        match &self.model {
            Some(ViewModel::Line(m)) => ((m.x1 + m.x2) / 2.0, (m.y1 + m.y2) / 2.0),
            Some(ViewModel::Arrow(m)) => ((m.x1 + m.x2) / 2.0, (m.y1 + m.y2) / 2.0),
            Some(ViewModel::Box(m)) => ((m.left + m.right) / 2.0, (m.top + m.bottom) / 2.0),
            Some(ViewModel::Point(m)) => (m.x, m.y),
            None => (0.0, 0.0),
        }
    }

    pub fn width(&self) -> f32 {
        match &self.model {
            Some(ViewModel::Line(m)) => (m.x2 - m.x1).abs(),
            Some(ViewModel::Arrow(m)) => (m.x2 - m.x1).abs(),
            Some(ViewModel::Box(m)) => m.right - m.left,
            Some(ViewModel::Point(m)) => m.radius * 2.0,
            None => 0.0,
        }
    }

    /// Segments report their stroke thickness, never less than one.
    pub fn height(&self) -> f32 {
        match &self.model {
            Some(ViewModel::Line(m)) => m.border_width.max(1.0),
            Some(ViewModel::Arrow(m)) => m.border_width.max(1.0),
            Some(ViewModel::Box(m)) => m.bottom - m.top,
            Some(ViewModel::Point(m)) => m.radius * 2.0,
            None => 0.0,
        }
    }

    /// Diagonal of the width/height box for segments, plain product for
    /// boxes and points.
    pub fn area(&self) -> f32 {
        match &self.model {
            Some(ViewModel::Line(_) | ViewModel::Arrow(_)) => {
                let (w, h) = (self.width(), self.height());
                (w * w + h * h).sqrt()
            }
            Some(_) => self.width() * self.height(),
            None => 0.0,
        }
    }

    /// Emit the annotation onto a surface; a no-op while unresolved.
    pub fn draw(&self, surface: &mut dyn Surface) {
        if let Some(model) = &self.model {
            draw::draw(model, surface);
        }
    }
}
