//! Annotation geometry. Each layout pass converts caller options plus
//! the chart's scales and plot area into immutable view models; a pass
//! either resolves an annotation completely or skips it, so drawing and
//! hit-testing never see half-built state.

pub mod linear_map;
pub mod types;

mod arrow;
mod box_annotation;
mod clip;
mod label;
mod line;
mod point;
mod ranges;

pub use linear_map::{DEFAULT_EPSILON, LinearMap};
pub use types::*;

pub(crate) use arrow::{CAP_CLIP_MARGIN, CAP_HALF_WIDTH, CAP_LENGTH, CAP_LENGTH_VERTICAL};

use crate::options::{
    Align, AnnotationOptions, ArrowOptions, BoxOptions, LabelOptions, LabelPosition, LineOptions,
    Orientation, PointOptions,
};
use crate::scale::{ChartState, Scale};

/// Resolve one annotation against the current pass state. None means
/// the annotation is skipped this pass: nothing draws and nothing
/// hit-tests until a later pass succeeds.
pub fn resolve(options: &AnnotationOptions, state: &ChartState) -> Option<ViewModel> {
    match options {
        AnnotationOptions::Line(options) => line::resolve(options, state).map(ViewModel::Line),
        AnnotationOptions::Arrow(options) => arrow::resolve(options, state).map(ViewModel::Arrow),
        AnnotationOptions::Box(options) => {
            box_annotation::resolve(options, state).map(ViewModel::Box)
        }
        AnnotationOptions::Point(options) => point::resolve(options, state).map(ViewModel::Point),
    }
}
