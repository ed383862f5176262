use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::options::AnnotationOptions;
use crate::scale::{CategoryScale, ChartState, LinearScale, PlotArea, Scale};
use crate::theme::Theme;

/// Chart description loaded from a JSON5 file: canvas size, scales, and
/// the annotations to lay out on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartSpec {
    pub width: f32,
    pub height: f32,
    /// Inset between the canvas edge and the plot area.
    pub padding: f32,
    pub title: Option<String>,
    pub theme: Option<String>,
    pub scales: Vec<ScaleSpec>,
    pub annotations: Vec<AnnotationOptions>,
}

impl Default for ChartSpec {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 400.0,
            padding: 40.0,
            title: None,
            theme: None,
            scales: Vec::new(),
            annotations: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    #[default]
    X,
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScaleKind {
    #[default]
    Linear,
    Category,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScaleSpec {
    pub id: String,
    pub axis: Axis,
    pub kind: ScaleKind,
    pub min: f64,
    pub max: f64,
    pub categories: Vec<String>,
}

impl Default for ScaleSpec {
    fn default() -> Self {
        Self {
            id: String::new(),
            axis: Axis::X,
            kind: ScaleKind::Linear,
            min: 0.0,
            max: 1.0,
            categories: Vec::new(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SpecError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid chart spec: {0}")]
    Parse(#[from] json5::Error),
    #[error("chart size must be positive, got {width}x{height}")]
    BadSize { width: f32, height: f32 },
    #[error("padding {padding} leaves no plot area inside {width}x{height}")]
    PaddingTooLarge {
        padding: f32,
        width: f32,
        height: f32,
    },
    #[error("scale without an id")]
    UnnamedScale,
    #[error("duplicate scale id {0:?}")]
    DuplicateScale(String),
    #[error("category scale {0:?} has no categories")]
    EmptyCategories(String),
}

/// Read and validate a chart spec file.
pub fn load_spec(path: &Path) -> Result<ChartSpec, SpecError> {
    let contents = std::fs::read_to_string(path).map_err(|source| SpecError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_spec(&contents)
}

/// Parse and validate a chart spec from JSON5 text.
pub fn parse_spec(contents: &str) -> Result<ChartSpec, SpecError> {
    let spec: ChartSpec = json5::from_str(contents)?;
    spec.validate()?;
    Ok(spec)
}

impl ChartSpec {
    pub fn validate(&self) -> Result<(), SpecError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(SpecError::BadSize {
                width: self.width,
                height: self.height,
            });
        }
        if self.padding * 2.0 >= self.width.min(self.height) {
            return Err(SpecError::PaddingTooLarge {
                padding: self.padding,
                width: self.width,
                height: self.height,
            });
        }
        let mut seen = std::collections::BTreeSet::new();
        for scale in &self.scales {
            if scale.id.is_empty() {
                return Err(SpecError::UnnamedScale);
            }
            if !seen.insert(scale.id.as_str()) {
                return Err(SpecError::DuplicateScale(scale.id.clone()));
            }
            if scale.kind == ScaleKind::Category && scale.categories.is_empty() {
                return Err(SpecError::EmptyCategories(scale.id.clone()));
            }
        }
        Ok(())
    }

    pub fn theme(&self) -> Theme {
        match self.theme.as_deref() {
            Some("dark") => Theme::dark(),
            _ => Theme::light(),
        }
    }

    pub fn plot_area(&self) -> PlotArea {
        PlotArea::new(
            self.padding,
            self.padding,
            self.width - self.padding,
            self.height - self.padding,
        )
    }

    /// Snapshot for one layout pass: plot area plus every scale mapped
    /// into it. Y axes run bottom-up, matching data convention.
    pub fn build_state(&self) -> ChartState {
        let area = self.plot_area();
        let mut state = ChartState::new(area);
        for scale in &self.scales {
            state.add_scale(scale.build(&area));
        }
        state
    }
}

impl ScaleSpec {
    fn build(&self, area: &PlotArea) -> Box<dyn Scale> {
        match self.kind {
            ScaleKind::Linear => {
                let (start, end) = match self.axis {
                    Axis::X => (area.left, area.right),
                    Axis::Y => (area.bottom, area.top),
                };
                Box::new(LinearScale::new(&self.id, self.min, self.max, start, end))
            }
            ScaleKind::Category => {
                // First band at the left / top edge.
                let (start, end) = match self.axis {
                    Axis::X => (area.left, area.right),
                    Axis::Y => (area.top, area.bottom),
                };
                Box::new(CategoryScale::new(
                    &self.id,
                    self.categories.clone(),
                    start,
                    end,
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_json5_spec() {
        let spec = parse_spec(
            r#"{
            width: 500,
            height: 300,
            padding: 50,
            theme: 'dark',
            scales: [
                { id: 'x', axis: 'x', min: 0, max: 10 },
                { id: 'y', axis: 'y', min: 0, max: 100 },
            ],
            annotations: [
                { type: 'line', scaleId: 'y', value: 25 },
            ],
        }"#,
        )
        .expect("valid spec");

        assert_eq!(spec.scales.len(), 2);
        assert_eq!(spec.annotations.len(), 1);
        assert_eq!(spec.theme().background, Theme::dark().background);
        let area = spec.plot_area();
        assert_eq!(area.left, 50.0);
        assert_eq!(area.right, 450.0);
    }

    #[test]
    fn y_axes_grow_upward() {
        let spec = parse_spec(
            r#"{
            width: 200, height: 200, padding: 0,
            scales: [{ id: 'y', axis: 'y', min: 0, max: 10 }],
        }"#,
        )
        .expect("valid spec");
        let state = spec.build_state();
        let scale = state.scale("y").expect("registered");
        // Value 0 sits at the bottom pixel.
        assert!((scale.pixel_for_value(0.0, None) - 200.0).abs() < 1e-4);
        assert!((scale.pixel_for_value(10.0, None) - 0.0).abs() < 1e-4);
    }

    #[test]
    fn duplicate_scale_ids_are_rejected() {
        let err = parse_spec(
            r#"{
            scales: [
                { id: 'x', min: 0, max: 1 },
                { id: 'x', min: 0, max: 2 },
            ],
        }"#,
        )
        .expect_err("duplicate id");
        assert!(matches!(err, SpecError::DuplicateScale(id) if id == "x"));
    }

    #[test]
    fn category_scales_need_categories() {
        let err = parse_spec(r#"{ scales: [{ id: 'x', kind: 'category' }] }"#)
            .expect_err("no categories");
        assert!(matches!(err, SpecError::EmptyCategories(id) if id == "x"));
    }

    #[test]
    fn oversized_padding_is_rejected() {
        let err = parse_spec(r#"{ width: 100, height: 100, padding: 50 }"#)
            .expect_err("no plot area left");
        assert!(matches!(err, SpecError::PaddingTooLarge { .. }));
    }

    #[test]
    fn defaults_fill_unspecified_fields() {
        let spec = parse_spec("{}").expect("empty spec is valid");
        assert_eq!(spec.width, 640.0);
        assert_eq!(spec.height, 400.0);
        assert!(spec.scales.is_empty());
    }
}
