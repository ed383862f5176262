use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::Serialize;

use crate::annotation::Annotation;
use crate::config::ChartSpec;
use crate::geometry::ViewModel;

/// Machine-readable snapshot of resolved geometry, for inspecting layout
/// output without parsing SVG.
#[derive(Debug, Serialize)]
pub struct GeometryDump {
    pub width: f32,
    pub height: f32,
    pub annotations: Vec<AnnotationDump>,
}

#[derive(Debug, Serialize)]
pub struct AnnotationDump {
    pub kind: String,
    pub resolved: bool,
    pub center: [f32; 2],
    pub width: f32,
    pub height: f32,
    pub ranges: BTreeMap<String, [f64; 2]>,
    /// Line/arrow endpoints as x1,y1,x2,y2.
    pub segment: Option<[f32; 4]>,
    /// Box bounds as left,top,right,bottom.
    pub rect: Option<[f32; 4]>,
    /// Point center + radius.
    pub marker: Option<[f32; 3]>,
    /// Arrow cap tips.
    pub caps: Vec<[f32; 2]>,
    pub label: Option<LabelDump>,
}

#[derive(Debug, Serialize)]
pub struct LabelDump {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub lines: Vec<String>,
}

impl GeometryDump {
    pub fn from_annotations(spec: &ChartSpec, annotations: &[Annotation]) -> Self {
        let annotations = annotations
            .iter()
            .map(|annotation| {
                let (cx, cy) = annotation.center_point();
                let mut dump = AnnotationDump {
                    kind: annotation.options().kind().to_string(),
                    resolved: annotation.is_resolved(),
                    center: [cx, cy],
                    width: annotation.width(),
                    height: annotation.height(),
                    ranges: annotation
                        .ranges()
                        .map(|ranges| {
                            ranges
                                .iter()
                                .map(|(id, range)| (id.clone(), [range.min, range.max]))
                                .collect()
                        })
                        .unwrap_or_default(),
                    segment: None,
                    rect: None,
                    marker: None,
                    caps: Vec::new(),
                    label: None,
                };
                match annotation.model() {
                    Some(ViewModel::Line(m)) => {
                        dump.segment = Some([m.x1, m.y1, m.x2, m.y2]);
                    }
                    Some(ViewModel::Arrow(m)) => {
                        dump.segment = Some([m.x1, m.y1, m.x2, m.y2]);
                        dump.caps = m.caps.iter().map(|cap| [cap.tip_x, cap.tip_y]).collect();
                    }
                    Some(ViewModel::Box(m)) => {
                        dump.rect = Some([m.left, m.top, m.right, m.bottom]);
                    }
                    Some(ViewModel::Point(m)) => {
                        dump.marker = Some([m.x, m.y, m.radius]);
                    }
                    None => {}
                }
                if let Some(label) = annotation.model().and_then(ViewModel::label) {
                    dump.label = Some(LabelDump {
                        x: label.x,
                        y: label.y,
                        width: label.width,
                        height: label.height,
                        lines: label.lines.clone(),
                    });
                }
                dump
            })
            .collect();

        GeometryDump {
            width: spec.width,
            height: spec.height,
            annotations,
        }
    }
}

pub fn write_geometry_dump(
    path: &Path,
    spec: &ChartSpec,
    annotations: &[Annotation],
) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = GeometryDump::from_annotations(spec, annotations);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
