use std::path::{Path, PathBuf};

use annoplot::geometry::CapDirection;
use annoplot::{Annotation, ChartSpec, ViewModel, load_spec, render_chart};

fn fixture_path(rel: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(rel)
}

fn load_fixture(rel: &str) -> ChartSpec {
    load_spec(&fixture_path(rel)).unwrap_or_else(|err| panic!("{rel}: {err}"))
}

fn configure_all(spec: &ChartSpec) -> Vec<Annotation> {
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
    annotations
}

fn assert_valid_svg(svg: &str, fixture: &str) {
    assert!(svg.contains("<svg"), "{fixture}: missing <svg tag");
    assert!(svg.contains("</svg>"), "{fixture}: missing </svg tag");
    assert_eq!(
        svg.matches("<g ").count(),
        svg.matches("</g>").count(),
        "{fixture}: unbalanced clip groups"
    );
}

// Keep this list explicit so new annotation scenarios must be added
// intentionally.
const FIXTURES: [&str; 8] = [
    "line/horizontal.json5",
    "line/vertical_span.json5",
    "arrow/mirrored.json5",
    "arrow/on_point.json5",
    "box/labelled.json5",
    "point/styles.json5",
    "chart/mixed_dark.json5",
    "chart/skips.json5",
];

#[test]
fn render_all_fixtures() {
    for rel in FIXTURES {
        let path = fixture_path(rel);
        assert!(path.exists(), "fixture missing: {}", rel);
        let spec = load_spec(&path).unwrap_or_else(|err| panic!("{rel}: {err}"));
        let svg = render_chart(&spec);
        assert_valid_svg(&svg, rel);
    }
}

#[test]
fn resolved_ranges_are_normalized() {
    for rel in FIXTURES {
        let spec = load_fixture(rel);
        for annotation in configure_all(&spec) {
            let Some(ranges) = annotation.ranges() else {
                continue;
            };
            for (id, range) in ranges {
                assert!(
                    range.min <= range.max,
                    "{rel}: range for scale {id} is inverted"
                );
            }
        }
    }
}

#[test]
fn horizontal_line_lands_on_its_value_pixel() {
    let spec = load_fixture("line/horizontal.json5");
    let annotations = configure_all(&spec);
    let Some(ViewModel::Line(model)) = annotations[0].model() else {
        panic!("line did not resolve");
    };

    // Plot area is (20, 20)..(220, 160); value 25 of 0..100 from the
    // bottom edge.
    assert_eq!(model.x1, 20.0);
    assert_eq!(model.x2, 220.0);
    assert_eq!(model.y1, 125.0);
    assert_eq!(model.y2, 125.0);
    assert_eq!(model.clip.x1, 16.0);
    assert_eq!(model.clip.x2, 224.0);
    assert!(model.label.is_some());

    let range = &model.ranges["y"];
    assert_eq!(range.min, 25.0);
    assert_eq!(range.max, 25.0);

    // Hit tolerance is the border width.
    assert!(annotations[0].in_range(100.0, 125.5));
    assert!(!annotations[0].in_range(100.0, 130.0));
}

#[test]
fn span_bounds_trim_a_slanted_line() {
    let spec = load_fixture("line/vertical_span.json5");
    let annotations = configure_all(&spec);
    let Some(ViewModel::Line(model)) = annotations[0].model() else {
        panic!("line did not resolve");
    };

    // x runs 4..6 over 50..250, the y span runs 20..80 bottom-up.
    assert_eq!(model.x1, 130.0);
    assert_eq!(model.y1, 130.0);
    assert_eq!(model.x2, 170.0);
    assert_eq!(model.y2, 70.0);
    assert!(model.shadow.is_some());

    let range = &model.ranges["x"];
    assert_eq!(range.min, 4.0);
    assert_eq!(range.max, 6.0);

    // The segment midpoint hit-tests; a point beside it does not.
    assert!(annotations[0].in_range(150.0, 100.0));
    assert!(!annotations[0].in_range(140.0, 100.0));
    assert_eq!(annotations[0].center_point(), (150.0, 100.0));
    assert_eq!(annotations[0].width(), 40.0);
}

#[test]
fn mirrored_arrow_caps_both_plot_edges() {
    let spec = load_fixture("arrow/mirrored.json5");
    let annotations = configure_all(&spec);
    let Some(ViewModel::Arrow(model)) = annotations[0].model() else {
        panic!("arrow did not resolve");
    };

    assert_eq!(model.y1, 100.0);
    assert_eq!(model.caps.len(), 2);
    assert_eq!(model.caps[0].tip_x, 40.0);
    assert_eq!(model.caps[0].direction, CapDirection::Right);
    assert_eq!(model.caps[1].tip_x, 360.0);
    assert_eq!(model.caps[1].direction, CapDirection::Left);

    let connector = model.connector.as_ref().expect("connector missing");
    assert_eq!(connector.x1, 39.0);
    assert_eq!(connector.x2, 361.0);
    assert!(model.label.is_some());
}

#[test]
fn anchored_arrows_start_at_their_points() {
    let spec = load_fixture("arrow/on_point.json5");
    let annotations = configure_all(&spec);
    assert_eq!(annotations.len(), 2);

    let Some(ViewModel::Arrow(horizontal)) = annotations[0].model() else {
        panic!("horizontal arrow did not resolve");
    };
    // onPoint 10 of 0..20 over 50..350, nudged back 5px.
    assert_eq!(horizontal.x1, 245.0);
    assert_eq!(horizontal.y1, 170.0);
    assert_eq!(horizontal.caps[0].tip_x, 245.0);
    assert_eq!(horizontal.caps[0].direction, CapDirection::Right);
    // The far cap sits on the mirror point, not the plot edge.
    assert_eq!(horizontal.caps[1].tip_x, 290.0);
    assert_eq!(horizontal.caps[1].direction, CapDirection::Left);
    assert!(horizontal.connector.is_none());

    let Some(ViewModel::Arrow(vertical)) = annotations[1].model() else {
        panic!("vertical arrow did not resolve");
    };
    assert_eq!(vertical.x1, 140.0);
    assert_eq!(vertical.y1, 135.0);
    assert_eq!(vertical.caps[0].tip_y, 135.0);
    assert_eq!(vertical.caps[0].direction, CapDirection::Down);
    assert_eq!(vertical.caps[1].tip_y, 210.0);
    assert_eq!(vertical.caps[1].direction, CapDirection::Up);
}

#[test]
fn labelled_box_measures_its_rect() {
    let spec = load_fixture("box/labelled.json5");
    let annotations = configure_all(&spec);
    let Some(ViewModel::Box(model)) = annotations[0].model() else {
        panic!("box did not resolve");
    };

    assert_eq!(model.left, 72.0);
    assert_eq!(model.right, 228.0);
    assert_eq!(model.top, 52.0);
    assert_eq!(model.bottom, 148.0);

    let label = model.label.as_ref().expect("label missing");
    assert_eq!(label.lines, vec!["steady".to_string(), "state".to_string()]);

    assert_eq!(annotations[0].center_point(), (150.0, 100.0));
    assert_eq!(annotations[0].width(), 156.0);
    assert_eq!(annotations[0].height(), 96.0);
    assert_eq!(annotations[0].area(), 14976.0);
    assert!(annotations[0].in_range(100.0, 100.0));
    assert!(!annotations[0].in_range(60.0, 100.0));
}

#[test]
fn every_point_style_resolves() {
    let spec = load_fixture("point/styles.json5");
    let annotations = configure_all(&spec);
    assert_eq!(annotations.len(), 4);
    assert!(annotations.iter().all(Annotation::is_resolved));

    let Some(ViewModel::Point(guided)) = annotations[0].model() else {
        panic!("point did not resolve");
    };
    assert_eq!((guided.x, guided.y), (80.0, 60.0));
    // Default guides leave a marker-sized gap.
    assert_eq!(guided.horizontal_guide.as_ref().map(Vec::len), Some(2));
    assert_eq!(guided.vertical_guide.as_ref().map(Vec::len), Some(2));
    assert!(guided.label.is_some());

    assert_eq!(annotations[1].center_point(), (155.0, 120.0));
    assert_eq!(annotations[2].center_point(), (230.0, 165.0));
    assert_eq!(annotations[3].center_point(), (292.5, 75.0));

    // The hit region is the bounding square of the default radius.
    assert!(annotations[1].in_range(164.0, 129.0));
    assert!(!annotations[1].in_range(166.0, 120.0));
}

#[test]
fn category_axis_places_the_dashboard() {
    let spec = load_fixture("chart/mixed_dark.json5");
    let annotations = configure_all(&spec);
    assert_eq!(annotations.len(), 4);
    assert!(annotations.iter().all(Annotation::is_resolved));

    // Four stage bands over 40..440 put index 1 at its band center.
    let Some(ViewModel::Line(line)) = annotations[0].model() else {
        panic!("line did not resolve");
    };
    assert_eq!(line.x1, 190.0);
    assert_eq!(line.y1, 40.0);
    assert_eq!(line.y2, 280.0);

    let Some(ViewModel::Box(region)) = annotations[1].model() else {
        panic!("box did not resolve");
    };
    assert_eq!(region.top, 64.0);
    assert_eq!(region.bottom, 136.0);
    assert_eq!(region.left, 40.0);
    assert_eq!(region.right, 440.0);

    let Some(ViewModel::Arrow(arrow)) = annotations[2].model() else {
        panic!("arrow did not resolve");
    };
    assert_eq!(arrow.y1, 88.0);
    assert_eq!(arrow.caps.len(), 2);

    assert_eq!(annotations[3].center_point(), (390.0, 184.0));

    let svg = render_chart(&spec);
    assert_valid_svg(&svg, "chart/mixed_dark.json5");
    assert_eq!(svg.matches("<clipPath").count(), 4);
    assert!(svg.contains(">Release pipeline</text>"));
    assert!(svg.contains("fill=\"#12161D\""));
}

#[test]
fn skip_chart_renders_empty_but_valid() {
    let spec = load_fixture("chart/skips.json5");
    let annotations = configure_all(&spec);
    assert_eq!(annotations.len(), 5);
    for annotation in &annotations {
        assert!(!annotation.is_resolved());
        assert!(annotation.ranges().is_none());
        assert_eq!(annotation.center_point(), (0.0, 0.0));
        assert_eq!(annotation.area(), 0.0);
    }

    let svg = render_chart(&spec);
    assert_valid_svg(&svg, "chart/skips.json5");
    assert_eq!(svg.matches("<clipPath").count(), 0);

    let dump = annoplot::dump::GeometryDump::from_annotations(&spec, &annotations);
    assert_eq!(dump.width, 200.0);
    assert_eq!(dump.height, 160.0);
    assert_eq!(dump.annotations.len(), 5);
    assert!(dump.annotations.iter().all(|entry| !entry.resolved));
}

#[test]
fn geometry_dump_carries_resolved_shapes() {
    let spec = load_fixture("chart/mixed_dark.json5");
    let annotations = configure_all(&spec);
    let dump = annoplot::dump::GeometryDump::from_annotations(&spec, &annotations);

    assert_eq!(dump.annotations[0].kind, "line");
    assert_eq!(
        dump.annotations[0].segment,
        Some([190.0, 40.0, 190.0, 280.0])
    );
    assert_eq!(dump.annotations[1].kind, "box");
    assert_eq!(dump.annotations[1].rect, Some([40.0, 64.0, 440.0, 136.0]));
    assert_eq!(dump.annotations[2].kind, "arrow");
    assert_eq!(dump.annotations[2].caps.len(), 2);
    assert_eq!(dump.annotations[3].kind, "point");
    assert_eq!(dump.annotations[3].marker, Some([390.0, 184.0, 10.0]));
}
