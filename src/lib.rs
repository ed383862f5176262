pub mod annotation;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod draw;
pub mod dump;
pub mod geometry;
pub mod options;
pub mod render;
pub mod scale;
pub mod text_metrics;
pub mod theme;

pub use annotation::Annotation;
#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{ChartSpec, ScaleSpec, SpecError, load_spec, parse_spec};
pub use geometry::{LinearMap, ViewModel};
pub use options::AnnotationOptions;
pub use render::{SvgSurface, render_chart};
pub use scale::{CategoryScale, ChartState, LinearScale, PlotArea, Scale};
