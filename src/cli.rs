use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, ValueEnum};

use crate::annotation::Annotation;
use crate::config::{ChartSpec, load_spec, parse_spec};
use crate::dump::write_geometry_dump;
#[cfg(feature = "png")]
use crate::render::write_output_png;
use crate::render::{render_annotations, write_output_svg};

#[derive(Parser, Debug)]
#[command(name = "annoplot", version, about = "Chart annotation layout and rendering")]
pub struct Args {
    /// Chart spec file (.json5) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value = "svg")]
    pub format: OutputFormat,

    /// Also write the resolved geometry as JSON
    #[arg(long = "dump")]
    pub dump: Option<PathBuf>,

    /// Verbose logging (shows skipped annotations)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
}

pub fn run() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let spec = read_spec(args.input.as_deref())?;
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

    if let Some(path) = args.dump.as_deref() {
        write_geometry_dump(path, &spec, &annotations)?;
    }

    let svg = render_annotations(&spec, &annotations);
    match args.format {
        OutputFormat::Svg => {
            write_output_svg(&svg, args.output.as_deref())?;
        }
        #[cfg(feature = "png")]
        OutputFormat::Png => {
            let output = ensure_output(&args.output)?;
            write_output_png(&svg, &output, &spec)?;
        }
        #[cfg(not(feature = "png"))]
        OutputFormat::Png => {
            return Err(anyhow::anyhow!("PNG output requires the png feature"));
        }
    }

    Ok(())
}

fn read_spec(path: Option<&Path>) -> Result<ChartSpec> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return Ok(load_spec(path)?);
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(parse_spec(&buf)?)
}

#[cfg(feature = "png")]
fn ensure_output(output: &Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for png output"))
}
