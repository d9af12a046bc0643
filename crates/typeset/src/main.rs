//! Typeset - lays out a formula and writes it as SVG or JSON.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use typeset::{OutputFormat, RenderPipeline, TypesetConfig};

/// Typeset - lays out mathematical notation
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Formula, e.g. "x^2/(a_i)"
    expression: String,

    /// Output file; standard output when omitted
    output: Option<PathBuf>,

    /// Root scale
    #[arg(long, default_value = "1.0")]
    scale: f32,

    /// Draw axes and a unit grid
    #[arg(long)]
    grid: bool,

    /// Font family
    #[arg(long, default_value = "Courier")]
    font: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Svg)]
    format: OutputFormat,

    /// Print the laid-out tree to stderr
    #[arg(long)]
    dump_tree: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn config(&self) -> TypesetConfig {
        TypesetConfig::default()
            .with_scale(self.scale)
            .with_grid(self.grid)
            .with_font(&self.font)
            .with_format(self.format)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Typeset v{}", typeset::VERSION);

    let mut pipeline = RenderPipeline::new(args.config());

    let result = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create {}", path.display()))?;
            let mut out = BufWriter::new(file);
            let result = pipeline.run(&args.expression, &mut out)?;
            out.flush()?;
            info!("Wrote {}", path.display());
            result
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            pipeline.run(&args.expression, &mut out)?
        }
    };

    if args.dump_tree {
        eprintln!("{}", result.tree.dump());
    }

    for (stage, duration) in &result.stage_times {
        info!("{:?}: {:?}", stage, duration);
    }
    info!(
        "{} commands in {:?}",
        result.commands.len(),
        result.total_time()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_default() {
        let args = Args::parse_from(["typeset", "a/b"]);
        assert_eq!(args.expression, "a/b");
        assert!(args.output.is_none());
        assert_eq!(args.scale, 1.0);
        assert!(!args.grid);
        assert_eq!(args.format, OutputFormat::Svg);
    }

    #[test]
    fn test_args_with_output() {
        let args = Args::parse_from(["typeset", "x^2", "out.svg", "--grid", "--scale", "2"]);
        assert_eq!(args.output, Some(PathBuf::from("out.svg")));
        let config = args.config();
        assert!(config.show_grid);
        assert_eq!(config.root_scale, 2.0);
    }

    #[test]
    fn test_args_json() {
        let args = Args::parse_from(["typeset", "x", "--format", "json", "-v"]);
        assert_eq!(args.format, OutputFormat::Json);
        assert!(args.verbose);
    }
}
