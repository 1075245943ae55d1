//! Generate command: run the default handlers into the configured sink

use crate::inputs::InputArgs;
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use flexgen_core::{
    ConsoleSink, FileSink, GenerationReport, GeneratorConfig, OutputMode, OutputSink,
};
use std::path::PathBuf;
use tracing::info;

/// Output mode as given on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    /// Print every class to stdout
    Console,
    /// Write one file per class
    File,
}

impl From<OutputArg> for OutputMode {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Console => OutputMode::Console,
            OutputArg::File => OutputMode::File,
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Override the configured output mode
    #[arg(short, long, value_enum)]
    pub output: Option<OutputArg>,

    /// Root directory for AS3 models and builders
    #[arg(long)]
    pub flex_dir: Option<PathBuf>,

    /// Root directory for Java builders
    #[arg(long)]
    pub java_dir: Option<PathBuf>,
}

impl GenerateArgs {
    /// Apply the command line overrides on top of the loaded configuration
    pub fn apply_overrides(&self, config: &mut GeneratorConfig) {
        if let Some(output) = self.output {
            config.output.mode = output.into();
        }
        if let Some(dir) = &self.flex_dir {
            config.output.flex_dir = Some(dir.clone());
        }
        if let Some(dir) = &self.java_dir {
            config.output.java_dir = Some(dir.clone());
        }
    }

    /// Configuration after overrides, validated
    pub fn resolve_config(&self) -> Result<GeneratorConfig> {
        let mut config = self.inputs.load_config()?;
        self.apply_overrides(&mut config);
        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}

/// Sink matching the configured output mode
pub fn sink_for(config: &GeneratorConfig) -> Result<Box<dyn OutputSink>> {
    Ok(match config.output.mode {
        OutputMode::Console => Box::new(ConsoleSink::stdout()),
        OutputMode::File => Box::new(
            FileSink::from_config(&config.output).context("Invalid output configuration")?,
        ),
    })
}

/// Generate command implementation
pub fn run(args: &GenerateArgs) -> Result<()> {
    let config = args.resolve_config()?;
    let mut sink = sink_for(&config)?;
    let mut generator = args.inputs.build_generator(config)?;

    let report = generator
        .generate(sink.as_mut())
        .context("Generation aborted")?;
    finish(&report)
}

/// Summarize a run; any class that failed to write fails the command
fn finish(report: &GenerationReport) -> Result<()> {
    info!(
        classes = report.classes,
        written = report.written.len(),
        "Generation complete"
    );
    if !report.is_success() {
        for (path, error) in &report.failed {
            eprintln!("✗ {}: {error}", path.display());
        }
        anyhow::bail!(
            "{} of {} classes could not be written",
            report.failed.len(),
            report.failed.len() + report.written.len()
        );
    }
    Ok(())
}
