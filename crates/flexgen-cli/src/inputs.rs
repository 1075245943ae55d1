//! Configuration and descriptor inputs shared by every command

use anyhow::{Context, Result};
use clap::Args;
use flexgen_core::{Classpath, Generator, GeneratorConfig};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Configuration file picked up from the working directory
pub const DEFAULT_CONFIG: &str = "flexgen.toml";

#[derive(Debug, Clone, Default, Args)]
pub struct InputArgs {
    /// Entity descriptor files
    pub schemas: Vec<PathBuf>,

    /// Root directory scanned with --package
    #[arg(long)]
    pub classpath: Option<PathBuf>,

    /// Dotted package to scan for descriptors (repeatable)
    #[arg(short, long = "package", requires = "classpath")]
    pub packages: Vec<String>,

    /// Path to the configuration file (default: ./flexgen.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl InputArgs {
    /// Load the configuration; without `--config` the default file is
    /// optional and built-in defaults apply when it is missing
    pub fn load_config(&self) -> Result<GeneratorConfig> {
        let path = match &self.config {
            Some(path) => path.clone(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG);
                if !default.is_file() {
                    debug!("No {DEFAULT_CONFIG} found, using defaults");
                    return Ok(GeneratorConfig::default());
                }
                default
            }
        };
        load_config_file(&path)
    }

    /// Generator with the default handlers and every requested entity
    pub fn build_generator(&self, config: GeneratorConfig) -> Result<Generator> {
        if self.schemas.is_empty() && self.packages.is_empty() {
            anyhow::bail!("No entities given: pass descriptor files or --classpath with --package");
        }

        let mut generator =
            Generator::with_default_handlers(config).context("Invalid configuration")?;

        for path in &self.schemas {
            let added = generator
                .add_schema_file(path)
                .with_context(|| format!("Failed to load descriptor: {}", path.display()))?;
            debug!(path = %path.display(), added, "Descriptor loaded");
        }

        if let Some(root) = &self.classpath {
            let classpath = Classpath::new(root);
            for package in &self.packages {
                generator
                    .add_package(&classpath, package)
                    .with_context(|| format!("Failed to scan package '{package}'"))?;
            }
        }

        let count = generator.session().entities().len();
        if count == 0 {
            anyhow::bail!("No entities to generate: every descriptor was transient or empty");
        }
        info!(entities = count, "Entities registered");
        Ok(generator)
    }
}

pub fn load_config_file(path: &Path) -> Result<GeneratorConfig> {
    GeneratorConfig::from_file(path)
        .with_context(|| format!("Failed to load configuration: {}", path.display()))
}
