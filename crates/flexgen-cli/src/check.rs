//! Check command: validate everything a generation would touch

use crate::inputs::InputArgs;
use anyhow::{Context, Result};
use flexgen_core::{GenerationReport, MemorySink};

/// Run a full generation into memory and discard the output
pub fn validate(args: &InputArgs) -> Result<GenerationReport> {
    let config = args.load_config()?;
    config.validate().context("Invalid configuration")?;
    let mut generator = args.build_generator(config)?;
    let mut sink = MemorySink::new();
    generator
        .generate(&mut sink)
        .context("Descriptors cannot be generated")
}

/// Check command implementation
pub fn run(args: &InputArgs) -> Result<()> {
    let report = validate(args)?;

    println!("✓ Configuration is valid");
    println!("✓ Entities: {}", report.classes);
    println!("✓ Classes: {}", report.written.len());
    println!("\nDescriptors are valid!");

    Ok(())
}
