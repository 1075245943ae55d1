//! flexgen CLI - Flex model and XML builder generator
//!
//! Commands:
//! - `flexgen generate` - Generate models and builders from entity descriptors
//! - `flexgen check` - Validate the configuration and descriptors without writing

use clap::{Parser, Subcommand};

mod check;
mod generate;
mod inputs;
mod logging;

#[derive(Parser)]
#[command(name = "flexgen")]
#[command(author, version, about = "Generate Flex models and dom4j/E4X XML builders", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error, off); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "info", value_parser = logging::LEVELS)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the model, client builder and server builder of every entity
    Generate(generate::GenerateArgs),

    /// Validate configuration and descriptors without emitting anything
    Check(inputs::InputArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level)?;

    match cli.command {
        Commands::Generate(args) => {
            generate::run(&args)?;
        }
        Commands::Check(args) => {
            check::run(&args)?;
        }
    }

    Ok(())
}
