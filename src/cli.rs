use crate::config::{OutputFormat, OutputSettings};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;

/// Fixture generator - valid and single-fault samples from a validation schema
#[derive(Parser, Debug, Clone)]
#[command(name = "fixturegen", version, about, long_about = None)]
pub struct Cli {
    /// Schema file (json, yaml, toml) or a directory of schema files
    #[arg(required_unless_present = "print_schema_format")]
    pub schema: Option<PathBuf>,

    /// Path to the configuration file
    #[arg(short, long, env = "FIXTUREGEN_CONFIG", default_value = "fixturegen.toml")]
    pub config: PathBuf,

    /// Seed for reproducible output
    #[arg(long, env = "FIXTUREGEN_SEED")]
    pub seed: Option<u64>,

    /// Only emit the fully valid sample
    #[arg(long)]
    pub valid_only: bool,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Disable pretty-printing
    #[arg(long)]
    pub compact: bool,

    /// Print the JSON Schema of the schema input format and exit
    #[arg(long)]
    pub print_schema_format: bool,
}

/// Serialize generated output according to the output settings.
pub fn render<T: Serialize>(value: &T, output: &OutputSettings) -> Result<String, anyhow::Error> {
    let rendered = match (output.format, output.pretty) {
        (OutputFormat::Json, true) => serde_json::to_string_pretty(value)?,
        (OutputFormat::Json, false) => serde_json::to_string(value)?,
        (OutputFormat::Yaml, _) => serde_yaml::to_string(value)?,
    };
    Ok(rendered)
}
