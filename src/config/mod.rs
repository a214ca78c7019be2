use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod loader;
pub mod validator;

pub use loader::{load_schema, load_schemas_from_dir};

use crate::adapters::handlers::number::DEFAULT_INTEGER_SPAN;
use crate::cli::Cli;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub generator: GeneratorSettings,
    #[serde(default)]
    pub output: OutputSettings,
}

/// Knobs for the random source and the unbounded ranges it draws from
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneratorSettings {
    /// Fixed seed for reproducible fixtures; entropy when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Upper length of unconstrained random strings
    #[serde(default = "default_string_length")]
    pub default_string_length: usize,
    /// Half-width of the integer range used when a number has no bounds
    #[serde(default = "default_integer_span")]
    pub integer_span: i64,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            seed: None,
            default_string_length: default_string_length(),
            integer_span: default_integer_span(),
        }
    }
}

fn default_string_length() -> usize {
    16
}

fn default_integer_span() -> i64 {
    DEFAULT_INTEGER_SPAN
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputSettings {
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default = "default_pretty")]
    pub pretty: bool,
    /// Emit only the valid sample instead of every category
    #[serde(default)]
    pub valid_only: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            pretty: default_pretty(),
            valid_only: false,
        }
    }
}

fn default_pretty() -> bool {
    true
}

impl Settings {
    /// Create settings from CLI arguments (config file, environment, then CLI overrides)
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let mut settings = Self::load(&cli.config)?;

        // CLI > env vars > config file
        settings.apply_cli_overrides(cli);

        settings.validated()
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        Self::load(path.as_ref())?.validated()
    }

    fn load(path: &Path) -> Result<Self, anyhow::Error> {
        let s = Config::builder()
            .set_default("generator.default_string_length", default_string_length() as i64)?
            .set_default("generator.integer_span", default_integer_span())?
            .set_default("output.format", "json")?
            .set_default("output.pretty", default_pretty())?
            .set_default("output.valid_only", false)?
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix("FIXTUREGEN")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(s.try_deserialize()?)
    }

    fn validated(self) -> Result<Self, anyhow::Error> {
        validator::ConfigValidator::validate(&self).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!(
                "Configuration validation failed:\n{}",
                error_messages.join("\n")
            )
        })?;
        Ok(self)
    }

    /// Apply CLI argument overrides to settings
    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(seed) = cli.seed {
            self.generator.seed = Some(seed);
        }
        if let Some(format) = cli.format {
            self.output.format = format;
        }
        if cli.compact {
            self.output.pretty = false;
        }
        if cli.valid_only {
            self.output.valid_only = true;
        }
    }
}
