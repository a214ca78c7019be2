use clap::Parser;
use fixturegen::cli::{self, Cli};
use fixturegen::config::{load_schema, load_schemas_from_dir, OutputSettings, Settings};
use fixturegen::{Generator, Schema};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::info;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays parseable
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    if cli.print_schema_format {
        let schema = schemars::schema_for!(Schema);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }

    let settings = Settings::new_with_cli(&cli)?;
    let Some(path) = cli.schema.as_deref() else {
        anyhow::bail!("a schema path is required");
    };

    let mut generator = Generator::from_settings(&settings.generator);

    let output = if path.is_dir() {
        let schemas = load_schemas_from_dir(path)?;
        info!("Loaded {} schemas from {}", schemas.len(), path.display());
        let mut outputs = BTreeMap::new();
        for (name, schema) in schemas {
            outputs.insert(name, run(&mut generator, &schema, &settings.output)?);
        }
        serde_json::to_value(outputs)?
    } else {
        let schema = load_schema(path)?;
        info!("Loaded schema from {}", path.display());
        run(&mut generator, &schema, &settings.output)?
    };

    println!("{}", cli::render(&output, &settings.output)?);
    Ok(())
}

fn run(generator: &mut Generator, schema: &Schema, output: &OutputSettings) -> anyhow::Result<Value> {
    if output.valid_only {
        return Ok(generator.generate(schema)?);
    }
    let result = generator.generate_all(schema)?;
    info!("Generated {} mutated samples", result.total_samples());
    Ok(serde_json::to_value(result)?)
}
