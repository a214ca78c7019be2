use crate::adapters::mutation;
use crate::adapters::random_source::FakerRandomSource;
use crate::adapters::type_registry::{Context, TypeRegistry};
use crate::config::GeneratorSettings;
use crate::domain::{Category, CategoryTree, GenerationResult, GeneratorResult, RandomSource, Schema};
use serde_json::Value;
use tracing::debug;

/// Top-level entry point: turns a schema into a valid sample or into the
/// full set of single-fault samples.
///
/// The generator keeps no state between calls apart from its random source.
pub struct Generator<R = FakerRandomSource> {
    registry: TypeRegistry,
    random: R,
}

impl Default for Generator<FakerRandomSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator<FakerRandomSource> {
    pub fn new() -> Self {
        Self::with_random_source(FakerRandomSource::new())
    }

    /// Reproducible generator.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_random_source(FakerRandomSource::with_seed(seed))
    }

    pub fn from_settings(settings: &GeneratorSettings) -> Self {
        let random = FakerRandomSource::from_seed_option(settings.seed)
            .default_string_length(settings.default_string_length);
        Self {
            registry: TypeRegistry::with_integer_span(settings.integer_span),
            random,
        }
    }
}

impl<R: RandomSource> Generator<R> {
    pub fn with_random_source(random: R) -> Self {
        Self {
            registry: TypeRegistry::new(),
            random,
        }
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Category tree for `schema`, before any mutation.
    pub fn tree(&mut self, schema: &Schema) -> GeneratorResult<CategoryTree> {
        self.registry.check_tree(schema)?;
        let mut cx = Context::new(&self.registry, &mut self.random);
        cx.dispatch(schema)
    }

    /// A single fully valid sample.
    pub fn generate(&mut self, schema: &Schema) -> GeneratorResult<Value> {
        let tree = self.tree(schema)?;
        let valid = mutation::extract(&tree, Category::Valid).unwrap_or(Value::Null);
        debug!(type_tag = %schema.type_tag, "generated valid sample");
        Ok(valid)
    }

    /// The valid sample plus one mutated sample per leaf and violation category.
    pub fn generate_all(&mut self, schema: &Schema) -> GeneratorResult<GenerationResult> {
        let tree = self.tree(schema)?;
        let result = mutation::mix_all(&tree);
        debug!(
            type_tag = %schema.type_tag,
            samples = result.total_samples(),
            "generated all samples"
        );
        Ok(result)
    }
}
