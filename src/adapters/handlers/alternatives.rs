use crate::adapters::type_registry::{Context, TypeHandler};
use crate::domain::{CategoryBundle, CategoryTree, GeneratorResult, Schema};
use serde_json::Value;
use tracing::{debug, warn};

/// Picks one candidate uniformly at random and generates only that one.
pub struct AlternativesTypeHandler;

impl TypeHandler for AlternativesTypeHandler {
    fn type_tag(&self) -> &'static str {
        "alternatives"
    }

    fn handle_all(&self, schema: &Schema, cx: &mut Context<'_>) -> GeneratorResult<CategoryTree> {
        let candidates = schema.items();
        if candidates.is_empty() {
            warn!("alternatives without candidates, generating null");
            return Ok(CategoryTree::Leaf(CategoryBundle::valid_only(Value::Null)));
        }
        let chosen = &candidates[cx.random.index(candidates.len())];
        debug!(type_tag = %chosen.type_tag, "doing random alternative schema");
        cx.dispatch(chosen)
    }
}
