use crate::adapters::type_registry::{Context, TypeHandler};
use crate::domain::{CategoryBundle, CategoryTree, GeneratorResult, Schema};
use serde_json::{Map, Value};

/// Unconstrained values: an empty object passes, nothing else is defined.
pub struct AnyTypeHandler;

impl TypeHandler for AnyTypeHandler {
    fn type_tag(&self) -> &'static str {
        "any"
    }

    fn handle_all(&self, _schema: &Schema, _cx: &mut Context<'_>) -> GeneratorResult<CategoryTree> {
        Ok(CategoryTree::Leaf(CategoryBundle::valid_only(Value::Object(Map::new()))))
    }
}
