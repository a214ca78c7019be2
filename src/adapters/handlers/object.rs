use crate::adapters::type_registry::{Context, TypeHandler};
use crate::domain::{CategoryTree, GeneratorResult, Schema};
use std::collections::BTreeMap;
use tracing::debug;

/// Generates every declared field; undeclared fields never appear.
pub struct ObjectTypeHandler;

impl TypeHandler for ObjectTypeHandler {
    fn type_tag(&self) -> &'static str {
        "object"
    }

    fn handle_all(&self, schema: &Schema, cx: &mut Context<'_>) -> GeneratorResult<CategoryTree> {
        let mut fields = BTreeMap::new();
        for (key, child) in schema.fields() {
            debug!(field = %key, "generating object field");
            fields.insert(key.clone(), cx.dispatch(child)?);
        }
        Ok(CategoryTree::Object(fields))
    }
}
