use crate::adapters::type_registry::{Context, TypeHandler};
use crate::domain::{CategoryBundle, CategoryTree, GeneratorResult, Schema, StringOptions};
use serde_json::Value;

pub struct BooleanTypeHandler;

impl TypeHandler for BooleanTypeHandler {
    fn type_tag(&self) -> &'static str {
        "boolean"
    }

    fn handle_all(&self, _schema: &Schema, cx: &mut Context<'_>) -> GeneratorResult<CategoryTree> {
        let bundle = CategoryBundle {
            valid: Value::Bool(cx.random.boolean()),
            invalid: Some(Value::String(cx.random.string(StringOptions::default()))),
            nil: Some(Value::Null),
            bogus: Some(Value::String(cx.random.string(StringOptions {
                symbols: true,
                length: None,
            }))),
            ..CategoryBundle::default()
        };
        Ok(CategoryTree::Leaf(bundle))
    }
}
