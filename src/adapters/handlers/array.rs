use crate::adapters::type_registry::{Context, TypeHandler};
use crate::domain::{CategoryTree, GeneratorResult, Schema};

/// One generated element per declared element schema, in order.
pub struct ArrayTypeHandler;

impl TypeHandler for ArrayTypeHandler {
    fn type_tag(&self) -> &'static str {
        "array"
    }

    fn handle_all(&self, schema: &Schema, cx: &mut Context<'_>) -> GeneratorResult<CategoryTree> {
        let items = schema
            .items()
            .iter()
            .map(|item| cx.dispatch(item))
            .collect::<GeneratorResult<Vec<_>>>()?;
        Ok(CategoryTree::Array(items))
    }
}
