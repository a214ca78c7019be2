use crate::adapters::random_source::FakerRandomSource;
use crate::adapters::type_registry::{Context, TypeRegistry};
use crate::domain::{CategoryBundle, CategoryTree, GeneratorResult, Schema};

pub(crate) fn try_tree_for(schema: &Schema, seed: u64) -> GeneratorResult<CategoryTree> {
    let registry = TypeRegistry::new();
    let mut random = FakerRandomSource::with_seed(seed);
    let mut cx = Context::new(&registry, &mut random);
    cx.dispatch(schema)
}

pub(crate) fn tree_for(schema: &Schema, seed: u64) -> CategoryTree {
    try_tree_for(schema, seed).unwrap()
}

pub(crate) fn leaf_for(schema: &Schema, seed: u64) -> CategoryBundle {
    match tree_for(schema, seed) {
        CategoryTree::Leaf(bundle) => bundle,
        other => panic!("expected a leaf, got {:?}", other),
    }
}

pub(crate) fn as_text(value: Option<&serde_json::Value>) -> &str {
    value.and_then(|v| v.as_str()).unwrap()
}

pub(crate) fn char_count(value: Option<&serde_json::Value>) -> usize {
    as_text(value).chars().count()
}
