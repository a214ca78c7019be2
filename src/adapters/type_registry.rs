//! Type dispatch: maps a schema's type tag to the handler that generates it.

use crate::adapters::handlers::{
    AlternativesTypeHandler, AnyTypeHandler, ArrayTypeHandler, BinaryTypeHandler,
    BooleanTypeHandler, DateTypeHandler, NumberTypeHandler, ObjectTypeHandler, StringTypeHandler,
};
use crate::adapters::handlers::number::DEFAULT_INTEGER_SPAN;
use crate::adapters::mutation;
use crate::domain::{Category, CategoryTree, GeneratorError, GeneratorResult, RandomSource, Schema};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Generates the category tree for one schema type.
pub trait TypeHandler: Send + Sync {
    fn type_tag(&self) -> &'static str;

    /// Produce values for every category this schema supports.
    fn handle_all(&self, schema: &Schema, cx: &mut Context<'_>) -> GeneratorResult<CategoryTree>;

    /// Only the fully valid value.
    fn handle(&self, schema: &Schema, cx: &mut Context<'_>) -> GeneratorResult<Value> {
        let tree = self.handle_all(schema, cx)?;
        Ok(mutation::extract(&tree, Category::Valid).unwrap_or(Value::Null))
    }
}

/// Borrowed state threaded through one generation run: the registry for
/// recursion into child schemas and the random source.
pub struct Context<'a> {
    registry: &'a TypeRegistry,
    pub random: &'a mut dyn RandomSource,
}

impl<'a> Context<'a> {
    pub fn new(registry: &'a TypeRegistry, random: &'a mut dyn RandomSource) -> Self {
        Self { registry, random }
    }

    /// Resolve the handler for `schema` and run it.
    pub fn dispatch(&mut self, schema: &Schema) -> GeneratorResult<CategoryTree> {
        let registry = self.registry;
        let handler = registry.resolve(&schema.type_tag)?;
        debug!(type_tag = %schema.type_tag, "dispatching schema node");
        handler.handle_all(schema, self)
    }
}

/// Fixed set of handlers, one per supported type tag. Built once; there is
/// no way to register additional handlers afterwards.
pub struct TypeRegistry {
    handlers: HashMap<&'static str, Box<dyn TypeHandler>>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::with_integer_span(DEFAULT_INTEGER_SPAN)
    }

    /// Registry whose number handler draws unbounded integers from
    /// `-span..=span`.
    pub fn with_integer_span(span: i64) -> Self {
        let handlers: Vec<Box<dyn TypeHandler>> = vec![
            Box::new(ObjectTypeHandler),
            Box::new(StringTypeHandler::new()),
            Box::new(ArrayTypeHandler),
            Box::new(NumberTypeHandler::with_span(span)),
            Box::new(BooleanTypeHandler),
            Box::new(DateTypeHandler::new()),
            Box::new(AnyTypeHandler),
            Box::new(BinaryTypeHandler::new()),
            Box::new(AlternativesTypeHandler),
        ];
        Self {
            handlers: handlers
                .into_iter()
                .map(|handler| (handler.type_tag(), handler))
                .collect(),
        }
    }

    pub fn resolve(&self, type_tag: &str) -> GeneratorResult<&dyn TypeHandler> {
        self.handlers
            .get(type_tag)
            .map(|handler| &**handler)
            .ok_or_else(|| GeneratorError::unsupported(type_tag))
    }

    /// Fails on the first node anywhere in the tree, including alternative
    /// candidates that a run might not pick, whose type is not registered.
    pub fn check_tree(&self, schema: &Schema) -> GeneratorResult<()> {
        self.resolve(&schema.type_tag)?;
        for (_, child) in schema.fields() {
            self.check_tree(child)?;
        }
        for child in schema.items() {
            self.check_tree(child)?;
        }
        Ok(())
    }

    /// Registered type tags, sorted.
    pub fn type_tags(&self) -> Vec<&'static str> {
        let mut tags: Vec<_> = self.handlers.keys().copied().collect();
        tags.sort_unstable();
        tags
    }
}
