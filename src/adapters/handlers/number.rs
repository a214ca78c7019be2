//! Number constraint pipeline.
//!
//! Steps only narrow an integer range: min, max, greater, less, positive,
//! negative, multiple. Bounds compose conservatively so the declaration order
//! of rules never matters: every lower bound raises `min`, every upper bound
//! lowers `max`.

use crate::adapters::pipeline::{Flow, Pipeline};
use crate::adapters::type_registry::{Context, TypeHandler};
use crate::domain::{CategoryBundle, CategoryTree, GeneratorResult, RandomSource, Schema, StringOptions};
use serde_json::{json, Value};
use tracing::{debug, warn};

pub const DEFAULT_INTEGER_SPAN: i64 = 1_000_000;

/// Integer range accumulated by the number pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NumberBounds {
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub multiple: Option<i64>,
}

impl NumberBounds {
    pub fn raise_min(&mut self, candidate: i64) {
        self.min = Some(self.min.map_or(candidate, |current| current.max(candidate)));
    }

    pub fn lower_max(&mut self, candidate: i64) {
        self.max = Some(self.max.map_or(candidate, |current| current.min(candidate)));
    }

    /// Concrete inclusive range. Open sides extend `span` past the closed side
    /// (or around zero); a contradictory pair collapses to `min`.
    pub fn resolve(&self, span: i64) -> (i64, i64) {
        match (self.min, self.max) {
            (Some(lo), Some(hi)) if lo > hi => {
                warn!(min = lo, max = hi, "number min exceeds max, collapsing to min");
                (lo, lo)
            }
            (Some(lo), Some(hi)) => (lo, hi),
            (Some(lo), None) => (lo, lo.saturating_add(span)),
            (None, Some(hi)) => (hi.saturating_sub(span), hi),
            (None, None) => (-span, span),
        }
    }
}

pub struct NumberTypeHandler {
    pipeline: Pipeline<NumberBounds>,
    span: i64,
}

impl Default for NumberTypeHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl NumberTypeHandler {
    pub fn new() -> Self {
        Self::with_span(DEFAULT_INTEGER_SPAN)
    }

    pub fn with_span(span: i64) -> Self {
        let pipeline = Pipeline::new("number")
            .add_fn("min", min)
            .add_fn("max", max)
            .add_fn("greater", greater)
            .add_fn("less", less)
            .add_fn("positive", positive)
            .add_fn("negative", negative)
            .add_fn("multiple", multiple);
        Self {
            pipeline,
            span: span.max(1),
        }
    }

    pub fn bounds(&self, schema: &Schema, random: &mut dyn RandomSource) -> NumberBounds {
        self.pipeline.run(NumberBounds::default(), schema, random)
    }

    fn draw(&self, bounds: &NumberBounds, random: &mut dyn RandomSource) -> i64 {
        let (lo, hi) = bounds.resolve(self.span);
        if let Some(step) = bounds.multiple {
            let first = lo.div_euclid(step) + i64::from(lo.rem_euclid(step) != 0);
            let last = hi.div_euclid(step);
            if first <= last {
                return random.integer(first, last).saturating_mul(step);
            }
            warn!(lo, hi, step, "no multiple of {} within range, ignoring multiple", step);
        }
        random.integer(lo, hi)
    }
}

impl TypeHandler for NumberTypeHandler {
    fn type_tag(&self) -> &'static str {
        "number"
    }

    fn handle_all(&self, schema: &Schema, cx: &mut Context<'_>) -> GeneratorResult<CategoryTree> {
        let bounds = self.bounds(schema, cx.random);
        let valid = self.draw(&bounds, cx.random);
        debug!(?bounds, valid, "generated number");

        let word_length = cx.random.integer(4, 10) as usize;
        let bundle = CategoryBundle {
            valid: json!(valid),
            invalid: Some(Value::String(cx.random.word(word_length))),
            nil: Some(Value::Null),
            empty: None,
            long: bounds.max.and_then(|max| max.checked_add(1)).map(|n| json!(n)),
            short: bounds.min.and_then(|min| min.checked_sub(1)).map(|n| json!(n)),
            bogus: Some(Value::String(cx.random.string(StringOptions::symbols(word_length)))),
        };
        Ok(CategoryTree::Leaf(bundle))
    }
}

fn to_lower_bound(arg: f64) -> i64 {
    arg.ceil() as i64
}

fn to_upper_bound(arg: f64) -> i64 {
    arg.floor() as i64
}

fn min(mut bounds: NumberBounds, schema: &Schema, _: &mut dyn RandomSource) -> Flow<NumberBounds> {
    for arg in schema.find_all("min").filter_map(|rule| rule.arg_f64()) {
        bounds.raise_min(to_lower_bound(arg));
    }
    Flow::Continue(bounds)
}

fn max(mut bounds: NumberBounds, schema: &Schema, _: &mut dyn RandomSource) -> Flow<NumberBounds> {
    for arg in schema.find_all("max").filter_map(|rule| rule.arg_f64()) {
        bounds.lower_max(to_upper_bound(arg));
    }
    Flow::Continue(bounds)
}

fn greater(mut bounds: NumberBounds, schema: &Schema, _: &mut dyn RandomSource) -> Flow<NumberBounds> {
    for arg in schema.find_all("greater").filter_map(|rule| rule.arg_f64()) {
        bounds.raise_min(to_upper_bound(arg).saturating_add(1));
    }
    Flow::Continue(bounds)
}

fn less(mut bounds: NumberBounds, schema: &Schema, _: &mut dyn RandomSource) -> Flow<NumberBounds> {
    for arg in schema.find_all("less").filter_map(|rule| rule.arg_f64()) {
        bounds.lower_max(to_lower_bound(arg).saturating_sub(1));
    }
    Flow::Continue(bounds)
}

fn positive(mut bounds: NumberBounds, schema: &Schema, _: &mut dyn RandomSource) -> Flow<NumberBounds> {
    if schema.find("positive").is_some() {
        bounds.raise_min(1);
    }
    Flow::Continue(bounds)
}

fn negative(mut bounds: NumberBounds, schema: &Schema, _: &mut dyn RandomSource) -> Flow<NumberBounds> {
    if schema.find("negative").is_some() {
        bounds.lower_max(-1);
    }
    Flow::Continue(bounds)
}

fn multiple(mut bounds: NumberBounds, schema: &Schema, _: &mut dyn RandomSource) -> Flow<NumberBounds> {
    let step = schema
        .find("multiple")
        .and_then(|rule| rule.arg_f64())
        .map(|arg| arg.abs().round() as i64)
        .filter(|step| *step >= 1);
    if let Some(step) = step {
        bounds.multiple = Some(step);
    }
    Flow::Continue(bounds)
}
