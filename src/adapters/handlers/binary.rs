//! Binary constraint pipeline: min, max, length, then encoding.

use crate::adapters::pipeline::{Flow, Pipeline};
use crate::adapters::type_registry::{Context, TypeHandler};
use crate::domain::{CategoryBundle, CategoryTree, GeneratorResult, RandomSource, Schema, StringOptions};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::{json, Value};
use tracing::{debug, warn};

const DEFAULT_LENGTH: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    #[default]
    Utf8,
    Base64,
    Hex,
}

impl Encoding {
    fn from_flag(flag: Option<&str>) -> Self {
        match flag.map(str::to_ascii_lowercase).as_deref() {
            Some("base64") => Encoding::Base64,
            Some("hex") => Encoding::Hex,
            _ => Encoding::Utf8,
        }
    }

    pub fn encode(&self, bytes: &[u8]) -> String {
        match self {
            Encoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Encoding::Base64 => STANDARD.encode(bytes),
            Encoding::Hex => bytes.iter().map(|b| format!("{:02x}", b)).collect(),
        }
    }
}

/// Byte length resolved by the binary pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryParams {
    pub length: usize,
    pub min: Option<usize>,
    pub max: Option<usize>,
    pub exact: Option<usize>,
}

impl Default for BinaryParams {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            min: None,
            max: None,
            exact: None,
        }
    }
}

pub struct BinaryTypeHandler {
    pipeline: Pipeline<BinaryParams>,
}

impl Default for BinaryTypeHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl BinaryTypeHandler {
    pub fn new() -> Self {
        let pipeline = Pipeline::new("binary")
            .add_fn("min", min)
            .add_fn("max", max)
            .add_fn("length", length);
        Self { pipeline }
    }

    pub fn params(&self, schema: &Schema, random: &mut dyn RandomSource) -> BinaryParams {
        self.pipeline.run(BinaryParams::default(), schema, random)
    }
}

impl TypeHandler for BinaryTypeHandler {
    fn type_tag(&self) -> &'static str {
        "binary"
    }

    fn handle_all(&self, schema: &Schema, cx: &mut Context<'_>) -> GeneratorResult<CategoryTree> {
        let params = self.params(schema, cx.random);
        let encoding = Encoding::from_flag(schema.flag_str("encoding"));
        let valid = cx.random.word(params.length);
        debug!(?encoding, length = params.length, "generated binary");

        let upper = params.exact.or(params.max);
        let lower = params.exact.or(params.min).filter(|lower| *lower > 0);
        let bundle = CategoryBundle {
            valid: Value::String(encoding.encode(valid.as_bytes())),
            invalid: Some(json!(true)),
            nil: Some(Value::Null),
            empty: Some(Value::String(String::new())),
            long: upper.map(|upper| Value::String(encoding.encode(cx.random.word(upper.saturating_add(1)).as_bytes()))),
            short: lower.map(|lower| Value::String(encoding.encode(cx.random.word(lower - 1).as_bytes()))),
            bogus: Some(Value::String(
                cx.random.string(StringOptions::symbols(params.length.max(1))),
            )),
        };
        Ok(CategoryTree::Leaf(bundle))
    }
}

fn min(mut params: BinaryParams, schema: &Schema, _: &mut dyn RandomSource) -> Flow<BinaryParams> {
    for min in schema.find_all("min").filter_map(|rule| rule.arg_len()) {
        params.min = Some(params.min.map_or(min, |current| current.max(min)));
    }
    if let Some(min) = params.min {
        params.length = params.length.max(min);
    }
    Flow::Continue(params)
}

fn max(mut params: BinaryParams, schema: &Schema, _: &mut dyn RandomSource) -> Flow<BinaryParams> {
    for max in schema.find_all("max").filter_map(|rule| rule.arg_len()) {
        params.max = Some(params.max.map_or(max, |current| current.min(max)));
    }
    if let Some(max) = params.max {
        match params.min {
            Some(min) if min > max => {
                warn!(min, max, "binary min length exceeds max, keeping min");
            }
            _ => params.length = params.length.min(max),
        }
    }
    Flow::Continue(params)
}

fn length(mut params: BinaryParams, schema: &Schema, _: &mut dyn RandomSource) -> Flow<BinaryParams> {
    if let Some(exact) = schema.find("length").and_then(|rule| rule.arg_len()) {
        params.exact = Some(exact);
        params.length = exact;
    }
    Flow::Continue(params)
}
