//! String constraint pipeline.
//!
//! Step order is fixed: guid, email, ip, hostname, min-length, max-length,
//! length, regex, allowed-options, uppercase, lowercase. Format steps and the
//! allowed-options step fully determine the value and halt the chain so the
//! length steps never rewrite a formatted value. Case rules still apply to
//! guid, email, ip and hostname values.

use crate::adapters::pipeline::{Flow, Pipeline};
use crate::adapters::type_registry::{Context, TypeHandler};
use crate::domain::{CategoryBundle, CategoryTree, GeneratorResult, RandomSource, Schema, StringOptions};
use serde_json::{json, Value};
use tracing::{debug, warn};

/// Stand-in for a value of the wrong type.
const INVALID_SENTINEL: bool = true;
/// Upper slack above a minimum length when a new value must be drawn.
const MIN_LENGTH_SLACK: i64 = 50;
const LONG_PREFIX: &str = "Long ";
/// Distinct text drawn before long strings start repeating it.
const TEXT_POOL_CHARS: usize = 4096;

/// Working values for one string node.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StringData {
    pub(crate) valid: String,
    pub(crate) long: Option<String>,
    pub(crate) short: Option<String>,
    pub(crate) bogus: String,
}

impl StringData {
    fn init(random: &mut dyn RandomSource) -> Self {
        let valid = random.sentence();
        let len = char_len(&valid);
        Self {
            long: Some(format!("{}{}", LONG_PREFIX, valid)),
            short: strict_prefix(random, &valid, 1),
            bogus: random.string(StringOptions::symbols(len)),
            valid,
        }
    }

    fn into_bundle(self) -> CategoryBundle {
        CategoryBundle {
            valid: Value::String(self.valid),
            invalid: Some(json!(INVALID_SENTINEL)),
            nil: Some(Value::Null),
            empty: Some(Value::String(String::new())),
            long: self.long.map(Value::String),
            short: self.short.map(Value::String),
            bogus: Some(Value::String(self.bogus)),
        }
    }
}

pub struct StringTypeHandler {
    pipeline: Pipeline<StringData>,
}

impl Default for StringTypeHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl StringTypeHandler {
    pub fn new() -> Self {
        let pipeline = Pipeline::new("string")
            .add_fn("guid", guid)
            .add_fn("email", email)
            .add_fn("ip", ip)
            .add_fn("hostname", hostname)
            .add_fn("min-length", min_length)
            .add_fn("max-length", max_length)
            .add_fn("length", exact_length)
            .add_fn("regex", regex)
            .add_fn("allowed-options", allowed_options)
            .add_fn("uppercase", uppercase)
            .add_fn("lowercase", lowercase);
        Self { pipeline }
    }

    pub(crate) fn run(&self, schema: &Schema, random: &mut dyn RandomSource) -> StringData {
        let data = StringData::init(random);
        self.pipeline.run(data, schema, random)
    }

    pub fn step_names(&self) -> Vec<&'static str> {
        self.pipeline.step_names()
    }
}

impl TypeHandler for StringTypeHandler {
    fn type_tag(&self) -> &'static str {
        "string"
    }

    fn handle_all(&self, schema: &Schema, cx: &mut Context<'_>) -> GeneratorResult<CategoryTree> {
        let data = self.run(schema, cx.random);
        debug!(valid = %data.valid, "generated string");
        Ok(CategoryTree::Leaf(data.into_bundle()))
    }
}

fn guid(mut data: StringData, schema: &Schema, random: &mut dyn RandomSource) -> Flow<StringData> {
    if !(schema.has_format("guid") || schema.has_format("uuid")) {
        return Flow::Continue(data);
    }
    debug!("generating a guid");
    data.valid = random.guid();
    data.bogus = random.string(StringOptions::symbols(char_len(&data.valid)));
    data.long = Some(format!("{}a", data.valid));
    data.short = strict_prefix(random, &data.valid, 1);
    halt_cased(data, schema, random)
}

fn email(mut data: StringData, schema: &Schema, random: &mut dyn RandomSource) -> Flow<StringData> {
    if !schema.has_format("email") {
        return Flow::Continue(data);
    }
    debug!("generating an email");
    data.valid = random.email();
    let local_part = random.string(StringOptions {
        symbols: true,
        length: None,
    });
    data.bogus = match data.valid.find('@') {
        Some(at) => format!("{}{}", local_part, &data.valid[at..]),
        None => local_part,
    };
    data.long = None;
    data.short = None;
    halt_cased(data, schema, random)
}

fn ip(mut data: StringData, schema: &Schema, random: &mut dyn RandomSource) -> Flow<StringData> {
    if !schema.has_format("ip") {
        return Flow::Continue(data);
    }
    debug!("generating an ip");
    data.valid = random.ip();
    data.bogus = random.string(StringOptions::symbols(char_len(&data.valid)));
    data.long = Some(format!("{}999", data.valid));
    data.short = None;
    halt_cased(data, schema, random)
}

fn hostname(mut data: StringData, schema: &Schema, random: &mut dyn RandomSource) -> Flow<StringData> {
    if !schema.has_format("hostname") {
        return Flow::Continue(data);
    }
    debug!("generating a hostname");
    data.valid = random.domain();
    let label = random.string(StringOptions::symbols(char_len(&data.valid).saturating_sub(4)));
    data.bogus = format!("{}.com", label);
    data.long = None;
    data.short = None;
    halt_cased(data, schema, random)
}

fn min_length(mut data: StringData, schema: &Schema, random: &mut dyn RandomSource) -> Flow<StringData> {
    let Some(min) = schema.find("min").and_then(|rule| rule.arg_len()) else {
        return Flow::Continue(data);
    };

    if char_len(&data.valid) < min {
        let floor = i64::try_from(min).unwrap_or(i64::MAX - MIN_LENGTH_SLACK);
        let target = random.integer(floor, floor + MIN_LENGTH_SLACK) as usize;
        debug!("generating a string of {} characters", target);
        data.valid = text_of_length(random, target);
        data.bogus = random.string(StringOptions::symbols(target));
        data.long = Some(format!("{}{}", LONG_PREFIX, data.valid));
    }
    data.short = shorter_than(random, &data.valid, min);
    Flow::Continue(data)
}

fn max_length(mut data: StringData, schema: &Schema, random: &mut dyn RandomSource) -> Flow<StringData> {
    let Some(max) = schema.find("max").and_then(|rule| rule.arg_len()) else {
        return Flow::Continue(data);
    };

    if char_len(&data.valid) <= max {
        data.long = Some(longer_than(random, &data.valid, max));
        return Flow::Continue(data);
    }

    let min = schema.find("min").and_then(|rule| rule.arg_len());
    let mut lower = min.unwrap_or(max / 2);
    if lower > max {
        warn!(min = lower, max, "string min length exceeds max length, using max");
        lower = max;
    }
    let target = random.integer(lower as i64, max as i64) as usize;
    debug!("generating a string between {} and {} characters", lower, max);
    data.valid = text_of_length(random, target);
    data.bogus = random.string(StringOptions::symbols(target));
    data.long = Some(longer_than(random, &data.valid, max));
    data.short = match min {
        Some(_) => shorter_than(random, &data.valid, lower),
        None => strict_prefix(random, &data.valid, 0),
    };
    Flow::Continue(data)
}

fn exact_length(mut data: StringData, schema: &Schema, random: &mut dyn RandomSource) -> Flow<StringData> {
    let Some(length) = schema.find("length").and_then(|rule| rule.arg_len()) else {
        return Flow::Continue(data);
    };
    debug!("generating a string of exactly {} characters", length);
    data.valid = text_of_length(random, length);
    data.bogus = random.string(StringOptions::symbols(length));
    data.long = Some(longer_than(random, &data.valid, length));
    data.short = shorter_than(random, &data.valid, length);
    Flow::Continue(data)
}

fn regex(mut data: StringData, schema: &Schema, random: &mut dyn RandomSource) -> Flow<StringData> {
    let Some(pattern) = schema
        .find("regex")
        .or_else(|| schema.find("pattern"))
        .and_then(|rule| rule.arg_str())
    else {
        return Flow::Continue(data);
    };
    debug!(pattern, "generating a string from a pattern");
    data.valid = random.string_matching(pattern);
    data.bogus = random.string(StringOptions::symbols(char_len(&data.valid).max(1)));
    data.long = None;
    data.short = None;
    Flow::Halt(data)
}

fn allowed_options(mut data: StringData, schema: &Schema, random: &mut dyn RandomSource) -> Flow<StringData> {
    let options: Vec<&str> = schema
        .find("valid")
        .and_then(|rule| rule.arg.as_ref())
        .and_then(Value::as_array)
        .map(|values| values.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();
    if options.is_empty() {
        return Flow::Continue(data);
    }

    data.valid = options[random.index(options.len())].to_string();
    debug!(valid = %data.valid, "picked an allowed option");
    let longest = options.iter().map(|option| char_len(option)).max().unwrap_or(0);
    data.bogus = random.string(StringOptions::symbols(longest + 1));
    data.long = None;
    data.short = None;
    Flow::Halt(data)
}

fn uppercase(mut data: StringData, schema: &Schema, _: &mut dyn RandomSource) -> Flow<StringData> {
    if schema.find("uppercase").is_some() {
        data.valid = data.valid.to_uppercase();
        data.long = data.long.map(|long| long.to_uppercase());
        data.short = data.short.map(|short| short.to_uppercase());
    }
    Flow::Continue(data)
}

fn lowercase(mut data: StringData, schema: &Schema, _: &mut dyn RandomSource) -> Flow<StringData> {
    if schema.find("lowercase").is_some() {
        data.valid = data.valid.to_lowercase();
        data.long = data.long.map(|long| long.to_lowercase());
        data.short = data.short.map(|short| short.to_lowercase());
    }
    Flow::Continue(data)
}

/// Halt with `uppercase`/`lowercase` applied, since halting skips those steps.
/// Regex and allowed-options values halt untouched so they keep matching.
fn halt_cased(data: StringData, schema: &Schema, random: &mut dyn RandomSource) -> Flow<StringData> {
    let data = uppercase(data, schema, random).into_inner();
    Flow::Halt(lowercase(data, schema, random).into_inner())
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

fn prefix(value: &str, chars: usize) -> String {
    value.chars().take(chars).collect()
}

/// Random prefix of `value` with at least `floor` and fewer than all of its
/// characters.
fn strict_prefix(random: &mut dyn RandomSource, value: &str, floor: usize) -> Option<String> {
    let len = char_len(value);
    if len == 0 || floor >= len {
        return None;
    }
    let take = random.integer(floor as i64, len as i64 - 1) as usize;
    Some(prefix(value, take))
}

/// Random prefix of `value` strictly shorter than `bound` characters.
fn shorter_than(random: &mut dyn RandomSource, value: &str, bound: usize) -> Option<String> {
    if bound == 0 {
        return None;
    }
    let upper = (bound - 1).min(char_len(value));
    let take = random.integer(0, upper as i64) as usize;
    Some(prefix(value, take))
}

/// `value` marked as long and padded past `bound` characters.
fn longer_than(random: &mut dyn RandomSource, value: &str, bound: usize) -> String {
    let mut long = format!("{}{}", LONG_PREFIX, value);
    let len = char_len(&long);
    if len <= bound {
        long.push_str(&text_of_length(random, bound + 1 - len));
    }
    long
}

/// Sentence text cut to exactly `length` characters. Long targets repeat a
/// pool of sentences instead of drawing new ones.
fn text_of_length(random: &mut dyn RandomSource, length: usize) -> String {
    if length == 0 {
        return String::new();
    }
    let mut pool = random.sentence_of(length.min(64));
    let mut pool_len = char_len(&pool);
    while pool_len < length.min(TEXT_POOL_CHARS) {
        let sentence = random.sentence();
        pool_len += 1 + char_len(&sentence);
        pool.push(' ');
        pool.push_str(&sentence);
    }
    pool.push(' ');
    pool.chars().cycle().take(length).collect()
}
