//! Date constraint pipeline: min, max, format.

use crate::adapters::pipeline::{Flow, Pipeline};
use crate::adapters::type_registry::{Context, TypeHandler};
use crate::domain::{CategoryBundle, CategoryTree, Constraint, GeneratorResult, RandomSource, Schema, StringOptions};
use chrono::{DateTime, Duration, NaiveDate, SecondsFormat, Utc};
use serde_json::{json, Value};
use std::fmt::Write as _;
use tracing::{debug, warn};

/// Width of the window drawn from when only one side is bounded.
const OPEN_WINDOW_DAYS: i64 = 365 * 50;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DateFormat {
    /// RFC 3339 string.
    #[default]
    Iso,
    /// Unix seconds as a JSON number.
    Timestamp,
    /// `strftime`-style pattern.
    Pattern(String),
}

impl DateFormat {
    fn from_flag(flag: &str) -> Self {
        match flag {
            "iso" | "ISO" => DateFormat::Iso,
            "timestamp" | "unix" => DateFormat::Timestamp,
            pattern => DateFormat::Pattern(pattern.to_string()),
        }
    }

    pub fn render(&self, date: DateTime<Utc>) -> Value {
        match self {
            DateFormat::Iso => Value::String(date.to_rfc3339_opts(SecondsFormat::Secs, true)),
            DateFormat::Timestamp => json!(date.timestamp()),
            DateFormat::Pattern(pattern) => {
                let mut out = String::new();
                if write!(out, "{}", date.format(pattern)).is_err() {
                    warn!(pattern = %pattern, "unusable date format, falling back to ISO");
                    return DateFormat::Iso.render(date);
                }
                Value::String(out)
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateParams {
    pub min: Option<DateTime<Utc>>,
    pub max: Option<DateTime<Utc>>,
    pub format: DateFormat,
}

impl DateParams {
    fn range(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let window = Duration::days(OPEN_WINDOW_DAYS);
        match (self.min, self.max) {
            (Some(lo), Some(hi)) if lo > hi => {
                warn!(min = %lo, max = %hi, "date min is after max, collapsing to min");
                (lo, lo)
            }
            (Some(lo), Some(hi)) => (lo, hi),
            (Some(lo), None) => (lo, lo.checked_add_signed(window).unwrap_or(lo)),
            (None, Some(hi)) => (hi.checked_sub_signed(window).unwrap_or(hi), hi),
            (None, None) => (default_floor(), default_ceiling()),
        }
    }
}

pub struct DateTypeHandler {
    pipeline: Pipeline<DateParams>,
}

impl Default for DateTypeHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl DateTypeHandler {
    pub fn new() -> Self {
        let pipeline = Pipeline::new("date")
            .add_fn("min", min)
            .add_fn("max", max)
            .add_fn("format", format);
        Self { pipeline }
    }

    pub fn params(&self, schema: &Schema, random: &mut dyn RandomSource) -> DateParams {
        self.pipeline.run(DateParams::default(), schema, random)
    }
}

impl TypeHandler for DateTypeHandler {
    fn type_tag(&self) -> &'static str {
        "date"
    }

    fn handle_all(&self, schema: &Schema, cx: &mut Context<'_>) -> GeneratorResult<CategoryTree> {
        let params = self.params(schema, cx.random);
        let (lo, hi) = params.range();
        let valid = cx.random.date_between(lo, hi);
        debug!(%valid, "generated date");

        let one_day = Duration::days(1);
        let word_length = cx.random.integer(4, 10) as usize;
        let bundle = CategoryBundle {
            valid: params.format.render(valid),
            invalid: Some(Value::String(cx.random.word(word_length))),
            nil: Some(Value::Null),
            empty: None,
            long: params
                .max
                .and_then(|max| max.checked_add_signed(one_day))
                .map(|date| params.format.render(date)),
            short: params
                .min
                .and_then(|min| min.checked_sub_signed(one_day))
                .map(|date| params.format.render(date)),
            bogus: Some(Value::String(cx.random.string(StringOptions::symbols(word_length)))),
        };
        Ok(CategoryTree::Leaf(bundle))
    }
}

fn default_floor() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(31_536_000, 0).unwrap_or_default()
}

fn default_ceiling() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(2_145_830_400, 0).unwrap_or_default()
}

/// Dates are written as RFC 3339, plain `YYYY-MM-DD`, `"now"`, or unix seconds.
fn parse_date(rule: &Constraint) -> Option<DateTime<Utc>> {
    match rule.arg.as_ref()? {
        Value::Number(n) => DateTime::<Utc>::from_timestamp(n.as_f64()? as i64, 0),
        Value::String(s) if s == "now" => Some(Utc::now()),
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|date| date.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
                    .map(|date| date.and_utc())
            }),
        _ => None,
    }
}

fn min(mut params: DateParams, schema: &Schema, _: &mut dyn RandomSource) -> Flow<DateParams> {
    for date in schema.find_all("min").filter_map(parse_date) {
        params.min = Some(params.min.map_or(date, |current| current.max(date)));
    }
    Flow::Continue(params)
}

fn max(mut params: DateParams, schema: &Schema, _: &mut dyn RandomSource) -> Flow<DateParams> {
    for date in schema.find_all("max").filter_map(parse_date) {
        params.max = Some(params.max.map_or(date, |current| current.min(date)));
    }
    Flow::Continue(params)
}

fn format(mut params: DateParams, schema: &Schema, _: &mut dyn RandomSource) -> Flow<DateParams> {
    if let Some(flag) = schema.flag_str("format") {
        params.format = DateFormat::from_flag(flag);
    } else if schema.find("timestamp").is_some() {
        params.format = DateFormat::Timestamp;
    } else if schema.has_format("iso") {
        params.format = DateFormat::Iso;
    }
    Flow::Continue(params)
}
