//! Schema nodes consumed by the generator.
//!
//! A [`Schema`] is the already-parsed form of a declarative validation rule set:
//! a type tag, an ordered list of named constraints, auxiliary flags and, for
//! composite types, child schemas. It deserializes from JSON, YAML or TOML.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

/// Largest length a constraint may ask for. Bigger arguments are clamped.
pub const MAX_LENGTH_ARG: usize = 1 << 20;

/// A single named rule, e.g. `{ name: "min", arg: 5 }`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct Constraint {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arg: Option<Value>,
}

impl Constraint {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arg: None,
        }
    }

    pub fn with_arg(name: impl Into<String>, arg: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            arg: Some(arg.into()),
        }
    }

    /// Numeric argument, if the rule carries one.
    pub fn arg_f64(&self) -> Option<f64> {
        self.arg.as_ref().and_then(Value::as_f64)
    }

    /// Length argument within `0..=MAX_LENGTH_ARG`. Negative, fractional and
    /// oversized values are clamped rather than rejected.
    pub fn arg_len(&self) -> Option<usize> {
        let n = self.arg_f64()?;
        if n <= 0.0 {
            return Some(0);
        }
        if n > MAX_LENGTH_ARG as f64 {
            warn!(rule = %self.name, arg = n, max = MAX_LENGTH_ARG, "length argument too large, clamping");
            return Some(MAX_LENGTH_ARG);
        }
        Some(n.floor() as usize)
    }

    pub fn arg_str(&self) -> Option<&str> {
        self.arg.as_ref().and_then(Value::as_str)
    }
}

/// Child schemas of a composite node.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum Children {
    /// Object fields, keyed by field name.
    Fields(BTreeMap<String, Schema>),
    /// Array elements or alternative candidates, in declaration order.
    Items(Vec<Schema>),
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct Schema {
    #[serde(rename = "type")]
    pub type_tag: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<Constraint>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub flags: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Children>,
}

impl Schema {
    pub fn new(type_tag: impl Into<String>) -> Self {
        Self {
            type_tag: type_tag.into(),
            constraints: Vec::new(),
            flags: BTreeMap::new(),
            children: None,
        }
    }

    pub fn string() -> Self {
        Self::new("string")
    }

    pub fn number() -> Self {
        Self::new("number")
    }

    pub fn boolean() -> Self {
        Self::new("boolean")
    }

    pub fn date() -> Self {
        Self::new("date")
    }

    pub fn binary() -> Self {
        Self::new("binary")
    }

    pub fn any() -> Self {
        Self::new("any")
    }

    pub fn object<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Schema)>,
    {
        let fields = fields.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Self {
            children: Some(Children::Fields(fields)),
            ..Self::new("object")
        }
    }

    pub fn array(items: Vec<Schema>) -> Self {
        Self {
            children: Some(Children::Items(items)),
            ..Self::new("array")
        }
    }

    pub fn alternatives(candidates: Vec<Schema>) -> Self {
        Self {
            children: Some(Children::Items(candidates)),
            ..Self::new("alternatives")
        }
    }

    /// Builder-style constraint append.
    pub fn rule(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn flag(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.flags.insert(name.into(), value.into());
        self
    }

    /// First constraint with the given name.
    pub fn find(&self, name: &str) -> Option<&Constraint> {
        self.constraints.iter().find(|c| c.name == name)
    }

    /// All constraints with the given name, in declaration order.
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Constraint> + 'a {
        self.constraints.iter().filter(move |c| c.name == name)
    }

    /// True when a format rule is declared either as `{name: fmt}` or as
    /// `{name: "format", arg: fmt}`.
    pub fn has_format(&self, format: &str) -> bool {
        self.constraints
            .iter()
            .any(|c| c.name == format || (c.name == "format" && c.arg_str() == Some(format)))
    }

    pub fn flag_str(&self, name: &str) -> Option<&str> {
        self.flags.get(name).and_then(Value::as_str)
    }

    /// Object fields; empty for non-object nodes.
    pub fn fields(&self) -> impl Iterator<Item = (&String, &Schema)> {
        let fields = match &self.children {
            Some(Children::Fields(fields)) => Some(fields.iter()),
            _ => None,
        };
        fields.into_iter().flatten()
    }

    /// Array elements or alternative candidates; empty for other nodes.
    pub fn items(&self) -> &[Schema] {
        match &self.children {
            Some(Children::Items(items)) => items,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_nested_object() {
        let schema: Schema = serde_json::from_value(json!({
            "type": "object",
            "children": {
                "name": { "type": "string", "constraints": [{ "name": "min", "arg": 5 }] },
                "tags": { "type": "array", "children": [{ "type": "string" }] }
            }
        }))
        .unwrap();

        assert_eq!(schema.type_tag, "object");
        let fields: Vec<_> = schema.fields().map(|(k, _)| k.as_str()).collect();
        assert_eq!(fields, vec!["name", "tags"]);

        let (_, name) = schema.fields().next().unwrap();
        assert_eq!(name.find("min").and_then(Constraint::arg_len), Some(5));

        let (_, tags) = schema.fields().nth(1).unwrap();
        assert_eq!(tags.items().len(), 1);
    }

    #[test]
    fn test_has_format_accepts_both_spellings() {
        let direct = Schema::string().rule(Constraint::new("email"));
        let via_format = Schema::string().rule(Constraint::with_arg("format", "email"));

        assert!(direct.has_format("email"));
        assert!(via_format.has_format("email"));
        assert!(!via_format.has_format("guid"));
    }

    #[test]
    fn test_negative_length_is_clamped() {
        assert_eq!(Constraint::with_arg("min", -3).arg_len(), Some(0));
        assert_eq!(Constraint::with_arg("min", 4.7).arg_len(), Some(4));
        assert_eq!(Constraint::new("min").arg_len(), None);
    }

    #[test]
    fn test_oversized_length_is_clamped() {
        assert_eq!(Constraint::with_arg("max", 1e20).arg_len(), Some(MAX_LENGTH_ARG));
        assert_eq!(Constraint::with_arg("min", u64::MAX).arg_len(), Some(MAX_LENGTH_ARG));
        assert_eq!(Constraint::with_arg("length", MAX_LENGTH_ARG as u64).arg_len(), Some(MAX_LENGTH_ARG));
    }

    #[test]
    fn test_yaml_schema() {
        let yaml = r#"
type: number
constraints:
  - name: min
    arg: 0
  - name: positive
"#;
        let schema: Schema = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(schema.constraints.len(), 2);
        assert!(schema.find("positive").unwrap().arg.is_none());
    }
}
