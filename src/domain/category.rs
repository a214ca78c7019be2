//! Output categories and the per-node bundles that hold them.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// The closed set of sample categories. `Valid` is the baseline; every other
/// variant is a single violation dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Valid,
    Invalid,
    Nil,
    Empty,
    Long,
    Short,
    Bogus,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Valid,
        Category::Invalid,
        Category::Nil,
        Category::Empty,
        Category::Long,
        Category::Short,
        Category::Bogus,
    ];

    pub const VIOLATIONS: [Category; 6] = [
        Category::Invalid,
        Category::Nil,
        Category::Empty,
        Category::Long,
        Category::Short,
        Category::Bogus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Valid => "valid",
            Category::Invalid => "invalid",
            Category::Nil => "nil",
            Category::Empty => "empty",
            Category::Long => "long",
            Category::Short => "short",
            Category::Bogus => "bogus",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generated values for one leaf schema node, one slot per category.
///
/// `valid` is always defined. A `None` slot means the category has no
/// meaningful value under this schema (an email has no "long" variant, for
/// instance) and the mutation generator skips it.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CategoryBundle {
    pub valid: Value,
    pub invalid: Option<Value>,
    pub nil: Option<Value>,
    pub empty: Option<Value>,
    pub long: Option<Value>,
    pub short: Option<Value>,
    pub bogus: Option<Value>,
}

impl CategoryBundle {
    /// A bundle with only the valid slot filled.
    pub fn valid_only(valid: Value) -> Self {
        Self {
            valid,
            ..Self::default()
        }
    }

    pub fn get(&self, category: Category) -> Option<&Value> {
        match category {
            Category::Valid => Some(&self.valid),
            Category::Invalid => self.invalid.as_ref(),
            Category::Nil => self.nil.as_ref(),
            Category::Empty => self.empty.as_ref(),
            Category::Long => self.long.as_ref(),
            Category::Short => self.short.as_ref(),
            Category::Bogus => self.bogus.as_ref(),
        }
    }

    /// Categories with a defined value, in [`Category::ALL`] order.
    pub fn defined(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL
            .into_iter()
            .filter(move |category| self.get(*category).is_some())
    }
}

/// Category bundles arranged in the shape of the schema that produced them.
///
/// Leaves and composites are distinguished by variant, never by inspecting
/// field names, so an object field literally called `valid` is just a field.
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryTree {
    Leaf(CategoryBundle),
    Object(BTreeMap<String, CategoryTree>),
    Array(Vec<CategoryTree>),
}

impl CategoryTree {
    pub fn is_leaf(&self) -> bool {
        matches!(self, CategoryTree::Leaf(_))
    }

    pub fn as_leaf(&self) -> Option<&CategoryBundle> {
        match self {
            CategoryTree::Leaf(bundle) => Some(bundle),
            _ => None,
        }
    }

    /// Number of leaves that define a value for `category`.
    pub fn count_defined(&self, category: Category) -> usize {
        match self {
            CategoryTree::Leaf(bundle) => usize::from(bundle.get(category).is_some()),
            CategoryTree::Object(fields) => {
                fields.values().map(|child| child.count_defined(category)).sum()
            }
            CategoryTree::Array(items) => items.iter().map(|child| child.count_defined(category)).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_names_round_trip_through_serde() {
        for category in Category::ALL {
            let encoded = serde_json::to_value(category).unwrap();
            assert_eq!(encoded, json!(category.as_str()));
        }
        assert!(!Category::VIOLATIONS.contains(&Category::Valid));
    }

    #[test]
    fn test_bundle_defined_skips_empty_slots() {
        let bundle = CategoryBundle {
            valid: json!("a@b.io"),
            nil: Some(Value::Null),
            bogus: Some(json!("%%@b.io")),
            ..CategoryBundle::default()
        };
        let defined: Vec<_> = bundle.defined().collect();
        assert_eq!(defined, vec![Category::Valid, Category::Nil, Category::Bogus]);
        assert_eq!(bundle.get(Category::Long), None);
    }

    #[test]
    fn test_count_defined_walks_composites() {
        let leaf = |long: Option<Value>| {
            CategoryTree::Leaf(CategoryBundle {
                valid: json!("x"),
                long,
                ..CategoryBundle::default()
            })
        };
        let tree = CategoryTree::Object(BTreeMap::from([
            ("a".to_string(), leaf(Some(json!("xx")))),
            (
                "b".to_string(),
                CategoryTree::Array(vec![leaf(None), leaf(Some(json!("yy")))]),
            ),
        ]));
        assert_eq!(tree.count_defined(Category::Long), 2);
        assert_eq!(tree.count_defined(Category::Valid), 3);
        assert!(!tree.is_leaf());
    }
}
