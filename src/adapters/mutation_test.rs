use super::mutation::{extract, mix, mix_all};
use crate::domain::{Category, CategoryBundle, CategoryTree};
use serde_json::{json, Value};
use std::collections::BTreeMap;

fn leaf(valid: Value, long: Option<Value>) -> CategoryTree {
    CategoryTree::Leaf(CategoryBundle {
        valid,
        nil: Some(Value::Null),
        long,
        ..CategoryBundle::default()
    })
}

fn object<const N: usize>(fields: [(&str, CategoryTree); N]) -> CategoryTree {
    CategoryTree::Object(
        fields
            .into_iter()
            .map(|(key, child)| (key.to_string(), child))
            .collect::<BTreeMap<_, _>>(),
    )
}

fn nested_tree() -> CategoryTree {
    object([
        ("id", leaf(json!(7), None)),
        (
            "outer",
            object([("inner", object([("field", leaf(json!("abc"), Some(json!("abcdef"))))]))]),
        ),
        (
            "tags",
            CategoryTree::Array(vec![leaf(json!("a"), Some(json!("aa"))), leaf(json!("b"), None)]),
        ),
    ])
}

/// Paths where two JSON values differ.
fn differences(a: &Value, b: &Value, prefix: &str, out: &mut Vec<String>) {
    let join = |key: &str| {
        if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", prefix, key)
        }
    };
    match (a, b) {
        (Value::Object(left), Value::Object(right)) if left.len() == right.len() => {
            for (key, value) in left {
                match right.get(key) {
                    Some(other) => differences(value, other, &join(key), out),
                    None => out.push(join(key)),
                }
            }
        }
        (Value::Array(left), Value::Array(right)) if left.len() == right.len() => {
            for (index, (value, other)) in left.iter().zip(right).enumerate() {
                differences(value, other, &join(&index.to_string()), out);
            }
        }
        _ if a != b => out.push(prefix.to_string()),
        _ => {}
    }
}

#[test]
fn test_extract_valid_projection() {
    assert_eq!(
        extract(&nested_tree(), Category::Valid),
        Some(json!({
            "id": 7,
            "outer": { "inner": { "field": "abc" } },
            "tags": ["a", "b"]
        }))
    );
}

#[test]
fn test_extract_omits_missing_fields_and_nulls_missing_items() {
    assert_eq!(
        extract(&nested_tree(), Category::Long),
        Some(json!({
            "outer": { "inner": { "field": "abcdef" } },
            "tags": ["aa", null]
        }))
    );
    assert_eq!(extract(&leaf(json!(1), None), Category::Long), None);
}

#[test]
fn test_mix_changes_exactly_one_leaf() {
    let tree = nested_tree();
    let valid = extract(&tree, Category::Valid).unwrap();

    for category in Category::VIOLATIONS {
        for sample in mix(&tree, category) {
            let mut changed = Vec::new();
            differences(&valid, &sample.model, "", &mut changed);
            assert!(changed.len() <= 1, "{} changed {:?}", category, changed);
            if let Some(path) = changed.first() {
                assert_eq!(path, &sample.field_path);
            }
        }
    }
}

#[test]
fn test_mix_paths_are_dotted() {
    let long = mix(&nested_tree(), Category::Long);
    let paths: Vec<_> = long.iter().map(|s| s.field_path.as_str()).collect();
    assert_eq!(paths, vec!["outer.inner.field", "tags.0"]);

    assert_eq!(long[0].model["outer"]["inner"]["field"], json!("abcdef"));
    assert_eq!(long[0].model["tags"], json!(["a", "b"]));
    assert_eq!(long[1].model["tags"], json!(["aa", "b"]));
    assert_eq!(long[1].model["outer"]["inner"]["field"], json!("abc"));
}

#[test]
fn test_nil_sample_keeps_null_field() {
    let nil = mix(&nested_tree(), Category::Nil);
    let id = nil.iter().find(|s| s.field_path == "id").unwrap();
    assert_eq!(id.model["id"], Value::Null);
    assert!(id.model.as_object().unwrap().contains_key("id"));
}

#[test]
fn test_mix_all_counts_match_defined_leaves() {
    let tree = nested_tree();
    let result = mix_all(&tree);

    assert_eq!(Some(result.valid.clone()), extract(&tree, Category::Valid));
    for category in Category::VIOLATIONS {
        assert_eq!(
            result.samples(category).len(),
            tree.count_defined(category),
            "count mismatch for {}",
            category
        );
    }
    assert_eq!(result.nil.len(), 4);
    assert_eq!(result.long.len(), 2);
    assert!(result.empty.is_empty());
    assert_eq!(result.total_samples(), 6);
}

#[test]
fn test_leaf_root_replaces_whole_model() {
    let tree = leaf(json!("abc"), Some(json!("abcdef")));
    let result = mix_all(&tree);

    assert_eq!(result.valid, json!("abc"));
    assert_eq!(result.long.len(), 1);
    assert_eq!(result.long[0].field_path, "");
    assert_eq!(result.long[0].model, json!("abcdef"));
    assert_eq!(result.nil[0].model, Value::Null);
}

#[test]
fn test_empty_composites_have_no_samples() {
    let result = mix_all(&CategoryTree::Object(BTreeMap::new()));
    assert_eq!(result.valid, json!({}));
    assert_eq!(result.total_samples(), 0);
}
