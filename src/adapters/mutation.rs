//! Single-fault mutation of a fully valid composite.
//!
//! [`extract`] projects a category tree onto one category, [`mix`] produces
//! one sample per leaf where only that leaf carries the category's value, and
//! [`mix_all`] assembles both into a [`GenerationResult`].

use crate::domain::{Category, CategoryTree, GenerationResult, MutatedSample};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PathSegment<'a> {
    Key(&'a str),
    Index(usize),
}

fn dotted(path: &[PathSegment<'_>]) -> String {
    path.iter()
        .map(|segment| match segment {
            PathSegment::Key(key) => (*key).to_string(),
            PathSegment::Index(index) => index.to_string(),
        })
        .collect::<Vec<_>>()
        .join(".")
}

/// Plain value holding each leaf's entry for `category`.
///
/// Object fields whose leaf has no value for the category are omitted; array
/// positions are kept and filled with `null`. Returns `None` only when the
/// root itself is a leaf without a value.
pub fn extract(tree: &CategoryTree, category: Category) -> Option<Value> {
    match tree {
        CategoryTree::Leaf(bundle) => bundle.get(category).cloned(),
        CategoryTree::Object(fields) => {
            let mut model = Map::new();
            for (key, child) in fields {
                if let Some(value) = extract(child, category) {
                    model.insert(key.clone(), value);
                }
            }
            Some(Value::Object(model))
        }
        CategoryTree::Array(items) => Some(Value::Array(
            items
                .iter()
                .map(|child| extract(child, category).unwrap_or(Value::Null))
                .collect(),
        )),
    }
}

/// One sample per leaf that defines `category`, each a copy of the valid
/// composite with only that leaf replaced.
pub fn mix(tree: &CategoryTree, category: Category) -> Vec<MutatedSample> {
    let baseline = extract(tree, Category::Valid).unwrap_or(Value::Null);
    mix_against(tree, category, &baseline)
}

/// Valid baseline plus the samples for every violation category.
pub fn mix_all(tree: &CategoryTree) -> GenerationResult {
    let baseline = extract(tree, Category::Valid).unwrap_or(Value::Null);
    let mut result = GenerationResult::new(baseline);
    for category in Category::VIOLATIONS {
        let samples = mix_against(tree, category, &result.valid);
        if let Some(slot) = result.samples_mut(category) {
            *slot = samples;
        }
    }
    result
}

fn mix_against(tree: &CategoryTree, category: Category, baseline: &Value) -> Vec<MutatedSample> {
    let mut samples = Vec::new();
    let mut path = Vec::new();
    walk_leaves(tree, category, baseline, &mut path, &mut samples);
    samples
}

fn walk_leaves<'a>(
    node: &'a CategoryTree,
    category: Category,
    baseline: &Value,
    path: &mut Vec<PathSegment<'a>>,
    out: &mut Vec<MutatedSample>,
) {
    match node {
        CategoryTree::Leaf(bundle) => {
            if let Some(value) = bundle.get(category) {
                let mut model = baseline.clone();
                replace_at(&mut model, path, value.clone());
                out.push(MutatedSample {
                    field_path: dotted(path),
                    model,
                });
            }
        }
        CategoryTree::Object(fields) => {
            for (key, child) in fields {
                path.push(PathSegment::Key(key));
                walk_leaves(child, category, baseline, path, out);
                path.pop();
            }
        }
        CategoryTree::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                path.push(PathSegment::Index(index));
                walk_leaves(child, category, baseline, path, out);
                path.pop();
            }
        }
    }
}

fn replace_at(model: &mut Value, path: &[PathSegment<'_>], value: Value) {
    let Some((last, parents)) = path.split_last() else {
        *model = value;
        return;
    };

    let mut current = model;
    for segment in parents {
        let next = match (segment, current) {
            (PathSegment::Key(key), Value::Object(map)) => map.get_mut(*key),
            (PathSegment::Index(index), Value::Array(items)) => items.get_mut(*index),
            _ => None,
        };
        match next {
            Some(next) => current = next,
            None => return,
        }
    }

    match (last, current) {
        (PathSegment::Key(key), Value::Object(map)) => {
            map.insert((*key).to_string(), value);
        }
        (PathSegment::Index(index), Value::Array(items)) => {
            if let Some(slot) = items.get_mut(*index) {
                *slot = value;
            }
        }
        _ => {}
    }
}
