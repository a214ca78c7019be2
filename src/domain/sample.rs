use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::category::Category;

/// A copy of the all-valid composite with exactly one leaf swapped out.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MutatedSample {
    /// Dotted path of the mutated leaf; empty when the root itself is a leaf.
    pub field_path: String,
    pub model: Value,
}

/// Everything `generate_all` produces for one schema, keyed by category.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct GenerationResult {
    pub valid: Value,
    pub invalid: Vec<MutatedSample>,
    pub nil: Vec<MutatedSample>,
    pub empty: Vec<MutatedSample>,
    pub long: Vec<MutatedSample>,
    pub short: Vec<MutatedSample>,
    pub bogus: Vec<MutatedSample>,
}

impl GenerationResult {
    pub fn new(valid: Value) -> Self {
        Self {
            valid,
            ..Self::default()
        }
    }

    /// Mutated samples for a violation category. `Valid` has none.
    pub fn samples(&self, category: Category) -> &[MutatedSample] {
        match category {
            Category::Valid => &[],
            Category::Invalid => &self.invalid,
            Category::Nil => &self.nil,
            Category::Empty => &self.empty,
            Category::Long => &self.long,
            Category::Short => &self.short,
            Category::Bogus => &self.bogus,
        }
    }

    pub(crate) fn samples_mut(&mut self, category: Category) -> Option<&mut Vec<MutatedSample>> {
        match category {
            Category::Valid => None,
            Category::Invalid => Some(&mut self.invalid),
            Category::Nil => Some(&mut self.nil),
            Category::Empty => Some(&mut self.empty),
            Category::Long => Some(&mut self.long),
            Category::Short => Some(&mut self.short),
            Category::Bogus => Some(&mut self.bogus),
        }
    }

    pub fn total_samples(&self) -> usize {
        Category::VIOLATIONS
            .iter()
            .map(|category| self.samples(*category).len())
            .sum()
    }
}
