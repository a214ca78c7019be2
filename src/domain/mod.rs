use chrono::{DateTime, Utc};

pub mod category;
pub mod error;
pub mod sample;
pub mod schema;

pub use category::{Category, CategoryBundle, CategoryTree};
pub use error::{GeneratorError, GeneratorResult};
pub use sample::{GenerationResult, MutatedSample};
pub use schema::{Children, Constraint, Schema, MAX_LENGTH_ARG};

/// Options for [`RandomSource::string`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StringOptions {
    /// Draw only from the symbol pool (`!@#$%^&*()[]`).
    pub symbols: bool,
    /// Exact length in characters; the source picks one when `None`.
    pub length: Option<usize>,
}

impl StringOptions {
    pub fn symbols(length: usize) -> Self {
        Self {
            symbols: true,
            length: Some(length),
        }
    }
}

/// Primitive random values the constraint pipelines build on.
///
/// Implementations hold whatever seed state they need; the generator itself
/// keeps none between calls.
pub trait RandomSource {
    fn sentence(&mut self) -> String;

    /// A sentence of exactly `words` words.
    fn sentence_of(&mut self, words: usize) -> String;

    /// A lowercase word of exactly `length` letters.
    fn word(&mut self, length: usize) -> String;

    fn string(&mut self, options: StringOptions) -> String;

    /// Inclusive range. Callers guarantee `min <= max`.
    fn integer(&mut self, min: i64, max: i64) -> i64;

    fn boolean(&mut self) -> bool;

    /// Inclusive range. Callers guarantee `min <= max`.
    fn date_between(&mut self, min: DateTime<Utc>, max: DateTime<Utc>) -> DateTime<Utc>;

    fn email(&mut self) -> String;

    fn ip(&mut self) -> String;

    fn domain(&mut self) -> String;

    fn guid(&mut self) -> String;

    /// A string matching `pattern`.
    fn string_matching(&mut self, pattern: &str) -> String;

    /// Uniform index in `0..len`. Callers guarantee `len > 0`.
    fn index(&mut self, len: usize) -> usize {
        self.integer(0, len as i64 - 1) as usize
    }
}
