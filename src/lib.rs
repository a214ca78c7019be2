//! # fixturegen - Test Fixture Generator
//!
//! fixturegen turns a declarative validation schema into test data: one fully
//! valid sample, plus a family of samples that each break exactly one field in
//! one way (wrong type, null, empty, too long, too short, garbage).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fixturegen::{Constraint, Generator, Schema};
//!
//! fn main() -> anyhow::Result<()> {
//!     let schema = Schema::object([
//!         ("email", Schema::string().rule(Constraint::new("email"))),
//!         ("age", Schema::number().rule(Constraint::new("positive"))),
//!     ]);
//!
//!     let mut generator = Generator::with_seed(42);
//!     let valid = generator.generate(&schema)?;
//!     let all = generator.generate_all(&schema)?;
//!     println!("{} -> {} broken samples", valid, all.total_samples());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! fixturegen follows Hexagonal Architecture:
//! - **Domain**: schema model, categories, results and the random source port
//! - **Adapters**: type handlers, constraint pipelines, mutation, the faker-backed random source
//! - **Config**: settings and schema file loading

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;

pub use adapters::generator::Generator;
pub use adapters::random_source::FakerRandomSource;
pub use domain::{
    Category, CategoryBundle, CategoryTree, Constraint, GenerationResult, GeneratorError,
    MutatedSample, RandomSource, Schema,
};
