pub mod generator;
pub mod handlers;
pub mod mutation;
pub mod pattern;
pub mod pipeline;
pub mod random_source;
pub mod type_registry;

#[cfg(test)]
mod mutation_test;
