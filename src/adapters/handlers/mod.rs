pub mod alternatives;
pub mod any;
pub mod array;
pub mod binary;
pub mod boolean;
pub mod date;
pub mod number;
pub mod object;
pub mod string;

pub use alternatives::AlternativesTypeHandler;
pub use any::AnyTypeHandler;
pub use array::ArrayTypeHandler;
pub use binary::BinaryTypeHandler;
pub use boolean::BooleanTypeHandler;
pub use date::DateTypeHandler;
pub use number::NumberTypeHandler;
pub use object::ObjectTypeHandler;
pub use string::StringTypeHandler;

#[cfg(test)]
pub(crate) mod test_support;
