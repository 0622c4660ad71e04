//! Core data model: normalized part numbers, type tags, manufacturer
//! identities and typed characteristic values.
//!
//! Everything here is an immutable value type. Registries and scorers in
//! [`crate::classify`] and [`crate::scoring`] are built on top of these.

mod component_type;
mod identifier;
mod manufacturer;
mod value;

pub use component_type::*;
pub use identifier::*;
pub use manufacturer::*;
pub use value::*;
