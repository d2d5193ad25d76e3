//! SQL type model
//!
//! This crate defines the types operator resolution works with:
//! - SQL types (numeric, character, datetime, boolean, binary, array) and nullability
//! - Type families used by operand signatures
//! - Implicit widening rules (least restrictive type)
//! - Parsing of type names

pub mod coercion;
pub mod family;
pub mod parse;
pub mod type_system;

pub use coercion::TypeCoercer;
pub use family::TypeFamily;
pub use parse::TypeParseError;
pub use type_system::*;
