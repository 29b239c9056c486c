//! Value Objects
//!
//! Immutable value types without identity.

mod metadata_value;
mod owner_scope;

pub use metadata_value::*;
pub use owner_scope::*;
