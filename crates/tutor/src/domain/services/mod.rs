//! Domain Services
//!
//! Pure functions and small state holders with no I/O.

mod conversation;
mod prompt;
mod quiz_parser;

pub use conversation::*;
pub use prompt::*;
pub use quiz_parser::*;
