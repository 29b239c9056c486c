//! Service Ports
//!
//! Interfaces for external services: embeddings and text completion.

mod completion;
mod embedding;

pub use completion::*;
pub use embedding::*;
