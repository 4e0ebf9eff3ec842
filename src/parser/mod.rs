// Aesthetic mapping parser for the command line

pub mod lexer;
pub mod mapping;

// Public API re-exports
pub use mapping::{parse_mapping, Mapping};
