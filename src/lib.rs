//! apiref - API reference extraction for TypeScript packages
//!
//! apiref is a CLI tool and library that reads the compiled declarations of a
//! TypeScript package together with their TSDoc comments and produces a
//! serializable description of each exported interface, type alias, enum,
//! class and function, ready for rendering as API reference tables.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Extraction engine (index, resolver, builder)

pub mod cli;
pub mod config;
pub mod core;
