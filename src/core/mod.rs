//! Core extraction engine.
//!
//! A query runs in four steps per requested name:
//! - Lookup: find the exported declaration in the [`DeclarationIndex`]
//! - Resolve: render its type or flatten its members ([`TypeResolver`])
//! - Decorate: attach the declaration's own summary and remarks
//! - Emit: append the [`TypeDescription`] to the result list
//!
//! ## Module Structure
//!
//! - `builder`: Batch queries over one module (ApiObjectBuilder)
//! - `comments`: TSDoc parsing and rendering
//! - `error`: Library error types
//! - `index`: Declarations artifact loading and export index
//! - `model`: Serializable output records
//! - `parsers`: swc and build configuration parsing
//! - `resolve`: Type resolution

pub mod builder;
pub mod comments;
pub mod error;
pub mod index;
pub mod model;
pub mod parsers;
pub mod resolve;

pub use builder::ApiObjectBuilder;
pub use error::{ApiError, ConfigError};
pub use index::{Declaration, DeclarationIndex, DeclarationKind, ExportedSymbol};
pub use model::{FieldDescription, TypeDescription};
pub use resolve::{DeclarationResolver, ResolvedType, TypeResolver};
