//! Documentation comment handling.
//!
//! - `tsdoc`: parses a raw comment into a [`DocTree`] (CommentParser)
//! - `render`: renders doc-tree nodes to strings (DocRenderer)

pub mod render;
pub mod tsdoc;

pub use render::{render, render_trimmed};
pub use tsdoc::{CommentParser, DocNode, DocTree, Tag, TsdocConfig};
