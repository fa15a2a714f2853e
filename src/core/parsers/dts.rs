use std::sync::Arc;

use swc_common::{
    BytePos, FileName, Globals, SourceMap, Span,
    comments::{Comment, CommentKind, SingleThreadedComments},
};
use swc_ecma_ast::Module;
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};

use crate::core::error::ConfigError;

/// Source text of a parsed file, addressable by swc spans.
#[derive(Debug, Clone)]
pub struct SourceText {
    text: String,
    start: BytePos,
}

impl SourceText {
    pub fn new(text: String, start: BytePos) -> Self {
        Self { text, start }
    }

    /// Text covered by `span`, or `None` if the span lies outside this file.
    pub fn slice(&self, span: Span) -> Option<&str> {
        self.between(span.lo, span.hi)
    }

    pub fn between(&self, lo: BytePos, hi: BytePos) -> Option<&str> {
        let lo = lo.0.checked_sub(self.start.0)? as usize;
        let hi = hi.0.checked_sub(self.start.0)? as usize;
        self.text.get(lo..hi)
    }
}

/// A `/** ... */` block comment, stored independently of swc types.
#[derive(Debug, Clone)]
pub struct DocComment {
    pub lo: BytePos,
    pub hi: BytePos,
    /// Comment body without the `/*` and `*/` delimiters.
    pub text: String,
}

/// All documentation comments of a file, sorted by position.
#[derive(Debug, Clone, Default)]
pub struct DocComments {
    blocks: Vec<DocComment>,
}

impl DocComments {
    /// Extract doc comments from SingleThreadedComments.
    /// This must be called before SingleThreadedComments is dropped.
    pub fn from_swc(comments: &SingleThreadedComments) -> Self {
        let (leading, trailing) = comments.borrow_all();
        let mut blocks: Vec<DocComment> = leading
            .values()
            .chain(trailing.values())
            .flat_map(|cmts| cmts.iter())
            .filter(|cmt| is_doc_comment(cmt))
            .map(|cmt| DocComment {
                lo: cmt.span.lo,
                hi: cmt.span.hi,
                text: cmt.text.to_string(),
            })
            .collect();

        // A comment can be recorded both as trailing and as leading.
        blocks.sort_by_key(|block| block.lo);
        blocks.dedup_by_key(|block| block.lo);

        Self { blocks }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Find the doc comment attached to a node starting at `node_lo`.
    ///
    /// The closest preceding doc comment is attached when only whitespace and
    /// declaration modifiers (`export`, `declare`, `readonly`, ...) separate it
    /// from the node.
    pub fn leading(&self, node_lo: BytePos, source: &SourceText) -> Option<&str> {
        let idx = self.blocks.partition_point(|block| block.hi <= node_lo);
        let block = self.blocks.get(idx.checked_sub(1)?)?;
        let gap = source.between(block.hi, node_lo)?;

        gap.split_whitespace()
            .all(|word| DECLARATION_MODIFIERS.contains(&word))
            .then_some(block.text.as_str())
    }
}

/// Keywords that may sit between a doc comment and the node span it documents.
const DECLARATION_MODIFIERS: &[&str] = &[
    "export",
    "declare",
    "default",
    "const",
    "abstract",
    "readonly",
    "public",
    "protected",
    "private",
    "static",
    "override",
    "accessor",
    "async",
    "get",
    "set",
];

fn is_doc_comment(cmt: &Comment) -> bool {
    matches!(cmt.kind, CommentKind::Block)
        && cmt.text.starts_with('*')
        && !cmt.text.starts_with("**")
}

pub struct ParsedDts {
    pub module: Module,
    pub source: SourceText,
    pub comments: DocComments,
    /// Number of recoverable parse errors swc reported.
    pub recovered_errors: usize,
}

/// Parse a TypeScript declarations source string into an AST.
///
/// Files ending in `.d.ts` are parsed in declaration mode. Recoverable errors
/// (e.g. parameter initializers in ambient contexts) do not fail the parse.
pub fn parse_dts_source(
    code: String,
    file_path: &str,
    source_map: Arc<SourceMap>,
) -> Result<ParsedDts, ConfigError> {
    use swc_common::GLOBALS;

    GLOBALS.set(&Globals::new(), || {
        let text = code.clone();
        let source_file = source_map.new_source_file(FileName::Real(file_path.into()).into(), code);

        let syntax = Syntax::Typescript(TsSyntax {
            tsx: false,
            dts: file_path.ends_with(".d.ts"),
            ..Default::default()
        });

        let comments = SingleThreadedComments::default();
        let mut parser = Parser::new(syntax, StringInput::from(&*source_file), Some(&comments));

        let module = parser
            .parse_module()
            .map_err(|e| ConfigError::InvalidArtifact {
                path: file_path.to_string(),
                message: format!("{:?}", e),
            })?;

        let recovered = parser.take_errors();
        for err in &recovered {
            tracing::debug!(file = file_path, "recoverable parse error: {:?}", err);
        }

        // Extract comments immediately (before SingleThreadedComments drops)
        let doc_comments = DocComments::from_swc(&comments);

        Ok(ParsedDts {
            module,
            source: SourceText::new(text, source_file.start_pos),
            comments: doc_comments,
            recovered_errors: recovered.len(),
        })
    })
}
