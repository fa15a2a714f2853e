//! Type resolution - from a declaration to its rendered type or field list.
//!
//! Resolution is dispatched by declaration kind:
//!
//! - Functions render their signature; parameters become fields
//! - Interfaces, classes and enums flatten their members, own before inherited
//! - Type aliases are classified (see `alias`)
//!
//! Types are rendered from declared source text, so alias names are preserved.
//!
//! ## Module Structure
//!
//! - `alias`: Type alias classification
//! - `members`: Member collection and inheritance flattening
//! - `params`: Parameter fields
//! - `text`: Source text rendering helpers

mod alias;
mod members;
mod params;
pub mod text;

pub use params::ParamInfo;

use swc_common::{BytePos, Span, Spanned};
use swc_ecma_ast::{FnDecl, TsType};

use crate::core::comments::{CommentParser, DocTree};
use crate::core::error::ApiError;
use crate::core::index::{Declaration, DeclarationIndex, DeclarationNode};
use crate::core::model::FieldDescription;
use text::{normalize, strip_declaration_keywords};

/// Rendered type and/or field list of one declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedType {
    pub type_text: Option<String>,
    pub fields: Option<Vec<FieldDescription>>,
}

impl ResolvedType {
    pub fn text(type_text: String) -> Self {
        Self {
            type_text: Some(type_text),
            fields: None,
        }
    }

    pub fn fields(fields: Vec<FieldDescription>) -> Self {
        Self {
            type_text: None,
            fields: Some(fields),
        }
    }

    pub fn both(type_text: String, fields: Vec<FieldDescription>) -> Self {
        Self {
            type_text: Some(type_text),
            fields: Some(fields),
        }
    }
}

/// Produces the type rendering or field list of a declaration.
pub trait TypeResolver<'a> {
    fn resolve(&self, declaration: &Declaration<'a>) -> Result<ResolvedType, ApiError>;
}

/// [`TypeResolver`] over the swc AST of a [`DeclarationIndex`].
pub struct DeclarationResolver<'a> {
    index: &'a DeclarationIndex,
    parser: CommentParser<'a>,
}

impl<'a> DeclarationResolver<'a> {
    pub fn new(index: &'a DeclarationIndex) -> Self {
        Self {
            index,
            parser: CommentParser::new(index.tsdoc()),
        }
    }

    /// Parsed doc comment of the node starting at `lo`.
    pub fn doc(&self, lo: BytePos) -> DocTree {
        self.parser.parse(self.index.doc_comment(lo))
    }

    fn function(
        &self,
        declaration: &Declaration<'a>,
        function: &'a FnDecl,
    ) -> Result<ResolvedType, ApiError> {
        let owner = declaration.name;
        let hi = match &function.function.body {
            Some(body) => body.span.lo,
            None => declaration.item_span.hi,
        };
        let signature = self
            .index
            .source()
            .between(declaration.item_span.lo, hi)
            .map(|text| strip_declaration_keywords(&normalize(text)).to_string())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| ApiError::malformed(owner, "<signature>"))?;

        let doc = self.doc(declaration.item_span.lo);
        let fields = function
            .function
            .params
            .iter()
            .enumerate()
            .map(|(position, param)| {
                self.pat_param(&param.pat, position, owner)
                    .map(|param| param.into_field(&doc))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ResolvedType::both(signature, fields))
    }

    fn type_text(&self, ty: &TsType, owner: &str, member: &str) -> Result<String, ApiError> {
        self.span_text(ty.span(), owner, member)
    }

    fn span_text(&self, span: Span, owner: &str, member: &str) -> Result<String, ApiError> {
        self.index
            .source()
            .slice(span)
            .map(normalize)
            .filter(|text| !text.is_empty())
            .ok_or_else(|| ApiError::malformed(owner, member))
    }
}

impl<'a> TypeResolver<'a> for DeclarationResolver<'a> {
    fn resolve(&self, declaration: &Declaration<'a>) -> Result<ResolvedType, ApiError> {
        match declaration.node {
            DeclarationNode::Function(function) => self.function(declaration, function),
            DeclarationNode::TypeAlias(alias) => self.type_alias(declaration, alias),
            DeclarationNode::Interface(_) | DeclarationNode::Class(_) | DeclarationNode::Enum(_) => {
                let fields = self.declaration_members(declaration, &mut Vec::new())?;
                Ok(ResolvedType::fields(fields))
            }
        }
    }
}
