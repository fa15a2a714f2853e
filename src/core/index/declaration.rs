//! Borrowed views of supported declarations.

use std::fmt;

use serde::Serialize;
use swc_common::Span;
use swc_ecma_ast::{ClassDecl, Decl, FnDecl, TsEnumDecl, TsInterfaceDecl, TsTypeAliasDecl};

/// Declaration kinds the index keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeclarationKind {
    Interface,
    TypeAlias,
    Enum,
    Class,
    Function,
}

impl DeclarationKind {
    pub fn of(decl: &Decl) -> Option<Self> {
        match decl {
            Decl::TsInterface(_) => Some(Self::Interface),
            Decl::TsTypeAlias(_) => Some(Self::TypeAlias),
            Decl::TsEnum(_) => Some(Self::Enum),
            Decl::Class(_) => Some(Self::Class),
            Decl::Fn(_) => Some(Self::Function),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Interface => "interface",
            Self::TypeAlias => "type-alias",
            Self::Enum => "enum",
            Self::Class => "class",
            Self::Function => "function",
        }
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The AST node behind a [`Declaration`].
#[derive(Debug, Clone, Copy)]
pub enum DeclarationNode<'a> {
    Interface(&'a TsInterfaceDecl),
    TypeAlias(&'a TsTypeAliasDecl),
    Enum(&'a TsEnumDecl),
    Class(&'a ClassDecl),
    Function(&'a FnDecl),
}

/// One supported declaration inside the indexed module.
#[derive(Debug, Clone, Copy)]
pub struct Declaration<'a> {
    pub name: &'a str,
    pub node: DeclarationNode<'a>,
    /// Span of the whole module item, `export`/`declare` keywords included.
    /// Its start anchors the declaration's doc comment.
    pub item_span: Span,
}

impl<'a> Declaration<'a> {
    pub fn from_decl(decl: &'a Decl, item_span: Span) -> Option<Self> {
        let (name, node) = match decl {
            Decl::TsInterface(d) => (d.id.sym.as_str(), DeclarationNode::Interface(&**d)),
            Decl::TsTypeAlias(d) => (d.id.sym.as_str(), DeclarationNode::TypeAlias(&**d)),
            Decl::TsEnum(d) => (d.id.sym.as_str(), DeclarationNode::Enum(&**d)),
            Decl::Class(d) => (d.ident.sym.as_str(), DeclarationNode::Class(d)),
            Decl::Fn(d) => (d.ident.sym.as_str(), DeclarationNode::Function(d)),
            _ => return None,
        };
        Some(Self {
            name,
            node,
            item_span,
        })
    }

    pub fn kind(&self) -> DeclarationKind {
        match self.node {
            DeclarationNode::Interface(_) => DeclarationKind::Interface,
            DeclarationNode::TypeAlias(_) => DeclarationKind::TypeAlias,
            DeclarationNode::Enum(_) => DeclarationKind::Enum,
            DeclarationNode::Class(_) => DeclarationKind::Class,
            DeclarationNode::Function(_) => DeclarationKind::Function,
        }
    }
}
