//! Type alias classification.
//!
//! An alias resolves, in order, to the first of:
//!
//! 1. a function signature (function type or object type with a call signature)
//! 2. an opaque type, when every contributing symbol is external or platform
//! 3. a literal union or literal intersection
//! 4. a structural composite of the members it expands to

use swc_ecma_ast::{
    TsCallSignatureDecl, TsFnOrConstructorType, TsFnParam, TsFnType, TsType, TsTypeAliasDecl,
    TsTypeAnn, TsTypeElement, TsTypeParamDecl, TsUnionOrIntersectionType,
};

use super::text::{entity_ident, literal_text};
use super::{DeclarationResolver, ResolvedType};
use crate::core::error::ApiError;
use crate::core::index::{Declaration, DeclarationNode};
use crate::core::model::FieldDescription;

/// A call signature an alias exposes.
#[derive(Clone, Copy)]
pub(super) enum CallSignature<'a> {
    Function(&'a TsFnType),
    Member(&'a TsCallSignatureDecl),
}

impl<'a> CallSignature<'a> {
    fn params(self) -> &'a [TsFnParam] {
        match self {
            Self::Function(function) => &function.params,
            Self::Member(member) => &member.params,
        }
    }

    fn type_params(self) -> Option<&'a TsTypeParamDecl> {
        match self {
            Self::Function(function) => function.type_params.as_deref(),
            Self::Member(member) => member.type_params.as_deref(),
        }
    }

    fn return_type(self) -> Option<&'a TsTypeAnn> {
        match self {
            Self::Function(function) => Some(&function.type_ann),
            Self::Member(member) => member.type_ann.as_deref(),
        }
    }
}

/// Symbols a type is built from, by origin.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(super) struct Contributors {
    pub external: usize,
    pub user: usize,
}

impl Contributors {
    pub fn is_opaque(self) -> bool {
        self.external > 0 && self.user == 0
    }
}

/// Members an alias expands to.
#[derive(Debug, Default)]
pub(super) struct Composite {
    pub fields: Vec<FieldDescription>,
    /// Every constituent was expanded.
    pub complete: bool,
    /// At least one constituent was expanded.
    pub expanded: bool,
}

impl Composite {
    fn incomplete() -> Self {
        Self::default()
    }

    fn expanded(fields: Vec<FieldDescription>) -> Self {
        Self {
            fields,
            complete: true,
            expanded: true,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Operator {
    Union,
    Intersection,
}

impl<'a> DeclarationResolver<'a> {
    pub(super) fn type_alias(
        &self,
        declaration: &Declaration<'a>,
        alias: &'a TsTypeAliasDecl,
    ) -> Result<ResolvedType, ApiError> {
        let owner = declaration.name;
        let text = self.type_text(&alias.type_ann, owner, owner)?;
        let apparent = self.apparent(&alias.type_ann, &mut vec![owner]);

        if let Some(signature) = self.call_signature(apparent) {
            let doc = self.doc(declaration.item_span.lo);
            let params = self.fn_params(signature.params(), owner)?;
            let type_text = match apparent {
                TsType::TsTypeRef(_) => text,
                _ => self.function_type_text(
                    signature.type_params(),
                    &params,
                    signature.return_type(),
                    owner,
                    owner,
                )?,
            };
            let fields = params
                .into_iter()
                .map(|param| param.into_field(&doc))
                .collect();
            return Ok(ResolvedType::both(type_text, fields));
        }

        let mut contributors = Contributors::default();
        self.contributors(apparent, &mut contributors, &[owner]);
        if contributors.is_opaque() {
            return Ok(ResolvedType::text(text));
        }

        if let TsType::TsLitType(lit) = apparent
            && let Some(literal) = literal_text(lit, self.index.source())
        {
            return Ok(ResolvedType::text(literal));
        }
        for operator in [Operator::Union, Operator::Intersection] {
            if let Some(literals) = self.literals(apparent, operator, &[owner]) {
                let separator = match operator {
                    Operator::Union => " | ",
                    Operator::Intersection => " & ",
                };
                return Ok(ResolvedType::text(literals.join(separator)));
            }
        }

        let composite = self.composite(apparent, owner, &mut vec![owner])?;
        let fields = (!composite.fields.is_empty()).then_some(composite.fields);
        let type_text = (!composite.complete || !composite.expanded || fields.is_none())
            .then_some(text);
        Ok(ResolvedType { type_text, fields })
    }

    /// Follow parentheses and references to non-generic local aliases.
    pub(super) fn apparent(&self, ty: &'a TsType, path: &mut Vec<&'a str>) -> &'a TsType {
        match ty {
            TsType::TsParenthesizedType(paren) => self.apparent(&paren.type_ann, path),
            TsType::TsTypeRef(reference) if reference.type_params.is_none() => {
                let Some(name) = entity_ident(&reference.type_name) else {
                    return ty;
                };
                let Some(Declaration {
                    node: DeclarationNode::TypeAlias(target),
                    ..
                }) = self.index.local(name)
                else {
                    return ty;
                };
                if target.type_params.is_some() {
                    return ty;
                }
                if path.contains(&name) {
                    tracing::warn!("alias cycle through `{}` ({}), stopping", name, path.join(" -> "));
                    return ty;
                }
                path.push(name);
                self.apparent(&target.type_ann, path)
            }
            _ => ty,
        }
    }

    fn call_signature(&self, ty: &'a TsType) -> Option<CallSignature<'a>> {
        match ty {
            TsType::TsFnOrConstructorType(TsFnOrConstructorType::TsFnType(function)) => {
                Some(CallSignature::Function(function))
            }
            TsType::TsTypeLit(lit) => first_call_signature(&lit.members),
            TsType::TsTypeRef(reference) => {
                let name = entity_ident(&reference.type_name)?;
                match self.index.local(name)?.node {
                    DeclarationNode::Interface(interface) => {
                        first_call_signature(&interface.body.body)
                    }
                    _ => None,
                }
            }
            _ => None,
        }
    }

    /// Count the symbols `ty` is built from.
    ///
    /// Keyword, array and tuple types are platform symbols; references to names
    /// the module does not declare are external. Literals contribute nothing.
    pub(super) fn contributors(
        &self,
        ty: &'a TsType,
        acc: &mut Contributors,
        path: &[&'a str],
    ) {
        let mut path = path.to_vec();
        let path = &mut path;
        match self.apparent(ty, path) {
            TsType::TsParenthesizedType(paren) => self.contributors(&paren.type_ann, acc, path),
            TsType::TsUnionOrIntersectionType(TsUnionOrIntersectionType::TsUnionType(union)) => {
                for member in &union.types {
                    self.contributors(member, acc, path);
                }
            }
            TsType::TsUnionOrIntersectionType(TsUnionOrIntersectionType::TsIntersectionType(
                intersection,
            )) => {
                for member in &intersection.types {
                    self.contributors(member, acc, path);
                }
            }
            TsType::TsLitType(_) => {}
            TsType::TsKeywordType(_)
            | TsType::TsArrayType(_)
            | TsType::TsTupleType(_)
            | TsType::TsImportType(_) => acc.external += 1,
            TsType::TsTypeRef(reference) => match entity_ident(&reference.type_name) {
                Some(name) if self.index.is_local(name) => acc.user += 1,
                _ => acc.external += 1,
            },
            _ => acc.user += 1,
        }
    }

    /// Rendered literals of a (flattened) union or intersection made only of literals.
    fn literals(
        &self,
        ty: &'a TsType,
        operator: Operator,
        path: &[&'a str],
    ) -> Option<Vec<String>> {
        let mut path = path.to_vec();
        let members = match (self.apparent(ty, &mut path), operator) {
            (
                TsType::TsUnionOrIntersectionType(TsUnionOrIntersectionType::TsUnionType(union)),
                Operator::Union,
            ) => &union.types,
            (
                TsType::TsUnionOrIntersectionType(TsUnionOrIntersectionType::TsIntersectionType(
                    intersection,
                )),
                Operator::Intersection,
            ) => &intersection.types,
            _ => return None,
        };

        let mut literals: Vec<String> = Vec::new();
        for member in members {
            let mut member_path = path.clone();
            let rendered = match self.apparent(member, &mut member_path) {
                TsType::TsLitType(lit) => vec![literal_text(lit, self.index.source())?],
                nested => self.literals(nested, operator, &member_path)?,
            };
            for literal in rendered {
                if !literals.contains(&literal) {
                    literals.push(literal);
                }
            }
        }
        Some(literals)
    }

    /// Members of an object type, local declaration or intersection of those.
    pub(super) fn composite(
        &self,
        ty: &'a TsType,
        owner: &str,
        path: &mut Vec<&'a str>,
    ) -> Result<Composite, ApiError> {
        match ty {
            TsType::TsParenthesizedType(paren) => self.composite(&paren.type_ann, owner, path),
            TsType::TsTypeLit(lit) => Ok(Composite::expanded(
                self.type_elements(&lit.members, owner)?,
            )),
            TsType::TsTypeRef(reference) => {
                let Some(declaration) = entity_ident(&reference.type_name)
                    .and_then(|name| self.index.local(name))
                else {
                    tracing::debug!("`{}` refers to a type outside the module", owner);
                    return Ok(Composite::incomplete());
                };
                if matches!(declaration.node, DeclarationNode::Function(_)) {
                    return Ok(Composite::incomplete());
                }
                Ok(Composite::expanded(
                    self.declaration_members(&declaration, path)?,
                ))
            }
            TsType::TsUnionOrIntersectionType(TsUnionOrIntersectionType::TsIntersectionType(
                intersection,
            )) => {
                let mut composite = Composite {
                    complete: true,
                    ..Composite::default()
                };
                for member in &intersection.types {
                    let part = self.composite(member, owner, path)?;
                    composite.fields.extend(part.fields);
                    composite.complete &= part.complete;
                    composite.expanded |= part.expanded;
                }
                Ok(composite)
            }
            _ => Ok(Composite::incomplete()),
        }
    }
}

fn first_call_signature(elements: &[TsTypeElement]) -> Option<CallSignature<'_>> {
    elements.iter().find_map(|element| match element {
        TsTypeElement::TsCallSignatureDecl(signature) => Some(CallSignature::Member(signature)),
        _ => None,
    })
}
