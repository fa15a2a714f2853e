//! Member collection for interfaces, classes and enums, inheritance included.

use std::collections::HashSet;

use swc_common::{BytePos, Spanned};
use swc_ecma_ast::{
    Accessibility, ClassDecl, ClassMember, Expr, Key, Lit, MethodKind, TsEnumDecl,
    TsInterfaceDecl, TsTypeElement, UnaryOp,
};

use super::DeclarationResolver;
use super::text::{
    base_ident, enum_member_name, format_number, inferred_type, key_name, prop_name,
};
use crate::core::comments::{Tag, render_trimmed};
use crate::core::error::ApiError;
use crate::core::index::{Declaration, DeclarationNode};
use crate::core::model::FieldDescription;

/// A member before its doc comment is attached.
struct Member {
    lo: BytePos,
    name: String,
    type_text: String,
}

impl<'a> DeclarationResolver<'a> {
    /// Own members followed by inherited ones, depth first.
    ///
    /// `path` holds the declarations being flattened; a declaration already on
    /// it is skipped.
    pub(super) fn declaration_members(
        &self,
        declaration: &Declaration<'a>,
        path: &mut Vec<&'a str>,
    ) -> Result<Vec<FieldDescription>, ApiError> {
        if path.contains(&declaration.name) {
            tracing::warn!(
                "cycle through `{}` ({}), skipping",
                declaration.name,
                path.join(" -> ")
            );
            return Ok(Vec::new());
        }

        path.push(declaration.name);
        let members = match declaration.node {
            DeclarationNode::Interface(interface) => self.interface_members(interface, path),
            DeclarationNode::Class(class) => self.class_members(class, path),
            DeclarationNode::Enum(decl) => self.enum_members(decl),
            DeclarationNode::TypeAlias(alias) => self
                .composite(&alias.type_ann, declaration.name, path)
                .map(|composite| composite.fields),
            DeclarationNode::Function(_) => Ok(Vec::new()),
        };
        path.pop();
        members
    }

    /// Members of the declaration named `name`, if the module declares it.
    pub(super) fn named_members(
        &self,
        name: &str,
        owner: &str,
        path: &mut Vec<&'a str>,
    ) -> Result<Vec<FieldDescription>, ApiError> {
        match self.index.local(name) {
            Some(base) => self.declaration_members(&base, path),
            None => {
                tracing::debug!("base `{}` of `{}` is not declared in the module", name, owner);
                Ok(Vec::new())
            }
        }
    }

    fn interface_members(
        &self,
        interface: &'a TsInterfaceDecl,
        path: &mut Vec<&'a str>,
    ) -> Result<Vec<FieldDescription>, ApiError> {
        let owner = interface.id.sym.as_str();
        let mut fields = self.type_elements(&interface.body.body, owner)?;

        for base in &interface.extends {
            match base_ident(&base.expr) {
                Some(name) => fields.extend(self.named_members(name, owner, path)?),
                None => tracing::debug!("qualified base of `{}` skipped", owner),
            }
        }
        Ok(fields)
    }

    /// Fields of object type members. Call, construct and index signatures are skipped.
    pub(super) fn type_elements(
        &self,
        elements: &'a [TsTypeElement],
        owner: &str,
    ) -> Result<Vec<FieldDescription>, ApiError> {
        let source = self.index.source();
        let getters: HashSet<String> = elements
            .iter()
            .filter_map(|element| match element {
                TsTypeElement::TsGetterSignature(getter) => {
                    key_name(&getter.key, getter.computed, source)
                }
                _ => None,
            })
            .collect();

        let mut members = Vec::new();
        for element in elements {
            let member = match element {
                TsTypeElement::TsPropertySignature(prop) => {
                    let name = self.member_name(key_name(&prop.key, prop.computed, source), owner)?;
                    let type_text = self.annotation_text(prop.type_ann.as_deref(), owner, &name)?;
                    Member {
                        lo: prop.span.lo,
                        name,
                        type_text,
                    }
                }
                TsTypeElement::TsMethodSignature(method) => {
                    let name =
                        self.member_name(key_name(&method.key, method.computed, source), owner)?;
                    let params = self.fn_params(&method.params, owner)?;
                    let type_text = self.function_type_text(
                        method.type_params.as_deref(),
                        &params,
                        method.type_ann.as_deref(),
                        owner,
                        &name,
                    )?;
                    Member {
                        lo: method.span.lo,
                        name,
                        type_text,
                    }
                }
                TsTypeElement::TsGetterSignature(getter) => {
                    let name =
                        self.member_name(key_name(&getter.key, getter.computed, source), owner)?;
                    let type_text =
                        self.annotation_text(getter.type_ann.as_deref(), owner, &name)?;
                    Member {
                        lo: getter.span.lo,
                        name,
                        type_text,
                    }
                }
                TsTypeElement::TsSetterSignature(setter) => {
                    let name =
                        self.member_name(key_name(&setter.key, setter.computed, source), owner)?;
                    if getters.contains(&name) {
                        continue;
                    }
                    let type_text = self.fn_param(&setter.param, 0, owner)?.type_text;
                    Member {
                        lo: setter.span.lo,
                        name,
                        type_text,
                    }
                }
                TsTypeElement::TsCallSignatureDecl(_)
                | TsTypeElement::TsConstructSignatureDecl(_)
                | TsTypeElement::TsIndexSignature(_) => continue,
            };
            members.push(member);
        }
        Ok(self.own_fields(members))
    }

    fn class_members(
        &self,
        class: &'a ClassDecl,
        path: &mut Vec<&'a str>,
    ) -> Result<Vec<FieldDescription>, ApiError> {
        let owner = class.ident.sym.as_str();
        let source = self.index.source();
        let getters: HashSet<String> = class
            .class
            .body
            .iter()
            .filter_map(|member| match member {
                ClassMember::Method(method) if method.kind == MethodKind::Getter => {
                    prop_name(&method.key, source)
                }
                _ => None,
            })
            .collect();

        let mut members = Vec::new();
        for member in &class.class.body {
            let member = match member {
                ClassMember::Method(method) => {
                    if method.is_static || !is_public(method.accessibility) {
                        continue;
                    }
                    let name = self.member_name(prop_name(&method.key, source), owner)?;
                    let function = &method.function;
                    let type_text = match method.kind {
                        MethodKind::Getter => {
                            self.annotation_text(function.return_type.as_deref(), owner, &name)?
                        }
                        MethodKind::Setter => {
                            if getters.contains(&name) {
                                continue;
                            }
                            match function.params.first() {
                                Some(param) => self.pat_param(&param.pat, 0, owner)?.type_text,
                                None => "any".to_string(),
                            }
                        }
                        MethodKind::Method => {
                            let params = function
                                .params
                                .iter()
                                .enumerate()
                                .map(|(position, param)| {
                                    self.pat_param(&param.pat, position, owner)
                                })
                                .collect::<Result<Vec<_>, _>>()?;
                            self.function_type_text(
                                function.type_params.as_deref(),
                                &params,
                                function.return_type.as_deref(),
                                owner,
                                &name,
                            )?
                        }
                    };
                    Member {
                        lo: method.span.lo,
                        name,
                        type_text,
                    }
                }
                ClassMember::ClassProp(prop) => {
                    if prop.is_static || !is_public(prop.accessibility) {
                        continue;
                    }
                    let name = self.member_name(prop_name(&prop.key, source), owner)?;
                    let type_text = match (&prop.type_ann, &prop.value) {
                        (None, Some(value)) => inferred_type(value).to_string(),
                        (type_ann, _) => self.annotation_text(type_ann.as_deref(), owner, &name)?,
                    };
                    Member {
                        lo: prop.span.lo,
                        name,
                        type_text,
                    }
                }
                ClassMember::AutoAccessor(accessor) => {
                    if accessor.is_static || !is_public(accessor.accessibility) {
                        continue;
                    }
                    let Key::Public(key) = &accessor.key else {
                        continue;
                    };
                    let name = self.member_name(prop_name(key, source), owner)?;
                    let type_text =
                        self.annotation_text(accessor.type_ann.as_deref(), owner, &name)?;
                    Member {
                        lo: accessor.span.lo,
                        name,
                        type_text,
                    }
                }
                _ => continue,
            };
            members.push(member);
        }

        let mut fields = self.own_fields(members);
        if let Some(super_class) = &class.class.super_class {
            match base_ident(super_class) {
                Some(name) => fields.extend(self.named_members(name, owner, path)?),
                None => tracing::debug!("base class expression of `{}` skipped", owner),
            }
        }
        Ok(fields)
    }

    fn enum_members(&self, decl: &'a TsEnumDecl) -> Result<Vec<FieldDescription>, ApiError> {
        let owner = decl.id.sym.as_str();
        let mut next: Option<f64> = Some(0.0);
        let mut members = Vec::new();

        for member in &decl.members {
            let name = enum_member_name(&member.id);
            let type_text = match member.init.as_deref() {
                Some(init) => {
                    next = numeric_value(init).map(|value| value + 1.0);
                    match init {
                        Expr::Lit(Lit::Str(s)) => s
                            .value
                            .as_str()
                            .and_then(|value| serde_json::to_string(value).ok())
                            .ok_or_else(|| ApiError::malformed(owner, &name))?,
                        _ => self.span_text(init.span(), owner, &name)?,
                    }
                }
                None => match next {
                    Some(value) => {
                        next = Some(value + 1.0);
                        format_number(value)
                    }
                    None => "number".to_string(),
                },
            };
            members.push(Member {
                lo: member.span.lo,
                name,
                type_text,
            });
        }
        Ok(self.own_fields(members))
    }

    /// Attach doc comments; the first member of a name wins.
    fn own_fields(&self, members: Vec<Member>) -> Vec<FieldDescription> {
        let mut seen = HashSet::new();
        members
            .into_iter()
            .filter(|member| seen.insert(member.name.clone()))
            .map(|member| self.member_field(member))
            .collect()
    }

    fn member_field(&self, member: Member) -> FieldDescription {
        let doc = self.doc(member.lo);
        FieldDescription {
            summary: doc.summary.as_ref().and_then(render_trimmed),
            remarks: doc.remarks.as_ref().and_then(render_trimmed),
            preset: doc.default_value().and_then(render_trimmed),
            reactive: doc.has_modifier(Tag::Reactive),
            ..FieldDescription::new(member.name, member.type_text)
        }
    }

    fn member_name(&self, name: Option<String>, owner: &str) -> Result<String, ApiError> {
        name.ok_or_else(|| ApiError::malformed(owner, "<key>"))
    }
}

fn is_public(accessibility: Option<Accessibility>) -> bool {
    !matches!(
        accessibility,
        Some(Accessibility::Private | Accessibility::Protected)
    )
}

fn numeric_value(init: &Expr) -> Option<f64> {
    match init {
        Expr::Lit(Lit::Num(n)) => Some(n.value),
        Expr::Unary(unary) if unary.op == UnaryOp::Minus => numeric_value(&unary.arg).map(|v| -v),
        Expr::Paren(paren) => numeric_value(&paren.expr),
        _ => None,
    }
}
