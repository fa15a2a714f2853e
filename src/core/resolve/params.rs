//! Function parameters: from call signatures to field descriptions.

use swc_common::Spanned;
use swc_ecma_ast::{Pat, TsFnParam, TsTypeAnn, TsTypeParamDecl};

use super::DeclarationResolver;
use super::text::inferred_type;
use crate::core::comments::{DocTree, render_trimmed};
use crate::core::error::ApiError;
use crate::core::model::FieldDescription;

/// One declared parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamInfo {
    pub name: String,
    pub type_text: String,
    /// Initializer source text.
    pub preset: Option<String>,
    pub optional: bool,
    pub rest: bool,
}

impl ParamInfo {
    fn new(name: String, type_text: String) -> Self {
        Self {
            name,
            type_text,
            preset: None,
            optional: false,
            rest: false,
        }
    }

    /// Parameter as written in a function type: `name?: type`, `...name: type`.
    pub fn signature(&self) -> String {
        format!(
            "{}{}{}: {}",
            if self.rest { "..." } else { "" },
            self.name,
            if self.optional { "?" } else { "" },
            self.type_text
        )
    }

    /// Field description with the matching `@param` block as summary.
    pub fn into_field(self, doc: &DocTree) -> FieldDescription {
        let summary = doc.param(&self.name).and_then(render_trimmed);
        FieldDescription {
            summary,
            preset: self.preset,
            ..FieldDescription::new(self.name, self.type_text)
        }
    }
}

impl<'a> DeclarationResolver<'a> {
    /// Parameter of a function or method implementation signature.
    pub(super) fn pat_param(
        &self,
        pat: &'a Pat,
        position: usize,
        owner: &str,
    ) -> Result<ParamInfo, ApiError> {
        match pat {
            Pat::Ident(binding) => {
                let name = binding.id.sym.to_string();
                let type_text = self.annotation_text(binding.type_ann.as_deref(), owner, &name)?;
                Ok(ParamInfo {
                    optional: binding.id.optional,
                    ..ParamInfo::new(name, type_text)
                })
            }
            Pat::Assign(assign) => {
                let mut param = self.pat_param(&assign.left, position, owner)?;
                if !has_annotation(&assign.left) {
                    param.type_text = inferred_type(&assign.right).to_string();
                }
                param.preset = Some(self.span_text(assign.right.span(), owner, &param.name)?);
                param.optional = true;
                Ok(param)
            }
            Pat::Rest(rest) => {
                let (name, binding_ann) = match &*rest.arg {
                    Pat::Ident(binding) => (binding.id.sym.to_string(), binding.type_ann.as_deref()),
                    _ => (synthetic_name(position), None),
                };
                let type_ann = rest.type_ann.as_deref().or(binding_ann);
                let type_text = self.annotation_text(type_ann, owner, &name)?;
                Ok(ParamInfo {
                    rest: true,
                    ..ParamInfo::new(name, type_text)
                })
            }
            Pat::Object(object) => {
                let name = synthetic_name(position);
                let type_text = self.annotation_text(object.type_ann.as_deref(), owner, &name)?;
                Ok(ParamInfo {
                    optional: object.optional,
                    ..ParamInfo::new(name, type_text)
                })
            }
            Pat::Array(array) => {
                let name = synthetic_name(position);
                let type_text = self.annotation_text(array.type_ann.as_deref(), owner, &name)?;
                Ok(ParamInfo {
                    optional: array.optional,
                    ..ParamInfo::new(name, type_text)
                })
            }
            _ => Ok(ParamInfo::new(synthetic_name(position), "any".to_string())),
        }
    }

    /// Parameter of a function type or signature member.
    pub(super) fn fn_param(
        &self,
        param: &'a TsFnParam,
        position: usize,
        owner: &str,
    ) -> Result<ParamInfo, ApiError> {
        match param {
            TsFnParam::Ident(binding) => {
                let name = binding.id.sym.to_string();
                let type_text = self.annotation_text(binding.type_ann.as_deref(), owner, &name)?;
                Ok(ParamInfo {
                    optional: binding.id.optional,
                    ..ParamInfo::new(name, type_text)
                })
            }
            TsFnParam::Rest(rest) => {
                let mut param = self.pat_param(&rest.arg, position, owner)?;
                if let Some(type_ann) = rest.type_ann.as_deref() {
                    param.type_text = self.annotation_text(Some(type_ann), owner, &param.name)?;
                }
                param.rest = true;
                Ok(param)
            }
            TsFnParam::Object(object) => {
                let name = synthetic_name(position);
                let type_text = self.annotation_text(object.type_ann.as_deref(), owner, &name)?;
                Ok(ParamInfo {
                    optional: object.optional,
                    ..ParamInfo::new(name, type_text)
                })
            }
            TsFnParam::Array(array) => {
                let name = synthetic_name(position);
                let type_text = self.annotation_text(array.type_ann.as_deref(), owner, &name)?;
                Ok(ParamInfo {
                    optional: array.optional,
                    ..ParamInfo::new(name, type_text)
                })
            }
        }
    }

    pub(super) fn fn_params(
        &self,
        params: &'a [TsFnParam],
        owner: &str,
    ) -> Result<Vec<ParamInfo>, ApiError> {
        params
            .iter()
            .enumerate()
            .map(|(position, param)| self.fn_param(param, position, owner))
            .collect()
    }

    /// Declared type text, or `any` without an annotation.
    pub(super) fn annotation_text(
        &self,
        type_ann: Option<&'a TsTypeAnn>,
        owner: &str,
        member: &str,
    ) -> Result<String, ApiError> {
        match type_ann {
            Some(ann) => self.type_text(&ann.type_ann, owner, member),
            None => Ok("any".to_string()),
        }
    }

    /// Function type text `(a: string, b?: number) => void`.
    pub(super) fn function_type_text(
        &self,
        type_params: Option<&'a TsTypeParamDecl>,
        params: &[ParamInfo],
        return_type: Option<&'a TsTypeAnn>,
        owner: &str,
        member: &str,
    ) -> Result<String, ApiError> {
        let generics = match type_params {
            Some(decl) => self.span_text(decl.span, owner, member)?,
            None => String::new(),
        };
        let params = params
            .iter()
            .map(ParamInfo::signature)
            .collect::<Vec<_>>()
            .join(", ");
        let ret = self.annotation_text(return_type, owner, member)?;
        Ok(format!("{}({}) => {}", generics, params, ret))
    }
}

fn has_annotation(pat: &Pat) -> bool {
    match pat {
        Pat::Ident(binding) => binding.type_ann.is_some(),
        Pat::Object(object) => object.type_ann.is_some(),
        Pat::Array(array) => array.type_ann.is_some(),
        Pat::Rest(rest) => rest.type_ann.is_some(),
        _ => false,
    }
}

/// Destructured parameters have no name of their own.
fn synthetic_name(position: usize) -> String {
    format!("__{}", position)
}
