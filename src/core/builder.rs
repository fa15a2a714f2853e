//! Batch extraction of API descriptions.

use std::path::Path;

use crate::config::Config;
use crate::core::comments::{CommentParser, render_trimmed};
use crate::core::error::ApiError;
use crate::core::index::{Declaration, DeclarationIndex};
use crate::core::model::{FieldDescription, TypeDescription};
use crate::core::resolve::{DeclarationResolver, ResolvedType, TypeResolver};

/// Builds [`TypeDescription`]s for the exports of one module.
///
/// The builder owns its index and is read-only after construction.
pub struct ApiObjectBuilder {
    index: DeclarationIndex,
}

impl ApiObjectBuilder {
    /// Index the module at `module_root`.
    pub fn build(module_root: &Path, config: &Config) -> Result<Self, ApiError> {
        Ok(Self::from_index(DeclarationIndex::build(module_root, config)?))
    }

    pub fn from_index(index: DeclarationIndex) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &DeclarationIndex {
        &self.index
    }

    /// Exported names in declaration order.
    pub fn exported_names(&self) -> Vec<&str> {
        self.index
            .exports()
            .iter()
            .map(|symbol| symbol.name.as_str())
            .collect()
    }

    /// Describe every requested name, in input order.
    ///
    /// The first failure aborts the batch; no partial list is returned.
    pub fn query<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<TypeDescription>, ApiError> {
        let resolver = DeclarationResolver::new(&self.index);
        names
            .iter()
            .map(|name| self.describe_with(&resolver, name.as_ref()))
            .collect()
    }

    /// Describe a single exported name.
    pub fn describe(&self, name: &str) -> Result<TypeDescription, ApiError> {
        self.describe_with(&DeclarationResolver::new(&self.index), name)
    }

    fn describe_with<'a, R: TypeResolver<'a>>(
        &'a self,
        resolver: &R,
        name: &str,
    ) -> Result<TypeDescription, ApiError> {
        let declaration = self.index.lookup(name)?;
        let ResolvedType { type_text, fields } = resolver.resolve(&declaration)?;
        tracing::debug!(
            kind = %declaration.kind(),
            fields = fields.as_ref().map_or(0, Vec::len),
            "resolved `{}`",
            name
        );
        Ok(self.decorate(name, &declaration, type_text, fields))
    }

    /// Attach the declaration's own summary and remarks.
    fn decorate(
        &self,
        name: &str,
        declaration: &Declaration<'_>,
        type_text: Option<String>,
        fields: Option<Vec<FieldDescription>>,
    ) -> TypeDescription {
        let parser = CommentParser::new(self.index.tsdoc());
        let doc = parser.parse(self.index.doc_comment(declaration.item_span.lo));
        TypeDescription {
            name: name.to_string(),
            summary: doc.summary.as_ref().and_then(render_trimmed),
            remarks: doc.remarks.as_ref().and_then(render_trimmed),
            type_text,
            fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn builder(source: &str) -> ApiObjectBuilder {
        let index =
            DeclarationIndex::from_source(source.to_string(), "index.d.ts", &Config::default())
                .unwrap();
        ApiObjectBuilder::from_index(index)
    }

    const SOURCE: &str = r#"
/**
 * Props of the button.
 *
 * @remarks
 * Forwarded to the root element.
 */
export interface ButtonProps {
    /** Visual size. */
    size: Size;
}

/** Available sizes. */
export type Size = 'sm' | 'md';

export declare function noop(): void;
"#;

    #[test]
    fn test_query_in_input_order() {
        let builder = builder(SOURCE);
        let result = builder.query(&["Size", "ButtonProps"]).unwrap();
        assert_eq!(
            result,
            vec![
                TypeDescription {
                    name: "Size".to_string(),
                    summary: Some("Available sizes.".to_string()),
                    remarks: None,
                    type_text: Some(r#""sm" | "md""#.to_string()),
                    fields: None,
                },
                TypeDescription {
                    name: "ButtonProps".to_string(),
                    summary: Some("Props of the button.".to_string()),
                    remarks: Some("Forwarded to the root element.".to_string()),
                    type_text: None,
                    fields: Some(vec![FieldDescription {
                        summary: Some("Visual size.".to_string()),
                        ..FieldDescription::new("size", "Size")
                    }]),
                },
            ]
        );
    }

    #[test]
    fn test_query_is_all_or_nothing() {
        let builder = builder(SOURCE);
        let err = builder
            .query(&["ButtonProps", "DoesNotExist", "Size"])
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound { name } if name == "DoesNotExist"));
    }

    #[test]
    fn test_empty_query() {
        let builder = builder(SOURCE);
        let names: [&str; 0] = [];
        assert!(builder.query(&names).unwrap().is_empty());
    }

    #[test]
    fn test_function_has_type_and_fields() {
        let builder = builder(SOURCE);
        let noop = builder.describe("noop").unwrap();
        assert_eq!(noop.type_text.as_deref(), Some("function noop(): void"));
        assert_eq!(noop.fields, Some(vec![]));
    }

    #[test]
    fn test_exported_names() {
        let builder = builder(SOURCE);
        assert_eq!(builder.exported_names(), vec!["ButtonProps", "Size", "noop"]);
    }

    #[test]
    fn test_build_from_module_root() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("tsconfig.json"),
            r#"{
    // emitted declarations
    "compilerOptions": {
        "declaration": true,
        "outDir": "./dist",
    },
}"#,
        )
        .unwrap();
        fs::create_dir_all(dir.path().join("dist")).unwrap();
        fs::write(dir.path().join("dist/index.d.ts"), SOURCE).unwrap();

        let builder = ApiObjectBuilder::build(dir.path(), &Config::default()).unwrap();
        let result = builder.query(&["Size"]).unwrap();
        insta::assert_json_snapshot!(result, @r#"
        [
          {
            "name": "Size",
            "summary": "Available sizes.",
            "type": "\"sm\" | \"md\""
          }
        ]
        "#);
    }
}
