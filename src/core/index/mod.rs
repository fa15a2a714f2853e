//! Declaration index - exported symbols of one declarations artifact.
//!
//! The index is built once per module root and is read-only afterwards:
//!
//! 1. Locate the artifact through the module's build configuration
//! 2. Parse it with swc (comments extracted alongside)
//! 3. Record every supported declaration by name (`locals`)
//! 4. Record the exported names (`export <decl>` and `export { a, b as c }`)
//!
//! ## Module Structure
//!
//! - `declaration`: Borrowed declaration views and kinds
//! - `locate`: Build configuration and artifact lookup

mod declaration;
mod locate;

pub use declaration::{Declaration, DeclarationKind, DeclarationNode};
pub use locate::locate_artifact;

use std::{collections::HashMap, fs, path::Path, sync::Arc};

use swc_common::{BytePos, SourceMap, Spanned};
use swc_ecma_ast::{Decl, ExportSpecifier, ModuleDecl, ModuleExportName, ModuleItem, Stmt};

use crate::config::Config;
use crate::core::comments::TsdocConfig;
use crate::core::error::{ApiError, ConfigError};
use crate::core::parsers::dts::{ParsedDts, SourceText, parse_dts_source};

/// A candidate declaration for a name: the module item holding it and its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub item: usize,
    pub kind: DeclarationKind,
}

/// An exported name and its candidate declarations, in source order.
#[derive(Debug, Clone)]
pub struct ExportedSymbol {
    pub name: String,
    pub candidates: Vec<Candidate>,
}

impl ExportedSymbol {
    pub fn kind(&self) -> Option<DeclarationKind> {
        self.candidates.first().map(|c| c.kind)
    }
}

/// Exported symbols of one declarations artifact, indexed by name.
pub struct DeclarationIndex {
    parsed: ParsedDts,
    tsdoc: TsdocConfig,
    /// Every supported declaration, exported or not.
    locals: HashMap<String, Vec<Candidate>>,
    exports: Vec<ExportedSymbol>,
    export_positions: HashMap<String, usize>,
}

impl DeclarationIndex {
    /// Build the index for the module at `module_root`.
    pub fn build(module_root: &Path, config: &Config) -> Result<Self, ApiError> {
        let artifact = locate_artifact(module_root, config)?;
        let code = fs::read_to_string(&artifact).map_err(|source| ConfigError::Read {
            path: artifact.clone(),
            source,
        })?;

        tracing::debug!("loading declarations from {}", artifact.display());
        Self::from_source(code, &artifact.to_string_lossy(), config)
    }

    /// Build the index from declaration source text.
    pub fn from_source(code: String, file_path: &str, config: &Config) -> Result<Self, ApiError> {
        let source_map = Arc::new(SourceMap::default());
        let parsed = parse_dts_source(code, file_path, source_map)?;
        let index = Self::from_parsed(parsed, TsdocConfig::from_config(config));

        tracing::debug!(
            locals = index.locals.len(),
            exports = index.exports.len(),
            doc_comments = index.parsed.comments.len(),
            "indexed {}",
            file_path
        );
        Ok(index)
    }

    fn from_parsed(parsed: ParsedDts, tsdoc: TsdocConfig) -> Self {
        let mut locals: HashMap<String, Vec<Candidate>> = HashMap::new();
        let mut exported: Vec<(String, Vec<Candidate>)> = Vec::new();

        for (item, module_item) in parsed.module.body.iter().enumerate() {
            let (decl, is_exported) = match module_item {
                ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export)) => (&export.decl, true),
                ModuleItem::Stmt(Stmt::Decl(decl)) => (decl, false),
                _ => continue,
            };
            let Some(declaration) = Declaration::from_decl(decl, module_item.span()) else {
                continue;
            };

            let candidate = Candidate {
                item,
                kind: declaration.kind(),
            };
            locals
                .entry(declaration.name.to_string())
                .or_default()
                .push(candidate);
            if is_exported {
                exported.push((declaration.name.to_string(), vec![candidate]));
            }
        }

        // Local export lists re-export declarations made in this file.
        for module_item in &parsed.module.body {
            let ModuleItem::ModuleDecl(ModuleDecl::ExportNamed(named)) = module_item else {
                continue;
            };
            if named.src.is_some() {
                continue;
            }
            for specifier in &named.specifiers {
                let ExportSpecifier::Named(spec) = specifier else {
                    continue;
                };
                let orig = export_name(&spec.orig);
                let exported_as = spec.exported.as_ref().map(export_name).unwrap_or(orig);
                if let Some(candidates) = locals.get(orig) {
                    exported.push((exported_as.to_string(), candidates.clone()));
                }
            }
        }

        let mut exports: Vec<ExportedSymbol> = Vec::new();
        let mut export_positions: HashMap<String, usize> = HashMap::new();
        for (name, candidates) in exported {
            match export_positions.get(&name) {
                Some(&pos) => exports[pos].candidates.extend(candidates),
                None => {
                    export_positions.insert(name.clone(), exports.len());
                    exports.push(ExportedSymbol { name, candidates });
                }
            }
        }

        Self {
            parsed,
            tsdoc,
            locals,
            exports,
            export_positions,
        }
    }

    /// First candidate declaration exported as `name`.
    pub fn lookup(&self, name: &str) -> Result<Declaration<'_>, ApiError> {
        self.export_positions
            .get(name)
            .and_then(|&pos| self.exports[pos].candidates.first())
            .and_then(|candidate| self.declaration(candidate))
            .ok_or_else(|| ApiError::not_found(name))
    }

    /// First declaration named `name` in the artifact, exported or not.
    pub fn local(&self, name: &str) -> Option<Declaration<'_>> {
        self.locals
            .get(name)?
            .first()
            .and_then(|candidate| self.declaration(candidate))
    }

    /// Whether `name` is declared in the artifact (user source).
    pub fn is_local(&self, name: &str) -> bool {
        self.locals.contains_key(name)
    }

    /// Exported symbols in declaration order.
    pub fn exports(&self) -> &[ExportedSymbol] {
        &self.exports
    }

    pub fn source(&self) -> &SourceText {
        &self.parsed.source
    }

    pub fn tsdoc(&self) -> &TsdocConfig {
        &self.tsdoc
    }

    /// Raw doc comment attached to the node starting at `lo`.
    pub fn doc_comment(&self, lo: BytePos) -> Option<&str> {
        self.parsed.comments.leading(lo, &self.parsed.source)
    }

    fn declaration(&self, candidate: &Candidate) -> Option<Declaration<'_>> {
        let module_item = self.parsed.module.body.get(candidate.item)?;
        let decl: &Decl = match module_item {
            ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export)) => &export.decl,
            ModuleItem::Stmt(Stmt::Decl(decl)) => decl,
            _ => return None,
        };
        Declaration::from_decl(decl, module_item.span())
    }
}

fn export_name(name: &ModuleExportName) -> &str {
    match name {
        ModuleExportName::Ident(ident) => ident.sym.as_str(),
        ModuleExportName::Str(s) => s.value.as_str().unwrap_or_default(),
        #[allow(unreachable_patterns)]
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn index(source: &str) -> DeclarationIndex {
        DeclarationIndex::from_source(source.to_string(), "index.d.ts", &Config::default())
            .unwrap()
    }

    #[test]
    fn test_supported_kinds_are_indexed() {
        let index = index(
            r#"
export interface A { a: string }
export type B = 'x';
export declare enum C { One }
export declare class D {}
export declare function e(): void;
export declare const f: number;
"#,
        );
        let kinds: Vec<_> = index
            .exports()
            .iter()
            .map(|s| (s.name.as_str(), s.kind()))
            .collect();
        assert_eq!(
            kinds,
            vec![
                ("A", Some(DeclarationKind::Interface)),
                ("B", Some(DeclarationKind::TypeAlias)),
                ("C", Some(DeclarationKind::Enum)),
                ("D", Some(DeclarationKind::Class)),
                ("e", Some(DeclarationKind::Function)),
            ]
        );
    }

    #[test]
    fn test_lookup_unsupported_kind_is_not_found() {
        let index = index("export declare const f: number;");
        let err = index.lookup("f").unwrap_err();
        assert!(matches!(err, ApiError::NotFound { name } if name == "f"));
    }

    #[test]
    fn test_local_export_list() {
        let index = index(
            r#"
interface Props { a: string }
declare function helper(): void;
export { Props, helper as run };
"#,
        );
        assert_eq!(index.lookup("Props").unwrap().kind(), DeclarationKind::Interface);
        assert_eq!(index.lookup("run").unwrap().name, "helper");
        assert!(index.lookup("helper").is_err());
    }

    #[test]
    fn test_reexports_from_other_modules_are_ignored() {
        let index = index("export { Theme } from './theme';");
        assert!(index.exports().is_empty());
        assert!(index.lookup("Theme").is_err());
    }

    #[test]
    fn test_first_declaration_wins() {
        let index = index(
            r#"
export declare function pick(a: string): string;
export declare function pick(a: number): number;
"#,
        );
        assert_eq!(index.exports().len(), 1);
        assert_eq!(index.exports()[0].candidates.len(), 2);

        let decl = index.lookup("pick").unwrap();
        let DeclarationNode::Function(function) = decl.node else {
            panic!("expected a function");
        };
        assert_eq!(function.function.params.len(), 1);
        let text = index.source().slice(decl.item_span).unwrap();
        assert!(text.contains("a: string"));
    }

    #[test]
    fn test_non_exported_declarations_are_locals() {
        let index = index(
            r#"
interface Base { id: string }
export interface Props extends Base {}
"#,
        );
        assert!(index.is_local("Base"));
        assert!(index.local("Base").is_some());
        assert!(index.lookup("Base").is_err());
        assert!(!index.is_local("HTMLElement"));
    }

    #[test]
    fn test_doc_comment_of_declaration() {
        let index = index(
            r#"
/** Button props. */
export interface Props {}
"#,
        );
        let decl = index.lookup("Props").unwrap();
        assert_eq!(index.doc_comment(decl.item_span.lo), Some("* Button props. "));
    }
}
