//! Error types for declaration loading and API extraction.
//!
//! Construction-time failures are [`ConfigError`]s wrapped in [`ApiError::Config`].
//! Query-time failures abort the whole query; there is no partial result.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building or querying an API model.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A requested export name has no interface, type alias, enum, class or function declaration.
    #[error("export `{name}` has no interface, type alias, enum, class or function declaration")]
    NotFound { name: String },

    /// A member's type could not be rendered from the declaration source.
    #[error("cannot render the type of `{owner}.{member}`")]
    MalformedDeclaration { owner: String, member: String },
}

/// The module root lacks a usable build configuration or declarations artifact.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("no {file} found in {}", root.display())]
    MissingBuildConfig { root: PathBuf, file: String },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {message}", path.display())]
    InvalidBuildConfig { path: PathBuf, message: String },

    #[error("{} sets neither compilerOptions.declarationDir nor compilerOptions.outDir", path.display())]
    NoOutputDir { path: PathBuf },

    #[error("output directory {} does not exist", path.display())]
    MissingOutputDir { path: PathBuf },

    #[error("no {file} found under {}", dir.display())]
    MissingArtifact { dir: PathBuf, file: String },

    #[error("expected one {file} under {}, found {}", dir.display(), found.len())]
    AmbiguousArtifact {
        dir: PathBuf,
        file: String,
        found: Vec<PathBuf>,
    },

    #[error("failed to parse declarations {path}: {message}")]
    InvalidArtifact { path: String, message: String },
}

impl ApiError {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    pub fn malformed(owner: impl Into<String>, member: impl Into<String>) -> Self {
        Self::MalformedDeclaration {
            owner: owner.into(),
            member: member.into(),
        }
    }
}
