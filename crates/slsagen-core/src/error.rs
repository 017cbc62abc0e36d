use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProvenanceError>;

/// Errors raised while assembling a provenance document.
///
/// Stage wrappers (`BuildDefinition`, `Predicate`, `Generation`) keep the
/// original error reachable through [`std::error::Error::source`].
#[derive(Error, Debug)]
pub enum ProvenanceError {
    #[error("failed to calculate digest of {}: {source}", .path.display())]
    DigestCalculation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no package files found in {}", .directory.display())]
    PackageNotFound { directory: PathBuf },

    #[error("multiple .{extension} packages found in {}: {}", .directory.display(), .files.join(", "))]
    MultiplePackagesFound {
        directory: PathBuf,
        extension: String,
        files: Vec<String>,
    },

    #[error("source control metadata unavailable: {0}")]
    SourceControl(String),

    #[error("build definition generation failed")]
    BuildDefinition(#[source] Box<ProvenanceError>),

    #[error("predicate generation failed")]
    Predicate(#[source] Box<ProvenanceError>),

    #[error("statement validation failed: {0}")]
    StatementValidation(String),

    #[error("provenance generation failed")]
    Generation(#[source] Box<ProvenanceError>),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid build context: {0}")]
    Context(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ProvenanceError {
    /// True for the one recoverable condition: the package has not been built yet.
    pub fn is_package_not_found(&self) -> bool {
        matches!(self, ProvenanceError::PackageNotFound { .. })
    }

    pub(crate) fn build_definition(cause: ProvenanceError) -> Self {
        ProvenanceError::BuildDefinition(Box::new(cause))
    }

    pub(crate) fn predicate(cause: ProvenanceError) -> Self {
        ProvenanceError::Predicate(Box::new(cause))
    }

    pub(crate) fn generation(cause: ProvenanceError) -> Self {
        ProvenanceError::Generation(Box::new(cause))
    }
}
