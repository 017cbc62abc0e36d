//! Generator settings and the optional `slsagen.toml` file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::artifact::DigestAlgorithm;
use crate::error::{ProvenanceError, Result};
use crate::{DEFAULT_BUILD_TYPE, DEFAULT_OUTPUT_DIR, DEFAULT_OUTPUT_FILE_NAME};

/// Settings that shape the generated document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// URI of the trusted build platform. Required, no default.
    pub builder_id: String,
    pub build_type: String,
    /// Algorithms computed over the subject; never empty.
    pub digest_algorithms: Vec<DigestAlgorithm>,
}

impl GeneratorConfig {
    pub fn new(builder_id: impl Into<String>) -> Result<Self> {
        let builder_id = builder_id.into();
        if builder_id.trim().is_empty() {
            return Err(ProvenanceError::Config("builder id is required".into()));
        }
        Ok(Self {
            builder_id,
            build_type: DEFAULT_BUILD_TYPE.to_string(),
            digest_algorithms: vec![DigestAlgorithm::Sha256],
        })
    }

    pub fn with_build_type(mut self, build_type: impl Into<String>) -> Result<Self> {
        let build_type = build_type.into();
        if build_type.trim().is_empty() {
            return Err(ProvenanceError::Config("build type must not be empty".into()));
        }
        self.build_type = build_type;
        Ok(self)
    }

    pub fn with_digest_algorithms(mut self, mut algorithms: Vec<DigestAlgorithm>) -> Result<Self> {
        algorithms.sort();
        algorithms.dedup();
        if algorithms.is_empty() {
            return Err(ProvenanceError::Config(
                "at least one digest algorithm is required".into(),
            ));
        }
        self.digest_algorithms = algorithms;
        Ok(self)
    }
}

/// Top-level configuration from `slsagen.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub provenance: ProvenanceSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProvenanceSection {
    pub builder_id: Option<String>,
    pub build_type: Option<String>,
    pub digest_algorithms: Option<Vec<DigestAlgorithm>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSection {
    pub directory: Option<PathBuf>,
    pub file_name: Option<String>,
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub builder_id: Option<String>,
    pub build_type: Option<String>,
    pub digest_algorithms: Option<Vec<DigestAlgorithm>>,
    pub output_dir: Option<PathBuf>,
    pub file_name: Option<String>,
}

impl Config {
    /// Load config from a TOML file. Returns default if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_required(path)
    }

    /// Load config from a TOML file that must exist.
    pub fn load_required(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(ProvenanceError::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Combine file settings with overrides into a generator configuration.
    pub fn generator_config(&self, overrides: &Overrides) -> Result<GeneratorConfig> {
        let builder_id = overrides
            .builder_id
            .clone()
            .or_else(|| self.provenance.builder_id.clone())
            .ok_or_else(|| {
                ProvenanceError::Config(
                    "builder id is required (--builder-id or provenance.builder_id)".into(),
                )
            })?;

        let mut config = GeneratorConfig::new(builder_id)?;

        if let Some(build_type) = overrides
            .build_type
            .clone()
            .or_else(|| self.provenance.build_type.clone())
        {
            config = config.with_build_type(build_type)?;
        }
        if let Some(algorithms) = overrides
            .digest_algorithms
            .clone()
            .or_else(|| self.provenance.digest_algorithms.clone())
        {
            config = config.with_digest_algorithms(algorithms)?;
        }
        Ok(config)
    }

    /// Full path of the provenance file.
    pub fn output_path(&self, overrides: &Overrides) -> PathBuf {
        let directory = overrides
            .output_dir
            .clone()
            .or_else(|| self.output.directory.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
        let file_name = overrides
            .file_name
            .clone()
            .or_else(|| self.output.file_name.clone())
            .unwrap_or_else(|| DEFAULT_OUTPUT_FILE_NAME.to_string());
        directory.join(file_name)
    }
}
