use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Everything the generator needs to know about one build invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildContext {
    /// The module executing the generation; owner of the subject artifact.
    pub project: Module,

    /// All modules of the build in dependency-sorted (topological) order.
    /// An empty list means a single-module build consisting of `project`.
    #[serde(default)]
    pub sorted_modules: Vec<Module>,

    /// Source-control coordinates, when the build runs from a checkout.
    #[serde(default)]
    pub repository: Option<RepoInfo>,

    /// Key/value properties supplied on the build invocation.
    #[serde(default)]
    pub user_properties: BTreeMap<String, String>,

    /// Session start instant, in whatever zone the host recorded it.
    pub started_on: DateTime<FixedOffset>,

    #[serde(default)]
    pub finished_on: Option<DateTime<FixedOffset>>,

    #[serde(default)]
    pub invocation_id: Option<String>,

    #[serde(default)]
    pub internal_parameters: Option<serde_json::Map<String, serde_json::Value>>,
}

impl BuildContext {
    /// Modules of the build graph in topological order.
    pub fn modules(&self) -> &[Module] {
        if self.sorted_modules.is_empty() {
            std::slice::from_ref(&self.project)
        } else {
            &self.sorted_modules
        }
    }

    /// Merge additional user properties; later values win on key collision.
    pub fn with_user_properties<I>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.user_properties.extend(extra);
        self
    }
}

/// One module (project) of the build graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,

    /// Declared dependencies, in declaration order.
    #[serde(default)]
    pub dependencies: Vec<Dependency>,

    #[serde(default)]
    pub build: Option<BuildOutput>,
}

impl Module {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            ..Default::default()
        }
    }

    /// `group:artifact:version`, for log output.
    pub fn coordinates(&self) -> String {
        format!("{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}

/// A declared dependency. Coordinates may be missing in malformed models.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub artifact_id: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    /// Packaging type (`jar`, `war`, `pom`, ...).
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl Dependency {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
        scope: Option<&str>,
    ) -> Self {
        Self {
            group_id: Some(group_id.into()),
            artifact_id: Some(artifact_id.into()),
            version: Some(version.into()),
            scope: scope.map(str::to_string),
            kind: None,
        }
    }

    pub fn coordinates(&self) -> String {
        format!(
            "{}:{}:{}",
            self.group_id.as_deref().unwrap_or("?"),
            self.artifact_id.as_deref().unwrap_or("?"),
            self.version.as_deref().unwrap_or("?")
        )
    }
}

/// Where a module places its packaged output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildOutput {
    /// Build output directory (e.g. `target`). When loaded with
    /// `BuildContext::from_path`, a relative value is taken relative to the
    /// descriptor file; otherwise it is relative to the working directory.
    pub directory: PathBuf,

    /// Final artifact name without extension. When absent the directory is
    /// searched for a single file carrying `extension`.
    #[serde(default)]
    pub final_name: Option<String>,

    /// Packaging extension without the leading dot (e.g. `war`).
    pub extension: String,
}

/// Source-control coordinates returned by the host's repository lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoInfo {
    pub url: String,
    #[serde(rename = "ref")]
    pub ref_name: String,
    #[serde(default)]
    pub commit: Option<String>,
}
