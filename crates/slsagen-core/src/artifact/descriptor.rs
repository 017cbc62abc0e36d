use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::artifact::digest::{DigestAlgorithm, DigestSet, digest_file};
use crate::context::{Dependency, RepoInfo};
use crate::error::{ProvenanceError, Result};

/// in-toto v1 resource descriptor: a named, digested reference to a file,
/// a repository state or a library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDescriptor {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    #[serde(default, skip_serializing_if = "DigestSet::is_empty")]
    pub digest: DigestSet,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl ResourceDescriptor {
    /// Describe a file on disk by base name and content digest.
    ///
    /// The file must exist; read failures surface as
    /// [`ProvenanceError::DigestCalculation`].
    pub fn from_file(path: &Path, algorithms: &[DigestAlgorithm]) -> Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| ProvenanceError::DigestCalculation {
                path: path.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "path has no file name",
                ),
            })?;

        let digest = digest_file(path, algorithms)?;

        Ok(Self {
            content_type: content_type_for(path),
            name,
            uri: None,
            digest,
        })
    }

    /// Describe the source checkout the build ran from.
    pub fn for_repository(repo: &RepoInfo) -> Self {
        let mut digest = DigestSet::new();
        if let Some(commit) = repo.commit.as_deref().filter(|c| !c.is_empty()) {
            digest.insert("gitCommit".to_string(), commit.to_string());
        }

        Self {
            name: "source".to_string(),
            uri: Some(format!("git+{}@{}", repo.url, repo.ref_name)),
            digest,
            content_type: None,
        }
    }

    /// Describe a library dependency by its Maven coordinates.
    ///
    /// A missing group drops the purl namespace. A missing artifact id
    /// leaves no purl at all and the name falls back to the coordinates.
    pub fn for_dependency(dep: &Dependency) -> Self {
        let non_empty = |v: &Option<String>| {
            v.as_deref()
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        let group = non_empty(&dep.group_id);
        let Some(artifact) = non_empty(&dep.artifact_id) else {
            return Self {
                name: dep.coordinates(),
                uri: None,
                digest: DigestSet::new(),
                content_type: None,
            };
        };

        let mut purl = match group {
            Some(group) => format!("pkg:maven/{group}/{artifact}"),
            None => format!("pkg:maven/{artifact}"),
        };
        if let Some(version) = non_empty(&dep.version) {
            purl.push('@');
            purl.push_str(&version);
        }
        if let Some(kind) = non_empty(&dep.kind).filter(|k| k != "jar") {
            purl.push_str("?type=");
            purl.push_str(&kind);
        }

        Self {
            name: artifact,
            uri: Some(purl),
            digest: DigestSet::new(),
            content_type: None,
        }
    }
}

/// Media type for common Java packaging extensions.
fn content_type_for(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let media = match ext.as_str() {
        "war" | "jar" | "ear" => "application/java-archive",
        "zip" => "application/zip",
        _ => return None,
    };
    Some(media.to_string())
}
