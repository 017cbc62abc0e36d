use std::collections::BTreeMap;

use crate::context::RepoInfo;
use crate::error::{ProvenanceError, Result};
use crate::predicate::model::ExternalParameters;

impl ExternalParameters {
    /// Merge source-control coordinates and invocation properties.
    ///
    /// `repository` and `ref` are set whenever `repo` is present; URL syntax
    /// is passed through unchecked. `userProperties` is set only when
    /// non-empty.
    pub fn assemble(
        repo: Option<&RepoInfo>,
        user_properties: &BTreeMap<String, String>,
    ) -> Result<Self> {
        let mut params = ExternalParameters {
            user_properties: user_properties.clone(),
            ..Default::default()
        };

        if let Some(repo) = repo {
            if repo.url.trim().is_empty() {
                return Err(ProvenanceError::SourceControl(
                    "repository URL is empty".into(),
                ));
            }
            if repo.ref_name.trim().is_empty() {
                return Err(ProvenanceError::SourceControl(format!(
                    "repository {} has no ref",
                    repo.url
                )));
            }
            params.repository = Some(repo.url.clone());
            params.ref_name = Some(repo.ref_name.clone());
        }

        Ok(params)
    }
}
