use std::path::Path;

use crate::context::model::BuildContext;
use crate::error::{ProvenanceError, Result};

impl BuildContext {
    /// Load a build context descriptor from a JSON file.
    ///
    /// Relative build output directories are resolved against the
    /// directory containing the descriptor.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut ctx = Self::from_json_str(&content)?;
        if let Some(base) = path.parent() {
            ctx.anchor_build_dirs(base);
        }
        tracing::debug!(
            path = %path.display(),
            modules = ctx.modules().len(),
            "loaded build context"
        );
        Ok(ctx)
    }

    /// Parse a build context descriptor from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let ctx: BuildContext = serde_json::from_str(json)?;
        ctx.validate()?;
        Ok(ctx)
    }

    fn anchor_build_dirs(&mut self, base: &Path) {
        let modules =
            std::iter::once(&mut self.project).chain(self.sorted_modules.iter_mut());
        for build in modules.filter_map(|m| m.build.as_mut()) {
            if build.directory.is_relative() {
                build.directory = base.join(&build.directory);
            }
        }
    }

    fn validate(&self) -> Result<()> {
        let project = &self.project;
        if project.group_id.is_empty()
            || project.artifact_id.is_empty()
            || project.version.is_empty()
        {
            return Err(ProvenanceError::Context(format!(
                "project coordinates are incomplete: {}",
                project.coordinates()
            )));
        }
        if let Some(module) = self
            .sorted_modules
            .iter()
            .find(|m| m.artifact_id.is_empty())
        {
            return Err(ProvenanceError::Context(format!(
                "module without artifactId in sorted module list: {}",
                module.coordinates()
            )));
        }
        Ok(())
    }
}
