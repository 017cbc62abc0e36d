//! Locates the package file a module's build produced.

use std::path::{Path, PathBuf};

use crate::context::{BuildOutput, Module};
use crate::error::{ProvenanceError, Result};

/// Resolve the packaged artifact of `module`.
///
/// Returns [`ProvenanceError::PackageNotFound`] when nothing has been
/// packaged yet, which callers may treat as a non-fatal condition.
pub fn built_package(module: &Module) -> Result<PathBuf> {
    let output = module.build.as_ref().ok_or_else(|| {
        ProvenanceError::Context(format!(
            "module {} declares no build output",
            module.coordinates()
        ))
    })?;
    locate_package(output)
}

/// Resolve the package file inside a build output directory.
///
/// With a final name the location is exact: `<directory>/<finalName>.<extension>`.
/// Without one, the directory must contain exactly one `*.<extension>` file.
pub fn locate_package(output: &BuildOutput) -> Result<PathBuf> {
    let extension = output.extension.trim_start_matches('.');

    if let Some(final_name) = output.final_name.as_deref() {
        let path = output.directory.join(format!("{final_name}.{extension}"));
        if !path.is_file() {
            return Err(ProvenanceError::PackageNotFound {
                directory: output.directory.clone(),
            });
        }
        tracing::debug!(package = %path.display(), "located package by final name");
        return Ok(path);
    }

    let mut candidates = scan_for_extension(&output.directory, extension)?;
    match candidates.len() {
        0 => Err(ProvenanceError::PackageNotFound {
            directory: output.directory.clone(),
        }),
        1 => {
            let path = candidates.remove(0);
            tracing::debug!(package = %path.display(), "located package by extension");
            Ok(path)
        }
        _ => Err(ProvenanceError::MultiplePackagesFound {
            directory: output.directory.clone(),
            extension: extension.to_string(),
            files: candidates
                .iter()
                .filter_map(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .collect(),
        }),
    }
}

/// Regular files in `directory` whose extension matches, sorted by name.
fn scan_for_extension(directory: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !directory.is_dir() {
        return Ok(Vec::new());
    }

    let mut found = Vec::new();
    for entry in std::fs::read_dir(directory)? {
        let path = entry?.path();
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(extension));
        if matches && path.is_file() {
            found.push(path);
        }
    }
    found.sort();
    Ok(found)
}
