use crate::artifact::ResourceDescriptor;
use crate::context::{Dependency, Module};

/// Collect the external dependencies of a build graph.
///
/// Modules are visited in the order given (expected topological), and each
/// module's dependencies in declaration order. A dependency is dropped when
/// it refers to another module of the same build or when its scope is
/// missing or `test`. Survivors are emitted in visit order without
/// de-duplication.
pub fn resolve_dependencies(sorted_modules: &[Module]) -> Vec<ResourceDescriptor> {
    let mut resolved = Vec::new();

    for module in sorted_modules {
        for dep in &module.dependencies {
            if is_self_reference(sorted_modules, dep) {
                tracing::debug!(
                    module = %module.coordinates(),
                    dependency = %dep.coordinates(),
                    "skipping dependency on module of the same build"
                );
                continue;
            }
            if is_ignored_scope(dep.scope.as_deref()) {
                tracing::debug!(
                    module = %module.coordinates(),
                    dependency = %dep.coordinates(),
                    scope = dep.scope.as_deref().unwrap_or("<none>"),
                    "skipping dependency by scope"
                );
                continue;
            }
            resolved.push(ResourceDescriptor::for_dependency(dep));
        }
    }

    tracing::debug!(count = resolved.len(), "resolved external dependencies");
    resolved
}

/// Missing and `test` scopes are excluded from the claim.
///
/// A missing scope is treated the same as `test`, even though build tools
/// usually default it to `compile`.
pub fn is_ignored_scope(scope: Option<&str>) -> bool {
    match scope {
        None => true,
        Some(s) => s.eq_ignore_ascii_case("test"),
    }
}

/// True when `dep` names a module of the same build by exact
/// `(group, artifact, version)`. Dependencies with any missing coordinate
/// never match.
pub fn is_self_reference(modules: &[Module], dep: &Dependency) -> bool {
    let (Some(group), Some(artifact), Some(version)) = (
        dep.group_id.as_deref(),
        dep.artifact_id.as_deref(),
        dep.version.as_deref(),
    ) else {
        return false;
    };

    modules
        .iter()
        .any(|m| m.group_id == group && m.artifact_id == artifact && m.version == version)
}
