use crate::artifact::ResourceDescriptor;
use crate::context::BuildContext;
use crate::error::Result;
use crate::predicate::model::{BuildDefinition, ExternalParameters};
use crate::resolve::resolve_dependencies;

impl BuildDefinition {
    /// Assemble the build definition from the build context.
    ///
    /// The source checkout, when known, is the first resolved dependency.
    pub fn assemble(build_type: &str, ctx: &BuildContext) -> Result<Self> {
        let external_parameters =
            ExternalParameters::assemble(ctx.repository.as_ref(), &ctx.user_properties)?;

        let mut resolved_dependencies = Vec::new();
        if let Some(repo) = ctx.repository.as_ref() {
            resolved_dependencies.push(ResourceDescriptor::for_repository(repo));
        }
        resolved_dependencies.extend(resolve_dependencies(ctx.modules()));

        Ok(BuildDefinition {
            build_type: build_type.to_string(),
            external_parameters,
            resolved_dependencies,
            internal_parameters: ctx
                .internal_parameters
                .clone()
                .filter(|params| !params.is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{Dependency, Module, RepoInfo};
    use crate::error::ProvenanceError;
    use chrono::DateTime;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn ctx(repository: Option<RepoInfo>) -> BuildContext {
        let mut project = Module::new("com.example", "app", "1.0");
        project.dependencies = vec![
            Dependency::new("com.example", "lib", "1.0", Some("compile")),
            Dependency::new("org.junit", "junit", "5.10", Some("test")),
        ];
        BuildContext {
            project,
            sorted_modules: vec![],
            repository,
            user_properties: BTreeMap::new(),
            started_on: DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z").unwrap(),
            finished_on: None,
            invocation_id: None,
            internal_parameters: None,
        }
    }

    fn repo() -> RepoInfo {
        RepoInfo {
            url: "https://example.com/repo.git".into(),
            ref_name: "main".into(),
            commit: None,
        }
    }

    #[test]
    fn repository_descriptor_comes_first() {
        let def = BuildDefinition::assemble("https://build/v1", &ctx(Some(repo()))).unwrap();

        let names: Vec<&str> = def
            .resolved_dependencies
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(names, vec!["source", "lib"]);
        assert_eq!(def.build_type, "https://build/v1");
    }

    #[test]
    fn no_repository_means_no_source_entry() {
        let def = BuildDefinition::assemble("t", &ctx(None)).unwrap();

        assert_eq!(def.resolved_dependencies.len(), 1);
        assert!(def.external_parameters.repository.is_none());
    }

    #[test]
    fn internal_parameters_are_omitted_when_empty() {
        let mut c = ctx(None);
        c.internal_parameters = Some(serde_json::Map::new());
        let def = BuildDefinition::assemble("t", &c).unwrap();
        assert!(serde_json::to_value(&def).unwrap().get("internalParameters").is_none());

        let mut c = ctx(None);
        c.internal_parameters = json!({ "mavenVersion": "3.9.6" }).as_object().cloned();
        let def = BuildDefinition::assemble("t", &c).unwrap();
        assert_eq!(
            serde_json::to_value(&def).unwrap()["internalParameters"]["mavenVersion"],
            "3.9.6"
        );
    }

    #[test]
    fn broken_repository_propagates() {
        let mut bad = repo();
        bad.ref_name.clear();

        let err = BuildDefinition::assemble("t", &ctx(Some(bad))).unwrap_err();
        assert!(matches!(err, ProvenanceError::SourceControl(_)));
    }
}
