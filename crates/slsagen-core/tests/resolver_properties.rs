use proptest::prelude::*;
use slsagen_core::context::{Dependency, Module};
use slsagen_core::resolve::resolve_dependencies;

const GROUPS: &[&str] = &["com.example", "org.acme"];
const ARTIFACTS: &[&str] = &["a", "b", "c", "d"];
const VERSIONS: &[&str] = &["1.0", "2.0"];

fn scope() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("test".to_string())),
        Just(Some("Test".to_string())),
        Just(Some("compile".to_string())),
        Just(Some("runtime".to_string())),
        Just(Some("provided".to_string())),
    ]
}

fn dependency() -> impl Strategy<Value = Dependency> {
    (
        prop::sample::select(GROUPS),
        prop::sample::select(ARTIFACTS),
        prop::sample::select(VERSIONS),
        scope(),
    )
        .prop_map(|(g, a, v, scope)| Dependency {
            group_id: Some(g.to_string()),
            artifact_id: Some(a.to_string()),
            version: Some(v.to_string()),
            scope,
            kind: None,
        })
}

fn module() -> impl Strategy<Value = Module> {
    (
        prop::sample::select(GROUPS),
        prop::sample::select(ARTIFACTS),
        prop::sample::select(VERSIONS),
        prop::collection::vec(dependency(), 0..6),
    )
        .prop_map(|(g, a, v, deps)| {
            let mut m = Module::new(g, a, v);
            m.dependencies = deps;
            m
        })
}

fn purl(g: &str, a: &str, v: &str) -> String {
    format!("pkg:maven/{g}/{a}@{v}")
}

proptest! {
    #[test]
    fn excluded_dependencies_never_appear(modules in prop::collection::vec(module(), 1..5)) {
        let resolved = resolve_dependencies(&modules);
        let module_purls: Vec<String> = modules
            .iter()
            .map(|m| purl(&m.group_id, &m.artifact_id, &m.version))
            .collect();

        for desc in &resolved {
            let uri = desc.uri.clone().unwrap();
            prop_assert!(!module_purls.contains(&uri), "self reference claimed: {}", uri);
        }

        let expected: Vec<String> = modules
            .iter()
            .flat_map(|m| m.dependencies.iter())
            .filter(|d| {
                d.scope
                    .as_deref()
                    .is_some_and(|s| !s.eq_ignore_ascii_case("test"))
            })
            .map(|d| {
                purl(
                    d.group_id.as_deref().unwrap(),
                    d.artifact_id.as_deref().unwrap(),
                    d.version.as_deref().unwrap(),
                )
            })
            .filter(|p| !module_purls.contains(p))
            .collect();
        let actual: Vec<String> = resolved.iter().map(|d| d.uri.clone().unwrap()).collect();

        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn resolution_is_reproducible(modules in prop::collection::vec(module(), 1..5)) {
        let first = resolve_dependencies(&modules);
        let second = resolve_dependencies(&modules);
        prop_assert_eq!(first, second);
    }
}
