use crate::TOOL_NAME;
use crate::statement::model::ProvenanceDocument;

/// Short human-readable summary of a generated document.
pub fn render_text(doc: &ProvenanceDocument) -> String {
    let Some(statement) = doc.statement() else {
        return format!("{TOOL_NAME}: no package built yet, wrote empty provenance\n");
    };

    let mut out = String::new();
    for subject in &statement.subject {
        let desc = subject.descriptor();
        out.push_str(&format!("Subject: {}\n", desc.name));
        for (alg, value) in &desc.digest {
            out.push_str(&format!("  {alg}: {value}\n"));
        }
    }

    let definition = &statement.predicate.build_definition;
    out.push_str(&format!("Build type: {}\n", definition.build_type));
    out.push_str(&format!(
        "Builder: {}\n",
        statement.predicate.run_details.builder.id
    ));
    out.push_str(&format!(
        "Started on: {}\n",
        statement
            .predicate
            .run_details
            .metadata
            .started_on
            .to_rfc3339_opts(chrono::SecondsFormat::AutoSi, true)
    ));
    out.push_str(&format!(
        "Resolved dependencies: {}\n",
        definition.resolved_dependencies.len()
    ));
    for dep in &definition.resolved_dependencies {
        out.push_str(&format!(
            "  - {}\n",
            dep.uri.as_deref().unwrap_or(dep.name.as_str())
        ));
    }
    out
}
