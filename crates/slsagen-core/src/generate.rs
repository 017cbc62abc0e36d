//! Provenance generation pipeline.
//!
//! Stages run strictly in order: subject, predicate (build definition then
//! run details), statement. Only a missing package at the subject stage is
//! tolerated; it yields [`ProvenanceDocument::Empty`]. Everything else is
//! wrapped in [`ProvenanceError::Generation`].

use crate::artifact::ResourceDescriptor;
use crate::artifact::package::built_package;
use crate::config::GeneratorConfig;
use crate::context::BuildContext;
use crate::error::{ProvenanceError, Result};
use crate::predicate::{BuildDefinition, RunDetails, SlsaPredicate};
use crate::statement::{ProvenanceDocument, Statement, Subject};

/// Generate the provenance document for one build invocation.
pub fn generate_provenance(
    ctx: &BuildContext,
    config: &GeneratorConfig,
) -> Result<ProvenanceDocument> {
    match build_statement(ctx, config) {
        Ok(statement) => {
            tracing::info!(
                subject = %statement.subject[0].descriptor().name,
                dependencies = statement.predicate.build_definition.resolved_dependencies.len(),
                "provenance statement built"
            );
            Ok(ProvenanceDocument::Statement(Box::new(statement)))
        }
        Err(e) if e.is_package_not_found() => {
            tracing::warn!(error = %e, "no package built yet, emitting empty provenance");
            Ok(ProvenanceDocument::Empty)
        }
        Err(e) => Err(ProvenanceError::generation(e)),
    }
}

fn build_statement(ctx: &BuildContext, config: &GeneratorConfig) -> Result<Statement> {
    let subject = build_subject(ctx, config)?;
    let predicate = build_predicate(ctx, config).map_err(ProvenanceError::predicate)?;
    Statement::new(subject, predicate)
}

/// The subject is the executing project's package, digested.
fn build_subject(ctx: &BuildContext, config: &GeneratorConfig) -> Result<Subject> {
    let package = built_package(&ctx.project)?;
    let descriptor = ResourceDescriptor::from_file(&package, &config.digest_algorithms)?;
    tracing::debug!(package = %package.display(), "subject built");
    Ok(Subject::new(descriptor))
}

fn build_predicate(ctx: &BuildContext, config: &GeneratorConfig) -> Result<SlsaPredicate> {
    let build_definition = BuildDefinition::assemble(&config.build_type, ctx)
        .map_err(ProvenanceError::build_definition)?;
    let run_details = RunDetails::assemble(&config.builder_id, ctx);
    Ok(SlsaPredicate::new(build_definition, run_details))
}
