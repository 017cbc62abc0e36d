use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::artifact::ResourceDescriptor;
use crate::error::{ProvenanceError, Result};
use crate::predicate::SlsaPredicate;
use crate::predicate::model::PREDICATE_TYPE_SLSA_PROVENANCE_V1;

/// Statement type URI for in-toto attestation v1.
pub const STATEMENT_TYPE_IN_TOTO_V1: &str = "https://in-toto.io/Statement/v1";

/// The artifact the attestation makes claims about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Subject(pub ResourceDescriptor);

impl Subject {
    pub fn new(descriptor: ResourceDescriptor) -> Self {
        Subject(descriptor)
    }

    pub fn descriptor(&self) -> &ResourceDescriptor {
        &self.0
    }
}

/// in-toto Statement v1 carrying a SLSA provenance v1 predicate.
///
/// Field order matches the canonical document layout:
/// `_type`, `subject`, `predicateType`, `predicate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    #[serde(rename = "_type")]
    pub statement_type: String,

    pub subject: Vec<Subject>,

    #[serde(rename = "predicateType")]
    pub predicate_type: String,

    pub predicate: SlsaPredicate,
}

impl Statement {
    /// Build and validate a statement for a single subject.
    pub fn new(subject: Subject, predicate: SlsaPredicate) -> Result<Self> {
        let statement = Self {
            statement_type: STATEMENT_TYPE_IN_TOTO_V1.to_string(),
            subject: vec![subject],
            predicate_type: PREDICATE_TYPE_SLSA_PROVENANCE_V1.to_string(),
            predicate,
        };
        statement.validate()?;
        Ok(statement)
    }

    /// Check the required fields of the document.
    pub fn validate(&self) -> Result<()> {
        if self.subject.is_empty() {
            return Err(invalid("statement has no subject"));
        }
        for subject in &self.subject {
            let desc = subject.descriptor();
            if desc.name.trim().is_empty() {
                return Err(invalid("subject has no name"));
            }
            if desc.digest.is_empty() {
                return Err(invalid(format!("subject {} has no digest", desc.name)));
            }
        }
        if self.predicate.build_definition.build_type.trim().is_empty() {
            return Err(invalid("buildType is required"));
        }
        if self.predicate.run_details.builder.id.trim().is_empty() {
            return Err(invalid("builder.id is required"));
        }
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> ProvenanceError {
    ProvenanceError::StatementValidation(msg.into())
}

/// Final output of a generation run.
///
/// `Empty` is the sentinel produced when no package exists yet; it
/// serializes to `{}`.
#[derive(Debug, Clone, PartialEq)]
pub enum ProvenanceDocument {
    Statement(Box<Statement>),
    Empty,
}

impl ProvenanceDocument {
    pub fn is_empty(&self) -> bool {
        matches!(self, ProvenanceDocument::Empty)
    }

    pub fn statement(&self) -> Option<&Statement> {
        match self {
            ProvenanceDocument::Statement(s) => Some(s.as_ref()),
            ProvenanceDocument::Empty => None,
        }
    }

    /// Compact canonical JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Serialize for ProvenanceDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            ProvenanceDocument::Statement(statement) => statement.serialize(serializer),
            ProvenanceDocument::Empty => serializer.serialize_map(Some(0))?.end(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::DigestSet;
    use crate::predicate::{
        BuildDefinition, BuildMetadata, Builder, ExternalParameters, RunDetails,
    };
    use chrono::{TimeZone, Utc};

    fn subject(with_digest: bool) -> Subject {
        let mut digest = DigestSet::new();
        if with_digest {
            digest.insert("sha256".into(), "abcd".into());
        }
        Subject::new(ResourceDescriptor {
            name: "app.war".into(),
            uri: None,
            digest,
            content_type: None,
        })
    }

    fn predicate(builder_id: &str) -> SlsaPredicate {
        SlsaPredicate::new(
            BuildDefinition {
                build_type: "https://build/v1".into(),
                external_parameters: ExternalParameters::default(),
                resolved_dependencies: vec![],
                internal_parameters: None,
            },
            RunDetails {
                builder: Builder {
                    id: builder_id.into(),
                },
                metadata: BuildMetadata {
                    started_on: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
                    finished_on: None,
                    invocation_id: None,
                },
            },
        )
    }

    #[test]
    fn statement_serializes_with_fixed_type_uris() {
        let statement = Statement::new(subject(true), predicate("https://builder")).unwrap();
        let value = serde_json::to_value(&statement).unwrap();

        assert_eq!(value["_type"], "https://in-toto.io/Statement/v1");
        assert_eq!(value["predicateType"], "https://slsa.dev/provenance/v1");
        assert_eq!(value["subject"][0]["name"], "app.war");
        assert_eq!(value["subject"][0]["digest"]["sha256"], "abcd");
    }

    #[test]
    fn top_level_key_order_is_canonical() {
        let statement = Statement::new(subject(true), predicate("https://builder")).unwrap();
        let json = ProvenanceDocument::Statement(Box::new(statement))
            .to_json()
            .unwrap();

        let type_at = json.find("\"_type\"").unwrap();
        let subject_at = json.find("\"subject\"").unwrap();
        let predicate_type_at = json.find("\"predicateType\"").unwrap();
        let predicate_at = json.find("\"predicate\":").unwrap();
        assert!(type_at < subject_at && subject_at < predicate_type_at);
        assert!(predicate_type_at < predicate_at);
    }

    #[test]
    fn subject_without_digest_fails_validation() {
        let err = Statement::new(subject(false), predicate("https://builder")).unwrap_err();
        assert!(matches!(err, ProvenanceError::StatementValidation(_)));
    }

    #[test]
    fn blank_builder_id_fails_validation() {
        let err = Statement::new(subject(true), predicate("  ")).unwrap_err();
        assert!(err.to_string().contains("builder.id"));
    }

    #[test]
    fn empty_document_serializes_to_empty_object() {
        let doc = ProvenanceDocument::Empty;

        assert!(doc.is_empty());
        assert!(doc.statement().is_none());
        assert_eq!(doc.to_json().unwrap(), "{}");
    }
}
