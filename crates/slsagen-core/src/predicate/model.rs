use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::artifact::ResourceDescriptor;

/// Predicate type URI for SLSA provenance v1.
pub const PREDICATE_TYPE_SLSA_PROVENANCE_V1: &str = "https://slsa.dev/provenance/v1";

/// SLSA provenance v1 predicate.
///
/// Field names and nesting follow <https://slsa.dev/provenance/v1>.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlsaPredicate {
    pub build_definition: BuildDefinition,
    pub run_details: RunDetails,
}

impl SlsaPredicate {
    pub fn new(build_definition: BuildDefinition, run_details: RunDetails) -> Self {
        Self {
            build_definition,
            run_details,
        }
    }
}

/// How the build was supposed to run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildDefinition {
    /// Identifies the schema of `external_parameters` and `internal_parameters`.
    pub build_type: String,
    pub external_parameters: ExternalParameters,

    /// Source checkout first, then library dependencies in resolution order.
    #[serde(default)]
    pub resolved_dependencies: Vec<ResourceDescriptor>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_parameters: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Parameters under the control of whoever invoked the build.
///
/// Every key is optional; absent or empty values are omitted, never emitted
/// as `null` or `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,

    #[serde(default, rename = "ref", skip_serializing_if = "Option::is_none")]
    pub ref_name: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub user_properties: BTreeMap<String, String>,
}

/// What actually happened during the build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunDetails {
    pub builder: Builder,
    pub metadata: BuildMetadata,
}

/// The trusted control plane that produced the run details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Builder {
    pub id: String,
}

/// Build timing and invocation identity. Timestamps are always UTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildMetadata {
    pub started_on: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_on: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invocation_id: Option<String>,
}
