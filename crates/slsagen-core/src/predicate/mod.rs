//! SLSA provenance v1 predicate: build definition plus run details.

pub mod definition;
pub mod external;
pub mod model;
pub mod run;

pub use model::{
    BuildDefinition, BuildMetadata, Builder, ExternalParameters, RunDetails, SlsaPredicate,
};
