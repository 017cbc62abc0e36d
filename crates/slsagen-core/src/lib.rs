//! Build-provenance generation: in-toto Statement v1 documents carrying a
//! SLSA provenance v1 predicate, assembled from an explicit build context.

pub mod artifact;
pub mod config;
pub mod context;
pub mod error;
pub mod generate;
pub mod predicate;
pub mod resolve;
pub mod statement;

pub use generate::generate_provenance;

pub const TOOL_NAME: &str = "slsagen";

/// Build type used when none is configured: version 1 of this tool's
/// `externalParameters` layout.
pub const DEFAULT_BUILD_TYPE: &str = "https://github.com/slsagen/slsagen/tree/main/v1.0";

pub const DEFAULT_OUTPUT_DIR: &str = "target/slsa";

pub const DEFAULT_OUTPUT_FILE_NAME: &str = "slsa_provenance.json";
