pub mod model;
pub mod render;

pub use model::{ProvenanceDocument, Statement, Subject};
