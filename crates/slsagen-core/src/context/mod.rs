//! Build-session input consumed by the generator.
//!
//! The host build orchestrator is represented by a single [`BuildContext`]
//! value supplied wholesale to the generation entry point.

pub mod load;
pub mod model;

pub use model::{BuildContext, BuildOutput, Dependency, Module, RepoInfo};
