//! Dependency resolution for the `resolvedDependencies` claim.
//!
//! Ordering here is part of the document contract: identical build graphs
//! always produce identical dependency lists.

pub mod dependencies;

pub use dependencies::{is_ignored_scope, is_self_reference, resolve_dependencies};
