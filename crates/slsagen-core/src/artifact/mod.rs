pub mod descriptor;
pub mod digest;
pub mod package;

pub use descriptor::ResourceDescriptor;
pub use digest::{DigestAlgorithm, DigestSet};
