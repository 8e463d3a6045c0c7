pub mod artifact;
pub mod writer;

pub use artifact::{ModelArtifact, DEFAULT_KING_VALUE};
pub use writer::{write_exports, ExportPaths, DEFAULT_SNAPSHOT_COUNT};
