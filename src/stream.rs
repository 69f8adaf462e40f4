pub mod classifier;
pub mod context;
pub mod rewriter;
pub mod rules;

pub use classifier::{ManifestClassifier, ManifestKind, PlaylistKind};
pub use context::TransformContext;
pub use rewriter::ManifestRewriter;
