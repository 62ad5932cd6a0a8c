mod engine;
mod ignore;
mod managed;

pub use engine::{
    contents_equal, reconcile, ArtifactOutcome, ReconcileError, ReconcileReport,
};
pub use ignore::{IgnoreList, GENERATED_HEADER};
pub use managed::{
    managed_artifacts, ArtifactContext, ArtifactGroup, Comparison, ManagedArtifact,
};
