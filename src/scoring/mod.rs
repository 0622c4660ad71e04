//! Metadata-driven similarity scoring.
//!
//! Leaves first: [`ToleranceRule`] compares one characteristic, [`Importance`]
//! ranks it, [`SimilarityProfile`] scales the ranking for a sourcing context,
//! [`TypeMetadata`] ties them together per component type and the
//! [`WeightedScorer`] combines everything into a single score.

mod importance;
mod metadata;
mod profile;
mod tolerance;
mod weighted;

pub use importance::Importance;
pub use metadata::{
    SpecRule, TypeMetadata, TypeMetadataBuilder, TypeMetadataRegistry,
    TypeMetadataRegistryBuilder,
};
pub use profile::SimilarityProfile;
pub use tolerance::{ToleranceKind, ToleranceRule, DEFAULT_ACCEPTANCE_THRESHOLD};
pub use weighted::{
    legacy_spec_score, score_with_metadata, ScoreOutcome, SpecComponentScore, SpecScoreBreakdown,
    WeightedScorer,
};
