//! Skill classification: the record schema, the model-backed classifier and
//! its keyword fallback.

pub mod classifier;
pub mod keywords;
pub mod record;

pub use classifier::{Classification, FallbackReason, SkillClassifier};
pub use record::{ExperienceLevel, RelationKind, SkillRecord, SkillRelationship};
