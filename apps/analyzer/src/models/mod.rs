pub mod document;
pub mod report;

pub use document::Document;
pub use report::{
    AnalysisReport, Classification, Contact, GapLevel, Importance, ParsedDocument, Priority,
    ReadinessScore, Recommendation, RecommendationKind, RoleConfidence, SkillGap,
};
