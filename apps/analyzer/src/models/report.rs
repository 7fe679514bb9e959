#![allow(dead_code)]

//! Report model: the shared data contract between the remote clients, the
//! aggregator and the HTTP surface.
//!
//! The report serializes in camelCase because the interactive client renders it directly.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Single issue carried by the error-report variant.
pub const FAILED_ANALYSIS_MESSAGE: &str = "Failed to analyze resume. Please try again.";

/// Advisory issue used whenever the ATS stage produced no score.
pub const ATS_UNAVAILABLE_MESSAGE: &str = "Unable to analyze ATS compatibility at this time.";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub email: String,
    pub phone: String,
}

/// Output of the Parse stage after defaulting. `text` is always present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedDocument {
    pub text: String,
    pub contact: Contact,
    pub sections: BTreeMap<String, String>,
    /// Unique skills in the order the parser reported them.
    pub skills: Vec<String>,
}

/// One classified role. Confidence is a percentage in [0, 100].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleConfidence {
    pub role: String,
    pub confidence: f64,
}

/// Ordered by descending confidence; the first entry is the predicted role.
pub type Classification = Vec<RoleConfidence>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GapLevel {
    Missing,
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGap {
    pub skill: String,
    pub level: GapLevel,
    pub importance: Importance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Course,
    Certification,
    Project,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub title: String,
    pub provider: String,
    pub url: String,
    pub priority: Priority,
}

/// Derived from classification confidence; never exceeds it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessScore {
    pub role: String,
    pub score: u32,
}

/// The terminal artifact of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub file_name: String,
    pub text: String,
    pub contact: Contact,
    pub sections: BTreeMap<String, String>,
    pub skills: Vec<String>,
    pub classifications: Classification,
    pub skill_gaps: Vec<SkillGap>,
    pub ats_score: f64,
    pub ats_issues: Vec<String>,
    pub recommendations: Vec<Recommendation>,
    pub readiness_scores: Vec<ReadinessScore>,
}

impl AnalysisReport {
    /// The error-report variant: same shape, every collection empty, numbers
    /// zeroed and a single human-readable issue.
    pub fn failed(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            text: String::new(),
            contact: Contact::default(),
            sections: BTreeMap::new(),
            skills: Vec::new(),
            classifications: Vec::new(),
            skill_gaps: Vec::new(),
            ats_score: 0.0,
            ats_issues: vec![FAILED_ANALYSIS_MESSAGE.to_string()],
            recommendations: Vec::new(),
            readiness_scores: Vec::new(),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.classifications.is_empty()
            && self.text.is_empty()
            && self.ats_issues.len() == 1
            && self.ats_issues[0] == FAILED_ANALYSIS_MESSAGE
    }

    pub fn top_role(&self) -> Option<&str> {
        self.classifications.first().map(|c| c.role.as_str())
    }
}
