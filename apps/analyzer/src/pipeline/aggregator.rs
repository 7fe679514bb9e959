//! Result Aggregator: merges raw service outputs into the unified `AnalysisReport`.
//!
//! Every fallback a field can take is declared here and nowhere else:
//!
//! | Field             | Source                          | When absent / stage failed             |
//! |-------------------|---------------------------------|----------------------------------------|
//! | contact           | parse `contact`                 | `{email:"", phone:""}`                 |
//! | sections          | parse `sections`                | `{}`                                   |
//! | skills            | parse `skills` (deduplicated)   | `[]`                                   |
//! | skillGaps         | skill-gap `missing_skills`      | `[]`                                   |
//! | recommendations   | skill-gap `recommendations`     | synthesized from high-importance gaps  |
//! | atsScore          | ATS `ats_score` (clamped)       | `0`                                    |
//! | atsIssues         | ATS `suggestions`               | `[]` on success, advisory on failure   |
//!
//! Service recommendations and synthesized ones are mutually exclusive: synthesis
//! only runs when the service supplied none.

use std::collections::HashSet;

use crate::models::report::ATS_UNAVAILABLE_MESSAGE;
use crate::models::{
    AnalysisReport, Classification, Contact, Document, GapLevel, Importance, ParsedDocument,
    Priority, ReadinessScore, Recommendation, RecommendationKind, SkillGap,
};
use crate::services::{AtsResponse, ParseResponse, SkillGapResponse};

const SERVICE_PROVIDER: &str = "Skill Development";
const SERVICE_URL: &str = "https://example.com/skills";
const SYNTHESIZED_PROVIDER: &str = "Online Learning Platform";
const SYNTHESIZED_URL: &str = "https://example.com";

/// Applies the parse-field defaults. Called as soon as Parse succeeds, since the
/// orchestrator needs the normalized skill set before the report is built.
pub fn normalize_parsed(raw: ParseResponse) -> ParsedDocument {
    let contact = raw
        .contact
        .map(|c| Contact {
            email: c.email.unwrap_or_default(),
            phone: c.phone.unwrap_or_default(),
        })
        .unwrap_or_default();

    ParsedDocument {
        text: raw.text,
        contact,
        sections: raw.sections.unwrap_or_default(),
        skills: unique_trimmed(raw.skills.unwrap_or_default()),
    }
}

/// Builds the final report from everything one run collected.
pub fn aggregate(
    document: &Document,
    parsed: ParsedDocument,
    classification: Classification,
    skill_gap: Option<SkillGapResponse>,
    ats: Option<AtsResponse>,
    readiness_scores: Vec<ReadinessScore>,
) -> AnalysisReport {
    let (missing_skills, service_recommendations) = match skill_gap {
        Some(response) => (
            response.missing_skills.unwrap_or_default(),
            response.recommendations.unwrap_or_default(),
        ),
        None => (Vec::new(), Vec::new()),
    };

    let skill_gaps = skill_gaps(missing_skills);
    let recommendations = recommendations(service_recommendations, &skill_gaps);
    let (ats_score, ats_issues) = ats_result(ats);

    AnalysisReport {
        file_name: document.name().to_string(),
        text: parsed.text,
        contact: parsed.contact,
        sections: parsed.sections,
        skills: parsed.skills,
        classifications: classification,
        skill_gaps,
        ats_score,
        ats_issues,
        recommendations,
        readiness_scores,
    }
}

/// Every reported missing skill is a `missing` gap of `high` importance. The
/// skill-gap service supplies no severity, so this is fixed policy.
fn skill_gaps(missing_skills: Vec<String>) -> Vec<SkillGap> {
    unique_trimmed(missing_skills)
        .into_iter()
        .map(|skill| SkillGap {
            skill,
            level: GapLevel::Missing,
            importance: Importance::High,
        })
        .collect()
}

fn recommendations(service: Vec<String>, gaps: &[SkillGap]) -> Vec<Recommendation> {
    let from_service: Vec<Recommendation> = unique_trimmed(service)
        .into_iter()
        .map(|title| Recommendation {
            kind: RecommendationKind::Course,
            title,
            provider: SERVICE_PROVIDER.to_string(),
            url: SERVICE_URL.to_string(),
            priority: Priority::High,
        })
        .collect();

    if !from_service.is_empty() {
        return from_service;
    }

    let titles = gaps
        .iter()
        .filter(|gap| gap.importance == Importance::High)
        .map(|gap| format!("Learn {}", gap.skill))
        .collect();

    unique_trimmed(titles)
        .into_iter()
        .map(|title| Recommendation {
            kind: RecommendationKind::Course,
            title,
            provider: SYNTHESIZED_PROVIDER.to_string(),
            url: SYNTHESIZED_URL.to_string(),
            priority: Priority::High,
        })
        .collect()
}

fn ats_result(ats: Option<AtsResponse>) -> (f64, Vec<String>) {
    match ats {
        Some(response) => {
            let score = response
                .ats_score
                .filter(|s| s.is_finite())
                .map(|s| s.clamp(0.0, 100.0))
                .unwrap_or(0.0);
            (score, response.suggestions.unwrap_or_default())
        }
        None => (0.0, vec![ATS_UNAVAILABLE_MESSAGE.to_string()]),
    }
}

/// Trims, drops blanks and collapses case-insensitive duplicates, keeping the
/// first spelling in original order.
fn unique_trimmed(values: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && seen.insert(v.to_lowercase()))
        .collect()
}
