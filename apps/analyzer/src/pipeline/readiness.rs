//! Readiness Calculator: derives a per-role readiness score from classification confidence.
//!
//! readiness = round(confidence × 0.9). A role match does not imply full preparedness,
//! so readiness never exceeds the confidence it came from. The factor is a fixed
//! policy constant, identical for every role.

use crate::models::{ReadinessScore, RoleConfidence};

pub const READINESS_FACTOR: f64 = 0.9;

/// One score per classified role, in classification order.
pub fn readiness_scores(classification: &[RoleConfidence]) -> Vec<ReadinessScore> {
    classification
        .iter()
        .map(|c| ReadinessScore {
            role: c.role.clone(),
            score: readiness(c.confidence),
        })
        .collect()
}

fn readiness(confidence: f64) -> u32 {
    if !confidence.is_finite() {
        return 0;
    }
    let confidence = confidence.clamp(0.0, 100.0);
    // Rounding can overshoot for confidences below 5 (e.g. 0.6 → 1); cap at the
    // confidence's integer part.
    (confidence * READINESS_FACTOR).round().min(confidence.floor()) as u32
}
