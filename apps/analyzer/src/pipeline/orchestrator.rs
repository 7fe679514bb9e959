//! Pipeline Orchestrator: drives one analysis run per submitted document.
//!
//! Flow:
//!   1. Parse     (fatal)
//!   2. Classify  (fatal)
//!   3. Skill-Gap ∥ ATS-Score  (both non-fatal, joined; only with a top role and skills)
//!   4. Readiness from classification
//!   5. Aggregate into the final report
//!
//! Callers always get an `AnalysisReport` back. A fatal stage yields the error-report
//! variant and a `failed` status instead of an error.
//!
//! Observable state lives in a `watch` channel. Every write is gated on the run being
//! the most recently initiated one, so a slow superseded run can finish but never
//! publish over a newer run. Superseded runs are not aborted; their completion is
//! simply ignored.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;
use tracing::{error, info, info_span, warn, Instrument};

use crate::config::PipelineConfig;
use crate::models::{AnalysisReport, Document, ParsedDocument};
use crate::pipeline::aggregator::{aggregate, normalize_parsed};
use crate::pipeline::readiness::readiness_scores;
use crate::pipeline::PipelineError;
use crate::services::{AtsResponse, ServiceClients, ServiceError, SkillGapResponse};

/// Sent to the ATS scorer when the caller supplies no job description. Never empty,
/// since scoring against an empty description is degenerate.
pub const DEFAULT_JOB_DESCRIPTION: &str = "Looking for a skilled professional with experience in software development and problem-solving abilities.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Idle,
    Running,
    Succeeded,
    Failed,
}

/// What observers see: the state of the most recently initiated run.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineSnapshot {
    /// 0 until the first run starts.
    pub run_id: u64,
    pub status: RunStatus,
    pub last_error: Option<String>,
    pub file_name: Option<String>,
    pub report: Option<AnalysisReport>,
    pub updated_at: DateTime<Utc>,
}

impl PipelineSnapshot {
    fn idle() -> Self {
        Self {
            run_id: 0,
            status: RunStatus::Idle,
            last_error: None,
            file_name: None,
            report: None,
            updated_at: Utc::now(),
        }
    }
}

pub struct Orchestrator {
    clients: ServiceClients,
    latest_run: AtomicU64,
    state: watch::Sender<PipelineSnapshot>,
}

impl Orchestrator {
    pub fn new(clients: ServiceClients) -> Self {
        let (state, _) = watch::channel(PipelineSnapshot::idle());
        Self {
            clients,
            latest_run: AtomicU64::new(0),
            state,
        }
    }

    /// Builds the HTTP clients for all four services from the configured base address.
    pub fn from_config(config: &PipelineConfig) -> Result<Self, ServiceError> {
        Ok(Self::new(ServiceClients::http(config)?))
    }

    pub fn snapshot(&self) -> PipelineSnapshot {
        self.state.borrow().clone()
    }

    // Change feed for in-process observers; the HTTP surface polls `snapshot` instead.
    #[allow(dead_code)]
    pub fn subscribe(&self) -> watch::Receiver<PipelineSnapshot> {
        self.state.subscribe()
    }

    /// Runs the full pipeline for one document. Never fails: fatal stage errors
    /// produce the error-report variant.
    ///
    /// A blank or absent `job_description` falls back to [`DEFAULT_JOB_DESCRIPTION`].
    pub async fn run_analysis(
        &self,
        document: &Document,
        job_description: Option<&str>,
    ) -> AnalysisReport {
        let run_id = self.latest_run.fetch_add(1, Ordering::SeqCst) + 1;
        let file_name = document.name().to_string();

        self.publish(run_id, |snapshot| {
            snapshot.status = RunStatus::Running;
            snapshot.last_error = None;
            snapshot.file_name = Some(file_name.clone());
            snapshot.report = None;
        });

        let span = info_span!("analysis", run_id, file = %file_name);
        let outcome = self
            .execute(document, job_description)
            .instrument(span.clone())
            .await;
        let _guard = span.enter();

        match outcome {
            Ok(report) => {
                info!(
                    "Analysis complete: {} roles, {} skill gaps, ATS {}",
                    report.classifications.len(),
                    report.skill_gaps.len(),
                    report.ats_score
                );
                let published = self.publish(run_id, |snapshot| {
                    snapshot.status = RunStatus::Succeeded;
                    snapshot.report = Some(report.clone());
                });
                if !published {
                    info!("Run superseded by a newer analysis; result not published");
                }
                report
            }
            Err(err) => {
                error!("Analysis aborted: {err}");
                let report = AnalysisReport::failed(file_name);
                let published = self.publish(run_id, |snapshot| {
                    snapshot.status = RunStatus::Failed;
                    snapshot.last_error = Some(err.to_string());
                    snapshot.report = Some(report.clone());
                });
                if !published {
                    info!("Run superseded by a newer analysis; failure not published");
                }
                report
            }
        }
    }

    async fn execute(
        &self,
        document: &Document,
        job_description: Option<&str>,
    ) -> Result<AnalysisReport, PipelineError> {
        info!("Analysis started ({} bytes)", document.len());

        let raw = self
            .clients
            .parser
            .parse(document)
            .await
            .map_err(PipelineError::Parse)?;
        let parsed = normalize_parsed(raw);

        let classification = self
            .clients
            .classifier
            .classify(&parsed.text)
            .await
            .map_err(PipelineError::Classify)?;

        let (skill_gap, ats) = match classification.first() {
            Some(top) if !parsed.skills.is_empty() => {
                self.optional_stages(&top.role, &parsed, job_description)
                    .await
            }
            Some(_) => {
                info!("No skills parsed; skipping skill-gap and ATS stages");
                (None, None)
            }
            None => {
                info!("No role classified; skipping skill-gap and ATS stages");
                (None, None)
            }
        };

        let readiness = readiness_scores(&classification);

        Ok(aggregate(
            document,
            parsed,
            classification,
            skill_gap,
            ats,
            readiness,
        ))
    }

    /// Issues Skill-Gap and ATS-Score together and waits for both. Either failing
    /// degrades to `None`; neither aborts the run.
    async fn optional_stages(
        &self,
        role: &str,
        parsed: &ParsedDocument,
        job_description: Option<&str>,
    ) -> (Option<SkillGapResponse>, Option<AtsResponse>) {
        let job_description = job_description
            .map(str::trim)
            .filter(|jd| !jd.is_empty())
            .unwrap_or(DEFAULT_JOB_DESCRIPTION);

        let (skill_gap, ats) = tokio::join!(
            self.clients.skill_gap.analyze(role, &parsed.skills),
            self.clients.ats.score(&parsed.text, job_description),
        );

        let skill_gap = skill_gap
            .map_err(|e| warn!("Skill-gap analysis failed, continuing without it: {e}"))
            .ok();
        let ats = ats
            .map_err(|e| warn!("ATS scoring failed, using default values: {e}"))
            .ok();

        (skill_gap, ats)
    }

    /// Applies `update` only if `run_id` is still the latest initiated run. The check
    /// and the write happen under the channel's lock.
    fn publish(&self, run_id: u64, update: impl FnOnce(&mut PipelineSnapshot)) -> bool {
        self.state.send_if_modified(|snapshot| {
            if self.latest_run.load(Ordering::SeqCst) != run_id {
                return false;
            }
            update(snapshot);
            snapshot.run_id = run_id;
            snapshot.updated_at = Utc::now();
            true
        })
    }
}
