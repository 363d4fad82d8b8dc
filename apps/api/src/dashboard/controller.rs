//! Owns navigation and the analyzer wizard.
//!
//! Wizard: upload (step 1) → job details (step 2) → analysis (step 3).
//! Submitting a job target schedules the analysis after a simulated delay;
//! every submission and every reset bumps `generation`, so a delayed result
//! from before a reset is discarded instead of resurrecting old state.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::analysis::engine::{AnalysisResult, JobTarget, ResumeScoringEngine};
use crate::catalog::Catalog;
use crate::dashboard::upload::ResumeFile;
use crate::errors::AppError;

pub type SharedDashboard = Arc<Mutex<DashboardController>>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    #[default]
    Home,
    Analyzer,
    Interview,
    CareerResources,
}

#[derive(Debug, Clone)]
pub enum AnalyzerState {
    AwaitingResume,
    AwaitingJobTarget {
        resume: ResumeFile,
    },
    Analyzing {
        resume: ResumeFile,
        target: JobTarget,
        generation: u64,
    },
    Ready {
        resume: ResumeFile,
        target: JobTarget,
        result: AnalysisResult,
    },
}

impl AnalyzerState {
    pub fn step(&self) -> u8 {
        match self {
            AnalyzerState::AwaitingResume => 1,
            AnalyzerState::AwaitingJobTarget { .. } => 2,
            AnalyzerState::Analyzing { .. } | AnalyzerState::Ready { .. } => 3,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            AnalyzerState::AwaitingResume => "awaiting_resume",
            AnalyzerState::AwaitingJobTarget { .. } => "awaiting_job_target",
            AnalyzerState::Analyzing { .. } => "analyzing",
            AnalyzerState::Ready { .. } => "ready",
        }
    }

    fn resume(&self) -> Option<&ResumeFile> {
        match self {
            AnalyzerState::AwaitingResume => None,
            AnalyzerState::AwaitingJobTarget { resume }
            | AnalyzerState::Analyzing { resume, .. }
            | AnalyzerState::Ready { resume, .. } => Some(resume),
        }
    }

    fn target(&self) -> Option<&JobTarget> {
        match self {
            AnalyzerState::Analyzing { target, .. } | AnalyzerState::Ready { target, .. } => {
                Some(target)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub section: Section,
    pub step: u8,
    pub state: &'static str,
    pub resume_file_name: Option<String>,
    pub job: Option<JobTarget>,
    pub analyzing: bool,
    pub analysis: Option<AnalysisResult>,
    /// The analyzer's follow-up chat opens once a result is on screen.
    pub chat_unlocked: bool,
}

pub struct DashboardController {
    section: Section,
    analyzer: AnalyzerState,
    generation: u64,
}

impl Default for DashboardController {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardController {
    pub fn new() -> Self {
        Self {
            section: Section::default(),
            analyzer: AnalyzerState::AwaitingResume,
            generation: 0,
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn navigate(&mut self, section: Section) {
        debug!(?section, "Dashboard section changed");
        self.section = section;
    }

    pub fn analyzer(&self) -> &AnalyzerState {
        &self.analyzer
    }

    /// Accepts a validated upload and moves to the job details step.
    /// A different file may be chosen while still on step 2.
    pub fn accept_resume(&mut self, resume: ResumeFile) -> Result<(), AppError> {
        match self.analyzer {
            AnalyzerState::AwaitingResume | AnalyzerState::AwaitingJobTarget { .. } => {
                info!(file = %resume.file_name, "Resume accepted");
                self.analyzer = AnalyzerState::AwaitingJobTarget { resume };
                Ok(())
            }
            _ => Err(AppError::Conflict(
                "Reset the analysis before uploading another resume".to_string(),
            )),
        }
    }

    /// Moves to step 3 and returns the generation the pending result must
    /// carry to be accepted.
    pub fn begin_analysis(&mut self, target: JobTarget) -> Result<u64, AppError> {
        let resume = match &self.analyzer {
            AnalyzerState::AwaitingJobTarget { resume } => resume.clone(),
            AnalyzerState::AwaitingResume => {
                return Err(AppError::Conflict("Upload a resume first".to_string()))
            }
            _ => {
                return Err(AppError::Conflict(
                    "An analysis has already been submitted; reset to start over".to_string(),
                ))
            }
        };

        self.generation += 1;
        info!(generation = self.generation, "Resume analysis scheduled");
        self.analyzer = AnalyzerState::Analyzing {
            resume,
            target,
            generation: self.generation,
        };
        Ok(self.generation)
    }

    /// Installs a finished result. Returns `false` when it belongs to an
    /// analysis that was reset or superseded.
    pub fn finish_analysis(&mut self, generation: u64, result: AnalysisResult) -> bool {
        let current = std::mem::replace(&mut self.analyzer, AnalyzerState::AwaitingResume);
        match current {
            AnalyzerState::Analyzing {
                resume,
                target,
                generation: pending,
            } if pending == generation => {
                info!(generation, ats_score = result.ats_score, "Resume analysis ready");
                self.analyzer = AnalyzerState::Ready {
                    resume,
                    target,
                    result,
                };
                true
            }
            other => {
                debug!(generation, current = self.generation, "Discarding stale analysis result");
                self.analyzer = other;
                false
            }
        }
    }

    /// Back to step 1. Any analysis still in flight becomes stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.analyzer = AnalyzerState::AwaitingResume;
        info!(generation = self.generation, "Analyzer reset");
    }

    pub fn view(&self) -> DashboardView {
        let analyzer = self.analyzer();
        let analysis = match analyzer {
            AnalyzerState::Ready { result, .. } => Some(result.clone()),
            _ => None,
        };
        DashboardView {
            section: self.section(),
            step: analyzer.step(),
            state: analyzer.name(),
            resume_file_name: analyzer.resume().map(|r| r.file_name.clone()),
            job: analyzer.target().cloned(),
            analyzing: matches!(analyzer, AnalyzerState::Analyzing { .. }),
            chat_unlocked: analysis.is_some(),
            analysis,
        }
    }
}

/// Computes the analysis after `delay` and hands it to the controller under
/// `generation`.
pub fn spawn_analysis(
    dashboard: SharedDashboard,
    catalog: Arc<Catalog>,
    rng: Arc<Mutex<StdRng>>,
    generation: u64,
    target: JobTarget,
    delay: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let result = {
            let mut rng = rng.lock().await;
            ResumeScoringEngine::new(&catalog.scoring).analyze(&target, &mut *rng)
        };
        dashboard.lock().await.finish_analysis(generation, result);
    })
}
