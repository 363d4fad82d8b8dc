//! Turns a job target into an `AnalysisResult`.
//!
//! Pure over `(description, company, role)`, the scoring catalog and the
//! caller's RNG (used only for section sub-scores). No I/O.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::feedback::{generate_strengths, generate_suggestions};
use crate::analysis::keywords::extract_keywords;
use crate::analysis::scoring::{calculate_score, draw_section_scores, ScoreRating, SectionScores};
use crate::catalog::ScoringCatalog;

/// The job being targeted. Company and role may be blank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobTarget {
    pub description: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub ats_score: u32,
    pub rating: ScoreRating,
    pub headline: String,
    /// First detected keywords, catalog order.
    pub keywords: Vec<String>,
    /// Positions 10..15 of the *detected* list, not the catalog complement.
    pub missing_keywords: Vec<String>,
    pub strengths: Vec<String>,
    pub suggestions: Vec<String>,
    pub section_scores: SectionScores,
}

pub struct ResumeScoringEngine<'a> {
    scoring: &'a ScoringCatalog,
}

impl<'a> ResumeScoringEngine<'a> {
    pub fn new(scoring: &'a ScoringCatalog) -> Self {
        Self { scoring }
    }

    pub fn extract_keywords(&self, text: &str) -> Vec<String> {
        extract_keywords(&self.scoring.keywords, text)
    }

    pub fn calculate_score(&self, keywords: &[String], text: &str) -> u32 {
        calculate_score(&self.scoring.policy, keywords.len(), text)
    }

    pub fn generate_strengths(&self, score: u32) -> Vec<String> {
        generate_strengths(&self.scoring.strengths, score)
    }

    pub fn generate_suggestions(&self, score: u32, company: &str, role: &str) -> Vec<String> {
        generate_suggestions(&self.scoring.suggestions, score, company, role)
    }

    pub fn analyze<R: Rng + ?Sized>(&self, target: &JobTarget, rng: &mut R) -> AnalysisResult {
        let detected = self.extract_keywords(&target.description);
        let ats_score = self.calculate_score(&detected, &target.description);
        let rating = ScoreRating::for_score(ats_score);

        debug!(
            detected = detected.len(),
            ats_score,
            text_chars = target.description.chars().count(),
            "Resume analysis scored"
        );

        let [start, end] = self.scoring.missing_keyword_window;
        AnalysisResult {
            ats_score,
            rating,
            headline: rating.headline().to_string(),
            keywords: window(&detected, 0, self.scoring.found_keyword_limit),
            missing_keywords: window(&detected, start, end),
            strengths: self.generate_strengths(ats_score),
            suggestions: self.generate_suggestions(ats_score, &target.company, &target.role),
            section_scores: draw_section_scores(&self.scoring.section_bands, rng),
        }
    }
}

/// `items[start..end]`, clamped to the list length.
fn window(items: &[String], start: usize, end: usize) -> Vec<String> {
    let end = end.min(items.len());
    let start = start.min(end);
    items[start..end].to_vec()
}
