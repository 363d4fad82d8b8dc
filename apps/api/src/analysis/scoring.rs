//! ATS score heuristics.
//!
//! The overall score is a deterministic function of the detected keyword
//! count and the text length, capped below 100. Section sub-scores are
//! independent random draws from fixed bands; they are not derived from the
//! overall score.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::{ScoreBand, ScorePolicy, SectionBands};

/// `min(base + min(per_keyword × n, keyword_cap) + length_bonus, max_score)`.
///
/// Length is measured in characters; texts longer than
/// `long_text_threshold` earn the long bonus, all others the short one.
pub fn calculate_score(policy: &ScorePolicy, keyword_count: usize, text: &str) -> u32 {
    let keyword_bonus = policy
        .per_keyword
        .saturating_mul(u32::try_from(keyword_count).unwrap_or(u32::MAX))
        .min(policy.keyword_cap);
    let length_bonus = if text.chars().count() > policy.long_text_threshold {
        policy.long_text_bonus
    } else {
        policy.short_text_bonus
    };
    policy
        .base
        .saturating_add(keyword_bonus)
        .saturating_add(length_bonus)
        .min(policy.max_score)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionScores {
    pub formatting: u32,
    pub keywords: u32,
    pub experience: u32,
    pub skills: u32,
    pub education: u32,
}

/// Draws each section score uniformly from its inclusive band.
pub fn draw_section_scores<R: Rng + ?Sized>(bands: &SectionBands, rng: &mut R) -> SectionScores {
    SectionScores {
        formatting: draw(bands.formatting, rng),
        keywords: draw(bands.keywords, rng),
        experience: draw(bands.experience, rng),
        skills: draw(bands.skills, rng),
        education: draw(bands.education, rng),
    }
}

fn draw<R: Rng + ?Sized>(band: ScoreBand, rng: &mut R) -> u32 {
    rng.gen_range(band.min..=band.max)
}

/// Presentation band for any 0–100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreRating {
    Excellent,
    Good,
    NeedsWork,
}

impl ScoreRating {
    pub fn for_score(score: u32) -> Self {
        if score >= 80 {
            ScoreRating::Excellent
        } else if score >= 60 {
            ScoreRating::Good
        } else {
            ScoreRating::NeedsWork
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            ScoreRating::Excellent => "Excellent! Your resume is well-optimized for ATS systems.",
            ScoreRating::Good => "Good foundation, but there's room for improvement.",
            ScoreRating::NeedsWork => "Your resume needs significant optimization for ATS compatibility.",
        }
    }
}
