//! Static content catalog: keyword list, score policy, strength/suggestion
//! tables, question bank and chat templates.
//!
//! Loaded once at startup from TOML (built-in `catalog/default.toml`, or the
//! file named by `CATALOG_PATH`) and shared read-only through `AppState`.
//! `validate` rejects anything the engines would otherwise trip over at
//! request time, so a bad catalog stops the process before it binds a port.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::interview::models::{Category, InterviewQuestion};

const BUILTIN_CATALOG: &str = include_str!("../../catalog/default.toml");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid catalog: {0}")]
    Invalid(String),

    #[error("No interview questions configured for category '{0}'")]
    EmptyCategory(Category),
}

// ────────────────────────────────────────────────────────────────────────────
// Catalog tables
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub version: u32,
    pub scoring: ScoringCatalog,
    pub interview: InterviewCatalog,
    pub chat: ChatCatalog,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringCatalog {
    /// Known industry/tech terms, in the order results are reported.
    pub keywords: Vec<String>,
    /// How many detected keywords are reported as "found".
    pub found_keyword_limit: usize,
    /// `[start, end)` slice of the detected list reported as "missing".
    pub missing_keyword_window: [usize; 2],
    pub policy: ScorePolicy,
    pub section_bands: SectionBands,
    pub strengths: TieredList,
    pub suggestions: TieredList,
}

/// Upper bound for every score the catalog can produce.
pub const SCORE_CEILING: u32 = 100;

/// Constants of the overall ATS score formula.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorePolicy {
    pub base: u32,
    pub per_keyword: u32,
    pub keyword_cap: u32,
    /// Texts strictly longer than this (in characters) get `long_text_bonus`.
    pub long_text_threshold: usize,
    pub long_text_bonus: u32,
    pub short_text_bonus: u32,
    pub max_score: u32,
}

/// Inclusive range a section sub-score is drawn from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreBand {
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionBands {
    pub formatting: ScoreBand,
    pub keywords: ScoreBand,
    pub experience: ScoreBand,
    pub skills: ScoreBand,
    pub education: ScoreBand,
}

impl SectionBands {
    fn named(&self) -> [(&'static str, ScoreBand); 5] {
        [
            ("formatting", self.formatting),
            ("keywords", self.keywords),
            ("experience", self.experience),
            ("skills", self.skills),
            ("education", self.education),
        ]
    }
}

/// A score threshold: scores strictly above `above` take `count` items.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tier {
    pub above: u32,
    pub count: usize,
}

/// A fixed-order list from which a score-dependent prefix is taken.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TieredList {
    pub items: Vec<String>,
    /// Highest threshold first; the first tier the score clears wins.
    pub tiers: Vec<Tier>,
    pub default_count: usize,
}

impl TieredList {
    pub fn count_for(&self, score: u32) -> usize {
        self.tiers
            .iter()
            .find(|tier| score > tier.above)
            .map(|tier| tier.count)
            .unwrap_or(self.default_count)
    }

    pub fn prefix_for(&self, score: u32) -> &[String] {
        let count = self.count_for(score).min(self.items.len());
        &self.items[..count]
    }

    fn validate(&self, name: &str) -> Result<(), CatalogError> {
        let largest = self
            .tiers
            .iter()
            .map(|t| t.count)
            .chain(std::iter::once(self.default_count))
            .max()
            .unwrap_or(0);
        if largest > self.items.len() {
            return Err(CatalogError::Invalid(format!(
                "{name}: a tier selects {largest} items but only {} exist",
                self.items.len()
            )));
        }
        if self.tiers.windows(2).any(|w| w[0].above <= w[1].above) {
            return Err(CatalogError::Invalid(format!(
                "{name}: tiers must be listed highest threshold first"
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewCatalog {
    pub questions: Vec<InterviewQuestion>,
}

impl InterviewCatalog {
    /// Questions of one category, in catalog order.
    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &InterviewQuestion> {
        self.questions.iter().filter(move |q| q.category == category)
    }

    pub fn count_in(&self, category: Category) -> usize {
        self.in_category(category).count()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCatalog {
    pub greeting: String,
    pub default_reply: String,
    /// Priority order: the first rule with a matching trigger answers.
    pub rules: Vec<ChatRule>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRule {
    pub topic: String,
    /// Lower-case substrings looked for in the lower-cased message.
    pub triggers: Vec<String>,
    pub reply: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Loading + validation
// ────────────────────────────────────────────────────────────────────────────

impl Catalog {
    /// Loads the catalog from `path`, or the built-in one when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                Self::from_toml_str(&raw)
            }
            None => Self::builtin(),
        }
    }

    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = toml::from_str(raw)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        self.validate_scoring()?;
        self.validate_interview()?;
        self.validate_chat()
    }

    fn validate_scoring(&self) -> Result<(), CatalogError> {
        let scoring = &self.scoring;
        let mut seen = HashSet::new();
        for keyword in &scoring.keywords {
            if keyword.trim().is_empty() {
                return Err(CatalogError::Invalid("blank keyword".to_string()));
            }
            if !seen.insert(keyword.to_lowercase()) {
                return Err(CatalogError::Invalid(format!("duplicate keyword '{keyword}'")));
            }
        }

        let [start, end] = scoring.missing_keyword_window;
        if start > end {
            return Err(CatalogError::Invalid(format!(
                "missing_keyword_window [{start}, {end}] is inverted"
            )));
        }

        let policy = &scoring.policy;
        if policy.max_score > SCORE_CEILING {
            return Err(CatalogError::Invalid(format!(
                "max_score {} exceeds {SCORE_CEILING}",
                policy.max_score
            )));
        }
        let widest_bonus = policy.long_text_bonus.max(policy.short_text_bonus);
        if policy
            .base
            .checked_add(policy.keyword_cap)
            .and_then(|sum| sum.checked_add(widest_bonus))
            .is_none()
        {
            return Err(CatalogError::Invalid(
                "score policy base + keyword_cap + length bonus overflows".to_string(),
            ));
        }

        for (name, band) in scoring.section_bands.named() {
            if band.max > SCORE_CEILING {
                return Err(CatalogError::Invalid(format!(
                    "section band '{name}' max {} exceeds {SCORE_CEILING}",
                    band.max
                )));
            }
            if band.min > band.max {
                return Err(CatalogError::Invalid(format!(
                    "section band '{name}' has min {} above max {}",
                    band.min, band.max
                )));
            }
        }

        scoring.strengths.validate("strengths")?;
        scoring.suggestions.validate("suggestions")
    }

    fn validate_interview(&self) -> Result<(), CatalogError> {
        let mut ids = HashSet::new();
        for question in &self.interview.questions {
            if !ids.insert(question.id.as_str()) {
                return Err(CatalogError::Invalid(format!(
                    "duplicate question id '{}'",
                    question.id
                )));
            }
        }
        for category in Category::ALL {
            if self.interview.count_in(category) == 0 {
                return Err(CatalogError::EmptyCategory(category));
            }
        }
        Ok(())
    }

    fn validate_chat(&self) -> Result<(), CatalogError> {
        for rule in &self.chat.rules {
            if rule.triggers.is_empty() {
                return Err(CatalogError::Invalid(format!(
                    "chat rule '{}' has no triggers",
                    rule.topic
                )));
            }
            if let Some(bad) = rule.triggers.iter().find(|t| **t != t.to_lowercase()) {
                return Err(CatalogError::Invalid(format!(
                    "chat trigger '{bad}' must be lower-case"
                )));
            }
        }
        Ok(())
    }
}
