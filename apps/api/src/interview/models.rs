use std::fmt;

use serde::{Deserialize, Serialize};

/// Partition of the question bank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    #[default]
    Behavioral,
    Technical,
    Situational,
    CompanySpecific,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Behavioral,
        Category::Technical,
        Category::Situational,
        Category::CompanySpecific,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Behavioral => "behavioral",
            Category::Technical => "technical",
            Category::Situational => "situational",
            Category::CompanySpecific => "company-specific",
        }
    }

    /// Label shown on the category picker.
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Behavioral => "Behavioral",
            Category::Technical => "Technical",
            Category::Situational => "Situational",
            Category::CompanySpecific => "Company",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Immutable question bank entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewQuestion {
    pub id: String,
    pub question: String,
    pub category: Category,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub tips: Vec<String>,
}

/// Formats elapsed seconds as `m:ss` for the timer display.
pub fn format_elapsed(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
