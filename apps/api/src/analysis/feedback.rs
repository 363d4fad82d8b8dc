//! Strength statements and improvement suggestions, selected by score tier.

use crate::catalog::TieredList;

/// Fixed-order prefix of the strengths list: 6 above 80, 4 above 70, else 3
/// with the built-in tiers.
pub fn generate_strengths(strengths: &TieredList, score: u32) -> Vec<String> {
    strengths.prefix_for(score).to_vec()
}

/// Fixed-order prefix of the suggestion templates with `{role}` and
/// `{company}` filled in. Blank values render as empty segments.
pub fn generate_suggestions(
    suggestions: &TieredList,
    score: u32,
    company: &str,
    role: &str,
) -> Vec<String> {
    suggestions
        .prefix_for(score)
        .iter()
        .map(|template| template.replace("{role}", role).replace("{company}", company))
        .collect()
}
