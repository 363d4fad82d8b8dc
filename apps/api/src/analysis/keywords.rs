//! Keyword detection against the catalog's fixed term list.

/// Returns every catalog term that occurs in `text` as a case-insensitive
/// substring, in catalog order. Each term appears at most once.
pub fn extract_keywords(catalog_terms: &[String], text: &str) -> Vec<String> {
    let text_lower = text.to_lowercase();
    catalog_terms
        .iter()
        .filter(|term| text_lower.contains(&term.to_lowercase()))
        .cloned()
        .collect()
}
