//! Substring dispatch from user text to a canned reply.

use serde::Serialize;

use crate::catalog::ChatCatalog;

pub const DEFAULT_TOPIC: &str = "default";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoutedReply<'a> {
    pub topic: &'a str,
    pub body: &'a str,
}

pub struct ChatRouter<'a> {
    catalog: &'a ChatCatalog,
}

impl<'a> ChatRouter<'a> {
    pub fn new(catalog: &'a ChatCatalog) -> Self {
        Self { catalog }
    }

    /// Lower-cases `user_text` and returns the reply of the first rule with a
    /// trigger contained in it, or the default overview reply.
    pub fn respond(&self, user_text: &str) -> RoutedReply<'a> {
        let catalog = self.catalog;
        let lower = user_text.to_lowercase();
        catalog
            .rules
            .iter()
            .find(|rule| rule.triggers.iter().any(|t| lower.contains(t.as_str())))
            .map(|rule| RoutedReply {
                topic: &rule.topic,
                body: &rule.reply,
            })
            .unwrap_or(RoutedReply {
                topic: DEFAULT_TOPIC,
                body: &catalog.default_reply,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn topic_for(text: &str) -> String {
        let catalog = Catalog::builtin().unwrap();
        ChatRouter::new(&catalog.chat).respond(text).topic.to_string()
    }

    #[test]
    fn test_each_topic_routes() {
        assert_eq!(topic_for("Can you review my resume?"), "resume");
        assert_eq!(topic_for("Is my CV too long"), "resume");
        assert_eq!(topic_for("interview tips please"), "interview");
        assert_eq!(topic_for("help with preparation"), "interview");
        assert_eq!(topic_for("What should I learn next?"), "skills");
        assert_eq!(topic_for("how do I find job leads"), "job-search");
        assert_eq!(topic_for("Career change advice"), "job-search");
        assert_eq!(topic_for("How do I negotiate an offer"), "salary");
        assert_eq!(topic_for("hello there"), DEFAULT_TOPIC);
    }

    #[test]
    fn test_resume_wins_over_interview() {
        assert_eq!(topic_for("Should I bring my resume to the interview?"), "resume");
    }

    #[test]
    fn test_priority_follows_rule_order() {
        // "develop" (skills) outranks "career" (job search) and "salary".
        assert_eq!(topic_for("develop my career and salary"), "skills");
        // "interview" outranks "salary".
        assert_eq!(topic_for("salary questions in an interview"), "interview");
    }

    #[test]
    fn test_matching_is_case_insensitive_substring() {
        assert_eq!(topic_for("RESUMES"), "resume");
        assert_eq!(topic_for("Skills gap"), "skills");
    }

    #[test]
    fn test_reply_bodies_come_from_catalog() {
        let catalog = Catalog::builtin().unwrap();
        let router = ChatRouter::new(&catalog.chat);
        let reply = router.respond("resume");
        assert!(reply.body.starts_with("Great question about resumes!"));
        let fallback = router.respond("?");
        assert_eq!(fallback.body, catalog.chat.default_reply);
    }
}
