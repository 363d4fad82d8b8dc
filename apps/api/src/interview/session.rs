//! Mock interview session state machine.
//!
//! Phases: `Idle` (no question) → `QuestionActive` (timer running) →
//! `QuestionCompleted` (timer stopped) → `QuestionActive` on the next draw.
//! `reset` returns to `Idle` from anywhere.
//!
//! Draws never repeat a question that is in the completed set. When every
//! question of the category has been completed the set is cleared (all
//! categories, not just this one) and the category's first catalog entry is
//! returned without consulting the RNG.
//!
//! The session itself is synchronous; the once-per-second tick is driven by
//! `interview::timer`, which holds a cancellation token registered here.

use std::collections::BTreeSet;
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::catalog::{Catalog, CatalogError};
use crate::interview::models::{format_elapsed, Category, InterviewQuestion};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("A question is already in progress; complete it before starting another")]
    QuestionInProgress,

    #[error("No interview question is active")]
    NoActiveQuestion,

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Idle,
    QuestionActive,
    QuestionCompleted,
}

/// Serializable snapshot handed to the UI.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub selected_category: Category,
    pub phase: SessionPhase,
    pub current_question: Option<InterviewQuestion>,
    pub elapsed_seconds: u64,
    pub elapsed_display: String,
    pub timer_running: bool,
    pub completed_count: usize,
    pub completed_question_ids: Vec<String>,
    pub recording: bool,
    pub answer: String,
}

pub struct InterviewSession {
    catalog: Arc<Catalog>,
    selected_category: Category,
    /// Index into `catalog.interview.questions`.
    current: Option<usize>,
    completed: BTreeSet<String>,
    elapsed_seconds: u64,
    timer_running: bool,
    /// Bumped whenever the timer stops; ticks carrying an older epoch are dropped.
    timer_epoch: u64,
    ticker: Option<CancellationToken>,
    recording: bool,
    answer: String,
}

impl InterviewSession {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            selected_category: Category::default(),
            current: None,
            completed: BTreeSet::new(),
            elapsed_seconds: 0,
            timer_running: false,
            timer_epoch: 0,
            ticker: None,
            recording: false,
            answer: String::new(),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        match (self.current, self.timer_running) {
            (None, _) => SessionPhase::Idle,
            (Some(_), true) => SessionPhase::QuestionActive,
            (Some(_), false) => SessionPhase::QuestionCompleted,
        }
    }

    pub fn selected_category(&self) -> Category {
        self.selected_category
    }

    pub fn current_question(&self) -> Option<&InterviewQuestion> {
        self.current.map(|i| &self.catalog.interview.questions[i])
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub fn timer_running(&self) -> bool {
        self.timer_running
    }

    pub fn timer_epoch(&self) -> u64 {
        self.timer_epoch
    }

    pub fn is_completed(&self, question_id: &str) -> bool {
        self.completed.contains(question_id)
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// Changes the category used by the next draw. The current question and
    /// timer are left alone.
    pub fn select_category(&mut self, category: Category) {
        self.selected_category = category;
    }

    /// Draws from the selected category, refusing while a question is still
    /// being timed.
    pub fn start_question<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<&InterviewQuestion, SessionError> {
        if self.timer_running {
            return Err(SessionError::QuestionInProgress);
        }
        self.draw_question(self.selected_category, rng)
    }

    /// Picks the next question of `category`, makes it current and restarts
    /// the timer from zero.
    pub fn draw_question<R: Rng + ?Sized>(
        &mut self,
        category: Category,
        rng: &mut R,
    ) -> Result<&InterviewQuestion, SessionError> {
        let index = self.pick(category, rng)?;

        self.stop_timer();
        self.current = Some(index);
        self.answer.clear();
        self.elapsed_seconds = 0;
        self.timer_running = true;

        let question = &self.catalog.interview.questions[index];
        info!(question_id = %question.id, %category, "Interview question started");
        Ok(question)
    }

    fn pick<R: Rng + ?Sized>(&mut self, category: Category, rng: &mut R) -> Result<usize, SessionError> {
        let questions = &self.catalog.interview.questions;
        let available: Vec<usize> = questions
            .iter()
            .enumerate()
            .filter(|(_, q)| q.category == category && !self.is_completed(&q.id))
            .map(|(i, _)| i)
            .collect();

        if let Some(&index) = available.choose(rng) {
            return Ok(index);
        }

        let first = questions
            .iter()
            .position(|q| q.category == category)
            .ok_or(CatalogError::EmptyCategory(category))?;
        info!(
            %category,
            cleared = self.completed.len(),
            "Category exhausted, clearing completed questions"
        );
        self.completed.clear();
        Ok(first)
    }

    /// Marks the current question done and stops the timer. Completing an
    /// already-completed question changes nothing.
    pub fn complete_question(&mut self) -> Result<(), SessionError> {
        let index = self.current.ok_or(SessionError::NoActiveQuestion)?;
        let id = self.catalog.interview.questions[index].id.clone();
        self.stop_timer();
        info!(question_id = %id, elapsed = self.elapsed_seconds, "Interview question completed");
        self.completed.insert(id);
        Ok(())
    }

    /// One second of wall-clock time. Ignored while the timer is stopped.
    pub fn tick(&mut self) {
        if self.timer_running {
            self.elapsed_seconds += 1;
        }
    }

    /// Applies a tick from the ticker started at `epoch`. Returns `false`
    /// once that ticker is stale and should exit.
    pub fn tick_for(&mut self, epoch: u64) -> bool {
        if epoch != self.timer_epoch || !self.timer_running {
            return false;
        }
        self.tick();
        true
    }

    /// Registers the cancellation token of the ticker driving the current
    /// question. A previously attached ticker is cancelled.
    pub fn attach_ticker(&mut self, token: CancellationToken) {
        if let Some(previous) = self.ticker.replace(token) {
            previous.cancel();
        }
    }

    fn stop_timer(&mut self) {
        self.timer_running = false;
        self.timer_epoch += 1;
        if let Some(token) = self.ticker.take() {
            token.cancel();
            debug!(epoch = self.timer_epoch, "Interview ticker cancelled");
        }
    }

    /// Stores the optional typed answer for the current question.
    pub fn record_answer(&mut self, answer: String) -> Result<(), SessionError> {
        if self.current.is_none() {
            return Err(SessionError::NoActiveQuestion);
        }
        self.answer = answer;
        Ok(())
    }

    pub fn toggle_recording(&mut self) -> bool {
        self.recording = !self.recording;
        self.recording
    }

    /// Back to `Idle`: question, timer, completed set, answer and recording
    /// flag are cleared. The selected category is kept.
    pub fn reset(&mut self) {
        self.stop_timer();
        self.current = None;
        self.elapsed_seconds = 0;
        self.completed.clear();
        self.answer.clear();
        self.recording = false;
        info!("Interview session reset");
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            selected_category: self.selected_category(),
            phase: self.phase(),
            current_question: self.current_question().cloned(),
            elapsed_seconds: self.elapsed_seconds(),
            elapsed_display: format_elapsed(self.elapsed_seconds()),
            timer_running: self.timer_running(),
            completed_count: self.completed_count(),
            completed_question_ids: self.completed.iter().cloned().collect(),
            recording: self.recording,
            answer: self.answer.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn session() -> InterviewSession {
        InterviewSession::new(Arc::new(Catalog::builtin().unwrap()))
    }

    /// Always yields zero, so every uniform draw lands on the first candidate.
    struct FirstPickRng;

    impl rand::RngCore for FirstPickRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            dest.fill(0);
            Ok(())
        }
    }

    #[test]
    fn test_scripted_rng_walks_behavioral_bank_in_order() {
        let mut s = session();
        let mut rng = FirstPickRng;
        let mut drawn = Vec::new();
        for _ in 0..4 {
            drawn.push(s.start_question(&mut rng).unwrap().id.clone());
            s.complete_question().unwrap();
        }
        assert_eq!(drawn, ["1", "2", "3", "8"]);

        let wrapped = s.start_question(&mut rng).unwrap().id.clone();
        assert_eq!(wrapped, "1");
        assert_eq!(s.completed_count(), 0);
    }

    #[test]
    fn test_new_session_is_idle() {
        let s = session();
        assert_eq!(s.phase(), SessionPhase::Idle);
        assert_eq!(s.selected_category(), Category::Behavioral);
        assert!(s.current_question().is_none());
        assert_eq!(s.elapsed_seconds(), 0);
        assert!(!s.timer_running());
    }

    #[test]
    fn test_draw_respects_category_and_starts_timer() {
        let mut s = session();
        let mut rng = StdRng::seed_from_u64(7);
        s.select_category(Category::Technical);
        let question = s.start_question(&mut rng).unwrap();
        assert_eq!(question.category, Category::Technical);
        assert_eq!(s.phase(), SessionPhase::QuestionActive);
        assert!(s.timer_running());
        assert_eq!(s.elapsed_seconds(), 0);
    }

    #[test]
    fn test_select_category_leaves_question_and_timer() {
        let mut s = session();
        let mut rng = StdRng::seed_from_u64(1);
        s.start_question(&mut rng).unwrap();
        s.tick();
        let before = s.current_question().cloned();

        s.select_category(Category::Situational);

        assert_eq!(s.current_question().cloned(), before);
        assert!(s.timer_running());
        assert_eq!(s.elapsed_seconds(), 1);
    }

    #[test]
    fn test_cannot_start_while_timer_running() {
        let mut s = session();
        let mut rng = StdRng::seed_from_u64(2);
        s.start_question(&mut rng).unwrap();
        assert!(matches!(
            s.start_question(&mut rng),
            Err(SessionError::QuestionInProgress)
        ));
    }

    #[test]
    fn test_complete_without_question_rejected() {
        let mut s = session();
        assert!(matches!(
            s.complete_question(),
            Err(SessionError::NoActiveQuestion)
        ));
    }

    #[test]
    fn test_complete_stops_timer_and_records_id() {
        let mut s = session();
        let mut rng = StdRng::seed_from_u64(3);
        let id = s.start_question(&mut rng).unwrap().id.clone();
        s.tick();
        s.tick();
        s.complete_question().unwrap();

        assert_eq!(s.phase(), SessionPhase::QuestionCompleted);
        assert!(!s.timer_running());
        assert!(s.is_completed(&id));
        s.tick();
        assert_eq!(s.elapsed_seconds(), 2, "ticks after completion must not count");
    }

    #[test]
    fn test_completed_questions_never_redrawn_until_exhaustion() {
        for seed in 0..50 {
            let mut s = session();
            let mut rng = StdRng::seed_from_u64(seed);
            let mut seen = Vec::new();
            // Behavioral has four questions: four draws must all differ.
            for _ in 0..4 {
                let question = s.start_question(&mut rng).unwrap();
                assert!(!seen.contains(&question.id), "seed {seed} repeated {}", question.id);
                seen.push(question.id.clone());
                s.complete_question().unwrap();
            }
            assert_eq!(s.completed_count(), 4);
        }
    }

    #[test]
    fn test_exhaustion_resets_and_returns_first_entry() {
        let mut s = session();
        let mut rng = StdRng::seed_from_u64(11);
        s.select_category(Category::Technical);

        let mut drawn = Vec::new();
        for _ in 0..2 {
            drawn.push(s.start_question(&mut rng).unwrap().id.clone());
            s.complete_question().unwrap();
        }
        drawn.sort();
        assert_eq!(drawn, vec!["4".to_string(), "5".to_string()]);

        let third = s.start_question(&mut rng).unwrap();
        assert_eq!(third.id, "4", "exhaustion fallback is the first technical entry");
        assert_eq!(s.completed_count(), 0);
    }

    #[test]
    fn test_exhaustion_clears_other_categories_too() {
        let mut s = session();
        let mut rng = StdRng::seed_from_u64(5);

        s.start_question(&mut rng).unwrap();
        s.complete_question().unwrap();
        assert_eq!(s.completed_count(), 1);

        s.select_category(Category::Situational);
        s.start_question(&mut rng).unwrap();
        s.complete_question().unwrap();
        assert_eq!(s.completed_count(), 2);

        // Situational has a single question, so the next draw exhausts it.
        let again = s.start_question(&mut rng).unwrap();
        assert_eq!(again.id, "6");
        assert_eq!(s.completed_count(), 0);
    }

    #[test]
    fn test_stale_epoch_tick_ignored() {
        let mut s = session();
        let mut rng = StdRng::seed_from_u64(9);
        s.start_question(&mut rng).unwrap();
        let epoch = s.timer_epoch();
        assert!(s.tick_for(epoch));
        s.complete_question().unwrap();
        s.start_question(&mut rng).unwrap();

        assert!(!s.tick_for(epoch), "ticker from the previous question is stale");
        assert_eq!(s.elapsed_seconds(), 0);
    }

    #[test]
    fn test_attach_ticker_cancels_previous() {
        let mut s = session();
        let first = CancellationToken::new();
        let second = CancellationToken::new();
        s.attach_ticker(first.clone());
        s.attach_ticker(second.clone());
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
    }

    #[test]
    fn test_reset_clears_everything_but_category() {
        let mut s = session();
        let mut rng = StdRng::seed_from_u64(4);
        let token = CancellationToken::new();
        s.select_category(Category::Technical);
        s.start_question(&mut rng).unwrap();
        s.attach_ticker(token.clone());
        s.tick();
        s.record_answer("REST is resource oriented".to_string()).unwrap();
        s.toggle_recording();
        s.complete_question().unwrap();

        s.reset();

        let view = s.view();
        assert_eq!(view.phase, SessionPhase::Idle);
        assert!(view.current_question.is_none());
        assert_eq!(view.elapsed_seconds, 0);
        assert!(!view.timer_running);
        assert_eq!(view.completed_count, 0);
        assert!(!view.recording);
        assert!(view.answer.is_empty());
        assert_eq!(view.selected_category, Category::Technical);
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_new_question_clears_answer() {
        let mut s = session();
        let mut rng = StdRng::seed_from_u64(6);
        s.start_question(&mut rng).unwrap();
        s.record_answer("draft".to_string()).unwrap();
        s.complete_question().unwrap();
        s.start_question(&mut rng).unwrap();
        assert!(s.view().answer.is_empty());
    }

    #[test]
    fn test_answer_requires_question() {
        let mut s = session();
        assert!(s.record_answer("hello".to_string()).is_err());
    }

    #[test]
    fn test_view_matches_accessors() {
        let mut s = session();
        let mut rng = StdRng::seed_from_u64(3);
        s.select_category(Category::Technical);
        s.start_question(&mut rng).unwrap();
        s.tick();
        s.complete_question().unwrap();

        let view = s.view();
        assert_eq!(view.selected_category, s.selected_category());
        assert_eq!(view.elapsed_seconds, s.elapsed_seconds());
        assert_eq!(view.timer_running, s.timer_running());
        assert_eq!(view.completed_count, s.completed_count());
        assert!(view.completed_question_ids.iter().all(|id| s.is_completed(id)));
        assert_eq!(view.phase, SessionPhase::QuestionCompleted);
    }

    #[test]
    fn test_view_formats_elapsed() {
        let mut s = session();
        let mut rng = StdRng::seed_from_u64(8);
        s.start_question(&mut rng).unwrap();
        for _ in 0..65 {
            s.tick();
        }
        assert_eq!(s.view().elapsed_display, "1:05");
    }
}
