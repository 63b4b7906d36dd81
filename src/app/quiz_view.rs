use crate::domain::model::{AnswerSheet, OptionLabel, Question, ScoreResult};
use crate::utils::error::Result;

pub const LOAD_FAILED: &str = "Failed to load questions. Please try again.";
pub const SUBMIT_FAILED: &str = "Failed to submit quiz. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizPhase {
    Loading,
    Failed(&'static str),
    Ready,
    Submitted(ScoreResult),
}

/// State of the quiz-taking view.
#[derive(Debug, Clone)]
pub struct QuizView {
    phase: QuizPhase,
    questions: Vec<Question>,
    answers: AnswerSheet,
    cursor: usize,
    submitting: bool,
}

impl Default for QuizView {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizView {
    /// A fresh view starts out loading.
    pub fn new() -> Self {
        Self {
            phase: QuizPhase::Loading,
            questions: Vec::new(),
            answers: AnswerSheet::new(),
            cursor: 0,
            submitting: false,
        }
    }

    pub fn phase(&self) -> &QuizPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == QuizPhase::Loading
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &AnswerSheet {
        &self.answers
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// Retry after an error: loads the questions again.
    pub fn begin_loading(&mut self) {
        self.phase = QuizPhase::Loading;
    }

    pub fn finish_loading(&mut self, result: Result<Vec<Question>>) {
        match result {
            Ok(questions) => {
                tracing::debug!("Loaded {} questions", questions.len());
                self.questions = questions;
                self.cursor = self.cursor.min(self.questions.len().saturating_sub(1));
                self.phase = QuizPhase::Ready;
            }
            Err(e) => {
                tracing::error!("Error loading questions: {}", e);
                self.phase = QuizPhase::Failed(LOAD_FAILED);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.phase == QuizPhase::Ready && self.questions.is_empty()
    }

    /// Records `label` for the question; ignored outside the ready phase, for
    /// unknown questions, and for options the question does not have.
    pub fn select(&mut self, question_id: u64, label: OptionLabel) -> bool {
        if self.phase != QuizPhase::Ready || self.submitting {
            return false;
        }
        let has_option = self
            .questions
            .iter()
            .find(|q| q.id == question_id)
            .is_some_and(|q| q.option(label).is_some());
        if has_option {
            self.answers.answer(question_id, label);
        }
        has_option
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn focused_question(&self) -> Option<&Question> {
        self.questions.get(self.cursor)
    }

    pub fn focus_next(&mut self) {
        if self.cursor + 1 < self.questions.len() {
            self.cursor += 1;
        }
    }

    pub fn focus_previous(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn select_focused(&mut self, label: OptionLabel) -> bool {
        match self.focused_question().map(|q| q.id) {
            Some(id) => self.select(id, label),
            None => false,
        }
    }

    /// Moves the focused question's answer to its next (or previous) present option.
    pub fn cycle_focused(&mut self, forward: bool) {
        let Some(question) = self.focused_question() else {
            return;
        };
        let labels: Vec<OptionLabel> = question.present_options().into_iter().map(|(l, _)| l).collect();
        if labels.is_empty() {
            return;
        }

        let id = question.id;
        let next = match self.answers.get(id).and_then(|a| labels.iter().position(|l| *l == a)) {
            Some(i) if forward => labels[(i + 1) % labels.len()],
            Some(i) => labels[(i + labels.len() - 1) % labels.len()],
            None if forward => labels[0],
            None => labels[labels.len() - 1],
        };
        self.select(id, next);
    }

    /// Submit is disabled until at least one answer is recorded.
    pub fn can_submit(&self) -> bool {
        self.phase == QuizPhase::Ready && !self.answers.is_empty() && !self.submitting
    }

    pub fn begin_submit(&mut self) -> bool {
        if !self.can_submit() {
            return false;
        }
        self.submitting = true;
        true
    }

    /// The sheet to send while a submit is in flight.
    pub fn pending_submission(&self) -> Option<&AnswerSheet> {
        self.submitting.then_some(&self.answers)
    }

    pub fn finish_submit(&mut self, result: Result<ScoreResult>) {
        self.submitting = false;
        match result {
            Ok(score) => {
                tracing::info!(
                    "Quiz scored {}% ({}/{})",
                    score.score,
                    score.correct_answers,
                    score.total_questions
                );
                self.phase = QuizPhase::Submitted(score);
            }
            Err(e) => {
                tracing::error!("Error submitting quiz: {}", e);
                self.phase = QuizPhase::Failed(SUBMIT_FAILED);
            }
        }
    }

    /// Back to a fresh attempt over the already loaded questions.
    pub fn reset(&mut self) {
        if self.is_loading() || self.submitting {
            return;
        }
        self.answers.clear();
        self.cursor = 0;
        self.phase = QuizPhase::Ready;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::seed::sample_questions;
    use crate::utils::error::QuizError;

    fn ready_view() -> QuizView {
        let mut view = QuizView::new();
        view.finish_loading(Ok(sample_questions()));
        view
    }

    #[test]
    fn test_starts_loading_then_ready() {
        let mut view = QuizView::new();
        assert!(view.is_loading());

        view.finish_loading(Ok(sample_questions()));

        assert_eq!(view.phase(), &QuizPhase::Ready);
        assert_eq!(view.questions().len(), 3);
        assert!(!view.is_empty());
    }

    #[test]
    fn test_load_failure_then_retry() {
        let mut view = QuizView::new();
        view.finish_loading(Err(QuizError::OfflineError));
        assert_eq!(view.phase(), &QuizPhase::Failed(LOAD_FAILED));

        view.begin_loading();
        assert!(view.is_loading());
        view.finish_loading(Ok(Vec::new()));
        assert!(view.is_empty());
    }

    #[test]
    fn test_submit_disabled_without_answers() {
        let mut view = ready_view();

        assert!(!view.can_submit());
        assert!(!view.begin_submit());
        assert!(view.pending_submission().is_none());
    }

    #[test]
    fn test_selection_is_exclusive_per_question() {
        let mut view = ready_view();

        assert!(view.select(1, OptionLabel::A));
        assert!(view.select(1, OptionLabel::C));
        assert!(!view.select(42, OptionLabel::A));

        assert_eq!(view.answered_count(), 1);
        assert_eq!(view.answers().get(1), Some(OptionLabel::C));
    }

    #[test]
    fn test_absent_option_cannot_be_selected() {
        let mut view = QuizView::new();
        let mut question = sample_questions().remove(0);
        question.details.option_d = None;
        view.finish_loading(Ok(vec![question]));

        assert!(!view.select_focused(OptionLabel::D));
        assert!(view.answers().is_empty());
    }

    #[test]
    fn test_submit_flow_and_reset_keeps_questions() {
        let mut view = ready_view();
        view.select(1, OptionLabel::B);
        assert!(view.begin_submit());
        assert!(!view.select(2, OptionLabel::B));

        let sheet = view.pending_submission().cloned().unwrap();
        assert_eq!(sheet.len(), 1);

        let score = crate::domain::scoring::grade(view.questions(), &sheet);
        view.finish_submit(Ok(score));
        match view.phase() {
            QuizPhase::Submitted(score) => assert_eq!(score.score, 100),
            other => panic!("expected submitted, got {:?}", other),
        }

        view.reset();
        assert_eq!(view.phase(), &QuizPhase::Ready);
        assert!(view.answers().is_empty());
        assert_eq!(view.questions().len(), 3);
    }

    #[test]
    fn test_submit_failure_shows_error() {
        let mut view = ready_view();
        view.select(2, OptionLabel::A);
        view.begin_submit();

        view.finish_submit(Err(QuizError::OfflineError));

        assert_eq!(view.phase(), &QuizPhase::Failed(SUBMIT_FAILED));
        assert!(view.pending_submission().is_none());
    }

    #[test]
    fn test_cursor_and_cycling() {
        let mut view = ready_view();
        view.focus_previous();
        assert_eq!(view.cursor(), 0);

        view.focus_next();
        view.cycle_focused(true);
        assert_eq!(view.answers().get(2), Some(OptionLabel::A));
        view.cycle_focused(false);
        assert_eq!(view.answers().get(2), Some(OptionLabel::D));

        view.focus_next();
        view.focus_next();
        assert_eq!(view.cursor(), 2);
    }
}
