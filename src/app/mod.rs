pub mod question_form;
pub mod quiz_view;

use crate::core::QuizBackend;
use question_form::QuestionForm;
use quiz_view::QuizView;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    TakeQuiz,
    AddQuestion,
}

/// Both views plus the backend they call.
///
/// Input handling only changes view state; [`App::run_pending`] performs the
/// backend call a view is waiting for, one at a time.
pub struct App<B: QuizBackend> {
    backend: B,
    route: Route,
    pub quiz: QuizView,
    pub form: QuestionForm,
    success_message_for: Duration,
}

impl<B: QuizBackend> App<B> {
    pub fn new(backend: B, success_message_for: Duration) -> Self {
        Self {
            backend,
            route: Route::TakeQuiz,
            quiz: QuizView::new(),
            form: QuestionForm::default(),
            success_message_for,
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    /// Entering a view starts it fresh: the quiz reloads, the form is empty.
    pub fn navigate(&mut self, route: Route) {
        if self.route == route {
            return;
        }
        tracing::debug!("Switching to {:?}", route);
        self.route = route;
        match route {
            Route::TakeQuiz => self.quiz = QuizView::new(),
            Route::AddQuestion => self.form = QuestionForm::default(),
        }
    }

    pub fn has_pending(&self) -> bool {
        self.quiz.is_loading() || self.quiz.pending_submission().is_some() || self.form.is_busy()
    }

    /// Runs the call the current state is waiting for. Returns false when
    /// nothing was pending.
    pub async fn run_pending(&mut self) -> bool {
        if self.quiz.is_loading() {
            let result = self.backend.list_questions().await;
            self.quiz.finish_loading(result);
            return true;
        }

        if let Some(answers) = self.quiz.pending_submission().cloned() {
            let result = self.backend.submit_quiz(&answers).await;
            self.quiz.finish_submit(result);
            return true;
        }

        if let Some(draft) = self.form.take_pending() {
            let result = self.backend.add_question(draft).await;
            self.form
                .finish_submit(result, Instant::now(), self.success_message_for);
            return true;
        }

        false
    }

    pub fn tick(&mut self, now: Instant) {
        self.form.tick(now);
    }
}
