use crate::domain::model::{Difficulty, NewQuestion, OptionLabel, Question};
use crate::utils::error::{QuizError, Result};
use std::time::{Duration, Instant};

pub const TEXT_REQUIRED: &str = "Question text is required";
pub const CORRECT_REQUIRED: &str = "Please select a correct answer";
pub const TWO_OPTIONS_REQUIRED: &str = "At least two options are required";
pub const CORRECT_MUST_BE_FILLED: &str = "The correct answer must be one of the filled-in options";
pub const ADD_FAILED: &str = "Failed to add question. Please try again.";
pub const ADD_SUCCEEDED: &str = "Question added successfully!";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormField {
    #[default]
    QuestionText,
    Option(OptionLabel),
    CorrectAnswer,
    Difficulty,
}

impl FormField {
    pub const ORDER: [FormField; 7] = [
        FormField::QuestionText,
        FormField::Option(OptionLabel::A),
        FormField::Option(OptionLabel::B),
        FormField::Option(OptionLabel::C),
        FormField::Option(OptionLabel::D),
        FormField::CorrectAnswer,
        FormField::Difficulty,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn previous(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    pub fn is_text(self) -> bool {
        matches!(self, FormField::QuestionText | FormField::Option(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMessage {
    Success(&'static str),
    Error(String),
}

/// State of the add-question form.
///
/// Submitting is split in two: [`QuestionForm::begin_submit`] validates and
/// parks a draft, the host sends it, then [`QuestionForm::finish_submit`]
/// records the outcome. While a draft is parked the form is busy and ignores
/// further submits and resets.
#[derive(Debug, Clone, Default)]
pub struct QuestionForm {
    question_text: String,
    options: [String; 4],
    correct_answer: Option<OptionLabel>,
    difficulty: Difficulty,
    focus: FormField,
    pending: Option<NewQuestion>,
    busy: bool,
    error: Option<String>,
    success_until: Option<Instant>,
}

impl QuestionForm {
    pub fn text(&self, field: FormField) -> &str {
        match field {
            FormField::QuestionText => &self.question_text,
            FormField::Option(label) => &self.options[label.index()],
            FormField::CorrectAnswer | FormField::Difficulty => "",
        }
    }

    pub fn set_text(&mut self, field: FormField, value: &str) {
        if let Some(target) = self.text_mut(field) {
            *target = value.to_string();
        }
    }

    fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::QuestionText => Some(&mut self.question_text),
            FormField::Option(label) => Some(&mut self.options[label.index()]),
            FormField::CorrectAnswer | FormField::Difficulty => None,
        }
    }

    pub fn focus(&self) -> FormField {
        self.focus
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    pub fn push_char(&mut self, c: char) {
        let focus = self.focus;
        if let Some(target) = self.text_mut(focus) {
            target.push(c);
        }
    }

    pub fn backspace(&mut self) {
        let focus = self.focus;
        if let Some(target) = self.text_mut(focus) {
            target.pop();
        }
    }

    pub fn correct_answer(&self) -> Option<OptionLabel> {
        self.correct_answer
    }

    pub fn set_correct_answer(&mut self, label: Option<OptionLabel>) {
        self.correct_answer = label;
    }

    /// Labels the correct-answer selector offers: those with non-blank text.
    pub fn selectable_answers(&self) -> Vec<OptionLabel> {
        OptionLabel::ALL
            .into_iter()
            .filter(|label| !self.options[label.index()].trim().is_empty())
            .collect()
    }

    /// Steps through unset and each selectable label, wrapping around.
    pub fn cycle_correct_answer(&mut self, forward: bool) {
        let mut choices: Vec<Option<OptionLabel>> = vec![None];
        choices.extend(self.selectable_answers().into_iter().map(Some));

        let current = choices
            .iter()
            .position(|c| *c == self.correct_answer)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % choices.len()
        } else {
            (current + choices.len() - 1) % choices.len()
        };
        self.correct_answer = choices[next];
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    pub fn cycle_difficulty(&mut self, forward: bool) {
        self.difficulty = if forward {
            self.difficulty.next()
        } else {
            self.difficulty.previous()
        };
    }

    /// Checks the fields and builds the draft; the first failing rule wins.
    pub fn validate(&self) -> Result<NewQuestion> {
        let invalid = |message: &str| QuizError::ValidationError {
            message: message.to_string(),
        };

        let question_text = self.question_text.trim();
        if question_text.is_empty() {
            return Err(invalid(TEXT_REQUIRED));
        }

        let Some(correct_answer) = self.correct_answer else {
            return Err(invalid(CORRECT_REQUIRED));
        };

        let filled = self.selectable_answers();
        if filled.len() < 2 {
            return Err(invalid(TWO_OPTIONS_REQUIRED));
        }
        if !filled.contains(&correct_answer) {
            return Err(invalid(CORRECT_MUST_BE_FILLED));
        }

        let option = |label: OptionLabel| {
            let text = self.options[label.index()].trim();
            (!text.is_empty()).then(|| text.to_string())
        };

        Ok(NewQuestion {
            question_text: question_text.to_string(),
            option_a: option(OptionLabel::A),
            option_b: option(OptionLabel::B),
            option_c: option(OptionLabel::C),
            option_d: option(OptionLabel::D),
            correct_answer,
            difficulty_level: self.difficulty,
        })
    }

    /// Validates and parks the draft for sending. Returns false when the form
    /// is busy or invalid; an invalid form shows the error inline.
    pub fn begin_submit(&mut self) -> bool {
        if self.busy {
            return false;
        }

        match self.validate() {
            Ok(draft) => {
                self.error = None;
                self.pending = Some(draft);
                self.busy = true;
                true
            }
            Err(e) => {
                tracing::debug!("Question form rejected: {}", e);
                self.error = Some(e.user_friendly_message());
                false
            }
        }
    }

    pub fn take_pending(&mut self) -> Option<NewQuestion> {
        self.pending.take()
    }

    pub fn finish_submit(&mut self, result: Result<Question>, now: Instant, show_success_for: Duration) {
        self.busy = false;
        self.pending = None;

        match result {
            Ok(question) => {
                tracing::info!("Question {} added", question.id);
                self.clear_fields();
                self.error = None;
                self.success_until = Some(now + show_success_for);
            }
            Err(e) => {
                tracing::error!("Error adding question: {}", e);
                self.error = Some(ADD_FAILED.to_string());
            }
        }
    }

    /// Clears every field and message without submitting.
    pub fn reset(&mut self) {
        if self.busy {
            return;
        }
        self.clear_fields();
        self.error = None;
        self.success_until = None;
    }

    fn clear_fields(&mut self) {
        self.question_text.clear();
        self.options = Default::default();
        self.correct_answer = None;
        self.difficulty = Difficulty::default();
        self.focus = FormField::QuestionText;
    }

    /// Expires the success message once its delay has passed.
    pub fn tick(&mut self, now: Instant) {
        if self.success_until.is_some_and(|until| now >= until) {
            self.success_until = None;
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn message(&self) -> Option<FormMessage> {
        if let Some(error) = &self.error {
            return Some(FormMessage::Error(error.clone()));
        }
        self.success_until.map(|_| FormMessage::Success(ADD_SUCCEEDED))
    }
}
