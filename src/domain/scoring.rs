use crate::domain::model::{AnswerSheet, Question, ScoreResult};

/// Grades `answers` against the stored questions.
///
/// Only questions that have an answer count as attempted; answers for ids that
/// are not in `questions` are ignored.
pub fn grade(questions: &[Question], answers: &AnswerSheet) -> ScoreResult {
    let mut correct_answers = 0;
    let mut total_questions = 0;

    for question in questions {
        if let Some(given) = answers.get(question.id) {
            total_questions += 1;
            if given == question.correct_answer() {
                correct_answers += 1;
            }
        }
    }

    ScoreResult {
        score: percentage(correct_answers, total_questions),
        correct_answers,
        total_questions,
        answers: answers.clone(),
    }
}

/// Rounded percentage, half away from zero; 0 when nothing was attempted.
pub fn percentage(correct: usize, attempted: usize) -> u32 {
    if attempted == 0 {
        return 0;
    }
    (correct as f64 / attempted as f64 * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::seed::sample_questions;
    use crate::domain::model::OptionLabel;

    #[test]
    fn test_mixed_answers_against_samples() {
        let answers: AnswerSheet = [(1, OptionLabel::B), (2, OptionLabel::B), (3, OptionLabel::A)]
            .into_iter()
            .collect();

        let result = grade(&sample_questions(), &answers);

        assert_eq!(result.correct_answers, 2);
        assert_eq!(result.total_questions, 3);
        assert_eq!(result.score, 67);
        assert_eq!(result.answers, answers);
    }

    #[test]
    fn test_all_correct_scores_100() {
        let answers: AnswerSheet = [(1, OptionLabel::B), (3, OptionLabel::B)].into_iter().collect();

        let result = grade(&sample_questions(), &answers);

        assert_eq!(result.score, 100);
        assert_eq!(result.total_questions, 2);
    }

    #[test]
    fn test_empty_sheet_scores_zero() {
        let result = grade(&sample_questions(), &AnswerSheet::new());

        assert_eq!(result.score, 0);
        assert_eq!(result.correct_answers, 0);
        assert_eq!(result.total_questions, 0);
    }

    #[test]
    fn test_unknown_question_ids_are_ignored() {
        let answers: AnswerSheet = [(99, OptionLabel::A), (2, OptionLabel::C)].into_iter().collect();

        let result = grade(&sample_questions(), &answers);

        assert_eq!(result.total_questions, 1);
        assert_eq!(result.correct_answers, 0);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(0, 0), 0);
    }
}
