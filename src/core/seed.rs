use crate::domain::model::{Difficulty, NewQuestion, OptionLabel, Question};

fn sample(id: u64, text: &str, options: [&str; 4]) -> Question {
    let [a, b, c, d] = options.map(|o| Some(o.to_string()));
    NewQuestion {
        question_text: text.to_string(),
        option_a: a,
        option_b: b,
        option_c: c,
        option_d: d,
        correct_answer: OptionLabel::B,
        difficulty_level: Difficulty::Easy,
    }
    .with_id(id)
}

/// Questions written to an empty local store on first use.
pub fn sample_questions() -> Vec<Question> {
    vec![
        sample(
            1,
            "What is the capital of France?",
            ["London", "Paris", "Berlin", "Madrid"],
        ),
        sample(
            2,
            "Which planet is known as the Red Planet?",
            ["Venus", "Mars", "Jupiter", "Saturn"],
        ),
        sample(3, "What is 2 + 2?", ["3", "4", "5", "6"]),
    ]
}
