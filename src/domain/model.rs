use crate::utils::error::QuizError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
}

impl OptionLabel {
    pub const ALL: [OptionLabel; 4] = [OptionLabel::A, OptionLabel::B, OptionLabel::C, OptionLabel::D];

    pub fn index(self) -> usize {
        match self {
            OptionLabel::A => 0,
            OptionLabel::B => 1,
            OptionLabel::C => 2,
            OptionLabel::D => 3,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            OptionLabel::A => 'A',
            OptionLabel::B => 'B',
            OptionLabel::C => 'C',
            OptionLabel::D => 'D',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(OptionLabel::A),
            'B' => Some(OptionLabel::B),
            'C' => Some(OptionLabel::C),
            'D' => Some(OptionLabel::D),
            _ => None,
        }
    }
}

impl fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for OptionLabel {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let label = match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        };
        label.ok_or_else(|| QuizError::ValidationError {
            message: format!("'{}' is not an option label (expected A, B, C or D)", s),
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Hard,
            Difficulty::Medium => Difficulty::Easy,
            Difficulty::Hard => Difficulty::Medium,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        f.write_str(name)
    }
}

impl FromStr for Difficulty {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| QuizError::ValidationError {
                message: format!("'{}' is not a difficulty (expected Easy, Medium or Hard)", s),
            })
    }
}

/// A question as submitted for creation, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuestion {
    pub question_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_a: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_b: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_c: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_d: Option<String>,
    pub correct_answer: OptionLabel,
    #[serde(default)]
    pub difficulty_level: Difficulty,
}

impl NewQuestion {
    /// Option text for `label`, treating blank text as absent.
    pub fn option(&self, label: OptionLabel) -> Option<&str> {
        let raw = match label {
            OptionLabel::A => &self.option_a,
            OptionLabel::B => &self.option_b,
            OptionLabel::C => &self.option_c,
            OptionLabel::D => &self.option_d,
        };
        raw.as_deref().filter(|text| !text.trim().is_empty())
    }

    pub fn present_options(&self) -> Vec<(OptionLabel, &str)> {
        OptionLabel::ALL
            .into_iter()
            .filter_map(|label| self.option(label).map(|text| (label, text)))
            .collect()
    }

    pub fn with_id(self, id: u64) -> Question {
        Question { id, details: self }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u64,
    #[serde(flatten)]
    pub details: NewQuestion,
}

impl Question {
    pub fn text(&self) -> &str {
        &self.details.question_text
    }

    pub fn option(&self, label: OptionLabel) -> Option<&str> {
        self.details.option(label)
    }

    pub fn present_options(&self) -> Vec<(OptionLabel, &str)> {
        self.details.present_options()
    }

    pub fn correct_answer(&self) -> OptionLabel {
        self.details.correct_answer
    }

    pub fn difficulty(&self) -> Difficulty {
        self.details.difficulty_level
    }
}

/// Chosen option per question id for one quiz attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSheet(BTreeMap<u64, OptionLabel>);

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(&mut self, question_id: u64, label: OptionLabel) {
        self.0.insert(question_id, label);
    }

    pub fn get(&self, question_id: u64) -> Option<OptionLabel> {
        self.0.get(&question_id).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, OptionLabel)> + '_ {
        self.0.iter().map(|(id, label)| (*id, *label))
    }

    /// Body of `POST /quiz/submit`: one entry per answered question, by id.
    pub fn to_submission(&self) -> Vec<AnswerEntry> {
        self.iter()
            .map(|(question_id, given_answer)| AnswerEntry {
                question_id,
                given_answer,
            })
            .collect()
    }

    /// Parses a `<question id>=<label>` pair such as `3=B`.
    pub fn parse_pair(pair: &str) -> Result<(u64, OptionLabel), QuizError> {
        let (id, label) = pair.split_once('=').ok_or_else(|| QuizError::ValidationError {
            message: format!("'{}' should look like <question id>=<A|B|C|D>", pair),
        })?;
        let id = id.trim().parse::<u64>().map_err(|e| QuizError::ValidationError {
            message: format!("'{}' is not a question id: {}", id, e),
        })?;
        Ok((id, label.parse()?))
    }
}

impl FromIterator<(u64, OptionLabel)> for AnswerSheet {
    fn from_iter<I: IntoIterator<Item = (u64, OptionLabel)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerEntry {
    pub question_id: u64,
    pub given_answer: OptionLabel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub score: u32,
    pub correct_answers: usize,
    pub total_questions: usize,
    #[serde(default)]
    pub answers: AnswerSheet,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_wire_format_uses_camel_case() {
        let json = serde_json::json!({
            "id": 7,
            "questionText": "Pick one",
            "optionA": "left",
            "optionB": "right",
            "correctAnswer": "B",
            "difficultyLevel": "Hard"
        });

        let question: Question = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(question.id, 7);
        assert_eq!(question.text(), "Pick one");
        assert_eq!(question.option(OptionLabel::B), Some("right"));
        assert_eq!(question.option(OptionLabel::C), None);
        assert_eq!(question.difficulty(), Difficulty::Hard);

        // absent options are omitted rather than written as null
        assert_eq!(serde_json::to_value(&question).unwrap(), json);
    }

    #[test]
    fn test_missing_difficulty_defaults_to_easy() {
        let question: Question = serde_json::from_value(serde_json::json!({
            "id": 1,
            "questionText": "Q",
            "optionA": "x",
            "optionB": "y",
            "correctAnswer": "A"
        }))
        .unwrap();

        assert_eq!(question.difficulty(), Difficulty::Easy);
    }

    #[test]
    fn test_blank_options_are_not_present() {
        let draft = NewQuestion {
            question_text: "Q".to_string(),
            option_a: Some("x".to_string()),
            option_b: Some("   ".to_string()),
            option_c: Some(String::new()),
            option_d: Some("y".to_string()),
            correct_answer: OptionLabel::A,
            difficulty_level: Difficulty::Medium,
        };

        let labels: Vec<OptionLabel> = draft.present_options().into_iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec![OptionLabel::A, OptionLabel::D]);
    }

    #[test]
    fn test_answer_sheet_submission_is_ordered_by_id() {
        let sheet: AnswerSheet = [(3, OptionLabel::A), (1, OptionLabel::B)].into_iter().collect();

        let body = serde_json::to_value(sheet.to_submission()).unwrap();
        assert_eq!(
            body,
            serde_json::json!([
                {"questionId": 1, "givenAnswer": "B"},
                {"questionId": 3, "givenAnswer": "A"}
            ])
        );
    }

    #[test]
    fn test_answer_sheet_serializes_as_object() {
        let sheet: AnswerSheet = [(2, OptionLabel::C)].into_iter().collect();
        let value = serde_json::to_value(&sheet).unwrap();
        assert_eq!(value, serde_json::json!({"2": "C"}));

        let back: AnswerSheet = serde_json::from_value(value).unwrap();
        assert_eq!(back.get(2), Some(OptionLabel::C));
    }

    #[test]
    fn test_parse_pair() {
        assert_eq!(AnswerSheet::parse_pair("3=b").unwrap(), (3, OptionLabel::B));
        assert_eq!(AnswerSheet::parse_pair(" 12 = D").unwrap(), (12, OptionLabel::D));
        assert!(AnswerSheet::parse_pair("3").is_err());
        assert!(AnswerSheet::parse_pair("x=A").is_err());
        assert!(AnswerSheet::parse_pair("1=E").is_err());
        assert!(AnswerSheet::parse_pair("1=AB").is_err());
    }

    #[test]
    fn test_difficulty_parsing_and_cycle() {
        assert_eq!("medium".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert!("extreme".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::Hard.next(), Difficulty::Easy);
        assert_eq!(Difficulty::Easy.previous(), Difficulty::Hard);
    }
}
