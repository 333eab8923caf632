use std::fmt;

use serde::{Deserialize, Serialize};

/// Which kind of educational material a request asks for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    #[default]
    #[serde(alias = "qcm")]
    Quiz,
    Exercise,
    Summary,
}

impl ContentKind {
    /// Prefix used when titling stored content.
    pub fn label(&self) -> &'static str {
        match self {
            ContentKind::Quiz => "Quiz",
            ContentKind::Exercise => "Exercise",
            ContentKind::Summary => "Summary",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentKind::Quiz => write!(f, "quiz"),
            ContentKind::Exercise => write!(f, "exercise"),
            ContentKind::Summary => write!(f, "summary"),
        }
    }
}

pub const OPTIONS_PER_QUESTION: usize = 4;

/// A multiple choice question with exactly four options.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    #[serde(rename = "question")]
    pub text: String,
    pub options: [String; OPTIONS_PER_QUESTION],
    pub correct_answer: u8,
    pub explanation: String,
}

impl Question {
    /// `None` when `correct_answer` does not index an option.
    pub fn correct_option(&self) -> Option<&str> {
        self.options
            .get(usize::from(self.correct_answer))
            .map(String::as_str)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub questions: Vec<Question>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Exercise {
    pub title: String,
    pub description: String,
    pub steps: Vec<String>,
    pub solution: String,
    pub hints: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Summary {
    pub title: String,
    pub key_points: Vec<String>,
    pub main_concepts: Vec<String>,
    pub examples: Vec<String>,
    pub conclusion: String,
}

/// Validated output of the generation pipeline.
///
/// Serializes to the same flat JSON shape the model is asked to produce, so
/// stored content can be fed back through the normalizer and validator.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum StructuredContent {
    Quiz(Quiz),
    Exercise(Exercise),
    Summary(Summary),
}

impl StructuredContent {
    pub fn kind(&self) -> ContentKind {
        match self {
            StructuredContent::Quiz(_) => ContentKind::Quiz,
            StructuredContent::Exercise(_) => ContentKind::Exercise,
            StructuredContent::Summary(_) => ContentKind::Summary,
        }
    }

    pub fn as_quiz(&self) -> Option<&Quiz> {
        match self {
            StructuredContent::Quiz(quiz) => Some(quiz),
            _ => None,
        }
    }
}
