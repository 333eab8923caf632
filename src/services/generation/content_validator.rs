use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use super::normalizer::ParsedObject;
use crate::models::domain::{
    ContentKind, Exercise, Question, Quiz, StructuredContent, Summary, OPTIONS_PER_QUESTION,
};

/// First structural problem found in generated content.
///
/// `question` is the 1-based index of the offending quiz question, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{message}")]
pub struct SchemaViolation {
    pub question: Option<usize>,
    pub field: String,
    pub message: String,
}

impl SchemaViolation {
    pub fn missing(question: Option<usize>, field: &str) -> Self {
        let message = match question {
            Some(index) => format!("Question {} missing '{}' field", index, field),
            None => format!("Response missing '{}' field", field),
        };
        Self {
            question,
            field: field.to_string(),
            message,
        }
    }

    pub fn invalid(question: Option<usize>, field: &str, requirement: &str) -> Self {
        let message = match question {
            Some(index) => format!("Question {} {} {}", index, field, requirement),
            None => format!("Field '{}' {}", field, requirement),
        };
        Self {
            question,
            field: field.to_string(),
            message,
        }
    }
}

type Validated<T> = Result<T, SchemaViolation>;

/// Checks a parsed object against the schema for `kind`.
pub fn validate(object: &ParsedObject, kind: ContentKind) -> Validated<StructuredContent> {
    match kind {
        ContentKind::Quiz => validate_quiz(object).map(StructuredContent::Quiz),
        ContentKind::Exercise => validate_exercise(object).map(StructuredContent::Exercise),
        ContentKind::Summary => validate_summary(object).map(StructuredContent::Summary),
    }
}

fn validate_quiz(object: &ParsedObject) -> Validated<Quiz> {
    let items = match object.get("questions") {
        None => return Err(SchemaViolation::missing(None, "questions")),
        Some(Value::Array(items)) if !items.is_empty() => items,
        Some(_) => {
            return Err(SchemaViolation::invalid(
                None,
                "questions",
                "must be a non-empty list",
            ))
        }
    };

    let questions = items
        .iter()
        .enumerate()
        .map(|(i, item)| validate_question(i + 1, item))
        .collect::<Validated<Vec<_>>>()?;

    Ok(Quiz { questions })
}

// Field order here decides which violation is reported first.
fn validate_question(index: usize, item: &Value) -> Validated<Question> {
    let at = Some(index);
    let question = item.as_object().ok_or_else(|| {
        SchemaViolation::invalid(at, "question", "must be a JSON object")
    })?;

    let options = question
        .get("options")
        .ok_or_else(|| SchemaViolation::missing(at, "options"))?;
    let options = match options.as_array() {
        Some(options) if options.len() == OPTIONS_PER_QUESTION => options,
        _ => {
            return Err(SchemaViolation::invalid(
                at,
                "options",
                "must have exactly 4 options",
            ))
        }
    };
    let options: [String; OPTIONS_PER_QUESTION] = [
        option_text(at, &options[0])?,
        option_text(at, &options[1])?,
        option_text(at, &options[2])?,
        option_text(at, &options[3])?,
    ];

    let correct_answer = question
        .get("correct_answer")
        .ok_or_else(|| SchemaViolation::missing(at, "correct_answer"))?;
    let correct_answer = correct_answer
        .as_u64()
        .filter(|answer| *answer < OPTIONS_PER_QUESTION as u64)
        .map(|answer| answer as u8)
        .ok_or_else(|| {
            SchemaViolation::invalid(at, "correct_answer", "must be an integer between 0 and 3")
        })?;

    let explanation = required_string(question, at, "explanation")?;
    let text = required_string(question, at, "question")?;

    Ok(Question {
        text,
        options,
        correct_answer,
        explanation,
    })
}

fn option_text(at: Option<usize>, option: &Value) -> Validated<String> {
    option
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| SchemaViolation::invalid(at, "options", "must contain only strings"))
}

fn validate_exercise(object: &ParsedObject) -> Validated<Exercise> {
    Ok(Exercise {
        title: required_string(object, None, "title")?,
        description: required_string(object, None, "description")?,
        steps: required_string_list(object, "steps")?,
        solution: required_string(object, None, "solution")?,
        hints: required_string_list(object, "hints")?,
    })
}

fn validate_summary(object: &ParsedObject) -> Validated<Summary> {
    Ok(Summary {
        title: required_string(object, None, "title")?,
        key_points: required_string_list(object, "key_points")?,
        main_concepts: required_string_list(object, "main_concepts")?,
        examples: required_string_list(object, "examples")?,
        conclusion: required_string(object, None, "conclusion")?,
    })
}

fn required_string(object: &ParsedObject, at: Option<usize>, field: &str) -> Validated<String> {
    match object.get(field) {
        None => Err(SchemaViolation::missing(at, field)),
        Some(Value::String(text)) => Ok(text.clone()),
        Some(_) => Err(SchemaViolation::invalid(at, field, "must be a string")),
    }
}

fn required_string_list(object: &ParsedObject, field: &str) -> Validated<Vec<String>> {
    let not_a_list = || SchemaViolation::invalid(None, field, "must be a list of strings");
    let items = object
        .get(field)
        .ok_or_else(|| SchemaViolation::missing(None, field))?
        .as_array()
        .ok_or_else(not_a_list)?;

    items
        .iter()
        .map(|item| item.as_str().map(str::to_string).ok_or_else(not_a_list))
        .collect()
}
