use crate::{
    constants::{
        prompts::{
            EXERCISE_JSON_SCHEMA, JSON_ONLY_INSTRUCTION, ROLE_INSTRUCTION, STRUCTURED_RULES,
            SUMMARY_JSON_SCHEMA,
        },
        quiz_prompt::{QUIZ_JSON_SCHEMA, QUIZ_QUESTION_COUNT, QUIZ_RULES},
    },
    models::domain::{ContentKind, GenerationRequest},
};

/// Builds the instruction sent to the model for one request.
///
/// Values are interpolated verbatim after trimming; nothing is escaped.
pub fn build_prompt(request: &GenerationRequest, kind: ContentKind) -> String {
    let subject = request.subject.trim();
    let grade = request.grade.trim();

    let task = match kind {
        ContentKind::Quiz => format!(
            "Generate a {QUIZ_QUESTION_COUNT}-question multiple choice quiz about \"{subject}\" for {grade} level."
        ),
        ContentKind::Exercise => {
            format!("Generate a practical exercise about \"{subject}\" for {grade} level.")
        }
        ContentKind::Summary => {
            format!("Generate a summary sheet about \"{subject}\" for {grade} level.")
        }
    };

    let (schema, rules) = match kind {
        ContentKind::Quiz => (QUIZ_JSON_SCHEMA, QUIZ_RULES),
        ContentKind::Exercise => (EXERCISE_JSON_SCHEMA, STRUCTURED_RULES),
        ContentKind::Summary => (SUMMARY_JSON_SCHEMA, STRUCTURED_RULES),
    };

    let mut prompt = format!("{ROLE_INSTRUCTION} {task}\n");

    if let Some(topic) = request.topic() {
        prompt.push_str(&format!("Focus on the topic \"{topic}\" within {subject}.\n"));
    }
    if let Some(objectives) = request.learning_objectives() {
        prompt.push_str(&format!(
            "The content must help students reach these learning objectives: {objectives}\n"
        ));
    }

    prompt.push_str(&format!("{JSON_ONLY_INSTRUCTION}\n{schema}\n\n{rules}\n"));
    prompt
}
