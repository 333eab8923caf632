/// Number of questions a generated quiz is asked to contain.
pub const QUIZ_QUESTION_COUNT: usize = 5;

pub const QUIZ_JSON_SCHEMA: &str = r#"{
    "questions": [
        {
            "question": "Question text",
            "options": ["Option 1", "Option 2", "Option 3", "Option 4"],
            "correct_answer": 0,
            "explanation": "Explanation of the correct answer"
        }
    ]
}"#;

pub const QUIZ_RULES: &str = "Important:
- Each question MUST have exactly 4 options
- The correct_answer must be an index (0-3) corresponding to the correct option
- Do not include any text before or after the JSON object
- Make sure the JSON is properly formatted with double quotes";
