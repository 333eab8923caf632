pub const ROLE_INSTRUCTION: &str = "You are an educational content generator.";

pub const JSON_ONLY_INSTRUCTION: &str =
    "Return ONLY a valid JSON object in this exact format, with no additional text:";

pub const EXERCISE_JSON_SCHEMA: &str = r#"{
    "title": "Exercise title",
    "description": "Exercise description",
    "steps": ["Step 1", "Step 2"],
    "solution": "Detailed solution",
    "hints": ["Hint 1", "Hint 2"]
}"#;

pub const SUMMARY_JSON_SCHEMA: &str = r#"{
    "title": "Summary title",
    "key_points": ["Point 1", "Point 2"],
    "main_concepts": ["Concept 1", "Concept 2"],
    "examples": ["Example 1", "Example 2"],
    "conclusion": "Conclusion text"
}"#;

pub const STRUCTURED_RULES: &str = "Important:
- Every field shown above is required
- List fields must be arrays of strings
- Do not include any text before or after the JSON object
- Make sure the JSON is properly formatted with double quotes";
