use crate::services::generation::GenerationError;

/// What a caller asks the pipeline to produce content about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationRequest {
    pub subject: String,
    pub grade: String,
    pub topic: Option<String>,
    pub learning_objectives: Option<String>,
}

impl GenerationRequest {
    pub fn new(subject: impl Into<String>, grade: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            grade: grade.into(),
            topic: None,
            learning_objectives: None,
        }
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    pub fn with_learning_objectives(mut self, objectives: impl Into<String>) -> Self {
        self.learning_objectives = Some(objectives.into());
        self
    }

    /// Subject and grade must contain something besides whitespace.
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.subject.trim().is_empty() {
            return Err(GenerationError::InvalidInput(
                "subject must be a non-empty string".to_string(),
            ));
        }
        if self.grade.trim().is_empty() {
            return Err(GenerationError::InvalidInput(
                "grade must be a non-empty string".to_string(),
            ));
        }
        Ok(())
    }

    /// Optional fields with only whitespace count as absent.
    pub fn topic(&self) -> Option<&str> {
        non_blank(self.topic.as_deref())
    }

    pub fn learning_objectives(&self) -> Option<&str> {
        non_blank(self.learning_objectives.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
