//! Query value type and response modes.

use serde::{Deserialize, Serialize};

/// Persona identifier used when the caller does not pick one.
pub const DEFAULT_PROFILE: &str = "default";

/// How the service should shape its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseMode {
    /// Everything shown at once.
    Consolidated,
    /// Clue-by-clue progressive disclosure.
    StepByStep,
}

/// One user question, immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub text: String,
    pub mode: ResponseMode,
    pub profile: String,
}

impl Query {
    pub fn new(text: impl Into<String>, mode: ResponseMode) -> Self {
        Self {
            text: text.into(),
            mode,
            profile: DEFAULT_PROFILE.to_string(),
        }
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Submission requires non-empty text after trimming.
    pub fn trimmed_text(&self) -> &str {
        self.text.trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_applied() {
        let q = Query::new("what is entropy", ResponseMode::Consolidated);
        assert_eq!(q.profile, DEFAULT_PROFILE);
    }

    #[test]
    fn profile_override() {
        let q = Query::new("why is the sky blue", ResponseMode::StepByStep)
            .with_profile("playful_explorer");
        assert_eq!(q.profile, "playful_explorer");
    }

    #[test]
    fn trimmed_text_strips_whitespace() {
        let q = Query::new("  hello  ", ResponseMode::Consolidated);
        assert_eq!(q.trimmed_text(), "hello");
    }
}
