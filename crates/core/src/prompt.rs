use crate::idea::UserIdea;
use serde::{Deserialize, Serialize};

/// Label line opening the explanation section of a model reply.
pub const EXPLANATION_LABEL: &str = "[explanation]";
/// Label line opening the code section of a model reply.
pub const CODE_LABEL: &str = "[code]";

pub const DEFAULT_AUDIENCE: &str = "elementary school students";
pub const DEFAULT_LANGUAGE: &str = "English";

/// Knobs for the fixed boilerplate around the user's idea.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptOptions {
    /// Who the explanation is written for.
    pub audience: String,
    /// Natural language of the explanation section.
    pub language: String,
}

impl Default for PromptOptions {
    fn default() -> Self {
        Self {
            audience: DEFAULT_AUDIENCE.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

/// The instruction string sent to the model. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GenerationRequest(String);

impl GenerationRequest {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for GenerationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Build the model instruction for an idea.
///
/// The three idea values are embedded verbatim. The reply format asks for an
/// explanation section and a code section, each opened by its label line, so
/// that [`crate::splitter::split_response`] can take the reply apart again.
pub fn build_prompt(idea: &UserIdea, options: &PromptOptions) -> GenerationRequest {
    let mut parts = Vec::new();

    parts.push(format!(
        "Input: topic ({}), features ({}), style ({})",
        idea.topic(),
        idea.features(),
        idea.style()
    ));

    parts.push(format!(
        "You are a friendly coding teacher for {audience}. Write the two sections below.",
        audience = options.audience
    ));

    parts.push(format!(
        "1. {EXPLANATION_LABEL}: a build brief the maker can paste as-is into an AI coding \
agent. Write it in {language}, in the maker's own voice, the way one of {audience} would \
say it (\"I want to make ... Please add ...\"), and be very specific about every feature.",
        language = options.language,
        audience = options.audience
    ));

    parts.push(format!(
        "2. {CODE_LABEL}: one complete, self-contained HTML document with inline CSS and \
JavaScript that really implements the idea. No external files or libraries."
    ));

    parts.push(format!(
        "Reply in exactly this format, with exactly one fenced code block:\n\n\
{EXPLANATION_LABEL}\n(the brief)\n\n{CODE_LABEL}\n```html\n(the code)\n```"
    ));

    GenerationRequest(parts.join("\n\n"))
}
