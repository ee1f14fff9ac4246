use crate::gemini::GenerationError;
use crate::idea::{IdeaForm, MissingInput};
use crate::splitter::ParsedOutput;
use serde::{Deserialize, Serialize};

/// Where a single click currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Idle,
    Validating,
    Generating,
    Parsing,
    Displayed,
    Failed,
}

impl Stage {
    /// Whether `next` may follow `self` within one interaction.
    pub fn can_advance_to(self, next: Stage) -> bool {
        matches!(
            (self, next),
            (Stage::Idle, Stage::Validating)
                | (Stage::Validating, Stage::Idle)
                | (Stage::Validating, Stage::Generating)
                | (Stage::Generating, Stage::Parsing)
                | (Stage::Generating, Stage::Failed)
                | (Stage::Parsing, Stage::Displayed)
                | (Stage::Parsing, Stage::Idle)
                | (Stage::Displayed, Stage::Idle)
                | (Stage::Failed, Stage::Idle)
        )
    }
}

/// How a click ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// A field was blank; the service was never called.
    Warning { missing: MissingInput },
    /// The service call failed or came back empty.
    Failed { error: GenerationError },
    /// Text came back but held no html fence.
    NoRenderable { explanation: String },
    /// Both fragments are ready for display.
    Displayed { output: ParsedOutput },
}

impl Outcome {
    /// Classify parsed model text.
    pub fn from_parsed(output: ParsedOutput) -> Self {
        if output.is_renderable() {
            Outcome::Displayed { output }
        } else {
            Outcome::NoRenderable {
                explanation: output.explanation,
            }
        }
    }

    /// The last stage the interaction reached before returning to idle.
    pub fn final_stage(&self) -> Stage {
        match self {
            Outcome::Warning { .. } => Stage::Validating,
            Outcome::Failed { .. } => Stage::Failed,
            Outcome::NoRenderable { .. } => Stage::Parsing,
            Outcome::Displayed { .. } => Stage::Displayed,
        }
    }

    /// Every stage the interaction walked through, starting and ending at idle.
    pub fn path(&self) -> Vec<Stage> {
        match self {
            Outcome::Warning { .. } => vec![Stage::Idle, Stage::Validating, Stage::Idle],
            Outcome::Failed { .. } => vec![
                Stage::Idle,
                Stage::Validating,
                Stage::Generating,
                Stage::Failed,
                Stage::Idle,
            ],
            Outcome::NoRenderable { .. } => vec![
                Stage::Idle,
                Stage::Validating,
                Stage::Generating,
                Stage::Parsing,
                Stage::Idle,
            ],
            Outcome::Displayed { .. } => vec![
                Stage::Idle,
                Stage::Validating,
                Stage::Generating,
                Stage::Parsing,
                Stage::Displayed,
            ],
        }
    }

    /// What presentation should show.
    pub fn render_request(&self) -> RenderRequest {
        match self {
            Outcome::Displayed { output } => RenderRequest {
                explanation: output.explanation.clone(),
                code: Some(output.code.clone()),
            },
            Outcome::NoRenderable { explanation } => RenderRequest {
                explanation: explanation.clone(),
                code: None,
            },
            Outcome::Warning { .. } | Outcome::Failed { .. } => RenderRequest::default(),
        }
    }
}

/// Value handed to the presentation layer.
///
/// `code` is only set when there is a snippet to put in the preview frame.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderRequest {
    pub explanation: String,
    pub code: Option<String>,
}

/// Everything one click produced: the form as submitted and how it ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    pub form: IdeaForm,
    pub outcome: Outcome,
}

impl Interaction {
    pub fn render_request(&self) -> RenderRequest {
        self.outcome.render_request()
    }
}
