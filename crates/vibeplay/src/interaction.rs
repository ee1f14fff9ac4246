use crate::generator::Generator;
use vibeplay_core::idea::IdeaForm;
use vibeplay_core::outcome::{Interaction, Outcome, Stage};
use vibeplay_core::prompt::{build_prompt, PromptOptions};
use vibeplay_core::splitter::split_response;

/// Stages one click has walked through so far.
#[derive(Debug)]
struct Walk {
    stages: Vec<Stage>,
}

impl Walk {
    fn new() -> Self {
        Self {
            stages: vec![Stage::Idle],
        }
    }

    fn current(&self) -> Stage {
        self.stages.last().copied().unwrap_or(Stage::Idle)
    }

    /// Move to `next`. Illegal moves are logged and still recorded.
    fn advance(&mut self, next: Stage) {
        let current = self.current();
        if current.can_advance_to(next) {
            log::debug!("Stage {:?} -> {:?}", current, next);
        } else {
            log::warn!("Illegal stage transition {:?} -> {:?}", current, next);
        }
        self.stages.push(next);
    }
}

/// Run one click: validate, generate, parse.
///
/// Never calls the generator when a field is blank. The submitted form is
/// returned unchanged whatever the outcome, so the caller can show it again.
pub async fn run_interaction(
    form: IdeaForm,
    generator: &dyn Generator,
    options: &PromptOptions,
) -> Interaction {
    walk_interaction(form, generator, options).await.0
}

async fn walk_interaction(
    form: IdeaForm,
    generator: &dyn Generator,
    options: &PromptOptions,
) -> (Interaction, Vec<Stage>) {
    let mut walk = Walk::new();
    walk.advance(Stage::Validating);

    let idea = match form.validate() {
        Ok(idea) => idea,
        Err(missing) => {
            log::info!("Skipping generation: {}", missing);
            walk.advance(Stage::Idle);
            let interaction = Interaction {
                form,
                outcome: Outcome::Warning { missing },
            };
            return (interaction, walk.stages);
        }
    };

    let request = build_prompt(&idea, options);
    walk.advance(Stage::Generating);

    let outcome = match generator.generate(&request).await {
        Ok(text) => {
            walk.advance(Stage::Parsing);
            let parsed = split_response(&text);
            log::debug!(
                "Parsed response: {} explanation chars, {} code chars",
                parsed.explanation.len(),
                parsed.code.len()
            );
            Outcome::from_parsed(parsed)
        }
        Err(error) => {
            walk.advance(Stage::Failed);
            log::info!("Generation failed: {}", error);
            Outcome::Failed { error }
        }
    };

    match &outcome {
        Outcome::Displayed { .. } => walk.advance(Stage::Displayed),
        _ => walk.advance(Stage::Idle),
    }

    (Interaction { form, outcome }, walk.stages)
}
