use crate::prelude::{eprintln, println, *};
use crate::generator::GeminiClient;
use crate::interaction::run_interaction;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use vibeplay_core::idea::IdeaForm;
use vibeplay_core::outcome::{Interaction, Outcome, RenderRequest};
use vibeplay_core::prompt::build_prompt;

/// The three idea fields, shared by `generate` and `prompt`.
#[derive(Debug, Clone, clap::Args)]
pub struct IdeaArgs {
    /// What do you want to make? (e.g. "Compliment sticker board")
    #[arg(short, long, default_value = "")]
    topic: String,

    /// What should it do? (e.g. "A star appears when I press the button")
    #[arg(short, long, default_value = "")]
    features: String,

    /// What colors and look do you like? (e.g. "Yellow and sky blue")
    #[arg(short, long, default_value = "")]
    style: String,
}

impl From<IdeaArgs> for IdeaForm {
    fn from(args: IdeaArgs) -> Self {
        IdeaForm {
            topic: args.topic,
            features: args.features,
            style: args.style,
        }
    }
}

#[derive(Debug, clap::Args)]
pub struct GenerateOptions {
    #[clap(flatten)]
    idea: IdeaArgs,

    /// Output the whole interaction as JSON
    #[arg(long)]
    json: bool,

    /// Write the generated HTML to this file
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(Debug, clap::Args)]
pub struct PromptArgs {
    #[clap(flatten)]
    idea: IdeaArgs,
}

pub async fn run(options: GenerateOptions, global: crate::Global) -> Result<()> {
    let settings = crate::config::load(&global)?;
    let client = GeminiClient::new(&settings);

    if global.verbose {
        eprintln!("Endpoint: {}", client.url());
        eprintln!("Model: {}", settings.model);
    }

    let spinner = spinner(options.json);
    let interaction = run_interaction(options.idea.into(), &client, &settings.prompt).await;
    spinner.finish_and_clear();

    if let (Some(code), Some(path)) = (interaction.render_request().code, &options.out) {
        write_html(path, &code).await?;
        if global.verbose {
            eprintln!("Wrote {}", path.display());
        }
    }

    if options.json {
        println!("{}", serde_json::to_string_pretty(&interaction)?);
        return Ok(());
    }

    output_formatted(&interaction)
}

fn spinner(hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("The AI wizard is writing your code and your spell...");
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

async fn write_html(path: &std::path::Path, code: &str) -> Result<()> {
    tokio::fs::write(path, code)
        .await
        .with_context(|| format!("Failed to write HTML to '{}'", path.display()))
}

fn output_formatted(interaction: &Interaction) -> Result<()> {
    match &interaction.outcome {
        Outcome::Warning { missing } => Err(eyre!("{}", missing)),
        Outcome::Failed { error } => Err(eyre!("{}", error.notice())),
        Outcome::NoRenderable { .. } | Outcome::Displayed { .. } => {
            print_result(&interaction.render_request())
        }
    }
}

fn print_result(request: &RenderRequest) -> Result<()> {
    let Some(code) = &request.code else {
        if !request.explanation.is_empty() {
            print_explanation(&request.explanation);
        }
        return Err(eyre!(
            "The AI did not send back any code to preview. Run the command again."
        ));
    };

    print_explanation(&request.explanation);
    println!("{}", "💻 Code".bold().cyan());
    println!("{}", code);
    Ok(())
}

fn print_explanation(explanation: &str) {
    println!("{}", "📝 Coding magic spell".bold().yellow());
    if explanation.is_empty() {
        println!("{}", "Your spell is still being written!".dimmed());
    } else {
        println!("{}", explanation);
    }
    println!();
}

/// Print the instruction for an idea without calling the service.
pub fn print_prompt(options: PromptArgs, global: crate::Global) -> Result<()> {
    let form: IdeaForm = options.idea.into();
    let idea = form.validate().map_err(|missing| eyre!("{}", missing))?;
    let request = build_prompt(&idea, &crate::config::prompt_options(&global));

    println!("{}", request);

    Ok(())
}
