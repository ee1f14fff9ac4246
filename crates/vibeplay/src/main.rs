use crate::prelude::*;
use clap::Parser;
use std::path::PathBuf;

mod config;
mod error;
mod generate;
mod generator;
mod interaction;
mod prelude;
mod serve;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Turn an app idea into a live HTML preview and a paste-ready build brief"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Gemini API key
    #[clap(long, env = "GEMINI_API_KEY", global = true, hide_env_values = true)]
    api_key: Option<String>,

    /// TOML file holding GEMINI_API_KEY, used when the key is not set directly
    #[clap(long, env = "VIBEPLAY_SECRETS", global = true)]
    secrets: Option<PathBuf>,

    /// Model used for generation
    #[clap(long, env = "GEMINI_MODEL", global = true, default_value = vibeplay_core::gemini::DEFAULT_MODEL)]
    model: String,

    /// Base URL of the generation API
    #[clap(long, env = "GEMINI_BASE_URL", global = true, default_value = vibeplay_core::gemini::DEFAULT_BASE_URL)]
    base_url: String,

    /// Who the build brief is written for
    #[clap(long, env = "VIBEPLAY_AUDIENCE", global = true, default_value = vibeplay_core::prompt::DEFAULT_AUDIENCE)]
    audience: String,

    /// Language of the build brief
    #[clap(long, env = "VIBEPLAY_LANGUAGE", global = true, default_value = vibeplay_core::prompt::DEFAULT_LANGUAGE)]
    language: String,

    /// Whether to display additional information.
    #[clap(long, env = "VIBEPLAY_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Generate an app from an idea and print the brief and the code
    Generate(crate::generate::GenerateOptions),

    /// Print the instruction that would be sent to the model
    Prompt(crate::generate::PromptArgs),

    /// Host the playground page
    Serve(crate::serve::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Generate(options) => crate::generate::run(options, app.global).await,
        SubCommands::Prompt(options) => crate::generate::print_prompt(options, app.global),
        SubCommands::Serve(sub_app) => crate::serve::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
