use crate::prelude::{eprintln, *};
use crate::generator::{GeminiClient, Generator};
use crate::interaction::run_interaction;
use axum::{
    extract::State,
    response::Html,
    routing::{get, post},
    Form, Json, Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use vibeplay_core::idea::IdeaForm;
use vibeplay_core::outcome::Interaction;
use vibeplay_core::page::{render_page, PageView};
use vibeplay_core::prompt::PromptOptions;

#[derive(Debug, clap::Parser)]
#[command(name = "serve")]
#[command(about = "Host the playground page")]
pub struct App {
    /// Port to listen on
    #[arg(short, long, env = "VIBEPLAY_PORT", default_value = "8501")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, env = "VIBEPLAY_HOST", default_value = "127.0.0.1")]
    pub host: String,
}

/// Read-only state shared by every request.
#[derive(Clone)]
pub struct AppState {
    generator: Arc<dyn Generator>,
    prompt: PromptOptions,
    model: String,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let settings = crate::config::load(&global)?;
    let client = GeminiClient::new(&settings);

    if global.verbose {
        eprintln!("Endpoint: {}", client.url());
    }

    let state = AppState {
        generator: Arc::new(client),
        prompt: settings.prompt.clone(),
        model: settings.model.clone(),
    };

    let addr = format!("{}:{}", app.host, app.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| eyre!("Failed to bind to {}: {}", addr, e))?;

    eprintln!("Playground listening on http://{}", addr);
    log::info!("Serving playground on {}", addr);

    axum::serve(listener, router(state))
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    Ok(())
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api: Router<Arc<AppState>> = Router::new()
        .route("/api/generate", post(api_generate_handler))
        .layer(cors);

    Router::new()
        .route("/", get(index_handler).post(submit_handler))
        .route("/health", get(health_handler))
        .merge(api)
        .with_state(Arc::new(state))
}

async fn index_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    let form = IdeaForm::default();
    Html(render_page(&PageView {
        form: &form,
        outcome: None,
        model: &state.model,
    }))
}

async fn submit_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<IdeaForm>,
) -> Html<String> {
    let interaction = run_interaction(form, state.generator.as_ref(), &state.prompt).await;
    Html(render_page(&PageView {
        form: &interaction.form,
        outcome: Some(&interaction.outcome),
        model: &state.model,
    }))
}

async fn api_generate_handler(
    State(state): State<Arc<AppState>>,
    Json(form): Json<IdeaForm>,
) -> Json<Interaction> {
    Json(run_interaction(form, state.generator.as_ref(), &state.prompt).await)
}

async fn health_handler() -> &'static str {
    "ok"
}
