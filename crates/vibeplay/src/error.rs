use vibeplay_core::secrets::SecretsError;

/// Startup failures. Any of these stops the program before the first request.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Missing API key: set GEMINI_API_KEY or put it in the secrets file (--secrets)")]
    MissingApiKey,

    #[error("Failed to read secrets file '{path}': {source}")]
    SecretsRead {
        path: String,
        source: std::io::Error,
    },

    #[error("Bad secrets file '{path}': {source}")]
    SecretsParse { path: String, source: SecretsError },
}
