use crate::prelude::*;
use vibeplay_core::prompt::PromptOptions;
use vibeplay_core::secrets::{parse_api_key, resolve_api_key};

/// Resolved settings for anything that talks to the generation service.
#[derive(Clone)]
pub struct Settings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub prompt: PromptOptions,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("prompt", &self.prompt)
            .finish()
    }
}

/// Prompt options from the global flags. Needs no credentials.
pub fn prompt_options(global: &crate::Global) -> PromptOptions {
    PromptOptions {
        audience: global.audience.clone(),
        language: global.language.clone(),
    }
}

/// Resolve settings at startup.
///
/// The key comes from `--api-key`/`GEMINI_API_KEY`, then from the secrets
/// file. A missing key is an [`Error::MissingApiKey`].
pub fn load(global: &crate::Global) -> Result<Settings, Error> {
    let from_file = match &global.secrets {
        Some(path) => {
            let contents = std::fs::read_to_string(path).map_err(|source| Error::SecretsRead {
                path: path.display().to_string(),
                source,
            })?;
            parse_api_key(&contents).map_err(|source| Error::SecretsParse {
                path: path.display().to_string(),
                source,
            })?
        }
        None => None,
    };

    let api_key =
        resolve_api_key(global.api_key.as_deref(), from_file).ok_or(Error::MissingApiKey)?;

    log::debug!(
        "Resolved settings: model={}, base_url={}",
        global.model,
        global.base_url
    );

    Ok(Settings {
        api_key,
        model: global.model.clone(),
        base_url: global.base_url.clone(),
        prompt: prompt_options(global),
    })
}
