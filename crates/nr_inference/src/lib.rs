use nr_core::Result;

pub mod models;
pub mod prompt;

pub use nr_core::InferenceModel;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL_NAME: &str = "gpt-3.5-turbo";

#[derive(Clone)]
pub struct Config {
    /// Model kind: `openai` or `dummy`
    pub model: String,
    pub api_key: Option<String>,
    pub model_name: Option<String>,
    pub base_url: Option<String>,
    pub temperature: f32,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("model_name", &self.model_name)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: "openai".to_string(),
            api_key: None,
            model_name: None,
            base_url: None,
            temperature: 0.0,
        }
    }
}

impl Config {
    pub fn model_name(&self) -> &str {
        self.model_name.as_deref().unwrap_or(DEFAULT_MODEL_NAME)
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }
}

pub use models::create_model;

/// Builds the configured model, failing early on missing credentials.
pub fn init(config: &Config) -> Result<std::sync::Arc<dyn InferenceModel>> {
    let model = create_model(config)?;
    tracing::info!("🧠 Inference model initialized (using {})", model.name());
    Ok(model)
}
