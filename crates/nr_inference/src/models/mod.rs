use std::sync::Arc;

use nr_core::{Error, InferenceModel, Result};

use crate::Config;

pub mod dummy;
pub mod openai;

pub use dummy::DummyModel;
pub use openai::OpenAiModel;

pub fn create_model(config: &Config) -> Result<Arc<dyn InferenceModel>> {
    match config.model.to_lowercase().as_str() {
        "openai" => Ok(Arc::new(OpenAiModel::new(config)?)),
        "dummy" => Ok(Arc::new(DummyModel::new())),
        other => Err(Error::Config(format!(
            "Unknown model '{}'. Available models: openai, dummy",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_model() {
        let dummy = create_model(&Config {
            model: "dummy".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(dummy.name(), "Dummy");

        let openai = create_model(&Config {
            api_key: Some("test-key".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(openai.name(), "OpenAI");

        let unknown = create_model(&Config {
            model: "llama".to_string(),
            ..Default::default()
        });
        assert!(matches!(unknown, Err(Error::Config(_))));
    }
}
