use std::sync::Arc;
use nr_core::{Error, InferenceModel, Result};
use tracing::info;
use crate::Config;

pub mod deepseek;
pub mod dummy;

pub use deepseek::DeepSeekModel;
pub use dummy::DummyModel;

/// Build the model named in `config.model_name`, defaulting to DeepSeek.
pub async fn create_model(config: Option<Config>) -> Result<Arc<dyn InferenceModel>> {
    let config = config.unwrap_or_default();
    let name = config
        .model_name
        .clone()
        .unwrap_or_else(|| "deepseek".to_string());

    let model: Arc<dyn InferenceModel> = match name.to_ascii_lowercase().as_str() {
        "deepseek" => {
            let mut model = DeepSeekModel::new(config.api_key.clone())?;
            if let Some(url) = config.model_url.as_deref() {
                model = model.with_base_url(url);
            }
            Arc::new(model)
        }
        "dummy" => Arc::new(DummyModel::new(Some(config)).await?),
        other => return Err(Error::Inference(format!("Unknown model: {}", other))),
    };
    info!(model = model.name(), "Inference model ready");
    Ok(model)
}
