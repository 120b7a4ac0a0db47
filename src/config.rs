use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct VisionConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    /// Ceiling on the model's reply length.
    pub max_output_tokens: u32,
    /// Largest decoded image payload accepted for analysis.
    pub max_image_bytes: usize,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub vision: VisionConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let data_dir = std::env::var("CALORIA_DATA_DIR")
            .unwrap_or_else(|_| "./data".into())
            .into();
        let vision = VisionConfig {
            api_key: std::env::var("OPENAI_API_KEY")?,
            base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".into()),
            model: std::env::var("VISION_MODEL").unwrap_or_else(|_| "gpt-4o".into()),
            max_output_tokens: std::env::var("VISION_MAX_TOKENS")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(500),
            max_image_bytes: std::env::var("VISION_MAX_IMAGE_BYTES")
                .ok()
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(20 * 1024 * 1024),
        };
        Ok(Self { data_dir, vision })
    }
}
