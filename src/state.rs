use std::sync::Arc;

use tokio::sync::Mutex;

use crate::analysis::vision::{FoodVision, OpenAiVision};
use crate::config::{AppConfig, VisionConfig};
use crate::storage::{FileStore, KeyValueStore, MemoryStore};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn KeyValueStore>,
    pub vision: Arc<dyn FoodVision>,
    /// Single-slot guard: at most one image analysis in flight.
    pub analysis_slot: Arc<Mutex<()>>,
    /// Serializes read-modify-write cycles on the food log record.
    pub log_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let store = Arc::new(FileStore::new(config.data_dir.clone()).await?);
        let vision = Arc::new(OpenAiVision::new(config.vision.clone())?);
        Ok(Self::from_parts(config, store, vision))
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        store: Arc<dyn KeyValueStore>,
        vision: Arc<dyn FoodVision>,
    ) -> Self {
        Self {
            config,
            store,
            vision,
            analysis_slot: Arc::new(Mutex::new(())),
            log_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn fake() -> Self {
        use async_trait::async_trait;

        use crate::error::AnalysisError;

        struct FakeVision;
        #[async_trait]
        impl FoodVision for FakeVision {
            async fn describe_image(
                &self,
                _instruction: &str,
                _image_data_uri: &str,
            ) -> Result<Option<String>, AnalysisError> {
                Ok(Some(
                    r#"{"name":"Grilled chicken with rice","calories":520,"protein":42,"carbs":55,"fat":12,"description":"A plate of grilled chicken breast with white rice."}"#
                        .to_string(),
                ))
            }
        }

        let config = Arc::new(AppConfig {
            data_dir: "./data".into(),
            vision: VisionConfig {
                api_key: "test".into(),
                base_url: "http://localhost:0/v1".into(),
                model: "test-model".into(),
                max_output_tokens: 500,
                max_image_bytes: 1024 * 1024,
            },
        });

        Self::from_parts(config, Arc::new(MemoryStore::default()), Arc::new(FakeVision))
    }
}
