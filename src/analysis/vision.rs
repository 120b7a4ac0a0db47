use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::VisionConfig;
use crate::error::AnalysisError;

const CONNECT_TIMEOUT_SECS: u64 = 10;
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Single-turn instruction sent with every image. The model is asked for a
/// bare JSON object with exactly the keys the parser normalizes.
pub const ANALYSIS_PROMPT: &str = "Analyze this food image and provide the following information as JSON:\n\
- name: name of the dish/food\n\
- calories: estimated calories (integer)\n\
- protein: protein in grams (integer)\n\
- carbs: carbohydrates in grams (integer)\n\
- fat: fat in grams (integer)\n\
- description: brief description of what you see in the image (1-2 sentences)\n\
\n\
Be precise with the nutritional estimates. If there are multiple food items, sum the totals.\n\
Respond ONLY with the JSON, no additional text.";

/// The one suspending call in the system: hand the model an instruction and
/// an image, get back whatever text it produced (if any).
#[async_trait]
pub trait FoodVision: Send + Sync {
    async fn describe_image(
        &self,
        instruction: &str,
        image_data_uri: &str,
    ) -> Result<Option<String>, AnalysisError>;
}

// --- OpenAI-compatible chat completions wire types ---

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: Vec<ContentPart<'a>>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl<'a> },
}

#[derive(Serialize)]
struct ImageUrl<'a> {
    url: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Vision client for any OpenAI-compatible chat completions endpoint.
pub struct OpenAiVision {
    client: Client,
    config: VisionConfig,
}

impl OpenAiVision {
    pub fn new(config: VisionConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client, config })
    }

    fn api_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl FoodVision for OpenAiVision {
    async fn describe_image(
        &self,
        instruction: &str,
        image_data_uri: &str,
    ) -> Result<Option<String>, AnalysisError> {
        let request = ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: vec![
                    ContentPart::Text { text: instruction },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: image_data_uri,
                        },
                    },
                ],
            }],
            max_tokens: self.config.max_output_tokens,
        };

        debug!(model = %self.config.model, "sending food analysis request");

        let response = self
            .client
            .post(self.api_url())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let body: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|_| AnalysisError::MalformedResponse)?;

        Ok(body.choices.into_iter().next().and_then(|c| c.message.content))
    }
}
