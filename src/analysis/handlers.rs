use axum::{
    extract::State,
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{error, instrument, warn};

use crate::state::AppState;

use super::dto::{AnalyzeRequest, NutritionEstimate};
use super::parse::parse_model_reply;
use super::vision::ANALYSIS_PROMPT;

/// What the client sees for every analysis failure, regardless of cause.
/// The underlying distinction is logged only.
const RETRY_MESSAGE: &str = "Could not analyze the image, please retry";

pub fn routes() -> Router<AppState> {
    Router::new().route("/analyze-food", post(analyze_food))
}

type ErrorReply = (StatusCode, Json<Value>);

#[instrument(skip(state, body))]
pub async fn analyze_food(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeRequest>,
) -> Result<Json<NutritionEstimate>, ErrorReply> {
    if body.image.is_empty() {
        return Err(bad_request("image is required"));
    }
    validate_data_uri(&body.image, state.config.vision.max_image_bytes)?;

    // At most one analysis in flight; a concurrent request is rejected
    // rather than queued so the client can re-prompt the user.
    let Ok(_slot) = state.analysis_slot.try_lock() else {
        return Err((
            StatusCode::CONFLICT,
            Json(json!({ "error": "an analysis is already in progress" })),
        ));
    };

    let reply = match state.vision.describe_image(ANALYSIS_PROMPT, &body.image).await {
        Ok(reply) => reply,
        Err(e) => {
            error!(error = %e, "vision request failed");
            return Err(analysis_failed());
        }
    };

    match parse_model_reply(reply.as_deref()) {
        Ok(estimate) => Ok(Json(estimate)),
        Err(e) => {
            warn!(error = %e, "model reply rejected");
            Err(analysis_failed())
        }
    }
}

fn analysis_failed() -> ErrorReply {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": RETRY_MESSAGE })),
    )
}

fn bad_request(msg: &str) -> ErrorReply {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": msg })))
}

const ALLOWED_IMAGE_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/webp",
    "image/heic",
];

/// Checks shape (`data:<mime>;base64,<payload>`), MIME allow-list, and the
/// decoded payload size before anything is dispatched to the model.
fn validate_data_uri(uri: &str, max_bytes: usize) -> Result<(), ErrorReply> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| bad_request("image must be a data URI"))?;
    let (mime, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| bad_request("image must be base64-encoded"))?;

    if !ALLOWED_IMAGE_TYPES.contains(&mime) {
        return Err(bad_request("unsupported image type"));
    }
    if payload.is_empty() {
        return Err(bad_request("image payload is empty"));
    }
    // Base64 expands 3 bytes to 4 characters.
    if payload.len() / 4 * 3 > max_bytes {
        return Err((
            StatusCode::PAYLOAD_TOO_LARGE,
            Json(json!({ "error": "image is too large" })),
        ));
    }
    Ok(())
}
