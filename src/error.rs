use thiserror::Error;

/// A required calculator input is missing, non-numeric, or non-positive.
///
/// The UI gates on field completeness before calling the calculator, so this
/// never reaches an end user; it exists so the calculator fails loudly
/// instead of silently defaulting.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid profile input: {0}")]
pub struct InvalidInput(pub &'static str);

/// Failure modes of the food-image analysis path.
///
/// All three are surfaced to the client as one uniform retryable failure;
/// the distinction is only logged.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("model returned no content")]
    EmptyResponse,
    #[error("model reply did not contain a parsable JSON object")]
    MalformedResponse,
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
}
