use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Image encoded as a `data:` URI.
    #[serde(default)]
    pub image: String,
}

/// Normalized output of the analyzer, used to prefill a food-entry draft.
/// Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionEstimate {
    pub name: String,
    pub calories: i64,
    pub protein: i64,
    pub carbs: i64,
    pub fat: i64,
    pub description: String,
}
