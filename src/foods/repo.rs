use anyhow::Context;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::KeyValueStore;

pub const FOOD_LOG_KEY: &str = "calorieTracker_foods";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealKind {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

/// One logged food entry. Immutable once created; only deletable. Macro
/// values are fractional because the common-food presets carry fractional
/// grams; AI-derived entries arrive already integer-rounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: Uuid,
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub meal: MealKind,
    /// HH:MM, captured at creation.
    pub time: String,
}

/// The whole log is one unscoped record: no date partitioning, read and
/// rewritten in full on every mutation.
pub async fn load(store: &dyn KeyValueStore) -> anyhow::Result<Vec<FoodItem>> {
    match store.get(FOOD_LOG_KEY).await? {
        Some(raw) => serde_json::from_str(&raw).context("decode food log record"),
        None => Ok(Vec::new()),
    }
}

pub async fn save(store: &dyn KeyValueStore, foods: &[FoodItem]) -> anyhow::Result<()> {
    let raw = serde_json::to_string(foods).context("encode food log record")?;
    store.set(FOOD_LOG_KEY, &raw).await
}
