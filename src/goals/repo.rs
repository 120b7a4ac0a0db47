use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::storage::KeyValueStore;

pub const GOALS_KEY: &str = "calorieTracker_goals";

/// Daily nutrition targets: kcal for calories, grams for the macros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyGoals {
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
}

impl Default for DailyGoals {
    fn default() -> Self {
        Self {
            calories: 2000,
            protein: 150,
            carbs: 250,
            fat: 65,
        }
    }
}

pub async fn load(store: &dyn KeyValueStore) -> anyhow::Result<DailyGoals> {
    match store.get(GOALS_KEY).await? {
        Some(raw) => serde_json::from_str(&raw).context("decode goals record"),
        None => Ok(DailyGoals::default()),
    }
}

pub async fn save(store: &dyn KeyValueStore, goals: &DailyGoals) -> anyhow::Result<()> {
    let raw = serde_json::to_string(goals).context("encode goals record")?;
    store.set(GOALS_KEY, &raw).await
}
