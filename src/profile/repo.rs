use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::storage::KeyValueStore;

pub const PROFILE_KEY: &str = "calorieTracker_profile";

/// The profile record as the original stored it: raw form strings,
/// overwritten wholesale on every save. Only height, current weight,
/// activity level and goal feed the calculator; the rest are identity
/// fields. Unknown activity-level values are kept as-is so the
/// calculator's default multiplier applies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: String,
    pub gender: String,
    /// Height in cm, numeric string.
    pub height: String,
    /// Weight in kg, numeric string.
    pub current_weight: String,
    pub target_weight: String,
    pub activity_level: String,
    pub goal: String,
}

pub async fn load(store: &dyn KeyValueStore) -> anyhow::Result<UserProfile> {
    match store.get(PROFILE_KEY).await? {
        Some(raw) => serde_json::from_str(&raw).context("decode profile record"),
        None => Ok(UserProfile::default()),
    }
}

pub async fn save(store: &dyn KeyValueStore, profile: &UserProfile) -> anyhow::Result<()> {
    let raw = serde_json::to_string(profile).context("encode profile record")?;
    store.set(PROFILE_KEY, &raw).await
}
