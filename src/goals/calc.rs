use crate::error::InvalidInput;
use crate::profile::UserProfile;

use super::repo::DailyGoals;

/// Age the BMR formula assumes; the profile does not collect age, so the
/// original hard-codes 25. Kept as the contract under test.
const ASSUMED_AGE: f64 = 25.0;

const CALORIE_DEFICIT: f64 = 500.0;
const CALORIE_SURPLUS: f64 = 500.0;

/// Daily targets from profile attributes, via a simplified Harris-Benedict
/// BMR. The formula is gender-neutral even though the profile collects a
/// gender field; that matches the original contract and is not corrected
/// here.
///
/// Pure and deterministic; persisting the result is the caller's job.
pub fn compute_daily_goals(profile: &UserProfile) -> Result<DailyGoals, InvalidInput> {
    let weight = positive_number(&profile.current_weight).ok_or(InvalidInput("currentWeight"))?;
    let height = positive_number(&profile.height).ok_or(InvalidInput("height"))?;

    let bmr = 10.0 * weight + 6.25 * height - 5.0 * ASSUMED_AGE + 5.0;
    let tdee = bmr * activity_multiplier(&profile.activity_level);

    let calories = match profile.goal.as_str() {
        "lose" => tdee - CALORIE_DEFICIT,
        "gain" => tdee + CALORIE_SURPLUS,
        _ => tdee,
    };

    let calories = calories.round().max(0.0) as u32;
    Ok(DailyGoals {
        calories,
        protein: (weight * 2.0).round() as u32,
        carbs: (f64::from(calories) * 0.40 / 4.0).round() as u32,
        fat: (f64::from(calories) * 0.30 / 9.0).round() as u32,
    })
}

/// Unknown or missing levels fall back to the sedentary multiplier.
fn activity_multiplier(level: &str) -> f64 {
    match level {
        "sedentary" => 1.2,
        "light" => 1.375,
        "moderate" => 1.55,
        "active" => 1.725,
        "veryActive" => 1.9,
        _ => 1.2,
    }
}

fn positive_number(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}
