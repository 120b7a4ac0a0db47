use serde::{Deserialize, Serialize};

use super::repo::{FoodItem, MealKind};

#[derive(Debug, Deserialize)]
pub struct CreateFoodRequest {
    pub name: String,
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fat: f64,
    pub meal: MealKind,
}

/// The log grouped the way the main screen renders it.
#[derive(Debug, Default, Serialize)]
pub struct FoodLog {
    pub breakfast: Vec<FoodItem>,
    pub lunch: Vec<FoodItem>,
    pub dinner: Vec<FoodItem>,
    pub snack: Vec<FoodItem>,
}

impl FoodLog {
    pub fn group(items: Vec<FoodItem>) -> Self {
        let mut log = Self::default();
        for item in items {
            match item.meal {
                MealKind::Breakfast => log.breakfast.push(item),
                MealKind::Lunch => log.lunch.push(item),
                MealKind::Dinner => log.dinner.push(item),
                MealKind::Snack => log.snack.push(item),
            }
        }
        log
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CommonFood {
    pub name: &'static str,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

#[derive(Debug, Serialize)]
pub struct MacroProgress {
    pub goal: u32,
    pub consumed: f64,
    /// Clamped at zero; overshooting the goal never reads negative.
    pub remaining: f64,
    /// Percent of goal; 0 when the goal denominator is zero.
    pub percent: f64,
}

#[derive(Debug, Serialize)]
pub struct DailySummary {
    pub calories: MacroProgress,
    pub protein: MacroProgress,
    pub carbs: MacroProgress,
    pub fat: MacroProgress,
}
