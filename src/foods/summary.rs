use crate::goals::DailyGoals;

use super::dto::{DailySummary, MacroProgress};
use super::repo::FoodItem;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Totals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

pub fn totals(foods: &[FoodItem]) -> Totals {
    foods.iter().fold(Totals::default(), |acc, f| Totals {
        calories: acc.calories + f.calories,
        protein: acc.protein + f.protein,
        carbs: acc.carbs + f.carbs,
        fat: acc.fat + f.fat,
    })
}

pub fn summarize(goals: &DailyGoals, foods: &[FoodItem]) -> DailySummary {
    let t = totals(foods);
    DailySummary {
        calories: progress(goals.calories, t.calories),
        protein: progress(goals.protein, t.protein),
        carbs: progress(goals.carbs, t.carbs),
        fat: progress(goals.fat, t.fat),
    }
}

/// Signed consumed-vs-goal delta; negative once the goal is exceeded.
/// The outward-facing `remaining` is this clamped at zero.
pub fn delta(goal: u32, consumed: f64) -> f64 {
    f64::from(goal) - consumed
}

fn progress(goal: u32, consumed: f64) -> MacroProgress {
    MacroProgress {
        goal,
        consumed,
        remaining: delta(goal, consumed).max(0.0),
        percent: percent_of_goal(goal, consumed),
    }
}

/// Zero-goal guard: a zero denominator reads as 0%, never a division fault.
fn percent_of_goal(goal: u32, consumed: f64) -> f64 {
    if goal == 0 {
        0.0
    } else {
        consumed / f64::from(goal) * 100.0
    }
}
