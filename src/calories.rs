//! Static calorie lookup for the canteen menu.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Calories per unit for each menu item, in menu order.
/// Names are matched exactly; anything not listed counts as 0.
pub static CALORIE_TABLE: &[(&str, u32)] = &[
    ("Pav Bhaji", 290),
    ("Misal Pav", 289),
    ("Mini Lunch", 293),
    ("Idli Sambhar", 304),
    ("Veg Biryani", 241),
    ("NonVeg Biryani", 350),
    ("Noodles", 210),
    ("Puri Bhaji", 310),
    ("Samosa", 105),
    ("VegSandwich", 190),
    ("Vada Pav", 197),
    ("Coca Cola", 140),
    ("Appy Fizz", 52),
    ("Buttermilk", 98),
    ("AmulCool", 104),
    ("Tropicana", 96),
    ("Pizza", 310),
    ("Sev Puri", 171),
    ("Burger", 220),
];

static LOOKUP: LazyLock<HashMap<&'static str, u32>> =
    LazyLock::new(|| CALORIE_TABLE.iter().copied().collect());

/// Returns calories per unit for `food_name`, or 0 when the item is unknown.
pub fn calories_for(food_name: &str) -> f64 {
    LOOKUP.get(food_name).copied().map(f64::from).unwrap_or(0.0)
}

/// One row of the calorie table as rendered by the `calories` command.
#[derive(Debug, Serialize)]
pub struct CalorieEntry {
    pub food: &'static str,
    pub calories: u32,
}

/// The calorie table in menu order.
pub fn entries() -> Vec<CalorieEntry> {
    CALORIE_TABLE
        .iter()
        .map(|&(food, calories)| CalorieEntry { food, calories })
        .collect()
}
