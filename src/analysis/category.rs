//! Blood pressure severity categories.
//!
//! Thresholds follow the AHA 2017 guideline:
//!
//! | Category | Rule                               |
//! |----------|------------------------------------|
//! | Crisis   | SYS > 180 or DIA > 120             |
//! | Stage2   | SYS >= 140 or DIA >= 90            |
//! | Stage1   | SYS >= 130 or DIA >= 80            |
//! | Elevated | SYS >= 120 and DIA < 80            |
//! | Normal   | everything else                    |
//!
//! Rules are evaluated top to bottom and the first match wins.

use serde::{Deserialize, Serialize};

/// Severity category, ordered from least to most severe.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Normal,
    Elevated,
    Stage1,
    Stage2,
    Crisis,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Normal,
        Category::Elevated,
        Category::Stage1,
        Category::Stage2,
        Category::Crisis,
    ];

    /// Position in the severity order, 0 for Normal.
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    pub fn label_key(&self) -> &'static str {
        match self {
            Category::Normal => "category.normal",
            Category::Elevated => "category.elevated",
            Category::Stage1 => "category.stage1",
            Category::Stage2 => "category.stage2",
            Category::Crisis => "category.crisis",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Normal
    }
}

pub fn classify(systolic: u32, diastolic: u32) -> Category {
    if systolic > 180 || diastolic > 120 {
        return Category::Crisis;
    }
    if systolic >= 140 || diastolic >= 90 {
        return Category::Stage2;
    }
    if systolic >= 130 || diastolic >= 80 {
        return Category::Stage1;
    }
    if systolic >= 120 && diastolic < 80 {
        return Category::Elevated;
    }
    Category::Normal
}

/// Permissive variant for display paths: a missing value yields `Normal`.
pub fn classify_optional(systolic: Option<u32>, diastolic: Option<u32>) -> Category {
    match (systolic, diastolic) {
        (Some(sys), Some(dia)) => classify(sys, dia),
        _ => Category::Normal,
    }
}

/// Text-field variant; anything that does not parse as an integer yields `Normal`.
pub fn classify_text(systolic: &str, diastolic: &str) -> Category {
    classify_optional(
        systolic.trim().parse().ok(),
        diastolic.trim().parse().ok(),
    )
}
