//! Display strings for the identifiers the tracker emits.
//!
//! Analysis code only ever produces keys (`Category::label_key`,
//! `Trend::label_key`, ...). A `LabelProvider` turns them into text at the
//! boundary, so the active locale is an explicit value rather than global state.

mod strings;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::analysis::{Category, Insights};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Gu,
    En,
}

impl Default for Locale {
    fn default() -> Self {
        Locale::Gu
    }
}

impl Locale {
    pub fn toggled(&self) -> Self {
        match self {
            Locale::Gu => Locale::En,
            Locale::En => Locale::Gu,
        }
    }
}

pub trait LabelProvider: Send + Sync {
    /// Text for `key` in the active locale, or the key itself when unknown.
    fn label(&self, key: &str) -> String;

    /// `label` with `{name}` placeholders substituted.
    fn label_with(&self, key: &str, args: &[(&str, String)]) -> String {
        args.iter().fold(self.label(key), |text, (name, value)| {
            text.replace(&format!("{{{name}}}"), value)
        })
    }
}

/// Label provider backed by the compiled-in tables.
#[derive(Debug, Clone)]
pub struct BuiltinLabels {
    locale: Locale,
    table: HashMap<&'static str, &'static str>,
}

impl BuiltinLabels {
    pub fn new(locale: Locale) -> Self {
        let entries = match locale {
            Locale::Gu => strings::GU,
            Locale::En => strings::EN,
        };

        Self {
            locale,
            table: entries.iter().copied().collect(),
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }
}

impl LabelProvider for BuiltinLabels {
    fn label(&self, key: &str) -> String {
        self.table
            .get(key)
            .map(|text| text.to_string())
            .unwrap_or_else(|| key.to_string())
    }
}

pub fn category_label(provider: &dyn LabelProvider, category: Category) -> String {
    provider.label(category.label_key())
}

pub fn streak_label(provider: &dyn LabelProvider, streak: u32) -> String {
    let key = if streak == 1 {
        "insights.streak.one"
    } else {
        "insights.streak.other"
    };
    provider.label_with(key, &[("count", streak.to_string())])
}

/// Rendered insight phrases, ready for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InsightLabels {
    pub category: Option<String>,
    pub trend: Option<String>,
    pub streak: Option<String>,
    pub time_pattern: Option<String>,
}

pub fn describe_insights(provider: &dyn LabelProvider, insights: &Insights) -> InsightLabels {
    InsightLabels {
        category: insights
            .display_category()
            .map(|category| category_label(provider, category)),
        trend: insights.trend.map(|trend| provider.label(trend.label_key())),
        streak: (insights.streak > 0).then(|| streak_label(provider, insights.streak)),
        time_pattern: insights
            .time_pattern
            .map(|pattern| provider.label(pattern.label_key())),
    }
}
