//! Built-in string tables. Keys are shared by every locale.

pub(super) const EN: &[(&str, &str)] = &[
    ("category.normal", "Normal"),
    ("category.elevated", "Elevated"),
    ("category.stage1", "High BP Stage 1"),
    ("category.stage2", "High BP Stage 2"),
    ("category.crisis", "Hypertensive Crisis"),
    ("insights.trend.better", "Lower than yesterday"),
    ("insights.trend.same", "About the same as yesterday"),
    ("insights.trend.worse", "Higher than yesterday"),
    ("insights.pattern.morning", "Usually logs in the morning"),
    ("insights.pattern.evening", "Usually logs in the evening"),
    ("insights.streak.one", "{count} day streak"),
    ("insights.streak.other", "{count} days streak"),
    ("chart.range.today", "Today"),
    ("chart.range.5d", "5 Days"),
    ("chart.range.10d", "10 Days"),
    ("chart.range.30d", "30 Days"),
    ("entry.validationError", "Please fill in all required fields"),
    ("entry.saveError", "Failed to save entry. Please try again."),
];

pub(super) const GU: &[(&str, &str)] = &[
    ("category.normal", "સામાન્ય"),
    ("category.elevated", "વધેલું"),
    ("category.stage1", "હાઈ BP સ્ટેજ 1"),
    ("category.stage2", "હાઈ BP સ્ટેજ 2"),
    ("category.crisis", "હાઈપરટેન્સિવ કટોકટી"),
    ("insights.trend.better", "ગઈકાલ કરતાં ઓછું"),
    ("insights.trend.same", "ગઈકાલ જેટલું જ"),
    ("insights.trend.worse", "ગઈકાલ કરતાં વધારે"),
    ("insights.pattern.morning", "સામાન્ય રીતે સવારે લોગ કરો છો"),
    ("insights.pattern.evening", "સામાન્ય રીતે સાંજે લોગ કરો છો"),
    ("insights.streak.one", "{count} દિવસની સ્ટ્રીક"),
    ("insights.streak.other", "{count} દિવસની સ્ટ્રીક"),
    ("chart.range.today", "આજે"),
    ("chart.range.5d", "5 દિવસ"),
    ("chart.range.10d", "10 દિવસ"),
    ("chart.range.30d", "30 દિવસ"),
    ("entry.validationError", "કૃપા કરીને બધી જરૂરી ફીલ્ડ ભરો"),
    ("entry.saveError", "એન્ટ્રી સેવ કરવામાં નિષ્ફળ. ફરી પ્રયાસ કરો."),
];
