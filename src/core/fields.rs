//! Decide which `key = value` lines of a part config carry user-visible text.

use super::patterns::PatternSet;

/// Fields that are always shown to the player.
const DISPLAY_FIELDS: &[&str] = &[
    "title",
    "description",
    "manufacturer",
    "label",
    "guiname",
    "tags",
    "tooltip",
];

/// Experiment situations; `<body><situation>` fields hold science results.
const SITUATION_STATES: [&str; 7] = [
    "SrfLanded",
    "SrfSplashed",
    "InSpace",
    "FlyingLow",
    "FlyingHigh",
    "InSpaceLow",
    "InSpaceHigh",
];

#[derive(Debug, Default)]
pub struct FieldClassifier {
    include: PatternSet,
    /// Lowercased `<body><situation>` combinations.
    science_fields: Vec<String>,
}

impl FieldClassifier {
    pub fn new(include: PatternSet, celestial_bodies: &[String]) -> Self {
        let science_fields = celestial_bodies
            .iter()
            .flat_map(|body| {
                SITUATION_STATES
                    .iter()
                    .map(move |state| format!("{}{}", body, state).to_lowercase())
            })
            .collect();
        Self {
            include,
            science_fields,
        }
    }

    /// Whether the field name holds display text. Case-insensitive.
    pub fn is_display_field(&self, field: &str) -> bool {
        let field = field.to_lowercase();

        if DISPLAY_FIELDS.contains(&field.as_str()) {
            return true;
        }
        if field.ends_with("actionname") || field.ends_with("eventname") {
            return true;
        }
        if (field.contains("action") || field.contains("event")) && field.ends_with("name") {
            return true;
        }
        if self.include.matches_any(&field) {
            return true;
        }
        self.is_science_result(&field)
    }

    fn is_science_result(&self, field: &str) -> bool {
        field == "default" || self.science_fields.iter().any(|s| field.contains(s.as_str()))
    }
}

/// Whether a field value should be replaced by a key.
///
/// Empty values, existing key references (`#...`) and numbers are kept.
pub fn is_localizable_value(value: &str) -> bool {
    !value.is_empty() && !value.starts_with('#') && !is_numeric(value)
}

fn is_numeric(value: &str) -> bool {
    value.trim().parse::<f64>().is_ok()
}
