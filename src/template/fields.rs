use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::error::TemplateError;

/// Per-field values entered for one player in one session, keyed by field key.
pub type ScoreDetails = HashMap<String, f64>;

/// One scoring input slot of a custom template.
///
/// Templates are stored as a JSON array:
/// ```json
/// [
///   { "key": "coins", "label": "Coins", "multiplier": 1 },
///   { "key": "wonders", "label": "Wonders", "multiplier": 3 }
/// ]
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct TemplateField {
    pub key: String,
    pub label: String,

    /// Weight applied to the field value. Absent means 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<f64>,
}

impl TemplateField {
    pub fn new(key: &str, label: &str, multiplier: Option<f64>) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            multiplier,
        }
    }

    /// Multiplier actually applied when scoring.
    ///
    /// Known quirk: zero is treated like a missing multiplier, so a field can
    /// never carry an explicit weight of 0. Stored templates rely on this.
    pub fn effective_multiplier(&self) -> f64 {
        match self.multiplier {
            Some(m) if m != 0.0 && !m.is_nan() => m,
            _ => 1.0,
        }
    }
}

/// Returns the string if it is present and non-empty.
fn non_empty_str<'a>(field: &'a Value, name: &str) -> Option<&'a str> {
    field
        .get(name)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Parse a stored template, rejecting anything that is not a usable field list.
///
/// Every returned field has its multiplier normalized (see
/// [`TemplateField::effective_multiplier`]), so `multiplier` is always `Some`.
pub fn parse_template_fields(json: &str) -> Result<Vec<TemplateField>, TemplateError> {
    let value: Value = serde_json::from_str(json)?;
    let items = value.as_array().ok_or(TemplateError::NotAnArray)?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let key = non_empty_str(item, "key").ok_or(TemplateError::MissingKey { index })?;
            let label =
                non_empty_str(item, "label").ok_or(TemplateError::MissingLabel { index })?;
            let multiplier = item.get("multiplier").and_then(Value::as_f64);
            let raw = TemplateField::new(key, label, multiplier);
            let multiplier = raw.effective_multiplier();
            Ok(TemplateField {
                multiplier: Some(multiplier),
                ..raw
            })
        })
        .collect()
}

/// Non-failing pre-check used before a template is saved.
///
/// True iff `fields` is an array whose elements all have a non-empty string
/// `key`, a non-empty string `label`, and a numeric `multiplier` when one is
/// present (an explicit `null` counts as present).
pub fn validate_template_fields(fields: &Value) -> bool {
    let Some(items) = fields.as_array() else {
        return false;
    };

    items.iter().all(|item| {
        non_empty_str(item, "key").is_some()
            && non_empty_str(item, "label").is_some()
            && item.get("multiplier").map_or(true, Value::is_number)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_valid_template() {
        let fields = parse_template_fields(
            r#"[{"key":"coins","label":"Coins"},{"key":"wonders","label":"Wonders","multiplier":3}]"#,
        )
        .unwrap();

        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0], TemplateField::new("coins", "Coins", Some(1.0)));
        assert_eq!(fields[1], TemplateField::new("wonders", "Wonders", Some(3.0)));
    }

    #[test]
    fn test_parse_zero_multiplier_becomes_one() {
        let fields =
            parse_template_fields(r#"[{"key":"coins","label":"Coins","multiplier":0}]"#).unwrap();
        assert_eq!(fields[0].multiplier, Some(1.0));
    }

    #[test]
    fn test_parse_negative_multiplier_kept() {
        let fields =
            parse_template_fields(r#"[{"key":"debt","label":"Debt","multiplier":-2}]"#).unwrap();
        assert_eq!(fields[0].multiplier, Some(-2.0));
    }

    #[test]
    fn test_parse_empty_array() {
        assert!(parse_template_fields("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_object() {
        let result = parse_template_fields("{}");
        assert!(matches!(result, Err(TemplateError::NotAnArray)));
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        let result = parse_template_fields("invalid json");
        assert!(matches!(result, Err(TemplateError::InvalidJson(_))));
    }

    #[test]
    fn test_parse_rejects_missing_label() {
        let result = parse_template_fields(r#"[{"key":"coins"}]"#);
        assert!(matches!(result, Err(TemplateError::MissingLabel { index: 0 })));
    }

    #[test]
    fn test_parse_rejects_empty_key() {
        let result =
            parse_template_fields(r#"[{"key":"a","label":"A"},{"key":"","label":"B"}]"#);
        assert!(matches!(result, Err(TemplateError::MissingKey { index: 1 })));
    }

    #[test]
    fn test_validate_accepts_valid_fields() {
        let fields = json!([
            { "key": "coins", "label": "Coins" },
            { "key": "wonders", "label": "Wonders", "multiplier": 2.5 }
        ]);
        assert!(validate_template_fields(&fields));
    }

    #[test]
    fn test_validate_rejects_non_array() {
        assert!(!validate_template_fields(&json!({ "key": "coins", "label": "Coins" })));
        assert!(!validate_template_fields(&json!("coins")));
    }

    #[test]
    fn test_validate_rejects_non_numeric_multiplier() {
        let fields = json!([{ "key": "coins", "label": "Coins", "multiplier": "2" }]);
        assert!(!validate_template_fields(&fields));

        let fields = json!([{ "key": "coins", "label": "Coins", "multiplier": null }]);
        assert!(!validate_template_fields(&fields));
    }

    #[test]
    fn test_validate_rejects_empty_label() {
        let fields = json!([{ "key": "coins", "label": "" }]);
        assert!(!validate_template_fields(&fields));
    }

    #[test]
    fn test_effective_multiplier() {
        assert_eq!(TemplateField::new("a", "A", None).effective_multiplier(), 1.0);
        assert_eq!(TemplateField::new("a", "A", Some(0.0)).effective_multiplier(), 1.0);
        assert_eq!(TemplateField::new("a", "A", Some(0.5)).effective_multiplier(), 0.5);
    }
}
