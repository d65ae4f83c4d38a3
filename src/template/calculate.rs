use serde::Deserialize;

use super::fields::{ScoreDetails, TemplateField};

/// Weighted sum of a player's field values.
///
/// Template keys missing from `details` count as 0 and detail keys the
/// template does not name are ignored. No rounding is applied.
pub fn calculate_raw_score(details: &ScoreDetails, fields: &[TemplateField]) -> f64 {
    fields
        .iter()
        .map(|field| {
            let value = details.get(&field.key).copied().unwrap_or(0.0);
            value * field.effective_multiplier()
        })
        .sum()
}

/// Loosely-typed field used by [`calculate_total_from_template`].
#[derive(Debug, Deserialize)]
struct LooseField {
    #[serde(default)]
    key: Option<String>,
    #[serde(default)]
    multiplier: Option<f64>,
}

/// Score a player straight from a stored template string.
///
/// Unlike [`super::parse_template_fields`] this never fails: anything that
/// cannot be read as a field array scores 0. Fields without a key contribute
/// nothing.
pub fn calculate_total_from_template(details: &ScoreDetails, template_json: &str) -> f64 {
    let fields: Vec<LooseField> = match serde_json::from_str(template_json) {
        Ok(fields) => fields,
        Err(e) => {
            log::debug!("Ignoring unreadable template, scoring 0: {}", e);
            return 0.0;
        }
    };

    let fields: Vec<TemplateField> = fields
        .into_iter()
        .filter_map(|f| {
            f.key.map(|key| TemplateField {
                key,
                label: String::new(),
                multiplier: f.multiplier,
            })
        })
        .collect();

    calculate_raw_score(details, &fields)
}
