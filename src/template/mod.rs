pub mod calculate;
pub mod fields;

pub use calculate::{calculate_raw_score, calculate_total_from_template};
pub use fields::{parse_template_fields, validate_template_fields, ScoreDetails, TemplateField};
