use thiserror::Error;

/// Raised when a user-supplied scoring template cannot be used.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("template is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("template must be a JSON array of fields")]
    NotAnArray,

    #[error("template field {index} is missing a key")]
    MissingKey { index: usize },

    #[error("template field {index} is missing a label")]
    MissingLabel { index: usize },
}

/// A placement outside `1..=total_players`.
///
/// Placements come from `assign_placements`, so seeing this means a caller
/// handed in rows that were never ranked.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PlacementError {
    #[error("placement {placement} is out of range for a {total_players}-player session")]
    OutOfRange { placement: u32, total_players: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_error_messages() {
        assert_eq!(
            TemplateError::MissingLabel { index: 2 }.to_string(),
            "template field 2 is missing a label"
        );
        assert_eq!(
            TemplateError::NotAnArray.to_string(),
            "template must be a JSON array of fields"
        );
    }

    #[test]
    fn test_placement_error_message() {
        let err = PlacementError::OutOfRange {
            placement: 5,
            total_players: 4,
        };
        assert_eq!(
            err.to_string(),
            "placement 5 is out of range for a 4-player session"
        );
    }
}
