use std::collections::HashSet;

use super::schema::Config;

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(limit) = config.leaderboard_limit() {
        if limit < 1 {
            errors.push("leaderboard.limit: must be at least 1".to_string());
        }
    }

    let mut seen = HashSet::new();
    for (i, template) in config.templates.iter().enumerate() {
        if template.name.trim().is_empty() {
            errors.push(format!("templates[{}].name: must not be empty", i));
        } else if !seen.insert(template.name.as_str()) {
            errors.push(format!(
                "templates[{}].name: duplicate template '{}'",
                i, template.name
            ));
        }
        if template.path.trim().is_empty() {
            errors.push(format!("templates[{}].path: must not be empty", i));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LeaderboardConfig, TemplateConfig};

    fn template(name: &str, path: &str) -> TemplateConfig {
        TemplateConfig {
            name: name.to_string(),
            path: path.to_string(),
        }
    }

    #[test]
    fn test_valid_config() {
        let config = Config {
            leaderboard: Some(LeaderboardConfig {
                limit: Some(10),
                color: None,
            }),
            templates: vec![template("wonders", "wonders.json")],
        };
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_empty_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_zero_limit() {
        let config = Config {
            leaderboard: Some(LeaderboardConfig {
                limit: Some(0),
                color: None,
            }),
            templates: vec![],
        };
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("leaderboard.limit"));
    }

    #[test]
    fn test_duplicate_template_name() {
        let config = Config {
            leaderboard: None,
            templates: vec![template("wonders", "a.json"), template("wonders", "b.json")],
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("templates[1].name"));
    }

    #[test]
    fn test_collects_all_errors() {
        let config = Config {
            leaderboard: Some(LeaderboardConfig {
                limit: Some(0),
                color: None,
            }),
            templates: vec![template("", "")],
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
