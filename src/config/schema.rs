use serde::{Deserialize, Serialize};

/// Top-level configuration file.
///
/// Example YAML:
/// ```yaml
/// leaderboard:
///   limit: 10
///   color: true
/// templates:
///   - name: wonders
///     path: templates/wonders.json
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub leaderboard: Option<LeaderboardConfig>,

    /// Named scoring templates available to `score --template`.
    #[serde(default)]
    pub templates: Vec<TemplateConfig>,
}

impl Config {
    pub fn find_template(&self, name: &str) -> Option<&TemplateConfig> {
        self.templates.iter().find(|t| t.name == name)
    }

    /// Configured leaderboard length, if any.
    pub fn leaderboard_limit(&self) -> Option<usize> {
        self.leaderboard.as_ref().and_then(|l| l.limit)
    }

    /// Forced color setting, if any. `None` means auto-detect.
    pub fn color(&self) -> Option<bool> {
        self.leaderboard.as_ref().and_then(|l| l.color)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LeaderboardConfig {
    /// Number of players shown by `leaderboard` (default: 10)
    #[serde(default)]
    pub limit: Option<usize>,

    /// Force colored output on or off
    #[serde(default)]
    pub color: Option<bool>,
}

/// A scoring template stored as a JSON field list on disk.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TemplateConfig {
    pub name: String,
    /// Relative paths resolve against the config file's directory.
    pub path: String,
}
