use serde::{Deserialize, Serialize};

use crate::template::ScoreDetails;

/// One player's result within the session being scored.
///
/// `placement` and `points_awarded` stay 0 until the session is processed.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerScore {
    pub user_id: String,

    /// Display name carried through to stored session rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,

    #[serde(default)]
    pub raw_score: f64,

    #[serde(default)]
    pub placement: u32,

    #[serde(default)]
    pub points_awarded: u32,

    /// Per-field breakdown, informational once `raw_score` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_details: Option<ScoreDetails>,
}

impl PlayerScore {
    pub fn new(user_id: &str, raw_score: f64) -> Self {
        Self {
            user_id: user_id.to_string(),
            user_name: None,
            raw_score,
            placement: 0,
            points_awarded: 0,
            score_details: None,
        }
    }

    pub fn with_details(user_id: &str, details: ScoreDetails) -> Self {
        Self {
            score_details: Some(details),
            ..Self::new(user_id, 0.0)
        }
    }
}

/// One already-scored player row from a stored session.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    pub user_id: String,
    pub user_name: String,
    pub points_awarded: u32,
    pub placement: u32,
    pub total_players: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_id: Option<String>,
}

impl SessionData {
    pub fn new(
        user_id: &str,
        user_name: &str,
        points_awarded: u32,
        placement: u32,
        total_players: u32,
    ) -> Self {
        Self {
            user_id: user_id.to_string(),
            user_name: user_name.to_string(),
            points_awarded,
            placement,
            total_players,
            session_id: None,
            game_id: None,
        }
    }
}

/// Aggregated results for one user across many sessions.
///
/// Recomputed from session rows on demand, never stored.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub user_id: String,
    pub user_name: String,
    pub total_points: u64,
    pub games_played: u32,
    pub wins: u32,
    pub second_place: u32,
    pub third_place: u32,
    pub last_place: u32,
    pub average_points: f64,
    /// Percentage in `0..=100`, unrounded.
    pub win_rate: f64,
}

impl PlayerStats {
    pub fn new(user_id: &str, user_name: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            user_name: user_name.to_string(),
            total_points: 0,
            games_played: 0,
            wins: 0,
            second_place: 0,
            third_place: 0,
            last_place: 0,
            average_points: 0.0,
            win_rate: 0.0,
        }
    }
}

/// Display-ready view of [`PlayerStats`]; rates rounded to one decimal.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub total_points: u64,
    pub games_played: u32,
    pub wins: u32,
    pub win_rate: f64,
    pub average_points: f64,
    pub podiums: u32,
}
