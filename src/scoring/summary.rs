use super::types::{PlayerStats, StatsSummary};

/// Round half away from zero to one decimal place.
fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Condense stats for display. Only rates are rounded; counts pass through.
pub fn get_stats_summary(stats: &PlayerStats) -> StatsSummary {
    StatsSummary {
        total_points: stats.total_points,
        games_played: stats.games_played,
        wins: stats.wins,
        win_rate: round_to_tenth(stats.win_rate),
        average_points: round_to_tenth(stats.average_points),
        podiums: stats.wins + stats.second_place + stats.third_place,
    }
}
