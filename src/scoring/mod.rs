pub mod leaderboard;
pub mod placement;
pub mod summary;
pub mod types;

pub use leaderboard::{
    aggregate_player_stats, calculate_player_rank, calculate_win_rate, get_top_players,
    sessions_for_game, sort_leaderboard, DEFAULT_TOP_LIMIT,
};
pub use placement::{
    apply_template, assign_league_points, assign_placements, calculate_league_points,
    process_player_scores, session_rows,
};
pub use summary::get_stats_summary;
pub use types::{PlayerScore, PlayerStats, SessionData, StatsSummary};
