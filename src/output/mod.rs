pub mod formatter;

pub use formatter::{
    format_leaderboard_table, format_leaderboard_tsv, format_player_detail, format_score,
    format_session_table, format_session_tsv, format_template_fields, should_use_colors,
};
