use std::io::IsTerminal;

use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::scoring::{get_stats_summary, PlayerScore, PlayerStats};
use crate::template::TemplateField;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score in compact notation (1.5k, 2.3M, 847, 12.5)
pub fn format_score(score: f64) -> String {
    // Anything that rounds to zero prints as "0", never "-0"
    let score = if (score * 10.0).round() == 0.0 { 0.0 } else { score };
    let formatted = if score.abs() >= 1_000_000.0 {
        format!("{:.1}M", score / 1_000_000.0)
    } else if score.abs() >= 1_000.0 {
        format!("{:.1}k", score / 1_000.0)
    } else {
        format!("{:.1}", score)
    };

    // Trim trailing .0 (e.g., "1.0k" -> "1k", "12.0" -> "12")
    formatted
        .replace(".0M", "M")
        .replace(".0k", "k")
        .trim_end_matches(".0")
        .to_string()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Fit a name into whatever is left of the terminal after the fixed columns.
fn fit_name(name: &str, fixed_width: usize, term_width: Option<usize>) -> String {
    match term_width {
        Some(width) if width > fixed_width + 10 => truncate_name(name, width - fixed_width),
        // Very narrow terminal
        Some(_) => truncate_name(name, 20),
        // No terminal (pipe), don't truncate
        None => name.to_string(),
    }
}

/// Format a leaderboard as one line per player:
/// rank, points, name, then games / wins / win rate.
/// Players must already be sorted.
pub fn format_leaderboard_table(players: &[PlayerStats], use_colors: bool) -> String {
    if players.is_empty() {
        return "No players found.".to_string();
    }

    let term_width = get_terminal_width();
    let points_width = 6;
    let separator = "  ";

    players
        .iter()
        .enumerate()
        .map(|(idx, stats)| {
            let summary = get_stats_summary(stats);
            let rank_str = format!("{:>2}.", idx + 1);
            let points_str = format!("{:>width$}", stats.total_points, width = points_width);
            let record = format!(
                "{}g {}w {}%",
                summary.games_played, summary.wins, summary.win_rate
            );

            let fixed_width =
                rank_str.len() + 1 + points_width + separator.len() * 2 + record.len();
            let name = fit_name(&stats.user_name, fixed_width, term_width);

            if use_colors {
                let rank_colored = match idx {
                    0 => rank_str.yellow().bold().to_string(),
                    _ => rank_str.dimmed().to_string(),
                };
                format!(
                    "{} {}{}{}{}{}",
                    rank_colored,
                    points_str.bold(),
                    separator,
                    name,
                    separator,
                    record.dimmed()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}",
                    rank_str, points_str, separator, name, separator, record
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a leaderboard as tab-separated values for scripting
/// Columns: rank, user_id, user_name, total_points, games_played, wins, win_rate, average_points
pub fn format_leaderboard_tsv(players: &[PlayerStats]) -> String {
    players
        .iter()
        .enumerate()
        .map(|(idx, stats)| {
            let summary = get_stats_summary(stats);
            format!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                idx + 1,
                stats.user_id,
                stats.user_name,
                summary.total_points,
                summary.games_played,
                summary.wins,
                summary.win_rate,
                summary.average_points
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a processed session: placement, raw score, points earned, player.
pub fn format_session_table(players: &[PlayerScore], use_colors: bool) -> String {
    if players.is_empty() {
        return "No players in session.".to_string();
    }

    players
        .iter()
        .map(|p| {
            let name = p.user_name.as_deref().unwrap_or(&p.user_id);
            let placement = format!("{:>2}.", p.placement);
            let score = format!("{:>7}", format_score(p.raw_score));
            let points = format!("+{} pts", p.points_awarded);

            if use_colors {
                format!(
                    "{} {}  {}  {}",
                    placement.dimmed(),
                    score.bold(),
                    name,
                    points.green()
                )
            } else {
                format!("{} {}  {}  {}", placement, score, name, points)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a processed session as tab-separated values
/// Columns: placement, user_id, raw_score, points_awarded
pub fn format_session_tsv(players: &[PlayerScore]) -> String {
    players
        .iter()
        .map(|p| {
            format!(
                "{}\t{}\t{}\t{}",
                p.placement, p.user_id, p.raw_score, p.points_awarded
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Multi-line stats block for one player.
pub fn format_player_detail(stats: &PlayerStats, rank: usize, use_colors: bool) -> String {
    let summary = get_stats_summary(stats);
    let header = format!("#{} {}", rank, stats.user_name);
    let header = if use_colors {
        header.bold().to_string()
    } else {
        header
    };

    format!(
        "{}\n  Points: {} ({} avg)\n  Games: {}\n  Wins: {} ({}%)\n  Podiums: {}\n  Last place: {}",
        header,
        summary.total_points,
        summary.average_points,
        summary.games_played,
        summary.wins,
        summary.win_rate,
        summary.podiums,
        stats.last_place
    )
}

/// One line per template field: key, label and multiplier.
pub fn format_template_fields(fields: &[TemplateField]) -> String {
    if fields.is_empty() {
        return "Template has no fields.".to_string();
    }

    fields
        .iter()
        .map(|f| format!("{}  {}  x{}", f.key, f.label, f.effective_multiplier()))
        .collect::<Vec<_>>()
        .join("\n")
}
