use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::types::{PlayerStats, SessionData};

/// Number of entries [`get_top_players`] returns when no limit is given.
pub const DEFAULT_TOP_LIMIT: usize = 10;

fn refresh_rates(stats: &mut PlayerStats) {
    if stats.games_played > 0 {
        let games = stats.games_played as f64;
        stats.average_points = stats.total_points as f64 / games;
        stats.win_rate = stats.wins as f64 / games * 100.0;
    } else {
        stats.average_points = 0.0;
        stats.win_rate = 0.0;
    }
}

/// Fold stored session rows into per-user statistics, keyed by user id.
///
/// A one-player session counts as both a win and a last place.
pub fn aggregate_player_stats(sessions: &[SessionData]) -> BTreeMap<String, PlayerStats> {
    let mut stats: BTreeMap<String, PlayerStats> = BTreeMap::new();

    for row in sessions {
        let entry = stats
            .entry(row.user_id.clone())
            .or_insert_with(|| PlayerStats::new(&row.user_id, &row.user_name));

        entry.games_played += 1;
        entry.total_points += u64::from(row.points_awarded);

        match row.placement {
            1 => entry.wins += 1,
            2 => entry.second_place += 1,
            3 => entry.third_place += 1,
            _ => {}
        }
        if row.placement == row.total_players {
            entry.last_place += 1;
        }

        refresh_rates(entry);
    }

    log::debug!(
        "Aggregated {} session rows into {} players",
        sessions.len(),
        stats.len()
    );
    stats
}

/// Leaderboard ordering: most points, then fewest games, then most wins.
fn compare_standing(a: &PlayerStats, b: &PlayerStats) -> Ordering {
    b.total_points
        .cmp(&a.total_points)
        .then_with(|| a.games_played.cmp(&b.games_played))
        .then_with(|| b.wins.cmp(&a.wins))
}

/// Sorted copy of `players`. Fully tied players keep their input order.
pub fn sort_leaderboard(players: &[PlayerStats]) -> Vec<PlayerStats> {
    let mut sorted = players.to_vec();
    sorted.sort_by(compare_standing);
    sorted
}

/// The first `limit` players of the sorted leaderboard ([`DEFAULT_TOP_LIMIT`] if `None`).
pub fn get_top_players(players: &[PlayerStats], limit: Option<usize>) -> Vec<PlayerStats> {
    let mut sorted = sort_leaderboard(players);
    sorted.truncate(limit.unwrap_or(DEFAULT_TOP_LIMIT));
    sorted
}

/// 1-based leaderboard position of `user_id`, or 0 when the user is absent.
pub fn calculate_player_rank(user_id: &str, players: &[PlayerStats]) -> usize {
    sort_leaderboard(players)
        .iter()
        .position(|p| p.user_id == user_id)
        .map_or(0, |idx| idx + 1)
}

/// Percentage of `user_id`'s sessions that were wins; 0 with no sessions.
pub fn calculate_win_rate(user_id: &str, sessions: &[SessionData]) -> f64 {
    let (played, wins) = sessions
        .iter()
        .filter(|s| s.user_id == user_id)
        .fold((0u32, 0u32), |(played, wins), s| {
            (played + 1, wins + u32::from(s.placement == 1))
        });

    if played == 0 {
        return 0.0;
    }
    wins as f64 / played as f64 * 100.0
}

/// Session rows belonging to one game.
pub fn sessions_for_game(sessions: &[SessionData], game_id: &str) -> Vec<SessionData> {
    sessions
        .iter()
        .filter(|s| s.game_id.as_deref() == Some(game_id))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(id: &str, total_points: u64, games_played: u32, wins: u32) -> PlayerStats {
        PlayerStats {
            total_points,
            games_played,
            wins,
            ..PlayerStats::new(id, id)
        }
    }

    fn ids(players: &[PlayerStats]) -> Vec<&str> {
        players.iter().map(|p| p.user_id.as_str()).collect()
    }

    #[test]
    fn test_aggregate_single_user() {
        let sessions: Vec<_> = [1, 1, 2, 3]
            .iter()
            .map(|&placement| SessionData::new("u1", "Ada", 4 - placement, placement, 3))
            .collect();

        let result = aggregate_player_stats(&sessions);
        let ada = &result["u1"];

        assert_eq!(ada.games_played, 4);
        assert_eq!(ada.wins, 2);
        assert_eq!(ada.second_place, 1);
        assert_eq!(ada.third_place, 1);
        assert_eq!(ada.last_place, 1);
        assert_eq!(ada.total_points, 9);
        assert_eq!(ada.win_rate, 50.0);
        assert_eq!(ada.average_points, 2.25);
    }

    #[test]
    fn test_aggregate_multiple_users() {
        let sessions = vec![
            SessionData::new("u1", "Ada", 2, 1, 2),
            SessionData::new("u2", "Bob", 1, 2, 2),
            SessionData::new("u2", "Bob", 4, 1, 4),
        ];

        let result = aggregate_player_stats(&sessions);
        assert_eq!(result.len(), 2);
        assert_eq!(result["u1"].last_place, 0);
        assert_eq!(result["u2"].games_played, 2);
        assert_eq!(result["u2"].total_points, 5);
        assert_eq!(result["u2"].last_place, 1);
        assert_eq!(result["u2"].user_name, "Bob");
    }

    #[test]
    fn test_aggregate_single_player_session_is_win_and_last() {
        let result = aggregate_player_stats(&[SessionData::new("solo", "Solo", 1, 1, 1)]);
        assert_eq!(result["solo"].wins, 1);
        assert_eq!(result["solo"].last_place, 1);
    }

    #[test]
    fn test_aggregate_points_beyond_u32() {
        let sessions = vec![
            SessionData::new("u1", "Ada", u32::MAX, 1, 2),
            SessionData::new("u1", "Ada", 2, 1, 2),
        ];

        let result = aggregate_player_stats(&sessions);
        assert_eq!(result["u1"].total_points, u64::from(u32::MAX) + 2);
        assert_eq!(result["u1"].games_played, 2);
    }

    #[test]
    fn test_aggregate_empty() {
        assert!(aggregate_player_stats(&[]).is_empty());
    }

    #[test]
    fn test_sort_by_points() {
        let players = vec![stats("a", 10, 5, 1), stats("b", 30, 5, 1), stats("c", 20, 5, 1)];
        assert_eq!(ids(&sort_leaderboard(&players)), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_sort_fewer_games_breaks_tie() {
        let players = vec![stats("a", 100, 20, 5), stats("b", 100, 10, 5)];
        assert_eq!(ids(&sort_leaderboard(&players)), vec!["b", "a"]);
    }

    #[test]
    fn test_sort_more_wins_breaks_tie() {
        let players = vec![stats("a", 100, 10, 5), stats("b", 100, 10, 8)];
        assert_eq!(ids(&sort_leaderboard(&players)), vec!["b", "a"]);
    }

    #[test]
    fn test_sort_full_tie_keeps_input_order() {
        let players = vec![stats("z", 50, 5, 2), stats("a", 50, 5, 2), stats("m", 50, 5, 2)];
        assert_eq!(ids(&sort_leaderboard(&players)), vec!["z", "a", "m"]);
    }

    #[test]
    fn test_top_players_limit() {
        let players: Vec<_> = (0..15).map(|i| stats(&format!("p{}", i), i, 3, 0)).collect();

        let top = get_top_players(&players, None);
        assert_eq!(top.len(), DEFAULT_TOP_LIMIT);
        assert_eq!(top[0].user_id, "p14");

        let top = get_top_players(&players, Some(3));
        assert_eq!(ids(&top), vec!["p14", "p13", "p12"]);

        assert_eq!(get_top_players(&players[..2], Some(5)).len(), 2);
    }

    #[test]
    fn test_player_rank() {
        let players = vec![stats("a", 10, 5, 1), stats("b", 30, 5, 1), stats("c", 20, 5, 1)];
        assert_eq!(calculate_player_rank("b", &players), 1);
        assert_eq!(calculate_player_rank("a", &players), 3);
        assert_eq!(calculate_player_rank("nobody", &players), 0);
        assert_eq!(calculate_player_rank("a", &[]), 0);
    }

    #[test]
    fn test_win_rate() {
        let sessions = vec![
            SessionData::new("u1", "Ada", 3, 1, 3),
            SessionData::new("u1", "Ada", 2, 2, 3),
            SessionData::new("u2", "Bob", 3, 1, 3),
            SessionData::new("u1", "Ada", 1, 3, 3),
            SessionData::new("u1", "Ada", 3, 1, 3),
        ];
        assert_eq!(calculate_win_rate("u1", &sessions), 50.0);
        assert_eq!(calculate_win_rate("u2", &sessions), 100.0);
        assert_eq!(calculate_win_rate("u3", &sessions), 0.0);
    }

    #[test]
    fn test_sessions_for_game() {
        let mut catan = SessionData::new("u1", "Ada", 3, 1, 3);
        catan.game_id = Some("catan".to_string());
        let untagged = SessionData::new("u1", "Ada", 1, 3, 3);

        let filtered = sessions_for_game(&[catan.clone(), untagged], "catan");
        assert_eq!(filtered, vec![catan]);
    }
}
