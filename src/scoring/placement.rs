use std::cmp::Ordering;

use super::types::{PlayerScore, SessionData};
use crate::error::PlacementError;
use crate::template::{calculate_raw_score, TemplateField};

/// Highest score first. NaN ranks below every number and ties with other
/// NaNs, which keeps the ordering total.
fn compare_raw_score(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
    }
}

/// Rank players by raw score, best first, and number them from 1.
///
/// Takes ownership and hands back the re-ordered players; callers keep no
/// view of the old order. Equal scores keep their input order, so whoever was
/// listed first gets the better placement. `points_awarded` is left alone.
pub fn assign_placements(mut players: Vec<PlayerScore>) -> Vec<PlayerScore> {
    // sort_by is stable
    players.sort_by(|a, b| compare_raw_score(a.raw_score, b.raw_score));

    for (idx, player) in players.iter_mut().enumerate() {
        player.placement = idx as u32 + 1;
    }

    players
}

/// League points for one placement: N for first, 1 for last.
pub fn calculate_league_points(
    placement: u32,
    total_players: usize,
) -> Result<u32, PlacementError> {
    if placement < 1 || placement as usize > total_players {
        return Err(PlacementError::OutOfRange {
            placement,
            total_players,
        });
    }

    Ok(total_players as u32 - placement + 1)
}

/// Award league points from already-assigned placements.
pub fn assign_league_points(
    mut players: Vec<PlayerScore>,
) -> Result<Vec<PlayerScore>, PlacementError> {
    let total_players = players.len();
    for player in players.iter_mut() {
        player.points_awarded = calculate_league_points(player.placement, total_players)?;
    }
    Ok(players)
}

/// Score one session: raw scores in, placements and league points out.
pub fn process_player_scores(
    players: Vec<PlayerScore>,
) -> Result<Vec<PlayerScore>, PlacementError> {
    if players.is_empty() {
        return Ok(players);
    }

    let players = assign_league_points(assign_placements(players))?;
    log::debug!(
        "Processed session of {} players, winner {}",
        players.len(),
        players[0].user_id
    );
    Ok(players)
}

/// Derive raw scores from each player's field breakdown.
///
/// Players without `score_details` keep the raw score they were given.
pub fn apply_template(
    mut players: Vec<PlayerScore>,
    fields: &[TemplateField],
) -> Vec<PlayerScore> {
    for player in players.iter_mut() {
        if let Some(ref details) = player.score_details {
            player.raw_score = calculate_raw_score(details, fields);
        }
    }
    players
}

/// Rows to hand to storage for a processed session.
pub fn session_rows(
    players: &[PlayerScore],
    session_id: &str,
    game_id: Option<&str>,
) -> Vec<SessionData> {
    let total_players = players.len() as u32;
    players
        .iter()
        .map(|p| SessionData {
            user_id: p.user_id.clone(),
            user_name: p.user_name.clone().unwrap_or_else(|| p.user_id.clone()),
            points_awarded: p.points_awarded,
            placement: p.placement,
            total_players,
            session_id: Some(session_id.to_string()),
            game_id: game_id.map(str::to_string),
        })
        .collect()
}
