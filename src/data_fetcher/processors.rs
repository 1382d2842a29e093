//! Derivation of per-game display data and the adjacency grouping rule.

use tracing::debug;

use crate::data_fetcher::models::{GameOutcome, GameView, StreamRecord};
use crate::error::AppError;

/// Three-way outcome by strict integer comparison. No tolerance band.
pub fn score_outcome(points_for: i32, points_against: i32) -> GameOutcome {
    if points_for > points_against {
        GameOutcome::Won
    } else if points_for < points_against {
        GameOutcome::Lost
    } else {
        GameOutcome::Tied
    }
}

/// Builds the display view of one game by matching the page's team name
/// against the record's two team slots.
///
/// A record naming the team in neither slot is corrupt source data and fails
/// hard rather than being skipped: skipping would silently shorten the game
/// history.
pub fn build_game_view(team_name: &str, record: &StreamRecord) -> Result<GameView, AppError> {
    let ours_is_team_1 = record.team_1_name == team_name;
    let ours_is_team_2 = record.team_2_name == team_name;

    let (our_team_name, opposing_team_name, points_for, points_against) =
        if ours_is_team_1 {
            (
                record.team_1_name.clone(),
                record.team_2_name.clone(),
                record.team_1_score,
                record.team_2_score,
            )
        } else if ours_is_team_2 {
            (
                record.team_2_name.clone(),
                record.team_1_name.clone(),
                record.team_2_score,
                record.team_1_score,
            )
        } else {
            return Err(AppError::data_integrity(format!(
                "neither '{}' nor '{}' matches team '{}' (game {})",
                record.team_1_name, record.team_2_name, team_name, record.link
            )));
        };

    let outcome = score_outcome(points_for, points_against);
    debug!(
        game = %record.link,
        opponent = %opposing_team_name,
        %points_for,
        %points_against,
        outcome = %outcome,
        "derived game view"
    );

    Ok(GameView {
        event_name: record.event_name.clone(),
        link: record.link.clone(),
        thumbnail: record.thumbnail.clone(),
        venue_name: record.venue_name.clone(),
        start_time: record.start_time.clone(),
        our_team_name,
        opposing_team_name,
        points_for,
        points_against,
        outcome,
    })
}

/// Adjacency-based grouping rule: a record opens a new event group exactly
/// when its event name differs from the previous record's (the first record
/// always opens one). Grouping is not set-based; a name reappearing after a
/// gap opens a second group.
pub fn starts_new_group(previous: Option<&str>, current: &str) -> bool {
    previous != Some(current)
}

/// The event-header sequence the grouping rule produces for a stream list.
pub fn header_sequence(streams: &[StreamRecord]) -> Vec<String> {
    let mut headers = Vec::new();
    let mut previous: Option<&str> = None;
    for record in streams {
        if starts_new_group(previous, &record.event_name) {
            headers.push(record.event_name.clone());
            previous = Some(&record.event_name);
        }
    }
    headers
}
