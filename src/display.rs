use std::sync::Arc;

use crate::projection::{events_by_category, section_totals};
use crate::standings::types::TeamRecord;
use crate::store::EventDefinition;

/// Formats one leaderboard row: rank, name, score and record, with a marker
/// on the team that last changed
pub fn format_team_line(team: &TeamRecord) -> String {
    let marker = if team.live { " (LIVE)" } else { "" };
    format!(
        "#{} {:<18} {:>6} pts  W{}-L{}  {} players{}",
        team.rank, team.name, team.score, team.wins, team.losses, team.players, marker
    )
}

/// Formats one event as "name | officer | participants"
pub fn format_event_line(event: &EventDefinition) -> String {
    let fields = &event.fields;
    format!(
        "[{}] {} | Officer: {} | Participants: {}",
        event.id, fields.name, fields.officer, fields.participants
    )
}

/// Prints a series leaderboard
pub fn print_leaderboard(series_name: &str, leaderboard: &[TeamRecord]) {
    println!("\n=== {} Leaderboard ===", series_name);
    if leaderboard.is_empty() {
        println!("  No teams yet.");
        return;
    }
    for team in leaderboard {
        println!("  {}", format_team_line(team));
    }
}

/// Prints events grouped by category, with per-section rubric totals
pub fn print_events(events: &[Arc<EventDefinition>]) {
    println!("\n=== Events ===");
    if events.is_empty() {
        println!("  No events yet.");
        return;
    }
    for group in events_by_category(events) {
        println!("\n{} ({} events)", group.category, group.events.len());
        for event in &group.events {
            println!("  {}", format_event_line(event));
            if !event.fields.judges.is_empty() {
                println!("      Judges: {}", event.fields.judges.join(", "));
            }
            for total in section_totals(&event.fields.details) {
                match total.competition_points {
                    Some(points) => println!(
                        "      {}: {} criteria pts, {} competition pts",
                        total.title, total.criteria_points, points
                    ),
                    None => println!("      {}: {} criteria pts", total.title, total.criteria_points),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::{initial_store, MAIN_SERIES};

    #[test]
    fn test_team_line_marks_live_team() {
        let store = initial_store(MAIN_SERIES).unwrap();
        let leaderboard = &store.selected().leaderboard;

        let first = format_team_line(&leaderboard[0]);
        assert!(first.starts_with("#1 Midnight Spades"));
        assert!(first.contains("2850 pts"));
        assert!(first.contains("W12-L2"));
        assert!(first.ends_with("(LIVE)"));

        assert!(!format_team_line(&leaderboard[1]).contains("LIVE"));
    }

    #[test]
    fn test_event_line() {
        let store = initial_store(MAIN_SERIES).unwrap();
        let chess = store.find_event(37).unwrap();
        assert_eq!(
            format_event_line(chess),
            "[37] Chess | Officer: Jeverlyn | Participants: 1 male | 1 female"
        );
    }
}
