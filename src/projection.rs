//! Read-only views derived from a snapshot for the dashboard pages.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use crate::role::{can_view_sensitive, Role};
use crate::standings::types::TeamRecord;
use crate::store::{EventDefinition, GuidelineSection};

pub const HIDDEN_CONTRIBUTOR: &str = "[Hidden]";

const FALLBACK_TEAM_COLOR: &str = "#9ca3af";

#[derive(Debug, Clone, Serialize)]
pub struct CategoryGroup {
    pub category: String,
    pub events: Vec<Arc<EventDefinition>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionTotal {
    pub title: String,
    pub criteria_points: f64,
    pub competition_points: Option<f64>,
}

/// A team as shown in the detail view
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamView {
    #[serde(flatten)]
    pub team: TeamRecord,
    pub total_merits: i64,
    pub total_demerits: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub previous: Vec<i64>,
    pub current: Vec<i64>,
    pub historic: Vec<i64>,
    pub colors: Vec<String>,
    pub y_axis_max: i64,
}

/// Groups events by category. Groups keep the order in which each category
/// first appears, events keep their list order inside a group.
pub fn events_by_category(events: &[Arc<EventDefinition>]) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for event in events {
        let category = event.fields.category.as_str();
        match index.get(category) {
            Some(&i) => groups[i].events.push(event.clone()),
            None => {
                index.insert(category, groups.len());
                groups.push(CategoryGroup {
                    category: category.to_string(),
                    events: vec![event.clone()],
                });
            }
        }
    }
    groups
}

/// Distinct categories in first-seen order
pub fn categories(events: &[Arc<EventDefinition>]) -> Vec<String> {
    events_by_category(events).into_iter().map(|g| g.category).collect()
}

pub fn section_totals(sections: &[Arc<GuidelineSection>]) -> Vec<SectionTotal> {
    sections
        .iter()
        .map(|s| SectionTotal {
            title: s.title.clone(),
            criteria_points: s.total_points(),
            competition_points: s.competition_points,
        })
        .collect()
}

/// Looks a team up by name. Demerit contributors are replaced with
/// `[Hidden]` for roles that may not see them.
pub fn team_detail(leaderboard: &[TeamRecord], name: &str, role: Role) -> Option<TeamView> {
    let mut team = leaderboard.iter().find(|t| t.name == name)?.clone();
    if !can_view_sensitive(role) {
        for demerit in team.details.demerits.iter_mut() {
            demerit.person = HIDDEN_CONTRIBUTOR.to_string();
        }
    }
    Some(TeamView {
        total_merits: team.total_merits(),
        total_demerits: team.total_demerits(),
        team,
    })
}

pub fn team_color(name: &str) -> &'static str {
    match name {
        "Midnight Spades" => "#3b82f6",
        "Scarlet Hearts" => "#ef4444",
        "Emerald Clover" => "#22c55e",
        "Glacier Diamonds" => "#0ea5e9",
        _ => FALLBACK_TEAM_COLOR,
    }
}

/// Bar chart data for the dashboard: previous, current and historic score
/// per team. Missing history counts as 0.
pub fn chart_series(leaderboard: &[TeamRecord]) -> ChartSeries {
    let history = |t: &TeamRecord, i: usize| t.previous_scores.get(i).copied().unwrap_or(0);
    let max_score = leaderboard.iter().map(|t| t.score).max().unwrap_or(0);

    ChartSeries {
        labels: leaderboard.iter().map(|t| t.name.clone()).collect(),
        previous: leaderboard.iter().map(|t| history(t, 0)).collect(),
        current: leaderboard.iter().map(|t| t.score).collect(),
        historic: leaderboard.iter().map(|t| history(t, 1)).collect(),
        colors: leaderboard.iter().map(|t| team_color(&t.name).to_string()).collect(),
        y_axis_max: (max_score.max(0) + 999) / 1000 * 1000,
    }
}
