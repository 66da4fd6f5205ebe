use std::sync::Arc;

use serde::{Serialize, Deserialize};

use crate::role::Role;
use crate::standings::TeamRecord;
use super::events::EventDefinition;

/// Everything the dashboard shows for one competition
#[derive(Debug, Clone, Default)]
pub struct SeriesData {
    pub stat_cards: Arc<Vec<StatCard>>,
    pub leaderboard: Arc<Vec<TeamRecord>>,
    pub events: Arc<Vec<Arc<EventDefinition>>>,
    pub top_players: Arc<Vec<User>>,
    pub rules: Option<Arc<RulesDocument>>,
}

/// A named series inside the store
#[derive(Debug, Clone)]
pub struct Series {
    pub name: String,
    pub data: Arc<SeriesData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatCard {
    pub team: String,
    pub points: String,
    pub games: u32,
    pub change: f64, // percent vs. previous standing
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RulesDocument {
    pub title: String,
    pub subtitle: String,
    pub sdgs: Vec<String>,
    pub objectives: Vec<String>,
    pub house_rules: Vec<HouseRuleSection>,
    pub demerit_deductions: Vec<DemeritDeduction>,
    pub scoring: ScoringRules,
    pub team_formation: TeamFormation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseRuleSection {
    pub title: String,
    pub rules: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemeritDeduction {
    pub offense: String,
    pub deduction: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringRules {
    pub base_points: Vec<BasePoints>,
    pub placement: Vec<PlacementPoints>,
    pub merit_points: Vec<MeritPoints>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasePoints {
    #[serde(rename = "type")]
    pub kind: String,
    pub points: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementPoints {
    pub place: String,
    pub points: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeritPoints {
    pub category: String,
    pub points: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamFormation {
    pub leaders: Vec<LeaderRole>,
    pub advisers: String,
    pub naming: TeamNaming,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderRole {
    pub position: String,
    pub count: u32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamNaming {
    pub description: String,
    pub teams: Vec<TeamColor>,
    pub format: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamColor {
    pub name: String,
    pub color: String,
}
