use serde::{Serialize, Deserialize};

/// One row of a series leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRecord {
    pub rank: u32,
    pub name: String, // unique within a leaderboard
    pub score: i64,
    pub previous_scores: Vec<i64>,
    pub wins: u32,
    pub losses: u32,
    pub players: u32,
    pub live: bool,
    pub details: TeamDetails,
}

/// Append-only history recorded against a team
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamDetails {
    pub merits: Vec<Merit>,
    pub demerits: Vec<Demerit>,
    pub event_scores: Vec<EventScore>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Merit {
    pub category: String,
    pub points: i64,
    pub description: String,
    pub updated_by: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Demerit {
    pub reason: String,
    pub points: i64,
    pub person: String,
    pub updated_by: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventScore {
    pub event_name: String,
    pub placement: u32,
    pub base_points: i64,
    pub competition_points: i64,
    pub scorecard: Vec<Scorecard>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scorecard {
    pub judge: String,
    pub scores: Vec<CriterionScore>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionScore {
    pub criteria: String,
    pub score: i64,
}

impl TeamRecord {
    /// A team with no history, used by seed data and tests
    pub fn new(rank: u32, name: &str, score: i64) -> Self {
        TeamRecord {
            rank,
            name: name.to_string(),
            score,
            previous_scores: Vec::new(),
            wins: 0,
            losses: 0,
            players: 0,
            live: false,
            details: TeamDetails::default(),
        }
    }

    pub fn total_merits(&self) -> i64 {
        self.details.merits.iter().map(|m| m.points).sum()
    }

    pub fn total_demerits(&self) -> i64 {
        self.details.demerits.iter().map(|d| d.points).sum()
    }
}
