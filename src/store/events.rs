use std::sync::Arc;

use serde::{Serialize, Deserialize};

pub type EventId = u64;

/// Everything about an event except its identity. Used as the payload of
/// `add_event` and as the body of a stored `EventDefinition`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventFields {
    pub category: String,
    pub name: String,
    pub officer: String,
    pub participants: String,
    #[serde(default)]
    pub judges: Arc<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub details: Arc<Vec<Arc<GuidelineSection>>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDefinition {
    pub id: EventId,
    #[serde(flatten)]
    pub fields: EventFields,
}

/// A rubric block inside an event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuidelineSection {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guidelines: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criteria: Option<Arc<Vec<Criterion>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competition_points: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub name: String,
    pub description: String,
    pub points: f64,
}

impl GuidelineSection {
    /// Sum of the section's criteria points (0 without criteria)
    pub fn total_points(&self) -> f64 {
        self.criteria
            .as_ref()
            .map(|criteria| criteria.iter().map(|c| c.points).sum())
            .unwrap_or(0.0)
    }
}

impl EventDefinition {
    pub fn new(id: EventId, fields: EventFields) -> Self {
        EventDefinition { id, fields }
    }
}
