use std::sync::Arc;

use serde::Deserialize;

use crate::error::{EditError, StoreError};
use crate::store::{Criterion, EventFields, GuidelineSection};
use super::editor::{parse_points, NestedForm};

/// Title of the one rubric section the add-event form creates
pub const MECHANICS_SECTION_TITLE: &str = "Mechanics & Criteria";

/// Draft state of the "add event" form.
///
/// Holds a judges list and a single mechanics section so the nested editor
/// works on it the same way it works on a stored event.
#[derive(Debug, Clone, PartialEq)]
pub struct AddEventForm {
    pub name: String,
    pub category: String,
    pub participants: String,
    pub officer: String,
    pub description: String,
    pub competition_points: String,
    judges: Arc<Vec<String>>,
    sections: Arc<Vec<Arc<GuidelineSection>>>,
}

/// Add-event payload as sent by the dashboard
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddEventRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub participants: String,
    #[serde(default)]
    pub officer: String,
    #[serde(default)]
    pub judges: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub mechanics: String,
    #[serde(default)]
    pub criteria: Vec<Criterion>,
    #[serde(default)]
    pub competition_points: Option<PointsInput>,
}

/// Points arrive either as a number or as raw input text
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PointsInput {
    Number(f64),
    Text(String),
}

impl Default for AddEventForm {
    fn default() -> Self {
        AddEventForm {
            name: String::new(),
            category: String::new(),
            participants: String::new(),
            officer: String::new(),
            description: String::new(),
            competition_points: String::new(),
            judges: Arc::new(vec![String::new()]),
            sections: Arc::new(vec![Arc::new(GuidelineSection {
                title: MECHANICS_SECTION_TITLE.to_string(),
                description: Some(String::new()),
                guidelines: None,
                criteria: Some(Arc::new(vec![Criterion::default()])),
                competition_points: None,
            })]),
        }
    }
}

impl NestedForm for AddEventForm {
    fn judges_mut(&mut self) -> &mut Arc<Vec<String>> {
        &mut self.judges
    }

    fn sections_mut(&mut self) -> &mut Arc<Vec<Arc<GuidelineSection>>> {
        &mut self.sections
    }
}

impl AddEventForm {
    pub fn judges(&self) -> &[String] {
        &self.judges
    }

    pub fn mechanics(&self) -> &str {
        self.mechanics_section()
            .and_then(|s| s.description.as_deref())
            .unwrap_or("")
    }

    pub fn criteria(&self) -> &[Criterion] {
        self.mechanics_section()
            .and_then(|s| s.criteria.as_deref())
            .map(|c| c.as_slice())
            .unwrap_or(&[])
    }

    pub fn set_mechanics(&mut self, mechanics: &str) {
        if let Some(section) = Arc::make_mut(&mut self.sections).first_mut() {
            Arc::make_mut(section).description = Some(mechanics.to_string());
        }
    }

    /// Turns the draft into event fields: blank judges and nameless criteria
    /// are dropped, empty texts become absent. Required fields are checked by
    /// the store when the event is added.
    pub fn finish(&self) -> Result<EventFields, EditError> {
        let judges: Vec<String> = self
            .judges()
            .iter()
            .map(|j| j.trim())
            .filter(|j| !j.is_empty())
            .map(String::from)
            .collect();
        let criteria: Vec<Criterion> = self
            .criteria()
            .iter()
            .filter(|c| !c.name.trim().is_empty())
            .cloned()
            .collect();
        let competition_points = match self.competition_points.trim() {
            "" => None,
            text => Some(parse_points(text)?),
        };

        Ok(EventFields {
            category: self.category.trim().to_string(),
            name: self.name.trim().to_string(),
            officer: self.officer.trim().to_string(),
            participants: self.participants.trim().to_string(),
            judges: Arc::new(judges),
            description: non_empty(&self.description),
            details: Arc::new(vec![Arc::new(GuidelineSection {
                title: MECHANICS_SECTION_TITLE.to_string(),
                description: non_empty(self.mechanics()),
                guidelines: None,
                criteria: Some(Arc::new(criteria)),
                competition_points,
            })]),
        })
    }

    fn mechanics_section(&self) -> Option<&GuidelineSection> {
        self.sections.first().map(|s| s.as_ref())
    }
}

impl From<AddEventRequest> for AddEventForm {
    fn from(req: AddEventRequest) -> Self {
        let mut form = AddEventForm {
            name: req.name,
            category: req.category,
            participants: req.participants,
            officer: req.officer,
            description: req.description,
            competition_points: match req.competition_points {
                Some(PointsInput::Number(points)) => points.to_string(),
                Some(PointsInput::Text(text)) => text,
                None => String::new(),
            },
            ..AddEventForm::default()
        };
        form.judges = Arc::new(req.judges);
        form.set_mechanics(&req.mechanics);
        if let Some(section) = Arc::make_mut(&mut form.sections).first_mut() {
            Arc::make_mut(section).criteria = Some(Arc::new(req.criteria));
        }
        form
    }
}

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Checks the fields an event cannot exist without
pub fn validate_event_fields(fields: &EventFields) -> Result<(), StoreError> {
    let required = [
        ("name", &fields.name),
        ("category", &fields.category),
        ("participants", &fields.participants),
        ("officer", &fields.officer),
    ];
    let missing: Vec<&'static str> = required
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(label, _)| *label)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(StoreError::Validation { missing })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::editor::{append_item, set_field, CriterionField, FieldPath, ListPath};
    use serde_json::json;

    #[test]
    fn test_new_form_starts_with_blank_rows() {
        let form = AddEventForm::default();
        assert_eq!(form.judges(), &[String::new()]);
        assert_eq!(form.criteria(), &[Criterion::default()]);
        assert_eq!(form.mechanics(), "");
    }

    #[test]
    fn test_finish_drops_blank_rows() {
        let mut form = AddEventForm {
            name: "Chess".to_string(),
            category: "Table Masters".to_string(),
            participants: "1 male | 1 female".to_string(),
            officer: "Jeverlyn".to_string(),
            competition_points: "1000".to_string(),
            ..AddEventForm::default()
        };
        form.set_mechanics("Swiss system, 5 rounds");
        let form = set_field(&form, FieldPath::Judge { index: 0 }, "Ms. Carol").unwrap();
        let form = append_item(&form, ListPath::Judges).unwrap();
        let form = set_field(&form, FieldPath::Criterion { section: 0, index: 0, field: CriterionField::Name }, "Strategy").unwrap();
        let form = set_field(&form, FieldPath::Criterion { section: 0, index: 0, field: CriterionField::Points }, "60").unwrap();
        let form = append_item(&form, ListPath::Criteria { section: 0 }).unwrap();

        let fields = form.finish().unwrap();
        assert_eq!(*fields.judges, vec!["Ms. Carol".to_string()]);
        assert_eq!(fields.description, None);
        assert_eq!(fields.details.len(), 1);

        let section = &fields.details[0];
        assert_eq!(section.title, MECHANICS_SECTION_TITLE);
        assert_eq!(section.description.as_deref(), Some("Swiss system, 5 rounds"));
        assert_eq!(section.criteria.as_ref().unwrap().len(), 1);
        assert_eq!(section.total_points(), 60.0);
        assert_eq!(section.competition_points, Some(1000.0));
    }

    #[test]
    fn test_finish_rejects_bad_competition_points() {
        let form = AddEventForm {
            competition_points: "a lot".to_string(),
            ..AddEventForm::default()
        };
        assert!(matches!(form.finish(), Err(EditError::InvalidPoints(_))));
    }

    #[test]
    fn test_validate_reports_every_blank_field() {
        let fields = EventFields {
            name: "".to_string(),
            category: "X".to_string(),
            participants: "1".to_string(),
            officer: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(
            validate_event_fields(&fields),
            Err(StoreError::Validation { missing: vec!["name", "officer"] })
        );

        let ok = EventFields { officer: "Y".to_string(), name: "Z".to_string(), ..fields };
        assert_eq!(validate_event_fields(&ok), Ok(()));
    }

    #[test]
    fn test_request_into_form() {
        let req: AddEventRequest = serde_json::from_value(json!({
            "name": "Programming",
            "category": "Cipher Matrix",
            "participants": "4",
            "officer": "Lorenz",
            "judges": ["", "Dr. Reyes"],
            "mechanics": "Three problems, two hours",
            "criteria": [
                { "name": "Correctness", "description": "Passes tests", "points": 70 },
                { "name": "", "description": "", "points": 0 }
            ],
            "competitionPoints": "1200"
        }))
        .unwrap();

        let fields = AddEventForm::from(req).finish().unwrap();
        assert_eq!(*fields.judges, vec!["Dr. Reyes".to_string()]);
        assert_eq!(fields.details[0].total_points(), 70.0);
        assert_eq!(fields.details[0].competition_points, Some(1200.0));

        let numeric: AddEventRequest = serde_json::from_value(json!({ "competitionPoints": 1500 })).unwrap();
        let form = AddEventForm::from(numeric);
        assert_eq!(form.competition_points, "1500");
        assert!(form.criteria().is_empty());
    }
}
