use std::sync::Arc;

use serde::Deserialize;

use crate::error::EditError;
use crate::store::{Criterion, EventDefinition, EventFields, GuidelineSection};

/// A form with a judges list and a list of guideline sections.
///
/// The editor functions below clone the form (cheap: only `Arc`s are
/// copied) and then use `Arc::make_mut` on each container along the edited
/// path. Because the caller still holds the original, every container on
/// the path is copied, while sibling containers stay shared.
pub trait NestedForm: Clone {
    fn judges_mut(&mut self) -> &mut Arc<Vec<String>>;
    fn sections_mut(&mut self) -> &mut Arc<Vec<Arc<GuidelineSection>>>;
}

impl NestedForm for EventFields {
    fn judges_mut(&mut self) -> &mut Arc<Vec<String>> {
        &mut self.judges
    }

    fn sections_mut(&mut self) -> &mut Arc<Vec<Arc<GuidelineSection>>> {
        &mut self.details
    }
}

impl NestedForm for EventDefinition {
    fn judges_mut(&mut self) -> &mut Arc<Vec<String>> {
        self.fields.judges_mut()
    }

    fn sections_mut(&mut self) -> &mut Arc<Vec<Arc<GuidelineSection>>> {
        self.fields.sections_mut()
    }
}

/// Which editable list an append/remove targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ListPath {
    Judges,
    Criteria { section: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CriterionField {
    Name,
    Description,
    Points,
}

/// A single editable leaf
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FieldPath {
    Judge { index: usize },
    Criterion { section: usize, index: usize, field: CriterionField },
}

/// One editor action, as posted by the edit-event form
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum EditOp {
    Set { path: FieldPath, value: String },
    Append { list: ListPath },
    Remove { list: ListPath, index: usize },
}

pub fn apply_edit<F: NestedForm>(form: &F, op: &EditOp) -> Result<F, EditError> {
    match op {
        EditOp::Set { path, value } => set_field(form, *path, value),
        EditOp::Append { list } => append_item(form, *list),
        EditOp::Remove { list, index } => remove_item(form, *list, *index),
    }
}

/// Returns a copy of `form` with one leaf set. Points are given as text,
/// the way a form input delivers them; blank text means 0.
pub fn set_field<F: NestedForm>(form: &F, path: FieldPath, value: &str) -> Result<F, EditError> {
    let mut next = form.clone();
    match path {
        FieldPath::Judge { index } => {
            let judges = Arc::make_mut(next.judges_mut());
            let len = judges.len();
            let judge = judges.get_mut(index).ok_or(EditError::ItemOutOfRange { index, len })?;
            *judge = value.to_string();
        }
        FieldPath::Criterion { section, index, field } => {
            let criteria = criteria_mut(&mut next, section)?;
            let len = criteria.len();
            let criterion = criteria.get_mut(index).ok_or(EditError::ItemOutOfRange { index, len })?;
            match field {
                CriterionField::Name => criterion.name = value.to_string(),
                CriterionField::Description => criterion.description = value.to_string(),
                CriterionField::Points => criterion.points = parse_points(value)?,
            }
        }
    }
    Ok(next)
}

/// Appends a blank judge or a blank criterion
pub fn append_item<F: NestedForm>(form: &F, list: ListPath) -> Result<F, EditError> {
    let mut next = form.clone();
    match list {
        ListPath::Judges => Arc::make_mut(next.judges_mut()).push(String::new()),
        ListPath::Criteria { section } => criteria_mut(&mut next, section)?.push(Criterion::default()),
    }
    Ok(next)
}

pub fn remove_item<F: NestedForm>(form: &F, list: ListPath, index: usize) -> Result<F, EditError> {
    let mut next = form.clone();
    let len = match list {
        ListPath::Judges => next.judges_mut().len(),
        ListPath::Criteria { section } => criteria_len(&mut next, section)?,
    };
    if index >= len {
        return Err(EditError::ItemOutOfRange { index, len });
    }
    match list {
        ListPath::Judges => {
            Arc::make_mut(next.judges_mut()).remove(index);
        }
        ListPath::Criteria { section } => {
            criteria_mut(&mut next, section)?.remove(index);
        }
    }
    Ok(next)
}

/// Parses a points input. Blank is 0.
pub fn parse_points(value: &str) -> Result<f64, EditError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite())
        .ok_or_else(|| EditError::InvalidPoints(value.to_string()))
}

fn criteria_len<F: NestedForm>(form: &mut F, section: usize) -> Result<usize, EditError> {
    let sections = form.sections_mut();
    let len = sections.len();
    let section = sections.get(section).ok_or(EditError::SectionOutOfRange { section, len })?;
    Ok(section.criteria.as_ref().map(|c| c.len()).unwrap_or(0))
}

/// Copy-on-write path down to one section's criteria. A section without
/// criteria gets an empty list.
fn criteria_mut<F: NestedForm>(form: &mut F, section: usize) -> Result<&mut Vec<Criterion>, EditError> {
    let len = form.sections_mut().len();
    if section >= len {
        return Err(EditError::SectionOutOfRange { section, len });
    }
    let sections = Arc::make_mut(form.sections_mut());
    let section = Arc::make_mut(&mut sections[section]);
    Ok(Arc::make_mut(section.criteria.get_or_insert_with(Default::default)))
}
