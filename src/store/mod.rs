pub mod events;
pub mod series;
pub mod handle;

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::StoreError;
use crate::form::validate_event_fields;
use crate::standings::ranking::{self, TickRng};

pub use events::{EventId, EventFields, EventDefinition, GuidelineSection, Criterion};
pub use series::{Series, SeriesData, StatCard, User, RulesDocument};
pub use handle::{StoreHandle, SharedStore};

/// One immutable value of the whole dashboard state.
///
/// Every mutator borrows the current snapshot and returns a new one. Parts
/// the mutation does not touch (other series, other events, the rules
/// document, ...) are shared with the old snapshot through `Arc`.
#[derive(Debug, Clone)]
pub struct EventSeriesStore {
    series: Arc<Vec<Series>>,
    selected: usize,
    revision: u64,
    last_event_id: EventId,
}

/// Result of an update or delete. `applied` is false when no event had the
/// requested id, in which case `store` is the unchanged snapshot.
#[derive(Debug, Clone)]
pub struct Mutation {
    pub store: EventSeriesStore,
    pub applied: bool,
}

impl EventSeriesStore {
    pub fn new(series: Vec<Series>, selected: &str) -> Result<Self, StoreError> {
        let selected = series
            .iter()
            .position(|s| s.name == selected)
            .ok_or_else(|| StoreError::UnknownSeries(selected.to_string()))?;
        let last_event_id = series
            .iter()
            .flat_map(|s| s.data.events.iter())
            .map(|e| e.id)
            .max()
            .unwrap_or(0);

        Ok(EventSeriesStore {
            series: Arc::new(series),
            selected,
            revision: 0,
            last_event_id,
        })
    }

    pub fn series_names(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn series(&self, name: &str) -> Option<&Arc<SeriesData>> {
        self.series.iter().find(|s| s.name == name).map(|s| &s.data)
    }

    pub fn selected_name(&self) -> &str {
        &self.series[self.selected].name
    }

    pub fn selected(&self) -> &Arc<SeriesData> {
        &self.series[self.selected].data
    }

    /// Bumped by every mutation that changed something
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn find_event(&self, id: EventId) -> Option<&Arc<EventDefinition>> {
        self.selected().events.iter().find(|e| e.id == id)
    }

    pub fn select(&self, name: &str) -> Result<Self, StoreError> {
        let selected = self
            .series
            .iter()
            .position(|s| s.name == name)
            .ok_or_else(|| StoreError::UnknownSeries(name.to_string()))?;
        if selected == self.selected {
            return Ok(self.clone());
        }
        info!(series = name, "Selected series changed");
        Ok(EventSeriesStore {
            selected,
            revision: self.revision + 1,
            ..self.clone()
        })
    }

    /// Validates, assigns a fresh id and appends to the selected series.
    /// The id is greater than any id this store has ever held, so back to
    /// back calls never collide.
    pub fn add_event(&self, fields: EventFields) -> Result<(Self, Arc<EventDefinition>), StoreError> {
        validate_event_fields(&fields)?;

        let id = self.last_event_id + 1;
        let event = Arc::new(EventDefinition::new(id, fields));

        let current = self.selected();
        let mut events = Vec::with_capacity(current.events.len() + 1);
        events.extend(current.events.iter().cloned());
        events.push(event.clone());

        let mut next = self.with_selected(SeriesData {
            events: Arc::new(events),
            ..SeriesData::clone(current)
        });
        next.last_event_id = id;
        info!(id, name = %event.fields.name, series = self.selected_name(), "Event added");
        Ok((next, event))
    }

    /// Replaces the event with the same id. Unknown ids leave the store as is.
    pub fn update_event(&self, updated: EventDefinition) -> Mutation {
        let current = self.selected();
        let Some(index) = current.events.iter().position(|e| e.id == updated.id) else {
            debug!(id = updated.id, "Update ignored, no such event");
            return self.unchanged();
        };

        let id = updated.id;
        let mut events: Vec<Arc<EventDefinition>> = current.events.iter().cloned().collect();
        events[index] = Arc::new(updated);
        info!(id, series = self.selected_name(), "Event updated");
        Mutation {
            store: self.with_selected(SeriesData {
                events: Arc::new(events),
                ..SeriesData::clone(current)
            }),
            applied: true,
        }
    }

    /// Removes the event with this id. Unknown ids leave the store as is.
    pub fn delete_event(&self, id: EventId) -> Mutation {
        let current = self.selected();
        if !current.events.iter().any(|e| e.id == id) {
            debug!(id, "Delete ignored, no such event");
            return self.unchanged();
        }

        let events: Vec<Arc<EventDefinition>> = current
            .events
            .iter()
            .filter(|e| e.id != id)
            .cloned()
            .collect();
        info!(id, series = self.selected_name(), "Event deleted");
        Mutation {
            store: self.with_selected(SeriesData {
                events: Arc::new(events),
                ..SeriesData::clone(current)
            }),
            applied: true,
        }
    }

    /// One live-score tick on the selected series' leaderboard
    pub fn tick_leaderboard<R: TickRng + ?Sized>(&self, rng: &mut R) -> Self {
        let current = self.selected();
        if current.leaderboard.is_empty() {
            return self.clone();
        }
        let leaderboard = ranking::tick(&current.leaderboard, rng);
        self.with_selected(SeriesData {
            leaderboard: Arc::new(leaderboard),
            ..SeriesData::clone(current)
        })
    }

    fn unchanged(&self) -> Mutation {
        Mutation {
            store: self.clone(),
            applied: false,
        }
    }

    /// New snapshot with the selected series' data replaced
    fn with_selected(&self, data: SeriesData) -> Self {
        let data = Arc::new(data);
        let series: Vec<Series> = self
            .series
            .iter()
            .enumerate()
            .map(|(i, s)| {
                if i == self.selected {
                    Series {
                        name: s.name.clone(),
                        data: data.clone(),
                    }
                } else {
                    s.clone()
                }
            })
            .collect();

        EventSeriesStore {
            series: Arc::new(series),
            selected: self.selected,
            revision: self.revision + 1,
            last_event_id: self.last_event_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standings::ranking::tests::FixedPick;
    use crate::standings::TeamRecord;

    fn fields(name: &str, category: &str) -> EventFields {
        EventFields {
            name: name.to_string(),
            category: category.to_string(),
            participants: "1".to_string(),
            officer: "Yesha".to_string(),
            ..Default::default()
        }
    }

    fn sample_store() -> EventSeriesStore {
        let events = vec![
            Arc::new(EventDefinition::new(1, fields("Joker Flag", "Joker Flag"))),
            Arc::new(EventDefinition::new(4, fields("Cheer Dance", "CIT Quest"))),
        ];
        let leaderboard = vec![TeamRecord::new(1, "A", 100), TeamRecord::new(2, "B", 90)];
        let main = SeriesData {
            events: Arc::new(events),
            leaderboard: Arc::new(leaderboard),
            ..Default::default()
        };
        EventSeriesStore::new(
            vec![
                Series { name: "i3 Day".to_string(), data: Arc::new(main) },
                Series { name: "Campus Clash".to_string(), data: Arc::new(SeriesData::default()) },
            ],
            "i3 Day",
        )
        .unwrap()
    }

    #[test]
    fn test_new_rejects_unknown_selection() {
        let err = EventSeriesStore::new(Vec::new(), "Nope").unwrap_err();
        assert_eq!(err, StoreError::UnknownSeries("Nope".to_string()));
    }

    #[test]
    fn test_add_event_assigns_unique_ids_and_appends() {
        let store = sample_store();
        let (store, first) = store.add_event(fields("Chess", "Table Masters")).unwrap();
        let (store, second) = store.add_event(fields("Debate", "Mindscape")).unwrap();

        assert_ne!(first.id, second.id);
        assert!(first.id > 4);
        let names: Vec<&str> = store.selected().events.iter().map(|e| e.fields.name.as_str()).collect();
        assert_eq!(names, vec!["Joker Flag", "Cheer Dance", "Chess", "Debate"]);
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let store = sample_store();
        let (store, added) = store.add_event(fields("Chess", "Table Masters")).unwrap();
        let store = store.delete_event(added.id).store;
        let (_, again) = store.add_event(fields("Chess", "Table Masters")).unwrap();
        assert!(again.id > added.id);
    }

    #[test]
    fn test_add_event_blank_name_is_validation_error() {
        let store = sample_store();
        let mut bad = fields("", "X");
        bad.participants = "1".to_string();
        bad.officer = "Y".to_string();

        let err = store.add_event(bad).unwrap_err();
        assert!(matches!(err, StoreError::Validation { ref missing } if missing == &vec!["name"]));
        assert_eq!(store.selected().events.len(), 2);
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_add_event_leaves_input_snapshot_untouched() {
        let store = sample_store();
        let before_events = store.selected().events.clone();
        let (next, _) = store.add_event(fields("Chess", "Table Masters")).unwrap();

        assert!(Arc::ptr_eq(&before_events, &store.selected().events));
        assert_eq!(store.selected().events.len(), 2);
        // untouched branches are shared
        assert!(Arc::ptr_eq(&store.selected().leaderboard, &next.selected().leaderboard));
        assert!(Arc::ptr_eq(
            store.series("Campus Clash").unwrap(),
            next.series("Campus Clash").unwrap()
        ));
        assert!(Arc::ptr_eq(&store.selected().events[0], &next.selected().events[0]));
    }

    #[test]
    fn test_update_replaces_matching_event() {
        let store = sample_store();
        let mut edited = EventDefinition::clone(store.find_event(4).unwrap());
        edited.fields.officer = "Sean".to_string();

        let result = store.update_event(edited);
        assert!(result.applied);
        assert_eq!(result.store.find_event(4).unwrap().fields.officer, "Sean");
        assert_eq!(store.find_event(4).unwrap().fields.officer, "Yesha");
        assert!(Arc::ptr_eq(&store.selected().events[0], &result.store.selected().events[0]));
    }

    #[test]
    fn test_update_and_delete_unknown_id_are_noops() {
        let store = sample_store();
        let ghost = EventDefinition::new(999, fields("Ghost", "None"));

        let updated = store.update_event(ghost);
        assert!(!updated.applied);
        assert_eq!(updated.store.selected().events, store.selected().events);
        assert!(Arc::ptr_eq(&updated.store.selected().events, &store.selected().events));
        assert_eq!(updated.store.revision(), store.revision());

        let deleted = store.delete_event(999);
        assert!(!deleted.applied);
        assert_eq!(deleted.store.selected().events, store.selected().events);
    }

    #[test]
    fn test_delete_removes_matching_event() {
        let store = sample_store();
        let result = store.delete_event(1);
        assert!(result.applied);
        assert!(result.store.find_event(1).is_none());
        assert_eq!(result.store.selected().events.len(), 1);
        assert_eq!(store.selected().events.len(), 2);

        // the surviving event and untouched branches are shared, not copied
        assert!(Arc::ptr_eq(&store.selected().events[1], &result.store.selected().events[0]));
        assert!(Arc::ptr_eq(&store.selected().leaderboard, &result.store.selected().leaderboard));
        assert!(Arc::ptr_eq(
            store.series("Campus Clash").unwrap(),
            result.store.series("Campus Clash").unwrap()
        ));
        assert!(!Arc::ptr_eq(&store.selected().events, &result.store.selected().events));
    }

    #[test]
    fn test_mutations_scope_to_selected_series() {
        let store = sample_store().select("Campus Clash").unwrap();
        let (store, added) = store.add_event(fields("Relay", "Track")).unwrap();
        assert_eq!(store.selected().events.len(), 1);
        assert_eq!(store.series("i3 Day").unwrap().events.len(), 2);
        assert!(added.id > 4);

        // id 1 lives in another series
        assert!(!store.delete_event(1).applied);
    }

    #[test]
    fn test_select_unknown_series_fails() {
        let store = sample_store();
        assert!(store.select("Intramurals").is_err());
        assert_eq!(store.selected_name(), "i3 Day");
        assert_eq!(store.select("i3 Day").unwrap().revision(), 0);
    }

    #[test]
    fn test_tick_leaderboard_only_touches_leaderboard() {
        let store = sample_store();
        let next = store.tick_leaderboard(&mut FixedPick { index: 1, delta: 15 });

        let board = &next.selected().leaderboard;
        assert_eq!(board[0].name, "B");
        assert_eq!(board[0].score, 105);
        assert!(board[0].live);
        assert!(Arc::ptr_eq(&store.selected().events, &next.selected().events));
        assert_eq!(store.selected().leaderboard[0].name, "A");
        assert_eq!(next.revision(), store.revision() + 1);
    }

    #[test]
    fn test_tick_on_empty_leaderboard_is_noop() {
        let store = sample_store().select("Campus Clash").unwrap();
        let next = store.tick_leaderboard(&mut FixedPick { index: 0, delta: 5 });
        assert!(next.selected().leaderboard.is_empty());
        assert_eq!(next.revision(), store.revision());
    }
}
