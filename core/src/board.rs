//! The board: the persisted location list plus the report form's state.
//!
//! A [`Board`] is only ever constructed by [`Board::open`], which loads (or
//! seeds) the list and writes it back, so a board value is always ready.
//! Every submission goes through `&mut self`, so reports are applied one at
//! a time in call order.

use queuezero_types::{Location, LocationSummary};

use crate::aggregate;
use crate::clock::{Clock, SystemClock};
use crate::error::BoardError;
use crate::storage::KeyValueStorage;
use crate::store;

/// Ephemeral state of the report form. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormState {
    /// Index of the location the next report goes to
    pub selected: usize,
    /// Minutes the next report will carry
    pub pending_wait: i64,
}

/// The location list, the form driving it, and the storage it persists to.
pub struct Board<S, C = SystemClock> {
    storage: S,
    clock: C,
    locations: Vec<Location>,
    form: FormState,
}

impl<S: KeyValueStorage, C: Clock> Board<S, C> {
    /// Load the stored list (or the seed list) and write it straight back.
    ///
    /// The form starts on the first location with its average pre-filled.
    /// A failed write-back is logged and otherwise ignored; the next
    /// submission will try again.
    pub fn open(mut storage: S, clock: C) -> Self {
        let locations = store::load(&storage, &clock);
        if let Err(e) = store::save(&mut storage, &locations) {
            tracing::warn!(error = %e, "Failed to write back loaded locations");
        }

        let form = FormState {
            selected: 0,
            pending_wait: locations
                .first()
                .map(|l| aggregate::average(&l.waits))
                .unwrap_or_default(),
        };

        tracing::info!(locations = locations.len(), "Board ready");
        Self {
            storage,
            clock,
            locations,
            form,
        }
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn form(&self) -> FormState {
        self.form
    }

    pub fn selected_location(&self) -> Option<&Location> {
        self.locations.get(self.form.selected)
    }

    /// Point the form at another location and pre-fill its current average.
    pub fn select_location(&mut self, index: usize) -> Result<(), BoardError> {
        let location = self
            .locations
            .get(index)
            .ok_or(BoardError::IndexOutOfRange {
                index,
                len: self.locations.len(),
            })?;

        self.form = FormState {
            selected: index,
            pending_wait: aggregate::average(&location.waits),
        };
        Ok(())
    }

    /// Index of the location called `name`, if any
    pub fn position(&self, name: &str) -> Option<usize> {
        self.locations.iter().position(|l| l.name == name)
    }

    pub fn set_pending_wait(&mut self, minutes: i64) {
        self.form.pending_wait = minutes;
    }

    /// Record the pending wait against the selected location and persist.
    ///
    /// The in-memory list is updated even when the write fails; the error is
    /// returned so the caller can tell the user the report may not survive a
    /// restart.
    pub fn submit(&mut self) -> Result<(), BoardError> {
        let FormState {
            selected,
            pending_wait,
        } = self.form;
        let now = self.clock.now_ms();

        self.locations = store::record_wait(&self.locations, selected, pending_wait, now);
        if let Some(location) = self.locations.get(selected) {
            tracing::info!(
                location = %location.name,
                wait = pending_wait,
                submissions = location.waits.len(),
                "Recorded wait"
            );
        }

        store::save(&mut self.storage, &self.locations).map_err(|e| {
            tracing::warn!(error = %e, "Failed to persist locations");
            BoardError::Persist(e)
        })
    }

    /// Select, fill and submit in one step.
    pub fn report(&mut self, index: usize, minutes: i64) -> Result<(), BoardError> {
        self.select_location(index)?;
        self.set_pending_wait(minutes);
        self.submit()
    }

    /// Rendered rows for every location, computed now.
    pub fn summaries(&self) -> Vec<LocationSummary> {
        self.locations
            .iter()
            .map(|l| aggregate::summarize(l, &self.clock))
            .collect()
    }

    pub fn summary(&self, index: usize) -> Option<LocationSummary> {
        self.locations
            .get(index)
            .map(|l| aggregate::summarize(l, &self.clock))
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::storage::MemoryStorage;
    use crate::store::{STORAGE_KEY, seed_locations};
    use queuezero_types::{Confidence, Severity};

    const T0: i64 = 1_700_000_000_000;

    fn fresh_board() -> Board<MemoryStorage, ManualClock> {
        Board::open(MemoryStorage::new(), ManualClock::new(T0))
    }

    #[test]
    fn test_open_seeds_and_persists() {
        let board = fresh_board();
        assert_eq!(board.locations(), seed_locations(T0).as_slice());
        assert_eq!(
            board.form(),
            FormState {
                selected: 0,
                pending_wait: 5
            }
        );
        assert!(board.storage().get_item(STORAGE_KEY).unwrap().is_some());
    }

    #[test]
    fn test_select_prefills_average() {
        let mut board = fresh_board();
        board.select_location(2).unwrap();
        assert_eq!(board.form().pending_wait, 25);
        assert_eq!(board.selected_location().unwrap().name, "Gym");
    }

    #[test]
    fn test_select_out_of_range_keeps_selection() {
        let mut board = fresh_board();
        board.select_location(1).unwrap();

        let err = board.select_location(3).unwrap_err();
        assert!(matches!(err, BoardError::IndexOutOfRange { index: 3, len: 3 }));
        assert_eq!(board.form().selected, 1);
    }

    #[test]
    fn test_submit_end_to_end() {
        let mut board = fresh_board();
        let before = board.summary(0).unwrap();
        assert_eq!(before.severity, Severity::Low);
        assert_eq!(before.confidence, Confidence::Low);

        board.clock().advance(90_000);
        board.select_location(0).unwrap();
        board.set_pending_wait(15);
        board.submit().unwrap();

        let coffee = &board.locations()[0];
        assert_eq!(coffee.waits, vec![5, 15]);
        assert_eq!(coffee.last_updated, T0 + 90_000);

        let after = board.summary(0).unwrap();
        assert_eq!(after.average, 10);
        assert_eq!(after.severity, Severity::Medium);
        assert_eq!(after.confidence, Confidence::Medium);
        assert_eq!(after.staleness, "Updated just now");

        // Others untouched
        assert_eq!(board.locations()[1..], seed_locations(T0)[1..]);
    }

    #[test]
    fn test_submit_persists_across_reopen() {
        let mut board = fresh_board();
        board.report(2, 40).unwrap();

        let storage = board.into_storage();
        let reopened = Board::open(storage, ManualClock::new(T0 + 120_000));
        assert_eq!(reopened.locations()[2].waits, vec![25, 40]);
        assert_eq!(reopened.form().pending_wait, 5);

        let rows = reopened.summaries();
        assert_eq!(rows[2].average, 33);
        assert_eq!(rows[2].staleness, "Updated 2 minutes ago");
    }

    #[test]
    fn test_submit_keeps_report_when_write_fails() {
        let mut board = Board::open(MemoryStorage::read_only(), ManualClock::new(T0));
        board.set_pending_wait(12);

        let err = board.submit().unwrap_err();
        assert!(matches!(err, BoardError::Persist(_)));
        assert_eq!(board.locations()[0].waits, vec![5, 12]);
    }

    #[test]
    fn test_pending_wait_survives_submit() {
        let mut board = fresh_board();
        board.set_pending_wait(7);
        board.submit().unwrap();
        board.submit().unwrap();
        assert_eq!(board.locations()[0].waits, vec![5, 7, 7]);
        assert_eq!(board.form().pending_wait, 7);
    }

    #[test]
    fn test_open_with_extreme_stored_values() {
        let mut storage = MemoryStorage::new();
        storage
            .set_item(
                STORAGE_KEY,
                r#"[{"name":"A","waits":[9223372036854775807,1],"lastUpdated":1},
                    {"name":"B","waits":[3],"lastUpdated":-9223372036854775808}]"#,
            )
            .unwrap();

        let board = Board::open(storage, ManualClock::new(T0));
        assert_eq!(board.form().pending_wait, 4_611_686_018_427_387_904);

        let rows = board.summaries();
        assert_eq!(rows[0].severity, Severity::High);
        assert!(rows[1].staleness.starts_with("Updated "));
        assert!(rows[1].staleness.ends_with(" minutes ago"));
    }

    #[test]
    fn test_empty_stored_waits_render_medium_confidence() {
        let mut storage = MemoryStorage::new();
        storage
            .set_item(STORAGE_KEY, r#"[{"name":"A","waits":[],"lastUpdated":1}]"#)
            .unwrap();

        let board = Board::open(storage, ManualClock::new(T0));
        let row = board.summary(0).unwrap();
        assert_eq!(row.average, 0);
        assert_eq!(row.confidence, Confidence::Medium);
    }

    #[test]
    fn test_position_by_name() {
        let board = fresh_board();
        assert_eq!(board.position("Campus Office"), Some(1));
        assert_eq!(board.position("Library"), None);
    }
}
