//! Loading, validating and saving the location list.
//!
//! The list lives under a single storage key as a JSON array of
//! `{ name, waits, lastUpdated }` objects. Anything else found under that key
//! is treated exactly like no data: the seed list is used instead.

use queuezero_types::Location;
use serde_json::Value;

use crate::clock::Clock;
use crate::error::{StorageError, ValidationError};
use crate::storage::KeyValueStorage;

/// Storage key holding the serialized location list
pub const STORAGE_KEY: &str = "queuezero_locations";

/// The starting board: three locations with one seed wait each, all stamped
/// with `now_ms`.
pub fn seed_locations(now_ms: i64) -> Vec<Location> {
    vec![
        Location::new("Coffee Shop", 5, now_ms),
        Location::new("Campus Office", 18, now_ms),
        Location::new("Gym", 25, now_ms),
    ]
}

/// Check that a stored blob is a non-empty array of location records.
///
/// Only shape is checked: string `name`, integer array `waits`, integer
/// `lastUpdated`. Wait values themselves are not range-checked.
pub fn parse_locations(raw: &str) -> Result<Vec<Location>, ValidationError> {
    let value: Value = serde_json::from_str(raw).map_err(ValidationError::Syntax)?;
    let Value::Array(records) = value else {
        return Err(ValidationError::NotAnArray);
    };
    if records.is_empty() {
        return Err(ValidationError::Empty);
    }

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            serde_json::from_value(record)
                .map_err(|source| ValidationError::Record { index, source })
        })
        .collect()
}

/// Load the stored list, falling back to the seed list when the key is
/// absent, unreadable or holds anything but a valid list. Never fails.
pub fn load<S, C>(storage: &S, clock: &C) -> Vec<Location>
where
    S: KeyValueStorage + ?Sized,
    C: Clock + ?Sized,
{
    let raw = match storage.get_item(STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!("No stored locations, using seed list");
            return seed_locations(clock.now_ms());
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read stored locations, using seed list");
            return seed_locations(clock.now_ms());
        }
    };

    match parse_locations(&raw) {
        Ok(locations) => {
            tracing::debug!(count = locations.len(), "Restored stored locations");
            locations
        }
        Err(e) => {
            tracing::warn!(error = %e, "Discarding invalid stored locations");
            seed_locations(clock.now_ms())
        }
    }
}

/// Overwrite the stored list with `locations`. An empty list is never
/// written.
pub fn save<S>(storage: &mut S, locations: &[Location]) -> Result<(), StorageError>
where
    S: KeyValueStorage + ?Sized,
{
    if locations.is_empty() {
        return Ok(());
    }
    let blob = serde_json::to_string(locations)?;
    storage.set_item(STORAGE_KEY, &blob)
}

/// A copy of `locations` with `value` appended to the location at `index`
/// and its timestamp set to `now_ms`. The input is left untouched; an
/// out-of-range index yields an unchanged copy.
pub fn record_wait(locations: &[Location], index: usize, value: i64, now_ms: i64) -> Vec<Location> {
    locations
        .iter()
        .enumerate()
        .map(|(i, loc)| {
            if i != index {
                return loc.clone();
            }
            let mut waits = Vec::with_capacity(loc.waits.len() + 1);
            waits.extend_from_slice(&loc.waits);
            waits.push(value);
            Location {
                name: loc.name.clone(),
                waits,
                last_updated: now_ms,
            }
        })
        .collect()
}
