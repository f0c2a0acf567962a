//! Ancestry walks over the track forest.
//!
//! Two walks exist: the raw-parent walk that skips uncategorized hops to find
//! the nearest categorized track, and the category-parent walk that collects
//! the genealogy of a categorized track. Both are iterative and stop on an
//! unknown id, on the root id, on a revisited id, or after `max_depth` hops.

use crate::registry::TrackRegistry;
use photonsim_data::{TrackId, ROOT_TRACK_ID};
use std::collections::HashSet;

/// Nearest categorized track reached by following raw parents from `start`
/// (inclusive). Returns `ROOT_TRACK_ID` when the chain ends first.
pub fn nearest_categorized_ancestor(
    registry: &TrackRegistry,
    start: TrackId,
    max_depth: usize,
) -> TrackId {
    let mut current = start;
    let mut visited = HashSet::new();
    for _ in 0..max_depth {
        if current == ROOT_TRACK_ID || !visited.insert(current) {
            break;
        }
        let Some(record) = registry.get(current) else {
            break;
        };
        if record.is_categorized() {
            return current;
        }
        current = record.parent_track_id;
    }
    ROOT_TRACK_ID
}

/// Categorized ancestors of `id` (including `id` itself when categorized),
/// root first and without duplicates.
pub fn genealogy(registry: &TrackRegistry, id: TrackId, max_depth: usize) -> Vec<TrackId> {
    let mut chain = Vec::new();
    let mut visited = HashSet::new();
    let mut current = id;
    for _ in 0..max_depth {
        if current == ROOT_TRACK_ID || !visited.insert(current) {
            break;
        }
        let Some(record) = registry.get(current) else {
            break;
        };
        if record.is_categorized() {
            chain.push(current);
        }
        current = record.category_parent_track_id;
    }
    chain.reverse();
    chain
}

/// Whether `target` is `start` or one of its raw parents.
pub fn is_raw_ancestor_or_self(
    registry: &TrackRegistry,
    start: TrackId,
    target: TrackId,
    max_depth: usize,
) -> bool {
    let mut current = start;
    let mut visited = HashSet::new();
    for _ in 0..max_depth {
        if current == target {
            return true;
        }
        if current == ROOT_TRACK_ID || !visited.insert(current) {
            return false;
        }
        match registry.get(current) {
            Some(record) => current = record.parent_track_id,
            None => return false,
        }
    }
    false
}

/// Whether `ancestor` lies on the category-parent chain above `id`.
pub fn is_category_ancestor(
    registry: &TrackRegistry,
    id: TrackId,
    ancestor: TrackId,
    max_depth: usize,
) -> bool {
    let mut current = id;
    let mut visited = HashSet::new();
    for _ in 0..max_depth {
        let Some(record) = registry.get(current) else {
            return false;
        };
        current = record.category_parent_track_id;
        if current == ancestor {
            return true;
        }
        if current == ROOT_TRACK_ID || !visited.insert(current) {
            return false;
        }
    }
    false
}
