use photonsim_data::{Category, TrackId, TrackRecord, TrackSeed};
use std::collections::HashMap;

/// Event-scoped store of every track seen so far.
///
/// Records live in an append-only arena indexed by track id. Killed tracks
/// are never removed mid-event, since their descendants may still need them
/// to resolve ancestry.
#[derive(Debug, Clone, Default)]
pub struct TrackRegistry {
    records: Vec<TrackRecord>,
    index: HashMap<TrackId, usize>,
    sub_id_counters: HashMap<Category, i32>,
}

impl TrackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an uncategorized record. Returns `false`, leaving the existing
    /// record untouched, when the id is already known.
    pub fn register(&mut self, seed: TrackSeed) -> bool {
        if self.index.contains_key(&seed.track_id) {
            return false;
        }
        self.index.insert(seed.track_id, self.records.len());
        self.records.push(TrackRecord::from_seed(seed));
        true
    }

    pub fn get(&self, id: TrackId) -> Option<&TrackRecord> {
        self.index.get(&id).map(|&i| &self.records[i])
    }

    pub fn get_mut(&mut self, id: TrackId) -> Option<&mut TrackRecord> {
        self.index.get(&id).map(|&i| &mut self.records[i])
    }

    pub fn contains(&self, id: TrackId) -> bool {
        self.index.contains_key(&id)
    }

    /// Next sequential sub-ID for `category`, starting at 0 each event.
    pub fn next_sub_id(&mut self, category: Category) -> i32 {
        let counter = self.sub_id_counters.entry(category).or_insert(0);
        let id = *counter;
        *counter += 1;
        id
    }

    /// Number of sub-IDs handed out for `category` in this event.
    pub fn category_count(&self, category: Category) -> usize {
        self.sub_id_counters.get(&category).copied().unwrap_or(0) as usize
    }

    /// Records in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &TrackRecord> {
        self.records.iter()
    }

    pub fn categorized(&self) -> impl Iterator<Item = &TrackRecord> {
        self.records.iter().filter(|r| r.is_categorized())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn max_track_id(&self) -> Option<TrackId> {
        self.index.keys().copied().max()
    }

    /// Forgets every record and resets the sub-ID counters.
    pub fn clear(&mut self) {
        self.records.clear();
        self.index.clear();
        self.sub_id_counters.clear();
    }
}
