//! Ordered, de-duplicating collector for schedule entries

use std::collections::HashSet;

use crate::models::{AggregatedSchedule, ScheduleEntry};

/// Collects entries in discovery order and drops any entry whose
/// `(time, djName)` pair has already been collected. Earlier sources win.
#[derive(Debug, Default)]
pub struct ScheduleAccumulator {
    entries: Vec<ScheduleEntry>,
    seen: HashSet<(String, String)>,
    dropped: usize,
}

impl ScheduleAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `entry` unless its key is taken. Returns whether it was kept.
    pub fn push(&mut self, entry: ScheduleEntry) -> bool {
        let key = (entry.time.clone(), entry.dj_name.clone());
        if !self.seen.insert(key) {
            self.dropped += 1;
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Append every entry in order; returns how many were kept
    pub fn extend<I>(&mut self, entries: I) -> usize
    where
        I: IntoIterator<Item = ScheduleEntry>,
    {
        let mut kept = 0;
        for entry in entries {
            if self.push(entry) {
                kept += 1;
            }
        }
        kept
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries rejected as duplicates
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn into_schedule(self) -> AggregatedSchedule {
        AggregatedSchedule::new(self.entries)
    }
}
