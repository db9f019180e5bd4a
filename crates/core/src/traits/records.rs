//! Backing record lookup

use std::collections::BTreeMap;

use crate::slots::SlotMap;

/// Resolves a primary-key id to the record's slot values
///
/// Only consulted when the agent closes a conversation, to confirm that the
/// accepted match really satisfies the user's constraints.
pub trait RecordLookup: Send + Sync {
    fn lookup(&self, record_id: i64) -> Option<SlotMap>;
}

impl RecordLookup for BTreeMap<i64, SlotMap> {
    fn lookup(&self, record_id: i64) -> Option<SlotMap> {
        self.get(&record_id).cloned()
    }
}
