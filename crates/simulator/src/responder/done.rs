//! Agent ended the dialogue

use usersim_core::{ConstraintCheck, Error, Outcome, Result};

use super::Responder;

impl Responder<'_> {
    /// Settle the final outcome
    ///
    /// Success needs an accepted match, nothing left pending, and a record in
    /// the database that agrees with every queryable goal inform.
    pub(super) fn respond_to_done(&mut self) -> Result<()> {
        if self.episode.constraint_check == ConstraintCheck::Fail {
            self.episode.outcome = Outcome::Fail;
            return Ok(());
        }

        let state = &self.episode.state;
        if state.rest_slots.is_empty() && !state.request_slots.is_empty() {
            return Err(Error::invariant(
                "nothing_pending_on_done",
                format!(
                    "request slots {:?} outstanding with no pending goal slots",
                    state.request_slots.keys().collect::<Vec<_>>()
                ),
            ));
        }
        if !state.rest_slots.is_empty() {
            tracing::debug!(
                pending = ?state.rest_slots.keys().collect::<Vec<_>>(),
                "Agent finished with goal slots unresolved"
            );
            self.episode.outcome = Outcome::Fail;
            return Ok(());
        }

        let primary_key = self.config.primary_key.as_str();
        let accepted = state.history_slots.get(primary_key).ok_or_else(|| {
            Error::DataConsistency(format!("no '{}' was ever accepted", primary_key))
        })?;
        if accepted.is_no_match() {
            return Err(Error::DataConsistency(format!(
                "accepted '{}' is '{}'",
                primary_key, accepted
            )));
        }
        let record_id = accepted.as_record_id().ok_or_else(|| {
            Error::DataConsistency(format!(
                "accepted '{}' value '{}' is not a record id",
                primary_key, accepted
            ))
        })?;
        let record = self.records.lookup(record_id).ok_or_else(|| {
            Error::DataConsistency(format!("record {} not found in database", record_id))
        })?;

        let config = self.config;
        for (slot, expected) in &self.episode.goal.inform_slots {
            if config.no_query_keys.contains(slot) {
                continue;
            }
            if record.get(slot) != Some(expected) {
                return Err(Error::DataConsistency(format!(
                    "record {} disagrees with goal on '{}': expected {}, found {:?}",
                    record_id, slot, expected, record.get(slot)
                )));
            }
        }

        self.episode.outcome = Outcome::Success;
        Ok(())
    }
}
