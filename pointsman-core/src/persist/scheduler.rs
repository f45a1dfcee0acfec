//! Deferred commit
//!
//! Flash wears out, so edits are not written as they happen. The scheduler
//! waits until the table has been left alone for the quiet period and then
//! writes it in one go.

use pointsman_hal::PersistentStore;

use super::save_to;
use crate::edit::EditController;
use crate::state::{Context, Event, EventSink};
use crate::traits::actuator::resync_all;
use crate::traits::Actuator;

/// Commits the table once edits have settled
#[derive(Debug, Default)]
pub struct PersistenceScheduler {
    commits: u32,
}

impl PersistenceScheduler {
    pub fn new() -> Self {
        Self { commits: 0 }
    }

    /// Number of successful commits since boot
    pub fn commits(&self) -> u32 {
        self.commits
    }

    /// Commit if a change is pending and the quiet period has passed
    ///
    /// On success the pending marker clears, the edit cursor goes back to
    /// channel 0 and every servo eases to its recorded position. On failure
    /// the marker is re-armed so the write is retried one quiet period
    /// later. While a button gesture is in progress the commit waits for
    /// it to finish. Returns `true` when a commit was written.
    pub fn tick<S: PersistentStore, A: Actuator, E: EventSink>(
        &mut self,
        ctx: &mut Context,
        edit: &mut EditController,
        now_ms: u32,
        store: &mut S,
        actuator: &mut A,
        events: &mut E,
    ) -> bool {
        if edit.is_busy() || !ctx.dirty.is_quiet(now_ms, ctx.config.quiet_period_ms) {
            return false;
        }

        if let Err(e) = save_to(store, &ctx.table, ctx.config.marker) {
            ctx.dirty.mark(now_ms);
            events.emit(Event::CommitFailed(e));
            return false;
        }

        ctx.dirty.clear();
        edit.reset_cursor(&ctx.table);
        resync_all(&ctx.table, actuator, events);
        self.commits += 1;
        events.emit(Event::Committed);
        true
    }
}
