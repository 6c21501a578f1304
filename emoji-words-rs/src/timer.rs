//! The pause between answering and moving on.
//!
//! The engine never sleeps. Scheduling hands the UI a ticket; the UI runs its
//! own timeout and passes the ticket id back. Only the most recently issued
//! ticket can fire, so a cancelled or superseded timeout that still goes off
//! is ignored.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct AdvanceTicket {
    pub id: u32,
    pub delay_ms: u32,
    /// Milliseconds since the Unix epoch.
    pub fire_at_ms: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FireResult {
    Fired,
    /// Not the pending ticket: cancelled, superseded or already fired.
    Stale,
}

#[derive(Clone, Debug, Default)]
pub struct AdvanceTimer {
    next_id: u32,
    pending: Option<(u32, DateTime<Utc>)>,
}

impl AdvanceTimer {
    /// Replaces any pending ticket.
    pub fn schedule(&mut self, delay_ms: u32, now: DateTime<Utc>) -> AdvanceTicket {
        self.next_id = self.next_id.wrapping_add(1);
        let fire_at = now + Duration::milliseconds(i64::from(delay_ms));
        self.pending = Some((self.next_id, fire_at));
        AdvanceTicket {
            id: self.next_id,
            delay_ms,
            fire_at_ms: fire_at.timestamp_millis() as f64,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The pending ticket always fires, even ahead of `fire_at`. The UI's
    /// timeout is one-shot and browser clocks drift.
    pub fn fire(&mut self, ticket_id: u32, now: DateTime<Utc>) -> FireResult {
        match self.pending {
            Some((id, fire_at)) if id == ticket_id => {
                if now < fire_at {
                    log::debug!(
                        "advance ticket {id} fired {}ms early",
                        (fire_at - now).num_milliseconds()
                    );
                }
                self.pending = None;
                FireResult::Fired
            }
            _ => FireResult::Stale,
        }
    }
}
