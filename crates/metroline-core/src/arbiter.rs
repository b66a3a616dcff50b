//! Single-owner claim gate for station dragging.
//!
//! Exactly one station may be dragged at a time, no matter how many stations
//! sit under the pointer or in what order the frame visits them. Ownership
//! is explicit: claim and release name the claimant, so a station can never
//! release a drag it does not hold.

use hecs::Entity;

/// A single shared slot holding the currently-dragged station, if any.
/// Touched only from the frame thread.
#[derive(Debug, Default)]
pub struct DragArbiter {
    owner: Option<Entity>,
}

impl DragArbiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot for `who`. Succeeds when the slot is empty or `who`
    /// already owns it.
    pub fn try_claim(&mut self, who: Entity) -> bool {
        match self.owner {
            None => {
                self.owner = Some(who);
                true
            }
            Some(owner) => owner == who,
        }
    }

    /// Release the slot if `who` owns it. Returns whether anything changed.
    pub fn release(&mut self, who: Entity) -> bool {
        if self.owner == Some(who) {
            self.owner = None;
            true
        } else {
            false
        }
    }

    pub fn owner(&self) -> Option<Entity> {
        self.owner
    }

    pub fn is_claimed(&self) -> bool {
        self.owner.is_some()
    }
}
