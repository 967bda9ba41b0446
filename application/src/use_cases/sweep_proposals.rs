//! Sweep Proposals use case
//!
//! One pass of the expiry sweeper: permanently deletes decided proposals
//! whose display/retention window has elapsed. Votes go with their proposal;
//! no notification is emitted for deletions.

use crate::ports::clock::Clock;
use crate::state::CouncilState;
use std::sync::Arc;
use tracing::info;

/// Use case for removing expired proposals
///
/// Safe to run concurrently with the rest of the engine in the sense the
/// spec requires: a proposal deleted by an earlier pass simply no longer
/// matches, and later operations on its id are no-ops.
pub struct SweepProposalsUseCase {
    clock: Arc<dyn Clock>,
}

impl SweepProposalsUseCase {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Execute one sweep. Returns the number of proposals removed.
    pub fn execute(&self, state: &mut CouncilState) -> usize {
        let now = self.clock.now();
        let before = state.proposals.len();

        state.proposals.retain(|p| {
            let expired = p.is_expired(now);
            if expired {
                info!(
                    "sweeping expired proposal {} ({})",
                    p.id,
                    p.status.as_str()
                );
            }
            !expired
        });

        before - state.proposals.len()
    }
}
