//! Start Voting use case
//!
//! Moves a pending proposal into voting. Reserved for the super admin.

use crate::ports::clock::Clock;
use crate::ports::notification_sink::NotificationSink;
use crate::ports::roster::RosterProvider;
use crate::state::CouncilState;
use council_domain::{Notification, UserRole};
use std::sync::Arc;
use tracing::{debug, info};

/// Input for the StartVoting use case
#[derive(Debug, Clone)]
pub struct StartVotingInput {
    pub proposal_id: String,
    pub acting_user_id: String,
}

/// Use case for opening the vote on a pending proposal
///
/// Silent no-op when the proposal does not exist, is not pending, or the
/// actor is not the super admin.
pub struct StartVotingUseCase {
    roster: Arc<dyn RosterProvider>,
    notifications: Arc<dyn NotificationSink>,
    clock: Arc<dyn Clock>,
}

impl StartVotingUseCase {
    pub fn new(
        roster: Arc<dyn RosterProvider>,
        notifications: Arc<dyn NotificationSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            roster,
            notifications,
            clock,
        }
    }

    /// Execute the transition. Returns true when voting actually started.
    pub fn execute(&self, state: &mut CouncilState, input: StartVotingInput) -> bool {
        let authorized = self
            .roster
            .find_user(&input.acting_user_id)
            .is_some_and(|u| u.role == UserRole::SuperAdmin);
        if !authorized {
            debug!(
                "start voting ignored: {} is not the super admin",
                input.acting_user_id
            );
            return false;
        }

        let now = self.clock.now();
        let Some(proposal) = state.find_proposal_mut(&input.proposal_id) else {
            debug!("start voting ignored: proposal {} not found", input.proposal_id);
            return false;
        };
        if !proposal.begin_voting(now) {
            debug!(
                "start voting ignored: proposal {} is {}",
                proposal.id,
                proposal.status.as_str()
            );
            return false;
        }

        info!("voting started on proposal {}", proposal.id);
        self.notifications
            .deliver(Notification::voting_started(proposal, now));
        true
    }
}
