//! Adopt Suggestion use case
//!
//! Promotes a student suggestion into a formal, votable proposal.

use crate::ports::clock::Clock;
use crate::ports::notification_sink::NotificationSink;
use crate::ports::roster::RosterProvider;
use crate::state::CouncilState;
use council_domain::{Notification, Proposal};
use std::sync::Arc;
use tracing::{debug, info};

/// Input for the AdoptSuggestion use case
#[derive(Debug, Clone)]
pub struct AdoptSuggestionInput {
    pub task_id: String,
    pub suggestion_id: String,
    pub acting_user_id: String,
}

/// Use case for adopting a suggestion into a proposal
///
/// Preconditions: the task exists, the suggestion exists under it, the
/// suggestion is not already adopted, and the acting user is on the roster.
/// Any unmet precondition is a silent no-op: this is a best-effort UI
/// action, and the invoking surface is expected to have disabled invalid
/// triggers already.
pub struct AdoptSuggestionUseCase {
    roster: Arc<dyn RosterProvider>,
    notifications: Arc<dyn NotificationSink>,
    clock: Arc<dyn Clock>,
}

impl AdoptSuggestionUseCase {
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

    /// Execute the adoption. Returns the created proposal, or `None` when a
    /// precondition was unmet and nothing changed.
    pub fn execute(
        &self,
        state: &mut CouncilState,
        input: AdoptSuggestionInput,
    ) -> Option<Proposal> {
        if self.roster.find_user(&input.acting_user_id).is_none() {
            debug!("adopt ignored: acting user {} not on roster", input.acting_user_id);
            return None;
        }

        let now = self.clock.now();

        let Some(task) = state.find_task_mut(&input.task_id) else {
            debug!("adopt ignored: task {} not found", input.task_id);
            return None;
        };
        let Some(suggestion) = task.find_suggestion_mut(&input.suggestion_id) else {
            debug!(
                "adopt ignored: suggestion {} not found on task {}",
                input.suggestion_id, input.task_id
            );
            return None;
        };
        if suggestion.is_adopted {
            debug!("adopt ignored: suggestion {} already adopted", input.suggestion_id);
            return None;
        }

        // Flag flip and proposal creation happen back to back under the same
        // &mut borrow, so callers never observe one without the other.
        suggestion.mark_adopted();
        let proposal = Proposal::from_suggestion(suggestion, now);

        info!(
            "suggestion {} adopted into proposal {}",
            input.suggestion_id, proposal.id
        );
        self.notifications
            .deliver(Notification::suggestion_adopted(&proposal, now));

        state.proposals.push(proposal.clone());
        Some(proposal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::clock::FixedClock;
    use crate::ports::notification_sink::RecordingSink;
    use crate::ports::roster::FixedRoster;
    use chrono::Utc;
    use council_domain::{NotificationKind, ProposalStatus, Suggestion, Task, User, UserRole};

    fn setup() -> (CouncilState, AdoptSuggestionUseCase, Arc<RecordingSink>, String, String, String) {
        let now = Utc::now();
        let admin = User::new("s-1", "Wei", UserRole::Admin, now);
        let admin_id = admin.id.clone();
        let roster = Arc::new(FixedRoster::new(vec![admin]));
        let sink = Arc::new(RecordingSink::new());
        let clock = Arc::new(FixedClock::new(now));

        let mut state = CouncilState::default();
        let mut task = Task::new("Plan the outing", "Somewhere green", "s-0", "Root", now);
        let suggestion = Suggestion::new(&task.id, "u-9", "Ling", "Botanical garden", now);
        let task_id = task.id.clone();
        let suggestion_id = suggestion.id.clone();
        task.suggestions.push(suggestion);
        state.tasks.push(task);

        let use_case = AdoptSuggestionUseCase::new(roster, sink.clone(), clock);
        (state, use_case, sink, task_id, suggestion_id, admin_id)
    }

    #[test]
    fn test_adopt_creates_pending_proposal_and_notifies_author() {
        let (mut state, use_case, sink, task_id, suggestion_id, admin_id) = setup();

        let proposal = use_case
            .execute(
                &mut state,
                AdoptSuggestionInput {
                    task_id: task_id.clone(),
                    suggestion_id: suggestion_id.clone(),
                    acting_user_id: admin_id,
                },
            )
            .expect("adoption should succeed");

        assert_eq!(proposal.status, ProposalStatus::Pending);
        assert_eq!(proposal.content, "Botanical garden");
        assert_eq!(proposal.suggestion_id, suggestion_id);
        assert_eq!(state.proposals.len(), 1);

        // Flag and proposal are consistent
        let task = state.find_task(&task_id).unwrap();
        assert!(task.find_suggestion(&suggestion_id).unwrap().is_adopted);

        // Exactly one notification, to the suggestion's author
        let delivered = sink.delivered();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].kind, NotificationKind::SuggestionAdopted);
        assert_eq!(delivered[0].user_id, "u-9");
    }

    #[test]
    fn test_double_adopt_is_a_no_op() {
        let (mut state, use_case, sink, task_id, suggestion_id, admin_id) = setup();
        let input = AdoptSuggestionInput {
            task_id,
            suggestion_id,
            acting_user_id: admin_id,
        };

        assert!(use_case.execute(&mut state, input.clone()).is_some());
        assert!(use_case.execute(&mut state, input).is_none());

        assert_eq!(state.proposals.len(), 1);
        assert_eq!(sink.count(), 1);
    }

    #[test]
    fn test_unknown_entities_are_ignored() {
        let (mut state, use_case, sink, task_id, _suggestion_id, admin_id) = setup();

        let missing_suggestion = AdoptSuggestionInput {
            task_id: task_id.clone(),
            suggestion_id: "nope".to_string(),
            acting_user_id: admin_id.clone(),
        };
        let missing_task = AdoptSuggestionInput {
            task_id: "nope".to_string(),
            suggestion_id: "nope".to_string(),
            acting_user_id: admin_id,
        };
        assert!(use_case.execute(&mut state, missing_suggestion).is_none());
        assert!(use_case.execute(&mut state, missing_task).is_none());
        assert_eq!(state.proposals.len(), 0);
        assert_eq!(sink.count(), 0);
    }

    #[test]
    fn test_unknown_actor_is_ignored() {
        let (mut state, use_case, sink, task_id, suggestion_id, _admin_id) = setup();

        let outcome = use_case.execute(
            &mut state,
            AdoptSuggestionInput {
                task_id,
                suggestion_id: suggestion_id.clone(),
                acting_user_id: "ghost".to_string(),
            },
        );

        assert!(outcome.is_none());
        assert!(state.tasks[0].find_suggestion(&suggestion_id).is_some_and(|s| !s.is_adopted));
        assert_eq!(sink.count(), 0);
    }
}
