//! Serialized state container
//!
//! All entity collections the engine mutates live here, and every mutation
//! funnels through the command structs in [`use_cases`](crate::use_cases).
//! This preserves single-serialized-mutator semantics without a global
//! singleton: whoever owns the `CouncilState` owns the write path.

use council_domain::{Feedback, Proposal, Task, sort_tasks};
use serde::{Deserialize, Serialize};

/// The engine's owned collections: active and archived tasks (with their
/// embedded questions/suggestions), proposals (with their embedded votes),
/// and feedback submissions.
///
/// Users and notifications are not held here; they belong to the roster
/// provider and the notification sink respectively.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CouncilState {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub archived_tasks: Vec<Task>,
    #[serde(default)]
    pub proposals: Vec<Proposal>,
    #[serde(default)]
    pub feedbacks: Vec<Feedback>,
}

impl CouncilState {
    pub fn find_task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    pub fn find_task_mut(&mut self, task_id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == task_id)
    }

    pub fn find_proposal(&self, proposal_id: &str) -> Option<&Proposal> {
        self.proposals.iter().find(|p| p.id == proposal_id)
    }

    pub fn find_proposal_mut(&mut self, proposal_id: &str) -> Option<&mut Proposal> {
        self.proposals.iter_mut().find(|p| p.id == proposal_id)
    }

    pub fn find_feedback_mut(&mut self, feedback_id: &str) -> Option<&mut Feedback> {
        self.feedbacks.iter_mut().find(|f| f.id == feedback_id)
    }

    /// Remove a proposal and its embedded votes. Returns the removed
    /// proposal, or `None` if the id is unknown (already deleted).
    pub fn remove_proposal(&mut self, proposal_id: &str) -> Option<Proposal> {
        let index = self.proposals.iter().position(|p| p.id == proposal_id)?;
        Some(self.proposals.remove(index))
    }

    /// Re-apply board ordering after a mutation that affects it.
    pub fn resort_tasks(&mut self) {
        sort_tasks(&mut self.tasks);
    }

    /// Active tasks matching a search query, in board order. An empty query
    /// matches everything.
    pub fn search_tasks(&self, query: &str) -> Vec<&Task> {
        let query = query.trim();
        self.tasks
            .iter()
            .filter(|t| query.is_empty() || t.matches_query(query))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use council_domain::Suggestion;

    #[test]
    fn test_remove_proposal_is_idempotent() {
        let mut state = CouncilState::default();
        let suggestion = Suggestion::new("t1", "u1", "Ling", "More plants", Utc::now());
        let proposal = Proposal::from_suggestion(&suggestion, Utc::now());
        let id = proposal.id.clone();
        state.proposals.push(proposal);

        assert!(state.remove_proposal(&id).is_some());
        assert!(state.remove_proposal(&id).is_none());
    }

    #[test]
    fn test_search_tasks_empty_query_returns_all() {
        let mut state = CouncilState::default();
        state.tasks.push(Task::new("A", "x", "u1", "Ann", Utc::now()));
        state.tasks.push(Task::new("B", "y", "u1", "Ann", Utc::now()));

        assert_eq!(state.search_tasks("").len(), 2);
        assert_eq!(state.search_tasks("a").len(), 1);
    }
}
