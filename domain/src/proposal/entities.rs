//! Proposal and vote entities

use crate::core::error::DomainError;
use crate::task::Suggestion;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Status of a proposal
///
/// `Approved` and `Rejected` are terminal: nothing leaves them except
/// deletion by the expiry sweeper (or a manual delete).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    #[default]
    Pending,
    Voting,
    Approved,
    Rejected,
}

impl ProposalStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ProposalStatus::Pending => "pending",
            ProposalStatus::Voting => "voting",
            ProposalStatus::Approved => "approved",
            ProposalStatus::Rejected => "rejected",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            ProposalStatus::Pending => "Awaiting Vote",
            ProposalStatus::Voting => "Voting",
            ProposalStatus::Approved => "Approved",
            ProposalStatus::Rejected => "Rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ProposalStatus::Approved | ProposalStatus::Rejected)
    }
}

impl std::fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// How an elector voted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteOption {
    Approve,
    Reject,
    /// Counts toward turnout but not toward approval
    Abstain,
}

impl VoteOption {
    pub fn as_str(&self) -> &str {
        match self {
            VoteOption::Approve => "approve",
            VoteOption::Reject => "reject",
            VoteOption::Abstain => "abstain",
        }
    }
}

impl std::fmt::Display for VoteOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for VoteOption {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "approve" => Ok(VoteOption::Approve),
            "reject" => Ok(VoteOption::Reject),
            "abstain" => Ok(VoteOption::Abstain),
            other => Err(DomainError::InvalidVoteOption(other.to_string())),
        }
    }
}

/// A single vote on a proposal
///
/// Owned by its proposal and immutable once cast. Uniqueness per voter is
/// enforced by [`Proposal::record_vote`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    pub id: String,
    pub proposal_id: String,
    pub user_id: String,
    /// Voter name snapshotted at creation time
    pub user_name: String,
    pub option: VoteOption,
    pub created_at: DateTime<Utc>,
}

impl Vote {
    pub fn new(
        proposal_id: impl Into<String>,
        user_id: impl Into<String>,
        user_name: impl Into<String>,
        option: VoteOption,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: crate::core::new_id(),
            proposal_id: proposal_id.into(),
            user_id: user_id.into(),
            user_name: user_name.into(),
            option,
            created_at: now,
        }
    }
}

/// A formal proposal created by adopting a suggestion
///
/// Field invariants, maintained by the transition methods below:
/// - `voting_started_at` is set iff status is not `Pending`
/// - `auto_delete_at` is set iff status is terminal
/// - `approved_at` is set iff status is `Approved`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: String,
    /// Provenance back-reference; the suggestion is not owned by the proposal
    pub suggestion_id: String,
    pub task_id: String,
    /// Immutable copy of the suggestion text at adoption time
    pub content: String,
    pub submitted_by: String,
    pub submitter_name: String,
    pub status: ProposalStatus,
    #[serde(default)]
    pub votes: Vec<Vote>,
    pub created_at: DateTime<Utc>,
    pub voting_started_at: Option<DateTime<Utc>>,
    pub approved_at: Option<DateTime<Utc>>,
    pub auto_delete_at: Option<DateTime<Utc>>,
}

impl Proposal {
    /// Create a pending proposal from a suggestion, copying content and
    /// author identity.
    pub fn from_suggestion(suggestion: &Suggestion, now: DateTime<Utc>) -> Self {
        Self {
            id: crate::core::new_id(),
            suggestion_id: suggestion.id.clone(),
            task_id: suggestion.task_id.clone(),
            content: suggestion.content.clone(),
            submitted_by: suggestion.user_id.clone(),
            submitter_name: suggestion.user_name.clone(),
            status: ProposalStatus::Pending,
            votes: Vec::new(),
            created_at: now,
            voting_started_at: None,
            approved_at: None,
            auto_delete_at: None,
        }
    }

    pub fn has_voted(&self, user_id: &str) -> bool {
        self.votes.iter().any(|v| v.user_id == user_id)
    }

    /// Move a pending proposal into voting. Returns false (no state change)
    /// if the proposal is not pending.
    pub fn begin_voting(&mut self, now: DateTime<Utc>) -> bool {
        if self.status != ProposalStatus::Pending {
            return false;
        }
        self.status = ProposalStatus::Voting;
        self.voting_started_at = Some(now);
        true
    }

    /// Append a vote. Returns false (no state change) if the proposal is not
    /// in voting or the voter has already voted.
    pub fn record_vote(&mut self, vote: Vote) -> bool {
        if self.status != ProposalStatus::Voting || self.has_voted(&vote.user_id) {
            return false;
        }
        self.votes.push(vote);
        true
    }

    /// Close as approved: starts the public display window.
    pub fn approve(&mut self, now: DateTime<Utc>, display_window: TimeDelta) {
        self.status = ProposalStatus::Approved;
        self.approved_at = Some(now);
        self.auto_delete_at = Some(now + display_window);
    }

    /// Close as rejected: starts the retention window before auto-deletion.
    pub fn reject(&mut self, now: DateTime<Utc>, retention_window: TimeDelta) {
        self.status = ProposalStatus::Rejected;
        self.auto_delete_at = Some(now + retention_window);
    }

    /// Whether the expiry sweeper should remove this proposal.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.status.is_terminal()
            && self.auto_delete_at.is_some_and(|deadline| deadline <= now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_proposal() -> Proposal {
        let suggestion = Suggestion::new("task-1", "u-9", "Ling", "Add a study corner", Utc::now());
        Proposal::from_suggestion(&suggestion, Utc::now())
    }

    #[test]
    fn test_from_suggestion_copies_content_and_author() {
        let proposal = sample_proposal();
        assert_eq!(proposal.content, "Add a study corner");
        assert_eq!(proposal.submitted_by, "u-9");
        assert_eq!(proposal.submitter_name, "Ling");
        assert_eq!(proposal.status, ProposalStatus::Pending);
        assert!(proposal.votes.is_empty());
        assert!(proposal.voting_started_at.is_none());
        assert!(proposal.auto_delete_at.is_none());
    }

    #[test]
    fn test_begin_voting_only_from_pending() {
        let mut proposal = sample_proposal();
        assert!(proposal.begin_voting(Utc::now()));
        assert_eq!(proposal.status, ProposalStatus::Voting);
        assert!(proposal.voting_started_at.is_some());

        // Second call is a no-op
        assert!(!proposal.begin_voting(Utc::now()));
    }

    #[test]
    fn test_record_vote_rejects_duplicates() {
        let mut proposal = sample_proposal();
        proposal.begin_voting(Utc::now());

        let first = Vote::new(&proposal.id, "admin-1", "Wei", VoteOption::Approve, Utc::now());
        let second = Vote::new(&proposal.id, "admin-1", "Wei", VoteOption::Reject, Utc::now());
        assert!(proposal.record_vote(first));
        assert!(!proposal.record_vote(second));
        assert_eq!(proposal.votes.len(), 1);
        assert_eq!(proposal.votes[0].option, VoteOption::Approve);
    }

    #[test]
    fn test_record_vote_requires_voting_status() {
        let mut proposal = sample_proposal();
        let vote = Vote::new(&proposal.id, "admin-1", "Wei", VoteOption::Approve, Utc::now());
        assert!(!proposal.record_vote(vote.clone()));

        proposal.begin_voting(Utc::now());
        proposal.approve(Utc::now(), TimeDelta::days(7));
        assert!(!proposal.record_vote(vote));
        assert!(proposal.votes.is_empty());
    }

    #[test]
    fn test_terminal_timestamps() {
        let now = Utc::now();

        let mut approved = sample_proposal();
        approved.begin_voting(now);
        approved.approve(now, TimeDelta::days(7));
        assert_eq!(approved.approved_at, Some(now));
        assert_eq!(approved.auto_delete_at, Some(now + TimeDelta::days(7)));

        let mut rejected = sample_proposal();
        rejected.begin_voting(now);
        rejected.reject(now, TimeDelta::days(3));
        assert!(rejected.approved_at.is_none());
        assert_eq!(rejected.auto_delete_at, Some(now + TimeDelta::days(3)));
    }

    #[test]
    fn test_is_expired_boundaries() {
        let now = Utc::now();
        let mut proposal = sample_proposal();
        proposal.begin_voting(now);
        proposal.reject(now, TimeDelta::days(3));

        assert!(!proposal.is_expired(now));
        assert!(!proposal.is_expired(now + TimeDelta::days(3) - TimeDelta::milliseconds(1)));
        assert!(proposal.is_expired(now + TimeDelta::days(3)));
        assert!(proposal.is_expired(now + TimeDelta::days(4)));
    }

    #[test]
    fn test_open_proposal_never_expires() {
        let proposal = sample_proposal();
        assert!(!proposal.is_expired(Utc::now() + TimeDelta::days(365)));
    }
}
