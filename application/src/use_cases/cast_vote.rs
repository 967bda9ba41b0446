//! Cast Vote use case
//!
//! Appends a vote and immediately evaluates closure, so a proposal can never
//! sit on a decisive tally without transitioning.

use crate::ports::clock::Clock;
use crate::ports::notification_sink::NotificationSink;
use crate::ports::roster::RosterProvider;
use crate::state::CouncilState;
use council_domain::{ClosureOutcome, Notification, ProposalStatus, Vote, VoteOption, VoteTally, VotingPolicy};
use std::sync::Arc;
use tracing::{debug, info};

/// Input for the CastVote use case
#[derive(Debug, Clone)]
pub struct CastVoteInput {
    pub proposal_id: String,
    pub user_id: String,
    pub user_name: String,
    pub option: VoteOption,
}

/// Result of a cast-vote attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastVoteOutcome {
    /// Vote accepted; the proposal is still collecting votes
    Accepted,
    /// Vote accepted and it closed the vote
    Decided(ProposalStatus),
    /// Precondition unmet; nothing changed
    Ignored,
}

impl CastVoteOutcome {
    pub fn is_ignored(&self) -> bool {
        matches!(self, CastVoteOutcome::Ignored)
    }
}

/// Use case for casting a vote on a proposal in voting
///
/// Preconditions: the proposal exists, is in voting, and the voter has not
/// voted on it before. Violations are silent no-ops, which makes
/// re-application of an already-applied vote safe by construction.
///
/// After every accepted vote the closure policy runs synchronously: once
/// turnout reaches quorum, the proposal transitions to approved or rejected
/// and the submitter is notified. With an empty electorate closure is
/// postponed, never decided.
pub struct CastVoteUseCase {
    roster: Arc<dyn RosterProvider>,
    notifications: Arc<dyn NotificationSink>,
    clock: Arc<dyn Clock>,
    policy: VotingPolicy,
}

impl CastVoteUseCase {
    pub fn new(
        roster: Arc<dyn RosterProvider>,
        notifications: Arc<dyn NotificationSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            roster,
            notifications,
            clock,
            policy: VotingPolicy::default(),
        }
    }

    /// Override the default closure thresholds.
    pub fn with_policy(mut self, policy: VotingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Execute the vote.
    pub fn execute(&self, state: &mut CouncilState, input: CastVoteInput) -> CastVoteOutcome {
        let now = self.clock.now();
        let quorum_size = self.roster.admin_count();

        let Some(proposal) = state.find_proposal_mut(&input.proposal_id) else {
            debug!("vote ignored: proposal {} not found", input.proposal_id);
            return CastVoteOutcome::Ignored;
        };

        let vote = Vote::new(
            &proposal.id,
            &input.user_id,
            &input.user_name,
            input.option,
            now,
        );
        if !proposal.record_vote(vote) {
            debug!(
                "vote ignored: proposal {} is {} or {} already voted",
                proposal.id,
                proposal.status.as_str(),
                input.user_id
            );
            return CastVoteOutcome::Ignored;
        }

        let tally = VoteTally::count(&proposal.votes, quorum_size);
        match self.policy.evaluate(&tally) {
            ClosureOutcome::Pending => CastVoteOutcome::Accepted,
            ClosureOutcome::Approved => {
                proposal.approve(now, self.policy.display_window());
                info!(
                    "proposal {} approved ({}/{} approve, {} voters of {})",
                    proposal.id,
                    tally.approve_votes,
                    tally.total_votes,
                    tally.total_votes,
                    tally.quorum_size
                );
                self.notifications.deliver(Notification::proposal_approved(
                    proposal,
                    self.policy.approved_display_days,
                    now,
                ));
                CastVoteOutcome::Decided(ProposalStatus::Approved)
            }
            ClosureOutcome::Rejected => {
                proposal.reject(now, self.policy.retention_window());
                info!(
                    "proposal {} rejected ({}/{} approve, {} voters of {})",
                    proposal.id,
                    tally.approve_votes,
                    tally.total_votes,
                    tally.total_votes,
                    tally.quorum_size
                );
                self.notifications.deliver(Notification::proposal_rejected(
                    proposal,
                    self.policy.rejected_retention_days,
                    now,
                ));
                CastVoteOutcome::Decided(ProposalStatus::Rejected)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::clock::FixedClock;
    use crate::ports::notification_sink::RecordingSink;
    use crate::ports::roster::FixedRoster;
    use chrono::{TimeDelta, Utc};
    use council_domain::{NotificationKind, Proposal, Suggestion, User, UserRole};

    struct Fixture {
        state: CouncilState,
        use_case: CastVoteUseCase,
        sink: Arc<RecordingSink>,
        clock: Arc<FixedClock>,
        proposal_id: String,
    }

    /// A proposal already in voting, with an electorate of `admins` admins.
    fn fixture(admins: usize) -> Fixture {
        let now = Utc::now();
        let users: Vec<User> = (0..admins)
            .map(|i| User::new(format!("s-{i}"), format!("Admin {i}"), UserRole::Admin, now))
            .collect();
        let roster = Arc::new(FixedRoster::new(users));
        let sink = Arc::new(RecordingSink::new());
        let clock = Arc::new(FixedClock::new(now));

        let mut state = CouncilState::default();
        let suggestion = Suggestion::new("t-1", "u-9", "Ling", "Botanical garden", now);
        let mut proposal = Proposal::from_suggestion(&suggestion, now);
        proposal.begin_voting(now);
        let proposal_id = proposal.id.clone();
        state.proposals.push(proposal);

        let use_case = CastVoteUseCase::new(roster, sink.clone(), clock.clone());
        Fixture {
            state,
            use_case,
            sink,
            clock,
            proposal_id,
        }
    }

    fn vote(f: &mut Fixture, voter: &str, option: VoteOption) -> CastVoteOutcome {
        f.use_case.execute(
            &mut f.state,
            CastVoteInput {
                proposal_id: f.proposal_id.clone(),
                user_id: voter.to_string(),
                user_name: voter.to_string(),
                option,
            },
        )
    }

    #[test]
    fn test_two_of_three_approvals_pass_at_quorum() {
        let mut f = fixture(5);

        assert_eq!(vote(&mut f, "a", VoteOption::Approve), CastVoteOutcome::Accepted);
        assert_eq!(vote(&mut f, "b", VoteOption::Approve), CastVoteOutcome::Accepted);
        // Third vote: 60% turnout, 2/3 approval exactly
        assert_eq!(
            vote(&mut f, "c", VoteOption::Reject),
            CastVoteOutcome::Decided(ProposalStatus::Approved)
        );

        let now = f.clock.now();
        let proposal = f.state.find_proposal(&f.proposal_id).unwrap();
        assert_eq!(proposal.status, ProposalStatus::Approved);
        assert_eq!(proposal.approved_at, Some(now));
        assert_eq!(proposal.auto_delete_at, Some(now + TimeDelta::days(7)));
    }

    #[test]
    fn test_one_of_three_approvals_fails_at_quorum() {
        let mut f = fixture(5);

        vote(&mut f, "a", VoteOption::Approve);
        vote(&mut f, "b", VoteOption::Reject);
        assert_eq!(
            vote(&mut f, "c", VoteOption::Reject),
            CastVoteOutcome::Decided(ProposalStatus::Rejected)
        );

        let now = f.clock.now();
        let proposal = f.state.find_proposal(&f.proposal_id).unwrap();
        assert_eq!(proposal.status, ProposalStatus::Rejected);
        assert!(proposal.approved_at.is_none());
        assert_eq!(proposal.auto_delete_at, Some(now + TimeDelta::days(3)));
    }

    #[test]
    fn test_below_quorum_stays_voting() {
        let mut f = fixture(5);

        assert_eq!(vote(&mut f, "a", VoteOption::Approve), CastVoteOutcome::Accepted);
        assert_eq!(vote(&mut f, "b", VoteOption::Approve), CastVoteOutcome::Accepted);

        let proposal = f.state.find_proposal(&f.proposal_id).unwrap();
        assert_eq!(proposal.status, ProposalStatus::Voting);
        assert!(proposal.auto_delete_at.is_none());
        assert_eq!(f.sink.count(), 0);
    }

    #[test]
    fn test_empty_electorate_never_closes() {
        let mut f = fixture(0);

        for voter in ["a", "b", "c", "d", "e", "f"] {
            assert_eq!(vote(&mut f, voter, VoteOption::Approve), CastVoteOutcome::Accepted);
        }

        let proposal = f.state.find_proposal(&f.proposal_id).unwrap();
        assert_eq!(proposal.status, ProposalStatus::Voting);
        assert_eq!(f.sink.count(), 0);
    }

    #[test]
    fn test_duplicate_votes_are_ignored() {
        let mut f = fixture(5);

        assert_eq!(vote(&mut f, "a", VoteOption::Approve), CastVoteOutcome::Accepted);
        assert_eq!(vote(&mut f, "a", VoteOption::Reject), CastVoteOutcome::Ignored);

        let proposal = f.state.find_proposal(&f.proposal_id).unwrap();
        assert_eq!(proposal.votes.len(), 1);
        assert_eq!(proposal.votes[0].option, VoteOption::Approve);
    }

    #[test]
    fn test_votes_after_decision_are_ignored() {
        let mut f = fixture(5);

        vote(&mut f, "a", VoteOption::Approve);
        vote(&mut f, "b", VoteOption::Approve);
        vote(&mut f, "c", VoteOption::Approve);
        assert_eq!(vote(&mut f, "d", VoteOption::Reject), CastVoteOutcome::Ignored);

        let proposal = f.state.find_proposal(&f.proposal_id).unwrap();
        assert_eq!(proposal.votes.len(), 3);
        // Closure never re-fires: still exactly one decision notification
        assert_eq!(f.sink.count(), 1);
    }

    #[test]
    fn test_decision_notifies_submitter_once() {
        let mut f = fixture(5);

        vote(&mut f, "a", VoteOption::Approve);
        vote(&mut f, "b", VoteOption::Approve);
        vote(&mut f, "c", VoteOption::Approve);

        let delivered = f.sink.delivered();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].kind, NotificationKind::ProposalStatusChanged);
        assert_eq!(delivered[0].user_id, "u-9");
        assert!(delivered[0].content.contains("displayed for 7 days"));
    }

    #[test]
    fn test_abstentions_fill_quorum_but_count_against_passage() {
        let mut f = fixture(5);

        vote(&mut f, "a", VoteOption::Approve);
        vote(&mut f, "b", VoteOption::Abstain);
        // 3 of 5 at quorum, 1/3 approval: rejected
        assert_eq!(
            vote(&mut f, "c", VoteOption::Abstain),
            CastVoteOutcome::Decided(ProposalStatus::Rejected)
        );
    }

    #[test]
    fn test_vote_on_pending_proposal_is_ignored() {
        let mut f = fixture(5);
        // Fresh pending proposal alongside the voting one
        let suggestion = Suggestion::new("t-1", "u-9", "Ling", "Second idea", Utc::now());
        let pending = Proposal::from_suggestion(&suggestion, Utc::now());
        let pending_id = pending.id.clone();
        f.state.proposals.push(pending);

        let outcome = f.use_case.execute(
            &mut f.state,
            CastVoteInput {
                proposal_id: pending_id.clone(),
                user_id: "a".to_string(),
                user_name: "a".to_string(),
                option: VoteOption::Approve,
            },
        );

        assert!(outcome.is_ignored());
        assert!(f.state.find_proposal(&pending_id).unwrap().votes.is_empty());
    }
}
