//! Vote tallying
//!
//! Aggregates a proposal's votes against the size of the admin electorate.
//! The rates here are for display; closure decisions go through
//! [`VotingPolicy`](super::policy::VotingPolicy), which compares exactly.

use super::entities::{Vote, VoteOption};
use serde::{Deserialize, Serialize};

/// Aggregated vote counts for one proposal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    /// Size of the electorate (admins + super admin)
    pub quorum_size: usize,
    pub total_votes: usize,
    pub approve_votes: usize,
    pub reject_votes: usize,
    pub abstain_votes: usize,
}

impl VoteTally {
    /// Count a proposal's votes against the current electorate size.
    pub fn count(votes: &[Vote], quorum_size: usize) -> Self {
        let approve_votes = votes.iter().filter(|v| v.option == VoteOption::Approve).count();
        let reject_votes = votes.iter().filter(|v| v.option == VoteOption::Reject).count();
        let abstain_votes = votes.iter().filter(|v| v.option == VoteOption::Abstain).count();

        Self {
            quorum_size,
            total_votes: votes.len(),
            approve_votes,
            reject_votes,
            abstain_votes,
        }
    }

    /// Turnout as a fraction of the electorate (0.0 to 1.0).
    /// Zero when the electorate is empty.
    pub fn turnout_rate(&self) -> f64 {
        if self.quorum_size == 0 {
            0.0
        } else {
            self.total_votes as f64 / self.quorum_size as f64
        }
    }

    /// Approvals as a fraction of cast votes (0.0 to 1.0). Abstentions stay
    /// in the denominator. Zero when no votes are cast.
    pub fn approval_rate(&self) -> f64 {
        if self.total_votes == 0 {
            0.0
        } else {
            self.approve_votes as f64 / self.total_votes as f64
        }
    }
}
