//! Closure policy: quorum-gated supermajority
//!
//! A proposal closes once turnout reaches the quorum threshold of the admin
//! electorate; it then passes or fails on a supermajority of cast votes.
//! Abstentions count toward turnout and stay in the approval denominator, so
//! abstaining works against passage.
//!
//! Comparisons use integer cross-multiplication so the boundary cases are
//! exact: 3 voters of 5 meet the 60% quorum, 2 approvals of 3 votes meet the
//! 2/3 supermajority.

use super::tally::VoteTally;
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

/// Outcome of a closure evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClosureOutcome {
    /// Quorum met, supermajority reached
    Approved,
    /// Quorum met, supermajority missed
    Rejected,
    /// Below quorum (or empty electorate): keep collecting votes
    Pending,
}

impl ClosureOutcome {
    pub fn is_approved(&self) -> bool {
        matches!(self, ClosureOutcome::Approved)
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, ClosureOutcome::Rejected)
    }

    pub fn is_decided(&self) -> bool {
        !matches!(self, ClosureOutcome::Pending)
    }
}

impl std::fmt::Display for ClosureOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClosureOutcome::Approved => write!(f, "Approved"),
            ClosureOutcome::Rejected => write!(f, "Rejected"),
            ClosureOutcome::Pending => write!(f, "Pending"),
        }
    }
}

/// Thresholds and windows governing proposal closure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotingPolicy {
    /// Turnout required before a vote can close, in percent of the electorate
    pub quorum_percent: u32,
    /// Supermajority fraction of cast votes required for passage
    pub approval_numerator: u32,
    pub approval_denominator: u32,
    /// Public display window after approval, in days
    pub approved_display_days: i64,
    /// Retention before auto-deletion after rejection, in days
    pub rejected_retention_days: i64,
}

impl Default for VotingPolicy {
    fn default() -> Self {
        Self {
            quorum_percent: 60,
            approval_numerator: 2,
            approval_denominator: 3,
            approved_display_days: 7,
            rejected_retention_days: 3,
        }
    }
}

impl VotingPolicy {
    /// Whether turnout has reached quorum. An empty electorate never reaches
    /// quorum: closure stays postponed rather than dividing by zero.
    pub fn quorum_met(&self, total_votes: usize, quorum_size: usize) -> bool {
        quorum_size > 0 && total_votes * 100 >= quorum_size * self.quorum_percent as usize
    }

    /// Whether cast votes carry the supermajority.
    pub fn supermajority_met(&self, approve_votes: usize, total_votes: usize) -> bool {
        total_votes > 0
            && approve_votes * self.approval_denominator as usize
                >= total_votes * self.approval_numerator as usize
    }

    /// Evaluate closure for the given tally.
    pub fn evaluate(&self, tally: &VoteTally) -> ClosureOutcome {
        if !self.quorum_met(tally.total_votes, tally.quorum_size) {
            return ClosureOutcome::Pending;
        }
        if self.supermajority_met(tally.approve_votes, tally.total_votes) {
            ClosureOutcome::Approved
        } else {
            ClosureOutcome::Rejected
        }
    }

    pub fn display_window(&self) -> TimeDelta {
        TimeDelta::days(self.approved_display_days)
    }

    pub fn retention_window(&self) -> TimeDelta {
        TimeDelta::days(self.rejected_retention_days)
    }
}
