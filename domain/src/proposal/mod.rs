//! Proposal lifecycle and voting
//!
//! Adopted suggestions become proposals, which move through
//! `pending → voting → approved | rejected`. Closure is decided by a
//! quorum-gated supermajority over the admin electorate (see [`policy`]).

pub mod entities;
pub mod policy;
pub mod tally;

pub use entities::{Proposal, ProposalStatus, Vote, VoteOption};
pub use policy::{ClosureOutcome, VotingPolicy};
pub use tally::VoteTally;
