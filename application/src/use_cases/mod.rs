//! Use cases: the engine's command interface
//!
//! Every mutation of [`CouncilState`](crate::state::CouncilState) goes
//! through one of these commands, preserving the single-serialized-mutator
//! model. Precondition violations are silent no-ops surfaced only through
//! typed outcomes and debug logs, never as errors.

pub mod adopt_suggestion;
pub mod cast_vote;
pub mod feedback;
pub mod start_voting;
pub mod sweep_proposals;
pub mod task_board;

pub use adopt_suggestion::{AdoptSuggestionInput, AdoptSuggestionUseCase};
pub use cast_vote::{CastVoteInput, CastVoteOutcome, CastVoteUseCase};
pub use feedback::FeedbackUseCase;
pub use start_voting::{StartVotingInput, StartVotingUseCase};
pub use sweep_proposals::SweepProposalsUseCase;
pub use task_board::{AddReplyInput, TaskBoardUseCase};
