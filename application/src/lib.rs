//! Application layer for class-council
//!
//! This crate contains the engine's command interface, the serialized state
//! container, and port definitions for external collaborators (roster,
//! notification sink, clock). It depends only on the domain layer.

pub mod ports;
pub mod state;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    clock::{Clock, FixedClock},
    notification_sink::{NoNotificationSink, NotificationSink, RecordingSink},
    roster::{FixedRoster, RosterProvider},
};
pub use state::CouncilState;
pub use use_cases::{
    AddReplyInput, AdoptSuggestionInput, AdoptSuggestionUseCase, CastVoteInput, CastVoteOutcome,
    CastVoteUseCase, FeedbackUseCase, StartVotingInput, StartVotingUseCase, SweepProposalsUseCase,
    TaskBoardUseCase,
};
