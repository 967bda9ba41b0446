//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// The collaboration engine itself treats precondition violations as silent
/// no-ops (see the application layer); these errors cover parsing and roster
/// validation, where a caller supplied a value the domain cannot represent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown role: {0}. Valid: super_admin, admin, user")]
    InvalidRole(String),

    #[error("Unknown vote option: {0}. Valid: approve, reject, abstain")]
    InvalidVoteOption(String),

    #[error("Unknown feedback kind: {0}. Valid: suggestion, complaint, question, other")]
    InvalidFeedbackKind(String),

    #[error("Student id already registered: {0}")]
    DuplicateStudentId(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Operation requires the {0} role")]
    RoleRequired(String),

    #[error("The {0} account is protected and cannot be modified")]
    ProtectedAccount(String),
}
