//! Student feedback entities
//!
//! Feedback goes straight to the super admin, outside the task board.
//! Submissions may be anonymous; anonymity also suppresses the reply
//! notification back to the author.

use crate::core::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category of a feedback submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    #[default]
    Suggestion,
    Complaint,
    Question,
    Other,
}

impl FeedbackKind {
    pub fn as_str(&self) -> &str {
        match self {
            FeedbackKind::Suggestion => "suggestion",
            FeedbackKind::Complaint => "complaint",
            FeedbackKind::Question => "question",
            FeedbackKind::Other => "other",
        }
    }
}

impl std::str::FromStr for FeedbackKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "suggestion" => Ok(FeedbackKind::Suggestion),
            "complaint" => Ok(FeedbackKind::Complaint),
            "question" => Ok(FeedbackKind::Question),
            "other" => Ok(FeedbackKind::Other),
            other => Err(DomainError::InvalidFeedbackKind(other.to_string())),
        }
    }
}

/// Handling state of a feedback submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackStatus {
    #[default]
    Pending,
    Read,
    Resolved,
}

impl FeedbackStatus {
    pub fn as_str(&self) -> &str {
        match self {
            FeedbackStatus::Pending => "pending",
            FeedbackStatus::Read => "read",
            FeedbackStatus::Resolved => "resolved",
        }
    }
}

/// A feedback submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub student_id: String,
    pub kind: FeedbackKind,
    pub content: String,
    pub is_anonymous: bool,
    pub status: FeedbackStatus,
    pub reply: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Feedback {
    pub fn new(
        user_id: impl Into<String>,
        user_name: impl Into<String>,
        student_id: impl Into<String>,
        kind: FeedbackKind,
        content: impl Into<String>,
        is_anonymous: bool,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: crate::core::new_id(),
            user_id: user_id.into(),
            user_name: user_name.into(),
            student_id: student_id.into(),
            kind,
            content: content.into(),
            is_anonymous,
            status: FeedbackStatus::Pending,
            reply: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Display name honoring the anonymity flag.
    pub fn display_name(&self) -> &str {
        if self.is_anonymous {
            "Anonymous"
        } else {
            &self.user_name
        }
    }

    /// Attach a reply and mark resolved.
    pub fn resolve_with_reply(&mut self, reply: impl Into<String>, now: DateTime<Utc>) {
        self.reply = Some(reply.into());
        self.status = FeedbackStatus::Resolved;
        self.updated_at = now;
    }

    pub fn set_status(&mut self, status: FeedbackStatus, now: DateTime<Utc>) {
        self.status = status;
        self.updated_at = now;
    }
}
