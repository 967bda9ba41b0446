//! Notification records emitted by the engine
//!
//! The engine creates notifications; the notification center stores them and
//! owns the read-state toggles. Content is never mutated after creation.

use crate::feedback::Feedback;
use crate::proposal::Proposal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of notification event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    SuggestionAdopted,
    VotingStarted,
    ProposalStatusChanged,
    FeedbackReceived,
    ReplyReceived,
}

impl NotificationKind {
    pub fn as_str(&self) -> &str {
        match self {
            NotificationKind::SuggestionAdopted => "suggestion_adopted",
            NotificationKind::VotingStarted => "voting_started",
            NotificationKind::ProposalStatusChanged => "proposal_status_changed",
            NotificationKind::FeedbackReceived => "feedback_received",
            NotificationKind::ReplyReceived => "reply_received",
        }
    }
}

/// Where a notification's deep link navigates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkTarget {
    Task,
    Proposal,
    Feedback,
}

/// A notification delivered to one recipient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    /// Recipient
    pub user_id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub content: String,
    pub is_read: bool,
    pub link_type: Option<LinkTarget>,
    pub link_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        user_id: impl Into<String>,
        kind: NotificationKind,
        title: impl Into<String>,
        content: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: crate::core::new_id(),
            user_id: user_id.into(),
            kind,
            title: title.into(),
            content: content.into(),
            is_read: false,
            link_type: None,
            link_id: None,
            created_at: now,
        }
    }

    /// Attach a deep link for the navigation layer.
    pub fn with_link(mut self, target: LinkTarget, id: impl Into<String>) -> Self {
        self.link_type = Some(target);
        self.link_id = Some(id.into());
        self
    }

    pub fn mark_read(&mut self) {
        self.is_read = true;
    }

    /// To the suggestion's author, when an admin adopts it.
    pub fn suggestion_adopted(proposal: &Proposal, now: DateTime<Utc>) -> Self {
        Self::new(
            &proposal.submitted_by,
            NotificationKind::SuggestionAdopted,
            "Suggestion adopted",
            format!(
                "Your suggestion was adopted as a proposal: {}",
                preview(&proposal.content)
            ),
            now,
        )
        .with_link(LinkTarget::Proposal, &proposal.id)
    }

    /// To the proposal's submitter, when voting opens.
    pub fn voting_started(proposal: &Proposal, now: DateTime<Utc>) -> Self {
        Self::new(
            &proposal.submitted_by,
            NotificationKind::VotingStarted,
            "Voting started",
            format!(
                "Voting has started on your proposal: {}",
                preview(&proposal.content)
            ),
            now,
        )
        .with_link(LinkTarget::Proposal, &proposal.id)
    }

    /// To the submitter, when the vote passes.
    pub fn proposal_approved(proposal: &Proposal, display_days: i64, now: DateTime<Utc>) -> Self {
        Self::new(
            &proposal.submitted_by,
            NotificationKind::ProposalStatusChanged,
            "Proposal approved",
            format!(
                "Your proposal passed the vote and will be displayed for {display_days} days: {}",
                preview(&proposal.content)
            ),
            now,
        )
        .with_link(LinkTarget::Proposal, &proposal.id)
    }

    /// To the submitter, when the vote fails.
    pub fn proposal_rejected(proposal: &Proposal, retention_days: i64, now: DateTime<Utc>) -> Self {
        Self::new(
            &proposal.submitted_by,
            NotificationKind::ProposalStatusChanged,
            "Proposal rejected",
            format!(
                "Your proposal did not pass the vote and will be auto-deleted in {retention_days} days: {}",
                preview(&proposal.content)
            ),
            now,
        )
        .with_link(LinkTarget::Proposal, &proposal.id)
    }

    /// To a super admin, when a student submits feedback.
    pub fn feedback_received(recipient: impl Into<String>, feedback: &Feedback, now: DateTime<Utc>) -> Self {
        Self::new(
            recipient,
            NotificationKind::FeedbackReceived,
            "New feedback",
            format!(
                "{} submitted {} feedback: {}",
                feedback.display_name(),
                feedback.kind.as_str(),
                preview(&feedback.content)
            ),
            now,
        )
        .with_link(LinkTarget::Feedback, &feedback.id)
    }

    /// To the author of a question/suggestion/feedback someone replied to.
    pub fn reply_received(
        recipient: impl Into<String>,
        replier_name: &str,
        parent_label: &str,
        reply_content: &str,
        link: (LinkTarget, &str),
        now: DateTime<Utc>,
    ) -> Self {
        Self::new(
            recipient,
            NotificationKind::ReplyReceived,
            "New reply",
            format!(
                "{replier_name} replied to your {parent_label}: {}",
                preview(reply_content)
            ),
            now,
        )
        .with_link(link.0, link.1)
    }
}

/// First 60 characters of the referenced text, char-boundary safe.
fn preview(content: &str) -> String {
    const MAX: usize = 60;
    if content.chars().count() <= MAX {
        content.to_string()
    } else {
        let cut: String = content.chars().take(MAX).collect();
        format!("{cut}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Suggestion;

    fn sample_proposal() -> Proposal {
        let suggestion = Suggestion::new("task-1", "u-9", "Ling", "Add a study corner", Utc::now());
        Proposal::from_suggestion(&suggestion, Utc::now())
    }

    #[test]
    fn test_adoption_notification_targets_author() {
        let proposal = sample_proposal();
        let notification = Notification::suggestion_adopted(&proposal, Utc::now());

        assert_eq!(notification.user_id, "u-9");
        assert_eq!(notification.kind, NotificationKind::SuggestionAdopted);
        assert_eq!(notification.link_type, Some(LinkTarget::Proposal));
        assert_eq!(notification.link_id.as_deref(), Some(proposal.id.as_str()));
        assert!(!notification.is_read);
    }

    #[test]
    fn test_decision_messages_carry_window() {
        let proposal = sample_proposal();
        let approved = Notification::proposal_approved(&proposal, 7, Utc::now());
        let rejected = Notification::proposal_rejected(&proposal, 3, Utc::now());

        assert!(approved.content.contains("displayed for 7 days"));
        assert!(rejected.content.contains("auto-deleted in 3 days"));
        assert_eq!(approved.kind, NotificationKind::ProposalStatusChanged);
        assert_eq!(rejected.kind, NotificationKind::ProposalStatusChanged);
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let long = "长".repeat(80);
        let short = preview(&long);
        assert_eq!(short.chars().count(), 61); // 60 chars + ellipsis
    }

    #[test]
    fn test_mark_read() {
        let mut notification = Notification::new(
            "u1",
            NotificationKind::ReplyReceived,
            "New reply",
            "hi",
            Utc::now(),
        );
        notification.mark_read();
        assert!(notification.is_read);
    }
}
