//! Feedback use case
//!
//! Students send feedback straight to the super admin, optionally
//! anonymously. Submission fans out one notification per super admin; a
//! reply resolves the feedback and notifies the author (unless anonymous).

use crate::ports::clock::Clock;
use crate::ports::notification_sink::NotificationSink;
use crate::ports::roster::RosterProvider;
use crate::state::CouncilState;
use council_domain::{Feedback, FeedbackKind, FeedbackStatus, LinkTarget, Notification, UserRole};
use std::sync::Arc;
use tracing::debug;

/// Use case collection for the feedback channel
pub struct FeedbackUseCase {
    roster: Arc<dyn RosterProvider>,
    notifications: Arc<dyn NotificationSink>,
    clock: Arc<dyn Clock>,
}

impl FeedbackUseCase {
    pub fn new(
        roster: Arc<dyn RosterProvider>,
        notifications: Arc<dyn NotificationSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            roster,
            notifications,
            clock,
        }
    }

    /// Submit feedback. Returns `None` when the author is not on the roster.
    pub fn submit(
        &self,
        state: &mut CouncilState,
        acting_user_id: &str,
        kind: FeedbackKind,
        content: impl Into<String>,
        is_anonymous: bool,
    ) -> Option<Feedback> {
        let author = self.roster.find_user(acting_user_id)?;
        let now = self.clock.now();

        let feedback = Feedback::new(
            &author.id,
            &author.name,
            &author.student_id,
            kind,
            content,
            is_anonymous,
            now,
        );

        for super_admin in self.roster.super_admins() {
            self.notifications
                .deliver(Notification::feedback_received(&super_admin.id, &feedback, now));
        }

        state.feedbacks.insert(0, feedback.clone());
        Some(feedback)
    }

    /// Reply to a feedback and mark it resolved. Super admin only.
    pub fn reply(
        &self,
        state: &mut CouncilState,
        acting_user_id: &str,
        feedback_id: &str,
        reply: impl Into<String>,
    ) -> bool {
        let authorized = self
            .roster
            .find_user(acting_user_id)
            .is_some_and(|u| u.role == UserRole::SuperAdmin);
        if !authorized {
            debug!("feedback reply ignored: {} is not the super admin", acting_user_id);
            return false;
        }

        let now = self.clock.now();
        let Some(feedback) = state.find_feedback_mut(feedback_id) else {
            debug!("feedback reply ignored: {} not found", feedback_id);
            return false;
        };

        let reply = reply.into();
        feedback.resolve_with_reply(reply.clone(), now);

        if !feedback.is_anonymous {
            self.notifications.deliver(Notification::reply_received(
                &feedback.user_id,
                "The super admin",
                "feedback",
                &reply,
                (LinkTarget::Feedback, &feedback.id),
                now,
            ));
        }
        true
    }

    /// Update handling status without replying. Super admin only.
    pub fn set_status(
        &self,
        state: &mut CouncilState,
        acting_user_id: &str,
        feedback_id: &str,
        status: FeedbackStatus,
    ) -> bool {
        let authorized = self
            .roster
            .find_user(acting_user_id)
            .is_some_and(|u| u.role == UserRole::SuperAdmin);
        if !authorized {
            return false;
        }

        let now = self.clock.now();
        match state.find_feedback_mut(feedback_id) {
            Some(feedback) => {
                feedback.set_status(status, now);
                true
            }
            None => false,
        }
    }
}
