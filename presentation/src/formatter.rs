//! Console output formatting
//!
//! Pure formatting over domain types; nothing here mutates state.

use colored::Colorize;
use council_domain::{
    Feedback, Notification, Proposal, ProposalStatus, Task, User, VoteTally, VotingPolicy,
};

/// Formats board and engine state for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the task board.
    pub fn format_tasks(tasks: &[&Task]) -> String {
        if tasks.is_empty() {
            return format!("{}\n", "No tasks.".dimmed());
        }

        let mut output = String::new();
        for task in tasks {
            let pin = if task.is_pinned { "* " } else { "" };
            output.push_str(&format!(
                "{}{} {} {}\n",
                pin,
                Self::task_badge(task),
                task.title.bold(),
                format!("({})", task.id).dimmed()
            ));
            output.push_str(&format!("  {}\n", task.description));
            output.push_str(&format!(
                "  {}\n",
                format!(
                    "by {} on {} - {} question(s), {} suggestion(s)",
                    task.creator_name,
                    task.created_at.format("%Y-%m-%d"),
                    task.questions.len(),
                    task.suggestions.len()
                )
                .dimmed()
            ));

            for question in &task.questions {
                output.push_str(&format!(
                    "  Q {} {}: {}\n",
                    format!("({})", question.id).dimmed(),
                    question.user_name,
                    question.content
                ));
                for reply in &question.replies {
                    output.push_str(&format!("    > {}: {}\n", reply.user_name, reply.content));
                }
            }
            for suggestion in &task.suggestions {
                let adopted = if suggestion.is_adopted {
                    " [adopted]".green().to_string()
                } else {
                    String::new()
                };
                output.push_str(&format!(
                    "  S {} {}: {}{}\n",
                    format!("({})", suggestion.id).dimmed(),
                    suggestion.user_name,
                    suggestion.content,
                    adopted
                ));
                for reply in &suggestion.replies {
                    output.push_str(&format!("    > {}: {}\n", reply.user_name, reply.content));
                }
            }
            output.push('\n');
        }
        output
    }

    /// Format the proposal list with voting progress.
    pub fn format_proposals(
        proposals: &[Proposal],
        quorum_size: usize,
        policy: &VotingPolicy,
    ) -> String {
        if proposals.is_empty() {
            return format!("{}\n", "No proposals.".dimmed());
        }

        let mut output = String::new();
        for proposal in proposals {
            output.push_str(&format!(
                "{} {} {}\n",
                Self::proposal_badge(proposal.status),
                proposal.content.bold(),
                format!("({})", proposal.id).dimmed()
            ));
            output.push_str(&format!(
                "  {}\n",
                format!(
                    "submitted by {} on {}",
                    proposal.submitter_name,
                    proposal.created_at.format("%Y-%m-%d")
                )
                .dimmed()
            ));

            match proposal.status {
                ProposalStatus::Voting => {
                    let tally = VoteTally::count(&proposal.votes, quorum_size);
                    output.push_str(&format!(
                        "  {} {}/{} voted ({:.0}%) - {} approve / {} reject / {} abstain\n",
                        "Progress:".cyan().bold(),
                        tally.total_votes,
                        tally.quorum_size,
                        tally.turnout_rate() * 100.0,
                        tally.approve_votes,
                        tally.reject_votes,
                        tally.abstain_votes
                    ));
                    if policy.quorum_met(tally.total_votes, tally.quorum_size) {
                        output.push_str(&format!(
                            "  Approval: {:.0}% (needs >= {:.1}%)\n",
                            tally.approval_rate() * 100.0,
                            policy.approval_numerator as f64 / policy.approval_denominator as f64
                                * 100.0
                        ));
                    }
                }
                ProposalStatus::Approved => {
                    if let Some(deadline) = proposal.auto_delete_at {
                        output.push_str(&format!(
                            "  {}\n",
                            format!("on display until {}", deadline.format("%Y-%m-%d"))
                                .green()
                        ));
                    }
                }
                ProposalStatus::Rejected => {
                    if let Some(deadline) = proposal.auto_delete_at {
                        output.push_str(&format!(
                            "  {}\n",
                            format!("auto-deletes on {}", deadline.format("%Y-%m-%d")).dimmed()
                        ));
                    }
                }
                ProposalStatus::Pending => {}
            }
            output.push('\n');
        }
        output
    }

    /// Format one recipient's notifications, newest first.
    pub fn format_notifications(notifications: &[Notification]) -> String {
        if notifications.is_empty() {
            return format!("{}\n", "No notifications.".dimmed());
        }

        let unread = notifications.iter().filter(|n| !n.is_read).count();
        let mut output = format!(
            "{}\n",
            format!("{} notification(s), {} unread", notifications.len(), unread)
                .cyan()
                .bold()
        );

        for notification in notifications {
            let marker = if notification.is_read { " " } else { "*" };
            output.push_str(&format!(
                "{} {} {} {}\n    {}\n",
                marker,
                notification.title.bold(),
                notification.created_at.format("%Y-%m-%d %H:%M").to_string().dimmed(),
                format!("({})", notification.id).dimmed(),
                notification.content
            ));
        }
        output
    }

    /// Format the roster.
    pub fn format_users(users: &[User]) -> String {
        let mut output = String::new();
        for user in users {
            output.push_str(&format!(
                "{:<12} {} {}\n",
                user.student_id,
                user.name.bold(),
                format!("[{}]", user.role.display_name()).dimmed()
            ));
        }
        output
    }

    /// Format feedback submissions.
    pub fn format_feedbacks(feedbacks: &[Feedback]) -> String {
        if feedbacks.is_empty() {
            return format!("{}\n", "No feedback.".dimmed());
        }

        let mut output = String::new();
        for feedback in feedbacks {
            output.push_str(&format!(
                "[{}] {} {} {}\n  {}\n",
                feedback.status.as_str(),
                feedback.display_name().bold(),
                format!("({})", feedback.kind.as_str()).dimmed(),
                format!("({})", feedback.id).dimmed(),
                feedback.content
            ));
            if let Some(reply) = &feedback.reply {
                output.push_str(&format!("  {} {}\n", "Reply:".green().bold(), reply));
            }
        }
        output
    }

    fn task_badge(task: &Task) -> String {
        let label = format!("[{}]", task.status.display_name());
        match task.status {
            council_domain::TaskStatus::Pending => label.yellow().to_string(),
            council_domain::TaskStatus::InProgress => label.blue().to_string(),
            council_domain::TaskStatus::Completed => label.green().to_string(),
        }
    }

    fn proposal_badge(status: ProposalStatus) -> String {
        let label = format!("[{}]", status.display_name());
        match status {
            ProposalStatus::Pending => label.yellow().to_string(),
            ProposalStatus::Voting => label.blue().to_string(),
            ProposalStatus::Approved => label.green().to_string(),
            ProposalStatus::Rejected => label.red().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use council_domain::{Suggestion, Vote, VoteOption};

    #[test]
    fn test_voting_progress_hides_approval_below_quorum() {
        let suggestion = Suggestion::new("t-1", "u-9", "Ling", "Garden trip", Utc::now());
        let mut proposal = Proposal::from_suggestion(&suggestion, Utc::now());
        proposal.begin_voting(Utc::now());
        proposal.record_vote(Vote::new(&proposal.id, "a", "A", VoteOption::Approve, Utc::now()));

        let output =
            ConsoleFormatter::format_proposals(&[proposal], 5, &VotingPolicy::default());

        assert!(output.contains("1/5 voted (20%)"));
        assert!(!output.contains("Approval:"));
    }

    #[test]
    fn test_voting_progress_shows_approval_at_quorum() {
        let suggestion = Suggestion::new("t-1", "u-9", "Ling", "Garden trip", Utc::now());
        let mut proposal = Proposal::from_suggestion(&suggestion, Utc::now());
        proposal.begin_voting(Utc::now());
        for voter in ["a", "b", "c"] {
            proposal.record_vote(Vote::new(
                &proposal.id,
                voter,
                voter,
                VoteOption::Approve,
                Utc::now(),
            ));
        }

        let output =
            ConsoleFormatter::format_proposals(&[proposal], 5, &VotingPolicy::default());

        assert!(output.contains("3/5 voted (60%)"));
        assert!(output.contains("Approval: 100%"));
    }

    #[test]
    fn test_empty_lists() {
        assert!(ConsoleFormatter::format_tasks(&[]).contains("No tasks."));
        assert!(ConsoleFormatter::format_notifications(&[]).contains("No notifications."));
    }
}
