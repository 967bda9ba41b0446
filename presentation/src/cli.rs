//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use council_domain::{FeedbackKind, FeedbackStatus, ReplyParent, TaskStatus, UserRole, VoteOption};
use std::path::PathBuf;

/// CLI arguments for class-council
#[derive(Parser, Debug)]
#[command(name = "class-council")]
#[command(version, about = "Class council - tasks, suggestions, and quorum-voted proposals")]
#[command(long_about = r#"
Class council is a class-management collaboration tool: administrators post
tasks, students ask questions and leave suggestions, suggestions get adopted
into formal proposals, and the admin roster decides proposals by vote.

A proposal passes once 60% of the admin roster has voted and at least 2/3 of
the cast votes approve. Approved proposals stay on display for 7 days,
rejected ones for 3, then the expiry sweeper removes them.

State round-trips through a JSON snapshot file between invocations.
Identity is asserted with --as <student-id>; the seeded super admin is "admin".

Example:
  class-council --as admin post-task "Spring outing" "Ideas welcome"
  class-council --as 2023-017 suggest <task-id> "Botanical garden"
  class-council --as admin adopt <task-id> <suggestion-id>
  class-council --as admin start-voting <proposal-id>
  class-council --as 2023-001 vote <proposal-id> approve
"#)]
pub struct Cli {
    /// Act as this student id (the seeded super admin is "admin")
    #[arg(long = "as", value_name = "STUDENT_ID", global = true)]
    pub acting_as: Option<String>,

    /// Path to the state snapshot file (overrides config)
    #[arg(long, value_name = "PATH", global = true)]
    pub data: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List tasks on the board
    Tasks {
        /// Filter by a search query over title and description
        query: Option<String>,
        /// Show archived tasks instead
        #[arg(long)]
        archived: bool,
    },

    /// Post a new task (admins)
    PostTask { title: String, description: String },

    /// Update a task's status
    TaskStatus {
        task_id: String,
        #[arg(value_enum)]
        status: TaskStatusArg,
    },

    /// Pin or unpin a task
    Pin { task_id: String },

    /// Archive a task (marks it completed)
    Archive { task_id: String },

    /// Restore an archived task to the board
    Restore { task_id: String },

    /// Delete a task permanently
    DeleteTask { task_id: String },

    /// Ask a question on a task
    Ask { task_id: String, content: String },

    /// Leave a suggestion on a task
    Suggest { task_id: String, content: String },

    /// Reply under a question or suggestion
    Reply {
        task_id: String,
        #[arg(value_enum)]
        parent: ParentKindArg,
        parent_id: String,
        content: String,
        /// Name of the user you are answering (nested reply)
        #[arg(long, value_name = "NAME")]
        reply_to: Option<String>,
    },

    /// Adopt a suggestion into a formal proposal (admins)
    Adopt {
        task_id: String,
        suggestion_id: String,
    },

    /// List proposals with voting progress
    Proposals,

    /// Open the vote on a pending proposal (super admin)
    StartVoting { proposal_id: String },

    /// Cast a vote on a proposal
    Vote {
        proposal_id: String,
        #[arg(value_enum)]
        option: VoteOptionArg,
    },

    /// Delete a proposal outright (super admin)
    DeleteProposal { proposal_id: String },

    /// Delete expired proposals now
    Sweep,

    /// Keep the expiry sweeper running until interrupted
    Watch,

    /// Show my notifications
    Notifications {
        /// Mark one notification read
        #[arg(long, value_name = "ID")]
        mark_read: Option<String>,
        /// Mark all my notifications read
        #[arg(long)]
        mark_all_read: bool,
        /// Delete one notification
        #[arg(long, value_name = "ID")]
        delete: Option<String>,
    },

    /// Send feedback to the super admin
    Feedback {
        content: String,
        #[arg(long, value_enum, default_value = "suggestion")]
        kind: FeedbackKindArg,
        /// Withhold your name
        #[arg(long)]
        anonymous: bool,
    },

    /// List feedback submissions
    Feedbacks,

    /// Reply to a feedback and mark it resolved (super admin)
    FeedbackReply { feedback_id: String, reply: String },

    /// Update a feedback's handling status without replying (super admin)
    FeedbackStatus {
        feedback_id: String,
        #[arg(value_enum)]
        status: FeedbackStatusArg,
    },

    /// Register a student
    Register { student_id: String, name: String },

    /// Change a user's role (super admin)
    SetRole {
        student_id: String,
        #[arg(value_enum)]
        role: RoleArg,
    },

    /// Remove a user from the roster (super admin)
    DeleteUser { student_id: String },

    /// List the roster
    Users,
}

/// Task status argument
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TaskStatusArg {
    Pending,
    InProgress,
    Completed,
}

impl From<TaskStatusArg> for TaskStatus {
    fn from(value: TaskStatusArg) -> Self {
        match value {
            TaskStatusArg::Pending => TaskStatus::Pending,
            TaskStatusArg::InProgress => TaskStatus::InProgress,
            TaskStatusArg::Completed => TaskStatus::Completed,
        }
    }
}

/// Reply parent argument
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ParentKindArg {
    Question,
    Suggestion,
}

impl From<ParentKindArg> for ReplyParent {
    fn from(value: ParentKindArg) -> Self {
        match value {
            ParentKindArg::Question => ReplyParent::Question,
            ParentKindArg::Suggestion => ReplyParent::Suggestion,
        }
    }
}

/// Vote option argument
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum VoteOptionArg {
    Approve,
    Reject,
    Abstain,
}

impl From<VoteOptionArg> for VoteOption {
    fn from(value: VoteOptionArg) -> Self {
        match value {
            VoteOptionArg::Approve => VoteOption::Approve,
            VoteOptionArg::Reject => VoteOption::Reject,
            VoteOptionArg::Abstain => VoteOption::Abstain,
        }
    }
}

/// Feedback kind argument
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FeedbackKindArg {
    Suggestion,
    Complaint,
    Question,
    Other,
}

impl From<FeedbackKindArg> for FeedbackKind {
    fn from(value: FeedbackKindArg) -> Self {
        match value {
            FeedbackKindArg::Suggestion => FeedbackKind::Suggestion,
            FeedbackKindArg::Complaint => FeedbackKind::Complaint,
            FeedbackKindArg::Question => FeedbackKind::Question,
            FeedbackKindArg::Other => FeedbackKind::Other,
        }
    }
}

/// Feedback status argument
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FeedbackStatusArg {
    Pending,
    Read,
    Resolved,
}

impl From<FeedbackStatusArg> for FeedbackStatus {
    fn from(value: FeedbackStatusArg) -> Self {
        match value {
            FeedbackStatusArg::Pending => FeedbackStatus::Pending,
            FeedbackStatusArg::Read => FeedbackStatus::Read,
            FeedbackStatusArg::Resolved => FeedbackStatus::Resolved,
        }
    }
}

/// Role argument
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RoleArg {
    Admin,
    User,
}

impl From<RoleArg> for UserRole {
    fn from(value: RoleArg) -> Self {
        match value {
            RoleArg::Admin => UserRole::Admin,
            RoleArg::User => UserRole::User,
        }
    }
}
