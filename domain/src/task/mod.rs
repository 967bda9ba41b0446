//! Task board entities
//!
//! Tasks are posted by administrators; students attach questions and
//! suggestions, both of which carry threaded replies. A suggestion can be
//! adopted into a [`Proposal`](crate::proposal::Proposal), which flips its
//! write-once `is_adopted` flag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// What a reply is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyParent {
    Question,
    Suggestion,
}

/// A threaded reply under a question or suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub id: String,
    pub parent_id: String,
    pub parent_kind: ReplyParent,
    pub user_id: String,
    /// Author name snapshotted at creation time, never re-resolved
    pub user_name: String,
    pub content: String,
    /// Name of the user being answered, for nested replies
    pub reply_to: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A student question attached to a task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub task_id: String,
    pub user_id: String,
    pub user_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub replies: Vec<Reply>,
}

/// A student suggestion attached to a task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: String,
    pub task_id: String,
    pub user_id: String,
    pub user_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub replies: Vec<Reply>,
    /// Write-once flag: set when the suggestion is adopted into a proposal,
    /// never reverts
    #[serde(default)]
    pub is_adopted: bool,
}

impl Suggestion {
    pub fn new(
        task_id: impl Into<String>,
        user_id: impl Into<String>,
        user_name: impl Into<String>,
        content: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: crate::core::new_id(),
            task_id: task_id.into(),
            user_id: user_id.into(),
            user_name: user_name.into(),
            content: content.into(),
            created_at: now,
            replies: Vec::new(),
            is_adopted: false,
        }
    }

    /// Flip the adoption flag. Write-once: calling this again has no effect.
    pub fn mark_adopted(&mut self) {
        self.is_adopted = true;
    }
}

impl Question {
    pub fn new(
        task_id: impl Into<String>,
        user_id: impl Into<String>,
        user_name: impl Into<String>,
        content: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: crate::core::new_id(),
            task_id: task_id.into(),
            user_id: user_id.into(),
            user_name: user_name.into(),
            content: content.into(),
            created_at: now,
            replies: Vec::new(),
        }
    }
}

/// A class task posted by an administrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub is_pinned: bool,
    pub is_archived: bool,
    pub created_by: String,
    pub creator_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
}

impl Task {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        created_by: impl Into<String>,
        creator_name: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: crate::core::new_id(),
            title: title.into(),
            description: description.into(),
            status: TaskStatus::Pending,
            is_pinned: false,
            is_archived: false,
            created_by: created_by.into(),
            creator_name: creator_name.into(),
            created_at: now,
            updated_at: now,
            questions: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn find_suggestion(&self, suggestion_id: &str) -> Option<&Suggestion> {
        self.suggestions.iter().find(|s| s.id == suggestion_id)
    }

    pub fn find_suggestion_mut(&mut self, suggestion_id: &str) -> Option<&mut Suggestion> {
        self.suggestions.iter_mut().find(|s| s.id == suggestion_id)
    }

    pub fn find_question_mut(&mut self, question_id: &str) -> Option<&mut Question> {
        self.questions.iter_mut().find(|q| q.id == question_id)
    }

    /// Case-insensitive substring match over title and description
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }
}

/// Board ordering: pinned tasks first, then newest first
pub fn sort_tasks(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| {
        b.is_pinned
            .cmp(&a.is_pinned)
            .then(b.created_at.cmp(&a.created_at))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn task_at(title: &str, pinned: bool, offset_secs: i64) -> Task {
        let mut task = Task::new(
            title,
            "desc",
            "u1",
            "Alice",
            Utc::now() + TimeDelta::seconds(offset_secs),
        );
        task.is_pinned = pinned;
        task
    }

    #[test]
    fn test_sort_pinned_first_then_newest() {
        let mut tasks = vec![
            task_at("old", false, 0),
            task_at("new", false, 100),
            task_at("pinned-old", true, -50),
        ];
        sort_tasks(&mut tasks);

        let titles: Vec<_> = tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["pinned-old", "new", "old"]);
    }

    #[test]
    fn test_query_matches_title_and_description() {
        let task = Task::new("Clean the lab", "wipe all benches", "u1", "Alice", Utc::now());
        assert!(task.matches_query("LAB"));
        assert!(task.matches_query("benches"));
        assert!(!task.matches_query("homework"));
    }

    #[test]
    fn test_adoption_flag_is_write_once() {
        let mut suggestion = Suggestion::new("t1", "u1", "Alice", "More plants", Utc::now());
        assert!(!suggestion.is_adopted);
        suggestion.mark_adopted();
        suggestion.mark_adopted();
        assert!(suggestion.is_adopted);
    }
}
