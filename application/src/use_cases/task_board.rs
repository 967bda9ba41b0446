//! Task Board use case
//!
//! CRUD commands around tasks and their questions/suggestions/replies.
//! These feed the voting engine (suggestions are its raw material) and the
//! notification sink (replies notify the parent author). Board mutations
//! follow the same best-effort model as the engine: unmet preconditions are
//! silent no-ops.

use crate::ports::clock::Clock;
use crate::ports::notification_sink::NotificationSink;
use crate::ports::roster::RosterProvider;
use crate::state::CouncilState;
use council_domain::{
    LinkTarget, Notification, Question, Reply, ReplyParent, Suggestion, Task, TaskStatus,
    new_id,
};
use std::sync::Arc;
use tracing::debug;

/// Input for adding a reply under a question or suggestion
#[derive(Debug, Clone)]
pub struct AddReplyInput {
    pub task_id: String,
    pub parent_kind: ReplyParent,
    pub parent_id: String,
    pub acting_user_id: String,
    pub content: String,
    /// Name of the user being answered, for nested replies
    pub reply_to: Option<String>,
}

/// Use case collection for the task board
pub struct TaskBoardUseCase {
    roster: Arc<dyn RosterProvider>,
    notifications: Arc<dyn NotificationSink>,
    clock: Arc<dyn Clock>,
}

impl TaskBoardUseCase {
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

    /// Post a new task. Admins only.
    pub fn post_task(
        &self,
        state: &mut CouncilState,
        acting_user_id: &str,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Option<Task> {
        let author = self.roster.find_user(acting_user_id)?;
        if !author.is_admin() {
            debug!("post task ignored: {} is not an admin", acting_user_id);
            return None;
        }

        let task = Task::new(title, description, &author.id, &author.name, self.clock.now());
        state.tasks.push(task.clone());
        state.resort_tasks();
        Some(task)
    }

    pub fn update_status(&self, state: &mut CouncilState, task_id: &str, status: TaskStatus) -> bool {
        match state.find_task_mut(task_id) {
            Some(task) => {
                task.status = status;
                true
            }
            None => false,
        }
    }

    pub fn toggle_pin(&self, state: &mut CouncilState, task_id: &str) -> bool {
        let Some(task) = state.find_task_mut(task_id) else {
            return false;
        };
        task.is_pinned = !task.is_pinned;
        state.resort_tasks();
        true
    }

    /// Move a task off the board; archiving marks it completed.
    pub fn archive_task(&self, state: &mut CouncilState, task_id: &str) -> bool {
        let Some(index) = state.tasks.iter().position(|t| t.id == task_id) else {
            return false;
        };
        let mut task = state.tasks.remove(index);
        task.is_archived = true;
        task.status = TaskStatus::Completed;
        state.archived_tasks.insert(0, task);
        true
    }

    /// Bring an archived task back as pending.
    pub fn restore_task(&self, state: &mut CouncilState, task_id: &str) -> bool {
        let Some(index) = state.archived_tasks.iter().position(|t| t.id == task_id) else {
            return false;
        };
        let mut task = state.archived_tasks.remove(index);
        task.is_archived = false;
        task.status = TaskStatus::Pending;
        state.tasks.push(task);
        state.resort_tasks();
        true
    }

    /// Delete from either list.
    pub fn delete_task(&self, state: &mut CouncilState, task_id: &str) -> bool {
        let before = state.tasks.len() + state.archived_tasks.len();
        state.tasks.retain(|t| t.id != task_id);
        state.archived_tasks.retain(|t| t.id != task_id);
        before != state.tasks.len() + state.archived_tasks.len()
    }

    pub fn add_question(
        &self,
        state: &mut CouncilState,
        task_id: &str,
        acting_user_id: &str,
        content: impl Into<String>,
    ) -> Option<Question> {
        let author = self.roster.find_user(acting_user_id)?;
        let now = self.clock.now();
        let task = state.find_task_mut(task_id)?;

        let question = Question::new(&task.id, &author.id, &author.name, content, now);
        task.questions.push(question.clone());
        Some(question)
    }

    pub fn add_suggestion(
        &self,
        state: &mut CouncilState,
        task_id: &str,
        acting_user_id: &str,
        content: impl Into<String>,
    ) -> Option<Suggestion> {
        let author = self.roster.find_user(acting_user_id)?;
        let now = self.clock.now();
        let task = state.find_task_mut(task_id)?;

        let suggestion = Suggestion::new(&task.id, &author.id, &author.name, content, now);
        task.suggestions.push(suggestion.clone());
        Some(suggestion)
    }

    /// Reply under a question or suggestion. The parent's author gets a
    /// reply notification, unless they are replying to themselves.
    pub fn add_reply(&self, state: &mut CouncilState, input: AddReplyInput) -> Option<Reply> {
        let author = self.roster.find_user(&input.acting_user_id)?;
        let now = self.clock.now();
        let task = state.find_task_mut(&input.task_id)?;

        let reply = Reply {
            id: new_id(),
            parent_id: input.parent_id.clone(),
            parent_kind: input.parent_kind,
            user_id: author.id.clone(),
            user_name: author.name.clone(),
            content: input.content,
            reply_to: input.reply_to,
            created_at: now,
        };

        let (parent_author, parent_label) = match input.parent_kind {
            ReplyParent::Question => {
                let question = task.find_question_mut(&input.parent_id)?;
                question.replies.push(reply.clone());
                (question.user_id.clone(), "question")
            }
            ReplyParent::Suggestion => {
                let suggestion = task.find_suggestion_mut(&input.parent_id)?;
                suggestion.replies.push(reply.clone());
                (suggestion.user_id.clone(), "suggestion")
            }
        };

        if parent_author != author.id {
            self.notifications.deliver(Notification::reply_received(
                parent_author,
                &author.name,
                parent_label,
                &reply.content,
                (LinkTarget::Task, &input.task_id),
                now,
            ));
        }

        Some(reply)
    }
}
