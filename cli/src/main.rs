//! CLI entrypoint for class-council
//!
//! This is the main binary that wires together all layers using
//! dependency injection: roster, notification center, and clock adapters
//! plug into the application's command structs, and state round-trips
//! through the JSON snapshot between invocations.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use council_application::{
    AddReplyInput, AdoptSuggestionInput, AdoptSuggestionUseCase, CastVoteInput, CastVoteOutcome,
    CastVoteUseCase, Clock, CouncilState, FeedbackUseCase, NotificationSink, RosterProvider,
    StartVotingInput, StartVotingUseCase, SweepProposalsUseCase, TaskBoardUseCase,
};
use council_domain::{User, UserRole, VotingPolicy};
use council_infrastructure::{
    ConfigLoader, ExpirySweeper, InMemoryRoster, JsonSnapshotStore, NotificationCenter, Snapshot,
    SystemClock,
};
use council_presentation::{Cli, Command, ConsoleFormatter};
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // Configuration, with the CLI flag overriding the file
    let mut config = ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow!(e))?;
    if let Some(data) = &cli.data {
        config.snapshot_path = data.clone();
    }

    // Restore persisted state
    let store = JsonSnapshotStore::new(&config.snapshot_path);
    let snapshot = store
        .load()
        .with_context(|| format!("loading snapshot from {}", store.path().display()))?;

    // === Dependency Injection ===
    let roster = Arc::new(InMemoryRoster::from_users(snapshot.users));
    let center = Arc::new(NotificationCenter::from_notifications(snapshot.notifications));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let state = Arc::new(Mutex::new(snapshot.state));

    let roster_port: Arc<dyn RosterProvider> = roster.clone();
    let sink_port: Arc<dyn NotificationSink> = center.clone();

    let app = App {
        roster,
        center,
        board: TaskBoardUseCase::new(roster_port.clone(), sink_port.clone(), clock.clone()),
        adopt: AdoptSuggestionUseCase::new(roster_port.clone(), sink_port.clone(), clock.clone()),
        start_voting: StartVotingUseCase::new(roster_port.clone(), sink_port.clone(), clock.clone()),
        cast_vote: CastVoteUseCase::new(roster_port.clone(), sink_port.clone(), clock.clone()),
        sweep: SweepProposalsUseCase::new(clock.clone()),
        feedback: FeedbackUseCase::new(roster_port, sink_port, clock.clone()),
        state: state.clone(),
        clock,
        sweep_interval: config.sweep_interval(),
    };

    app.run(&cli).await?;

    // Persist everything back
    let snapshot = Snapshot {
        users: app.roster.users(),
        state: lock_state(&state)?.clone(),
        notifications: app.center.snapshot(),
    };
    store
        .save(&snapshot)
        .with_context(|| format!("saving snapshot to {}", store.path().display()))?;

    Ok(())
}

fn lock_state(state: &Mutex<CouncilState>) -> Result<std::sync::MutexGuard<'_, CouncilState>> {
    state
        .lock()
        .map_err(|e| anyhow!("state lock poisoned: {e}"))
}

struct App {
    roster: Arc<InMemoryRoster>,
    center: Arc<NotificationCenter>,
    board: TaskBoardUseCase,
    adopt: AdoptSuggestionUseCase,
    start_voting: StartVotingUseCase,
    cast_vote: CastVoteUseCase,
    sweep: SweepProposalsUseCase,
    feedback: FeedbackUseCase,
    state: Arc<Mutex<CouncilState>>,
    clock: Arc<dyn Clock>,
    sweep_interval: std::time::Duration,
}

impl App {
    /// Resolve the acting user from `--as`, or explain what's missing.
    fn actor(&self, cli: &Cli) -> Result<User> {
        let student_id = cli
            .acting_as
            .as_deref()
            .ok_or_else(|| anyhow!("this command needs --as <student-id>"))?;
        self.roster
            .find_by_student_id(student_id)
            .ok_or_else(|| anyhow!("no user with student id {student_id}"))
    }

    async fn run(&self, cli: &Cli) -> Result<()> {
        match &cli.command {
            Command::Tasks { query, archived } => {
                let state = lock_state(&self.state)?;
                let tasks: Vec<&council_domain::Task> = if *archived {
                    state.archived_tasks.iter().collect()
                } else {
                    state.search_tasks(query.as_deref().unwrap_or(""))
                };
                print!("{}", ConsoleFormatter::format_tasks(&tasks));
            }

            Command::PostTask { title, description } => {
                let actor = self.actor(cli)?;
                let mut state = lock_state(&self.state)?;
                match self.board.post_task(&mut state, &actor.id, title.as_str(), description.as_str()) {
                    Some(task) => println!("Task posted: {}", task.id),
                    None => println!("Nothing posted - only admins can post tasks."),
                }
            }

            Command::TaskStatus { task_id, status } => {
                let mut state = lock_state(&self.state)?;
                if self.board.update_status(&mut state, task_id, (*status).into()) {
                    println!("Status updated.");
                } else {
                    println!("No such task.");
                }
            }

            Command::Pin { task_id } => {
                let mut state = lock_state(&self.state)?;
                if self.board.toggle_pin(&mut state, task_id) {
                    println!("Pin toggled.");
                } else {
                    println!("No such task.");
                }
            }

            Command::Archive { task_id } => {
                let mut state = lock_state(&self.state)?;
                if self.board.archive_task(&mut state, task_id) {
                    println!("Task archived.");
                } else {
                    println!("No such task.");
                }
            }

            Command::Restore { task_id } => {
                let mut state = lock_state(&self.state)?;
                if self.board.restore_task(&mut state, task_id) {
                    println!("Task restored.");
                } else {
                    println!("No such archived task.");
                }
            }

            Command::DeleteTask { task_id } => {
                let mut state = lock_state(&self.state)?;
                if self.board.delete_task(&mut state, task_id) {
                    println!("Task deleted.");
                } else {
                    println!("No such task.");
                }
            }

            Command::Ask { task_id, content } => {
                let actor = self.actor(cli)?;
                let mut state = lock_state(&self.state)?;
                match self.board.add_question(&mut state, task_id, &actor.id, content.as_str()) {
                    Some(question) => println!("Question posted: {}", question.id),
                    None => println!("Nothing posted - check the task id."),
                }
            }

            Command::Suggest { task_id, content } => {
                let actor = self.actor(cli)?;
                let mut state = lock_state(&self.state)?;
                match self.board.add_suggestion(&mut state, task_id, &actor.id, content.as_str()) {
                    Some(suggestion) => println!("Suggestion posted: {}", suggestion.id),
                    None => println!("Nothing posted - check the task id."),
                }
            }

            Command::Reply {
                task_id,
                parent,
                parent_id,
                content,
                reply_to,
            } => {
                let actor = self.actor(cli)?;
                let mut state = lock_state(&self.state)?;
                let input = AddReplyInput {
                    task_id: task_id.clone(),
                    parent_kind: (*parent).into(),
                    parent_id: parent_id.clone(),
                    acting_user_id: actor.id,
                    content: content.clone(),
                    reply_to: reply_to.clone(),
                };
                match self.board.add_reply(&mut state, input) {
                    Some(reply) => println!("Reply posted: {}", reply.id),
                    None => println!("Nothing posted - check the task and parent ids."),
                }
            }

            Command::Adopt {
                task_id,
                suggestion_id,
            } => {
                let actor = self.actor(cli)?;
                let mut state = lock_state(&self.state)?;
                let input = AdoptSuggestionInput {
                    task_id: task_id.clone(),
                    suggestion_id: suggestion_id.clone(),
                    acting_user_id: actor.id,
                };
                match self.adopt.execute(&mut state, input) {
                    Some(proposal) => println!("Proposal created: {}", proposal.id),
                    None => println!("Nothing adopted - already adopted, or ids are wrong."),
                }
            }

            Command::Proposals => {
                let state = lock_state(&self.state)?;
                print!(
                    "{}",
                    ConsoleFormatter::format_proposals(
                        &state.proposals,
                        self.roster.admin_count(),
                        &VotingPolicy::default(),
                    )
                );
            }

            Command::StartVoting { proposal_id } => {
                let actor = self.actor(cli)?;
                let mut state = lock_state(&self.state)?;
                let input = StartVotingInput {
                    proposal_id: proposal_id.clone(),
                    acting_user_id: actor.id,
                };
                if self.start_voting.execute(&mut state, input) {
                    println!("Voting started.");
                } else {
                    println!("Voting not started - super admin only, on pending proposals.");
                }
            }

            Command::Vote {
                proposal_id,
                option,
            } => {
                let actor = self.actor(cli)?;
                let mut state = lock_state(&self.state)?;
                let input = CastVoteInput {
                    proposal_id: proposal_id.clone(),
                    user_id: actor.id,
                    user_name: actor.name,
                    option: (*option).into(),
                };
                match self.cast_vote.execute(&mut state, input) {
                    CastVoteOutcome::Accepted => println!("Vote recorded."),
                    CastVoteOutcome::Decided(status) => {
                        println!("Vote recorded - proposal {}.", status.as_str());
                    }
                    CastVoteOutcome::Ignored => {
                        println!("Vote ignored - not in voting, or you already voted.");
                    }
                }
            }

            Command::DeleteProposal { proposal_id } => {
                let actor = self.actor(cli)?;
                let mut state = lock_state(&self.state)?;
                if actor.role == UserRole::SuperAdmin
                    && state.remove_proposal(proposal_id).is_some()
                {
                    println!("Proposal deleted.");
                } else {
                    println!("Nothing deleted - super admin only, and the proposal must exist.");
                }
            }

            Command::Sweep => {
                let mut state = lock_state(&self.state)?;
                let removed = self.sweep.execute(&mut state);
                println!("Removed {removed} expired proposal(s).");
            }

            Command::Watch => {
                info!(
                    "watching with a sweep every {}s, ctrl-c to stop",
                    self.sweep_interval.as_secs()
                );
                let sweeper = ExpirySweeper::new(
                    self.state.clone(),
                    self.clock.clone(),
                    self.sweep_interval,
                );
                let token = CancellationToken::new();
                let handle = sweeper.spawn(token.clone());

                tokio::signal::ctrl_c()
                    .await
                    .context("waiting for ctrl-c")?;
                token.cancel();
                handle.await.context("stopping the sweeper")?;
            }

            Command::Notifications {
                mark_read,
                mark_all_read,
                delete,
            } => {
                let actor = self.actor(cli)?;
                if let Some(id) = mark_read {
                    self.center.mark_read(id);
                }
                if *mark_all_read {
                    self.center.mark_all_read(&actor.id);
                }
                if let Some(id) = delete {
                    self.center.delete(id);
                }
                print!(
                    "{}",
                    ConsoleFormatter::format_notifications(&self.center.for_user(&actor.id))
                );
            }

            Command::Feedback {
                content,
                kind,
                anonymous,
            } => {
                let actor = self.actor(cli)?;
                let mut state = lock_state(&self.state)?;
                match self.feedback.submit(
                    &mut state,
                    &actor.id,
                    (*kind).into(),
                    content.as_str(),
                    *anonymous,
                ) {
                    Some(feedback) => println!("Feedback sent: {}", feedback.id),
                    None => println!("Nothing sent."),
                }
            }

            Command::Feedbacks => {
                let actor = self.actor(cli)?;
                let state = lock_state(&self.state)?;
                let feedbacks: Vec<council_domain::Feedback> =
                    if actor.role == UserRole::SuperAdmin {
                        state.feedbacks.clone()
                    } else {
                        state
                            .feedbacks
                            .iter()
                            .filter(|f| f.user_id == actor.id)
                            .cloned()
                            .collect()
                    };
                print!("{}", ConsoleFormatter::format_feedbacks(&feedbacks));
            }

            Command::FeedbackReply { feedback_id, reply } => {
                let actor = self.actor(cli)?;
                let mut state = lock_state(&self.state)?;
                if self.feedback.reply(&mut state, &actor.id, feedback_id, reply.as_str()) {
                    println!("Reply sent, feedback resolved.");
                } else {
                    println!("Nothing sent - super admin only, and the feedback must exist.");
                }
            }

            Command::FeedbackStatus {
                feedback_id,
                status,
            } => {
                let actor = self.actor(cli)?;
                let mut state = lock_state(&self.state)?;
                if self
                    .feedback
                    .set_status(&mut state, &actor.id, feedback_id, (*status).into())
                {
                    println!("Feedback status updated.");
                } else {
                    println!("Nothing updated - super admin only, and the feedback must exist.");
                }
            }

            Command::Register { student_id, name } => {
                let user = self.roster.register(student_id.as_str(), name.as_str(), self.clock.now())?;
                println!("Registered {} ({})", user.name, user.student_id);
            }

            Command::SetRole { student_id, role } => {
                let actor = self.actor(cli)?;
                let user = self.roster.set_role(&actor.id, student_id, (*role).into())?;
                println!("{} is now {}", user.name, user.role.as_str());
            }

            Command::DeleteUser { student_id } => {
                let actor = self.actor(cli)?;
                self.roster.delete(&actor.id, student_id)?;
                println!("User removed.");
            }

            Command::Users => {
                print!("{}", ConsoleFormatter::format_users(&self.roster.users()));
            }
        }

        Ok(())
    }
}
