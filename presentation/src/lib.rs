//! Presentation layer for class-council
//!
//! CLI argument definitions and console formatting. This layer reads domain
//! types and renders them; all mutation goes through the application layer.

pub mod cli;
pub mod formatter;

pub use cli::{
    Cli, Command, FeedbackKindArg, FeedbackStatusArg, ParentKindArg, RoleArg, TaskStatusArg,
    VoteOptionArg,
};
pub use formatter::ConsoleFormatter;
