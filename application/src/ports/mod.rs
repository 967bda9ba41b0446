//! Ports: interfaces to external collaborators
//!
//! The engine's external collaborators are defined here as traits and
//! implemented in the infrastructure layer. All ports are synchronous: the
//! core's operations are non-suspending state transitions, and any real I/O
//! behind an adapter must be fire-and-forget relative to the core.

pub mod clock;
pub mod notification_sink;
pub mod roster;

pub use clock::{Clock, FixedClock};
pub use notification_sink::{NoNotificationSink, NotificationSink, RecordingSink};
pub use roster::{FixedRoster, RosterProvider};
