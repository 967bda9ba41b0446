//! Infrastructure layer for class-council
//!
//! Adapters behind the application's ports: the in-memory roster, the
//! notification center, the system clock, the periodic expiry sweeper, JSON
//! snapshot persistence, and configuration loading.

pub mod clock;
pub mod config;
pub mod notification_center;
pub mod roster;
pub mod snapshot;
pub mod sweeper;

// Re-export commonly used types
pub use clock::SystemClock;
pub use config::{ConfigLoader, FileConfig};
pub use notification_center::NotificationCenter;
pub use roster::{InMemoryRoster, SUPER_ADMIN_ID, SUPER_ADMIN_STUDENT_ID};
pub use snapshot::{JsonSnapshotStore, Snapshot, SnapshotError};
pub use sweeper::ExpirySweeper;
