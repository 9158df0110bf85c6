//! Incremental bank sorting: target mapping builder and the paced permutation scheduler.

pub mod bank;
pub use bank::{ContainerAdapter, MemoryBank};
pub mod error;
pub use error::{BankError, SortError};
pub mod events;
pub use events::{Bus, SortEvent, SortEventKind, Subscribe};
pub mod gate;
pub use gate::FeatureGate;
pub mod mapping;
pub use mapping::{Placement, TargetMapping};
pub mod pacing;
pub use pacing::PacingConfig;
pub mod scheduler;
pub use scheduler::{SchedulerConfig, SortScheduler};
