pub mod dismissal;
pub mod pull;
pub mod touch;

pub use dismissal::{DismissalPolicy, DismissalStore, LocalStorageDismissalStore, MemoryDismissalStore};
pub use pull::PullTracker;
pub use touch::{TouchPoint, TouchState, touch_points};
