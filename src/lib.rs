//! Pull-to-refresh for Yew: a touch gesture tracker, the hook binding it to
//! a scroll container, and a wrapper component.

pub mod components;
pub mod hooks;
pub mod model;
pub mod refresh;
pub mod state;
pub mod util;

pub use components::PullToRefresh;
pub use hooks::{UsePullToRefreshHandle, use_pull_to_refresh};
pub use model::{PullConfig, PullPhase, PullSnapshot, Release};
pub use refresh::{RefreshCallback, RefreshError, RefreshResult};
pub use state::PullTracker;
