pub mod use_pull_to_refresh;

pub use use_pull_to_refresh::{SCROLLABLE_ATTR, UsePullToRefreshHandle, use_pull_to_refresh};
