pub mod app;
pub mod install_banner;
pub mod pull_indicator;
pub mod pull_to_refresh;

pub use app::App;
pub use install_banner::InstallBanner;
pub use pull_indicator::PullIndicator;
pub use pull_to_refresh::PullToRefresh;
