//! BallerTV Team Dashboard Library
//!
//! This library provides functionality for scraping a BallerTV team page's
//! embedded JSON state and displaying the team's game history in a terminal
//! dashboard, with on-demand video manifest loading per game.
//!
//! # Examples
//!
//! ```rust,no_run
//! use courtside::config::Config;
//! use courtside::data_fetcher::api::{ScrapeContext, fetch_team_info};
//! use courtside::error::AppError;
//! use courtside::ui::build_dashboard;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load().await?;
//!     let ctx = ScrapeContext::new(&config)?;
//!
//!     // Fetch the team page state and build the dashboard
//!     let team_info = fetch_team_info(&ctx).await?;
//!     let page = build_dashboard(&ctx, &team_info, false, false, true).await?;
//!
//!     // Render the page to stdout
//!     let mut stdout = std::io::stdout();
//!     page.render_buffered(&mut stdout)?;
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod constants;
pub mod dashboard_ui;
pub mod data_fetcher;
pub mod error;
pub mod ui;

// Re-export commonly used types for convenience
pub use config::Config;
pub use dashboard_ui::{DashboardPage, DashboardRow, VideoPanelState};
pub use data_fetcher::api::{ScrapeContext, fetch_team_info, fetch_video_info, resolve_event};
pub use data_fetcher::models::{GameOutcome, GameView, StreamRecord, TeamInfo, VideoInfo};
pub use error::AppError;

// Re-export cache monitoring functions for external tools
pub use data_fetcher::cache::{CacheInfo, CacheStats, clear_all_caches, get_all_cache_stats};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
