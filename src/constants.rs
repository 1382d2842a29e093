//! Application-wide constants and configuration values
//!
//! This module centralizes magic numbers and the site-coupled selector
//! strings so they can be changed in one place if the source markup moves.

#![allow(dead_code)]

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Maximum number of connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 100;

/// Minimum seconds between manual refreshes in the interactive UI
pub const REFRESH_COOLDOWN_SECONDS: u64 = 10;

/// Cache TTL (Time To Live) values in seconds
pub mod cache_ttl {
    /// TTL for fetched page bodies, keyed by exact URL (5 minutes)
    pub const PAGE_SECONDS: u64 = 300;

    /// TTL for resolved event details, keyed by event name (5 minutes).
    /// Memoizes the lookup and JSON extraction on top of the page cache.
    pub const EVENT_SECONDS: u64 = 300;
}

/// Markers identifying the embedded-state elements on each page kind.
/// These attribute values are the only site-coupled strings in the crate.
pub mod markers {
    /// Attribute holding the serialized page state
    pub const PROPS_ATTR: &str = "data-react-props";

    /// Attribute naming the component the state belongs to
    pub const CLASS_ATTR: &str = "data-react-class";

    /// Component name on a team profile page
    pub const TEAM_PAGE: &str = "profiles/teams/Show";

    /// Component name on an event detail page
    pub const EVENT_PAGE: &str = "profiles/events/ShowContainer";

    /// Component name on a single game (stream) page
    pub const GAME_PAGE: &str = "streams/ShowTypescript";
}

/// UI polling intervals in milliseconds
pub mod polling {
    /// Polling interval for the interactive event loop
    pub const ACTIVE_MS: u64 = 50;
}

/// UI layout constants
pub mod ui {
    /// Content margin from terminal border
    pub const CONTENT_MARGIN: usize = 2;

    /// Lines reserved above the row area (title bar and separator)
    pub const HEADER_LINES: usize = 2;

    /// Lines reserved below the row area for the footer and its spacer
    pub const FOOTER_LINES: usize = 2;

    /// Fallback height when the terminal size cannot be queried
    pub const DEFAULT_SCREEN_HEIGHT: u16 = 24;
}

/// Environment variable names
pub mod env_vars {
    /// Environment variable for team page URL override
    pub const TEAM_URL: &str = "COURTSIDE_TEAM_URL";

    /// Environment variable for log file path override
    pub const LOG_FILE: &str = "COURTSIDE_LOG_FILE";

    /// Environment variable for HTTP timeout in seconds (default: 30)
    pub const HTTP_TIMEOUT: &str = "COURTSIDE_HTTP_TIMEOUT";
}
