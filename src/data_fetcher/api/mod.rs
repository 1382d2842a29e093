//! Scraping operations against the source site: team page, event pages, and
//! game pages. Each operation fetches a page, extracts its embedded JSON
//! state, and deserializes the part the dashboard needs.

pub mod fetch_utils;
pub mod http_client;
pub mod urls;

use once_cell::sync::Lazy;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::config::Config;
use crate::constants::{cache_ttl, markers};
use crate::data_fetcher::cache::{cache_event_detail, get_cached_event_detail};
use crate::data_fetcher::extract::{AttributeMatcher, extract_all, extract_one};
use crate::data_fetcher::models::{Event, EventDetail, EventPage, TeamInfo, VideoInfo};
use crate::error::AppError;

pub use fetch_utils::{fetch_page, fetch_page_uncached, fetch_page_with_ttl};
pub use http_client::create_http_client_with_timeout;

static TEAM_PAGE_MATCHER: Lazy<AttributeMatcher> = Lazy::new(|| {
    AttributeMatcher::new()
        .has_attribute(markers::PROPS_ATTR)
        .attribute_equals(markers::CLASS_ATTR, markers::TEAM_PAGE)
});

static EVENT_PAGE_MATCHER: Lazy<AttributeMatcher> = Lazy::new(|| {
    AttributeMatcher::new().attribute_equals(markers::CLASS_ATTR, markers::EVENT_PAGE)
});

static GAME_PAGE_MATCHER: Lazy<AttributeMatcher> = Lazy::new(|| {
    AttributeMatcher::new().attribute_equals(markers::CLASS_ATTR, markers::GAME_PAGE)
});

/// Everything a render pass needs to reach the source site. Built once from
/// configuration and passed explicitly to the operations below - there is no
/// module-level team state.
#[derive(Debug, Clone)]
pub struct ScrapeContext {
    pub client: Client,
    pub team_page_url: String,
    pub base_url: String,
    /// Optional cache window for game-page video lookups. `None` means every
    /// video activation re-fetches, so a live stream's evolving manifest URL
    /// is always current.
    pub video_cache_seconds: Option<u64>,
}

impl ScrapeContext {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = create_http_client_with_timeout(config.http_timeout_seconds)?;
        let base_url = urls::origin_of(&config.team_page_url)?;

        Ok(Self {
            client,
            team_page_url: config.team_page_url.clone(),
            base_url,
            video_cache_seconds: config.video_cache_seconds,
        })
    }
}

/// Fetches the team page and extracts its embedded state.
///
/// The page cache makes this cheap to call on every render pass; within one
/// cache window only the first call reaches the network.
#[instrument(skip(ctx), fields(url = %ctx.team_page_url))]
pub async fn fetch_team_info(ctx: &ScrapeContext) -> Result<TeamInfo, AppError> {
    let body = fetch_page(&ctx.client, &ctx.team_page_url).await?;
    let value = extract_one(&body, &TEAM_PAGE_MATCHER, markers::PROPS_ATTR, &ctx.team_page_url)?;
    let info: TeamInfo = serde_json::from_value(value)?;

    info!(
        team = %info.team.name,
        past_events = info.past_events.len(),
        live_events = info.live_events.len(),
        past_streams = info.past_streams.len(),
        "fetched team page state"
    );
    Ok(info)
}

/// Finds the unique event with the given name across the team's past and
/// live event lists. Zero or multiple matches fail: the name is the only
/// join key between stream records and events, so ambiguity cannot be
/// resolved here.
fn find_unique_event<'a>(team_info: &'a TeamInfo, event_name: &str) -> Result<&'a Event, AppError> {
    let mut matched = team_info
        .past_events
        .iter()
        .chain(team_info.live_events.iter())
        .filter(|event| event.name == event_name);

    match (matched.next(), matched.next()) {
        (Some(event), None) => Ok(event),
        (None, _) => Err(AppError::lookup(event_name, 0)),
        (Some(_), Some(_)) => {
            // Count the rest for the error message.
            let matches = 2 + matched.count();
            Err(AppError::lookup(event_name, matches))
        }
    }
}

/// Resolves an event name to its detail-page state.
///
/// The result is memoized per event name for the cache window, independently
/// of the page cache underneath: a hit skips the name lookup and JSON
/// extraction as well as the fetch.
#[instrument(skip(ctx, team_info))]
pub async fn resolve_event(
    ctx: &ScrapeContext,
    team_info: &TeamInfo,
    event_name: &str,
) -> Result<EventDetail, AppError> {
    if let Some(detail) = get_cached_event_detail(event_name).await {
        debug!("Using cached event detail for '{event_name}'");
        return Ok(detail);
    }

    let event = find_unique_event(team_info, event_name)?;
    let url = urls::event_url(&ctx.base_url, &event.slug);

    let body = fetch_page(&ctx.client, &url).await?;
    let value = extract_one(&body, &EVENT_PAGE_MATCHER, markers::PROPS_ATTR, &url)?;
    let page: EventPage = serde_json::from_value(value)?;

    cache_event_detail(
        event_name.to_string(),
        page.event.clone(),
        cache_ttl::EVENT_SECONDS,
    )
    .await;
    Ok(page.event)
}

/// Fetches a game page and extracts its video manifest URL.
///
/// Called on explicit user action only. With no video cache window
/// configured the fetch bypasses the page cache entirely, so re-triggering a
/// load always observes the current manifest.
#[instrument(skip(ctx))]
pub async fn fetch_video_info(ctx: &ScrapeContext, link: &str) -> Result<VideoInfo, AppError> {
    let url = urls::absolutize(&ctx.base_url, link);

    let body = match ctx.video_cache_seconds {
        Some(ttl_seconds) => fetch_page_with_ttl(&ctx.client, &url, ttl_seconds).await?,
        None => fetch_page_uncached(&ctx.client, &url).await?,
    };

    // The game page is the one place the multi-match form is used; it still
    // demands exactly one marker element.
    let values = extract_all(&body, &GAME_PAGE_MATCHER, markers::PROPS_ATTR, &url)?;
    let value: Value = match <[Value; 1]>::try_from(values) {
        Ok([value]) => value,
        Err(values) => {
            return Err(AppError::structure(
                format!(
                    "expected exactly one game state element, found {}",
                    values.len()
                ),
                url.as_str(),
            ));
        }
    };

    let info: VideoInfo = serde_json::from_value(value)?;
    info!(game = %url, "extracted video manifest URL");
    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::models::Team;

    fn event(name: &str, slug: &str) -> Event {
        Event {
            name: name.to_string(),
            slug: slug.to_string(),
        }
    }

    fn team_info(past: Vec<Event>, live: Vec<Event>) -> TeamInfo {
        TeamInfo {
            team: Team {
                name: "Drive".to_string(),
            },
            past_events: past,
            live_events: live,
            past_streams: vec![],
        }
    }

    #[test]
    fn test_find_unique_event_in_past_events() {
        let info = team_info(vec![event("Finals", "finals-2024")], vec![]);
        let found = find_unique_event(&info, "Finals").unwrap();
        assert_eq!(found.slug, "finals-2024");
    }

    #[test]
    fn test_find_unique_event_in_live_events() {
        let info = team_info(
            vec![event("Spring Shootout", "spring-2024")],
            vec![event("Finals", "finals-2024")],
        );
        let found = find_unique_event(&info, "Finals").unwrap();
        assert_eq!(found.slug, "finals-2024");
    }

    #[test]
    fn test_find_unique_event_zero_matches() {
        let info = team_info(vec![event("Spring Shootout", "spring-2024")], vec![]);
        let error = find_unique_event(&info, "Finals").unwrap_err();
        assert!(matches!(error, AppError::Lookup { matches: 0, .. }));
    }

    #[test]
    fn test_find_unique_event_ambiguous_across_lists() {
        // The same name in past and live events is ambiguous, not a merge.
        let info = team_info(
            vec![event("Finals", "finals-2023")],
            vec![event("Finals", "finals-2024")],
        );
        let error = find_unique_event(&info, "Finals").unwrap_err();
        assert!(matches!(error, AppError::Lookup { matches: 2, .. }));
    }

    #[test]
    fn test_scrape_context_from_config() {
        let config = Config {
            team_page_url: "https://www.ballertv.com/teams/drive-richmond-u11".to_string(),
            log_file_path: None,
            http_timeout_seconds: 5,
            video_cache_seconds: None,
        };
        let ctx = ScrapeContext::new(&config).unwrap();
        assert_eq!(ctx.base_url, "https://www.ballertv.com");
        assert_eq!(ctx.video_cache_seconds, None);
    }

    #[test]
    fn test_scrape_context_rejects_bad_team_url() {
        let config = Config {
            team_page_url: "ballertv.com/teams/no-scheme".to_string(),
            log_file_path: None,
            http_timeout_seconds: 5,
            video_cache_seconds: None,
        };
        assert!(matches!(
            ScrapeContext::new(&config),
            Err(AppError::Config(_))
        ));
    }
}
