//! Page fetching with URL-keyed caching and single-flight coalescing.

use reqwest::Client;
use tracing::{debug, error, info, instrument};

use crate::constants::cache_ttl;
use crate::data_fetcher::cache::{cache_page, fetch_slot, get_cached_page};
use crate::error::AppError;

/// Fetches a page body with the default cache window.
///
/// Repeated calls for the same URL inside the window return the cached body
/// without a network round-trip; concurrent misses for one URL coalesce into
/// a single request. Failures are never retried here - a non-success status
/// or transport error propagates to the caller immediately.
#[instrument(skip(client))]
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, AppError> {
    fetch_page_with_ttl(client, url, cache_ttl::PAGE_SECONDS).await
}

/// Fetches a page body, caching successful responses for `ttl_seconds`.
pub async fn fetch_page_with_ttl(
    client: &Client,
    url: &str,
    ttl_seconds: u64,
) -> Result<String, AppError> {
    if let Some(body) = get_cached_page(url).await {
        debug!("Using cached page body for URL: {url}");
        return Ok(body);
    }

    // Serialize concurrent misses for this URL. Whoever acquires the slot
    // second finds the body already cached and returns without fetching.
    let slot = fetch_slot(url).await;
    let _inflight = slot.lock().await;

    if let Some(body) = get_cached_page(url).await {
        debug!("Page for {url} was fetched by a concurrent caller");
        return Ok(body);
    }

    let body = fetch_page_uncached(client, url).await?;
    cache_page(url.to_string(), body.clone(), ttl_seconds).await;
    Ok(body)
}

/// Fetches a page body without consulting or populating the cache. Used for
/// video loads when no video cache window is configured, so every activation
/// observes the current manifest URL.
#[instrument(skip(client))]
pub async fn fetch_page_uncached(client: &Client, url: &str) -> Result<String, AppError> {
    info!("Fetching page: {url}");

    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            error!("Request failed for URL {}: {}", url, e);
            return Err(if e.is_timeout() {
                AppError::network_timeout(url)
            } else if e.is_connect() {
                AppError::network_connection(url, e.to_string())
            } else {
                AppError::PageFetch(e)
            });
        }
    };

    let status = response.status();
    debug!("Response status: {status}");

    if !status.is_success() {
        let reason = status.canonical_reason().unwrap_or("Unknown error");
        error!("HTTP {} - {} (URL: {})", status.as_u16(), reason, url);
        return Err(AppError::retrieval(status.as_u16(), reason, url));
    }

    let body = response.text().await.map_err(AppError::PageFetch)?;
    debug!("Response length: {} bytes", body.len());
    Ok(body)
}
