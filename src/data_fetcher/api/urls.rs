//! URL construction for the three page kinds the dashboard touches.

use crate::error::AppError;

/// Extracts `scheme://host[:port]` from a URL. Used to derive the event and
/// game URL base from the configured team page URL.
pub fn origin_of(url: &str) -> Result<String, AppError> {
    let scheme_end = url
        .find("://")
        .ok_or_else(|| AppError::config_error(format!("URL '{url}' has no scheme")))?;
    let host_start = scheme_end + 3;
    let host = &url[host_start..];
    if host.is_empty() {
        return Err(AppError::config_error(format!("URL '{url}' has no host")));
    }

    match host.find('/') {
        Some(path_start) => Ok(url[..host_start + path_start].to_string()),
        None => Ok(url.to_string()),
    }
}

/// Builds the detail-page URL for an event slug.
pub fn event_url(base_url: &str, slug: &str) -> String {
    format!("{}/events/{}", base_url.trim_end_matches('/'), slug)
}

/// Resolves a stream record's link against the base URL. Links are delivered
/// absolute today; host-relative ones are joined with the base.
pub fn absolutize(base_url: &str, link: &str) -> String {
    if link.starts_with("http://") || link.starts_with("https://") {
        link.to_string()
    } else {
        format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            link.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_of_strips_path() {
        assert_eq!(
            origin_of("https://www.ballertv.com/teams/drive-richmond-u11").unwrap(),
            "https://www.ballertv.com"
        );
    }

    #[test]
    fn test_origin_of_bare_host() {
        assert_eq!(
            origin_of("https://www.ballertv.com").unwrap(),
            "https://www.ballertv.com"
        );
    }

    #[test]
    fn test_origin_of_keeps_port() {
        assert_eq!(
            origin_of("http://127.0.0.1:8080/teams/x").unwrap(),
            "http://127.0.0.1:8080"
        );
    }

    #[test]
    fn test_origin_of_rejects_missing_scheme() {
        assert!(matches!(
            origin_of("www.ballertv.com/teams/x"),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_event_url() {
        assert_eq!(
            event_url("https://www.ballertv.com", "spring-shootout-2024"),
            "https://www.ballertv.com/events/spring-shootout-2024"
        );
        // A trailing slash on the base must not double up.
        assert_eq!(
            event_url("https://www.ballertv.com/", "finals-2024"),
            "https://www.ballertv.com/events/finals-2024"
        );
    }

    #[test]
    fn test_absolutize() {
        assert_eq!(
            absolutize("https://www.ballertv.com", "https://www.ballertv.com/streams/42"),
            "https://www.ballertv.com/streams/42"
        );
        assert_eq!(
            absolutize("https://www.ballertv.com", "/streams/42"),
            "https://www.ballertv.com/streams/42"
        );
    }
}
