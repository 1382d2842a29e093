//! Embedded-state extraction from server-rendered HTML.
//!
//! The source site serializes each page's state as JSON into an attribute of
//! a marker element. This module locates that element by exact attribute
//! match and parses the attribute value. The selector strings built here are
//! the only place the crate touches the page markup, so a markup change is
//! contained to the matchers in [`crate::constants::markers`].

use scraper::{ElementRef, Html, Selector};
use serde_json::Value;
use std::fmt;
use tracing::debug;

use crate::error::AppError;

/// Exact-match predicate over one or more attribute name/value pairs,
/// compiled to a CSS attribute selector.
#[derive(Debug, Clone, Default)]
pub struct AttributeMatcher {
    requirements: Vec<(String, Option<String>)>,
}

impl AttributeMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require the attribute to be present, with any value.
    pub fn has_attribute(mut self, name: &str) -> Self {
        self.requirements.push((name.to_string(), None));
        self
    }

    /// Require the attribute to equal the given literal exactly.
    pub fn attribute_equals(mut self, name: &str, value: &str) -> Self {
        self.requirements
            .push((name.to_string(), Some(value.to_string())));
        self
    }

    fn selector_string(&self) -> String {
        let mut out = String::new();
        for (name, value) in &self.requirements {
            match value {
                Some(value) => {
                    out.push_str(&format!("[{name}=\"{value}\"]"));
                }
                None => out.push_str(&format!("[{name}]")),
            }
        }
        out
    }

    fn selector(&self) -> Result<Selector, AppError> {
        let css = self.selector_string();
        Selector::parse(&css).map_err(|e| AppError::Selector(format!("{css}: {e}")))
    }
}

impl fmt::Display for AttributeMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.selector_string())
    }
}

/// Locates exactly one element matching `matcher` and returns `attribute`
/// parsed as JSON. Zero matches and multiple matches are both structure
/// errors: the page no longer looks the way the extraction contract expects,
/// and guessing which element was meant would silently return wrong data.
pub fn extract_one(
    html: &str,
    matcher: &AttributeMatcher,
    attribute: &str,
    url: &str,
) -> Result<Value, AppError> {
    let document = Html::parse_document(html);
    let selector = matcher.selector()?;

    let mut matched = document.select(&selector);
    let element = matched
        .next()
        .ok_or_else(|| AppError::structure(format!("no element matches {matcher}"), url))?;
    if matched.next().is_some() {
        return Err(AppError::structure(
            format!("more than one element matches {matcher}"),
            url,
        ));
    }

    attribute_json(element, attribute, url)
}

/// Multi-match form of [`extract_one`]: returns the parsed JSON of every
/// matching element, in document order. Callers that expect a fixed element
/// count must enforce it themselves.
pub fn extract_all(
    html: &str,
    matcher: &AttributeMatcher,
    attribute: &str,
    url: &str,
) -> Result<Vec<Value>, AppError> {
    let document = Html::parse_document(html);
    let selector = matcher.selector()?;

    let values: Result<Vec<Value>, AppError> = document
        .select(&selector)
        .map(|element| attribute_json(element, attribute, url))
        .collect();
    let values = values?;

    debug!(
        matcher = %matcher,
        count = values.len(),
        "extracted embedded state elements"
    );
    Ok(values)
}

fn attribute_json(element: ElementRef, attribute: &str, url: &str) -> Result<Value, AppError> {
    let raw = element.value().attr(attribute).ok_or_else(|| {
        AppError::structure(format!("matched element has no '{attribute}' attribute"), url)
    })?;

    serde_json::from_str(raw).map_err(|e| {
        AppError::structure(format!("attribute '{attribute}' is not valid JSON: {e}"), url)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://www.ballertv.com/teams/test";

    fn props_matcher(class: &str) -> AttributeMatcher {
        AttributeMatcher::new()
            .has_attribute("data-react-props")
            .attribute_equals("data-react-class", class)
    }

    #[test]
    fn test_extract_one_single_match() {
        let html = r#"
            <html><body>
                <div data-react-class="profiles/teams/Show"
                     data-react-props='{"team": {"name": "Drive"}}'></div>
                <div data-react-class="other/Component"
                     data-react-props='{"x": 1}'></div>
            </body></html>
        "#;

        let value = extract_one(
            html,
            &props_matcher("profiles/teams/Show"),
            "data-react-props",
            URL,
        )
        .unwrap();
        assert_eq!(value["team"]["name"], "Drive");
    }

    #[test]
    fn test_extract_one_zero_matches_is_error() {
        let html = "<html><body><div id='nothing'></div></body></html>";

        let result = extract_one(
            html,
            &props_matcher("profiles/teams/Show"),
            "data-react-props",
            URL,
        );
        assert!(matches!(result, Err(AppError::Structure { .. })));
    }

    #[test]
    fn test_extract_one_multiple_matches_is_error() {
        let html = r#"
            <div data-react-class="profiles/teams/Show" data-react-props='{"a": 1}'></div>
            <div data-react-class="profiles/teams/Show" data-react-props='{"a": 2}'></div>
        "#;

        let result = extract_one(
            html,
            &props_matcher("profiles/teams/Show"),
            "data-react-props",
            URL,
        );
        assert!(matches!(result, Err(AppError::Structure { .. })));
    }

    #[test]
    fn test_extract_one_missing_attribute_is_error() {
        // The marker class is present but the props attribute is not.
        let html = r#"<div data-react-class="streams/ShowTypescript"></div>"#;
        let matcher = AttributeMatcher::new().attribute_equals("data-react-class", "streams/ShowTypescript");

        let result = extract_one(html, &matcher, "data-react-props", URL);
        assert!(matches!(result, Err(AppError::Structure { .. })));
    }

    #[test]
    fn test_extract_one_invalid_json_is_error() {
        let html = r#"<div data-react-class="profiles/teams/Show" data-react-props='{broken'></div>"#;
        let matcher = AttributeMatcher::new().attribute_equals("data-react-class", "profiles/teams/Show");

        let result = extract_one(html, &matcher, "data-react-props", URL);
        assert!(matches!(result, Err(AppError::Structure { .. })));
    }

    #[test]
    fn test_extract_one_entity_escaped_attribute() {
        // Server-rendered pages escape the JSON quotes inside the attribute.
        let html = r#"<div data-react-class="profiles/teams/Show"
            data-react-props="{&quot;team&quot;: {&quot;name&quot;: &quot;Drive&quot;}}"></div>"#;
        let matcher = AttributeMatcher::new().attribute_equals("data-react-class", "profiles/teams/Show");

        let value = extract_one(html, &matcher, "data-react-props", URL).unwrap();
        assert_eq!(value["team"]["name"], "Drive");
    }

    #[test]
    fn test_extract_all_returns_document_order() {
        let html = r#"
            <div data-react-class="streams/ShowTypescript" data-react-props='{"n": 1}'></div>
            <p>unrelated</p>
            <div data-react-class="streams/ShowTypescript" data-react-props='{"n": 2}'></div>
        "#;
        let matcher = AttributeMatcher::new().attribute_equals("data-react-class", "streams/ShowTypescript");

        let values = extract_all(html, &matcher, "data-react-props", URL).unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values[0]["n"], 1);
        assert_eq!(values[1]["n"], 2);
    }

    #[test]
    fn test_extract_all_empty() {
        let values = extract_all(
            "<html></html>",
            &props_matcher("profiles/teams/Show"),
            "data-react-props",
            URL,
        )
        .unwrap();
        assert!(values.is_empty());
    }

    #[test]
    fn test_matcher_display() {
        let matcher = props_matcher("profiles/events/ShowContainer");
        assert_eq!(
            matcher.to_string(),
            r#"[data-react-props][data-react-class="profiles/events/ShowContainer"]"#
        );
    }
}
