//! Structured site content.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Site-wide metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteInfo {
    pub title: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// One navigation link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    pub label: String,
    pub href: String,
}

/// Everything the page renders, as published on "content ready".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteContent {
    pub site: SiteInfo,
    #[serde(default)]
    pub navigation: Vec<NavItem>,
    /// Hero, services, portfolio, about... keyed by section id.
    #[serde(default)]
    pub sections: Map<String, Value>,
}

impl SiteContent {
    /// Minimal content used when the real content cannot be loaded.
    pub fn fallback() -> Self {
        let navigation = [
            ("Home", "#home"),
            ("Services", "#services"),
            ("About", "#about"),
            ("Contact", "#contact"),
        ]
        .into_iter()
        .map(|(label, href)| NavItem {
            label: label.to_string(),
            href: href.to_string(),
        })
        .collect();

        let mut sections = Map::new();
        sections.insert(
            "hero".to_string(),
            json!({
                "title": "Welcome",
                "subtitle": "Some content is temporarily unavailable. Please check back soon."
            }),
        );

        Self {
            site: SiteInfo {
                title: "Welcome".to_string(),
                tagline: String::new(),
                email: None,
            },
            navigation,
            sections,
        }
    }

    /// Semantic checks beyond what deserialization enforces.
    pub fn validate(&self) -> Result<(), String> {
        if self.site.title.trim().is_empty() {
            return Err("site.title is empty".to_string());
        }
        if let Some(i) = self
            .navigation
            .iter()
            .position(|item| item.label.trim().is_empty() || item.href.trim().is_empty())
        {
            return Err(format!("navigation[{}] is missing a label or href", i));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_is_valid() {
        let content = SiteContent::fallback();
        assert!(content.validate().is_ok());
        assert!(content.sections.contains_key("hero"));
        assert_eq!(content.navigation.last().unwrap().href, "#contact");
    }

    #[test]
    fn test_validate() {
        let mut content: SiteContent =
            serde_json::from_str(r##"{"site": {"title": "Acme"}, "navigation": [{"label": "Home", "href": "#home"}]}"##)
                .unwrap();
        assert!(content.validate().is_ok());

        content.navigation[0].href = " ".to_string();
        assert_eq!(
            content.validate().unwrap_err(),
            "navigation[0] is missing a label or href"
        );

        content.site.title = String::new();
        assert_eq!(content.validate().unwrap_err(), "site.title is empty");
    }
}
