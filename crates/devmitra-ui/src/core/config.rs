//! Runtime settings for the dashboard pages.
//!
//! # Design
//! - Defaults match the server-rendered pages; the mount element may override them.
//! - Parsing is DOM-free so the wasm host only supplies attribute lookups.

use devmitra_api_models::CSRF_COOKIE;

use crate::core::notify::DEFAULT_TTL_MS;

/// Default fade-out before a deleted card leaves the grid.
pub const DEFAULT_DELETE_ANIMATION_MS: u32 = 300;

/// Page-level settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UiConfig {
    /// Origin prefixed to every action path; empty means same origin.
    pub base_url: String,
    /// Cookie holding the CSRF token.
    pub csrf_cookie: String,
    /// Time a notification stays visible.
    pub notification_ttl_ms: u64,
    /// Fade-out before a deleted card is removed.
    pub delete_animation_ms: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            csrf_cookie: CSRF_COOKIE.to_string(),
            notification_ttl_ms: DEFAULT_TTL_MS,
            delete_animation_ms: DEFAULT_DELETE_ANIMATION_MS,
        }
    }
}

impl UiConfig {
    /// Build from mount-element attributes (`data-base-url`, `data-csrf-cookie`,
    /// `data-notification-ttl`, `data-delete-delay`). Unparseable values keep the default.
    #[must_use]
    pub fn from_attributes<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(base) = lookup("data-base-url") {
            config.base_url = normalize_base_url(&base);
        }
        if let Some(cookie) = lookup("data-csrf-cookie").filter(|value| !value.trim().is_empty()) {
            config.csrf_cookie = cookie.trim().to_string();
        }
        if let Some(ttl) = lookup("data-notification-ttl").and_then(|value| value.trim().parse().ok()) {
            config.notification_ttl_ms = ttl;
        }
        if let Some(delay) = lookup("data-delete-delay").and_then(|value| value.trim().parse().ok()) {
            config.delete_animation_ms = delay;
        }
        config
    }

    /// Absolute URL for a server path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Strip trailing slashes so paths can be appended directly.
#[must_use]
pub fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn defaults_match_rendered_pages() {
        let config = UiConfig::default();
        assert_eq!(config.csrf_cookie, "csrftoken");
        assert_eq!(config.notification_ttl_ms, 3_000);
        assert_eq!(config.delete_animation_ms, 300);
        assert_eq!(config.url("/skills/"), "/skills/");
    }

    #[test]
    fn attributes_override_defaults() {
        let attrs: BTreeMap<&str, &str> = BTreeMap::from([
            ("data-base-url", "https://admin.example.com/"),
            ("data-notification-ttl", "5000"),
            ("data-delete-delay", "soon"),
        ]);
        let config = UiConfig::from_attributes(|name| attrs.get(name).map(|value| (*value).to_string()));
        assert_eq!(config.url("/skills/"), "https://admin.example.com/skills/");
        assert_eq!(config.notification_ttl_ms, 5_000);
        assert_eq!(config.delete_animation_ms, DEFAULT_DELETE_ANIMATION_MS);
    }
}
