//! Pagination links
//!
//! Codeship paginates list endpoints with an RFC 5988 `Link` header:
//!
//! ```text
//! <https://api.codeship.com/v2/.../builds?page=2&per_page=50>; rel="next",
//! <https://api.codeship.com/v2/.../builds?page=4&per_page=50>; rel="last"
//! ```
//!
//! The `last` relation is omitted on the final page.

use regex::Regex;
use std::sync::OnceLock;

/// Relations parsed from a `Link` header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Links {
    pub next: Option<String>,
    pub last: Option<String>,
}

fn link_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"<([^>]+)>\s*;\s*rel="([a-z]+)""#).expect("valid link regex"))
}

fn page_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[?&]page=(\d+)").expect("valid page regex"))
}

impl Links {
    /// Parse a `Link` header value; unknown relations are ignored
    pub fn parse(header: &str) -> Self {
        let mut links = Self::default();
        for caps in link_regex().captures_iter(header) {
            let url = caps[1].to_string();
            match &caps[2] {
                "next" => links.next = Some(url),
                "last" => links.last = Some(url),
                _ => {}
            }
        }
        links
    }

    /// The response is the final page when no `last` relation is present
    pub fn is_last_page(&self) -> bool {
        self.last.is_none()
    }

    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Page number of the `next` relation
    pub fn next_page(&self) -> Option<u32> {
        self.next.as_deref().and_then(page_number)
    }
}

/// Extract the `page` query parameter from a URL
pub fn page_number(url: &str) -> Option<u32> {
    page_regex()
        .captures(url)
        .and_then(|caps| caps[1].parse().ok())
}
