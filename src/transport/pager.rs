//! Pagination metadata for REST v2 responses
//!
//! REST v2 list endpoints advertise further pages through RFC 8288 `Link`
//! headers: `<https://api.newrelic.com/v2/alerts_policies.json?page=2>; rel="next"`.

use reqwest::header::{HeaderMap, LINK};
use url::Url;

/// Page URLs advertised by a response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paging {
    pub next: Option<String>,
    pub prev: Option<String>,
    pub first: Option<String>,
    pub last: Option<String>,
}

/// Extracts paging metadata from response headers
pub trait Pager: Send + Sync {
    fn parse(&self, headers: &HeaderMap) -> Paging;
}

/// Pager for `Link` header pagination
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkHeaderPager;

impl Pager for LinkHeaderPager {
    fn parse(&self, headers: &HeaderMap) -> Paging {
        let mut paging = Paging::default();

        for value in headers.get_all(LINK) {
            let Ok(value) = value.to_str() else {
                tracing::debug!("Skipping non-ASCII Link header");
                continue;
            };
            for (url, rel) in parse_link_header(value) {
                let slot = match rel.as_str() {
                    "next" => &mut paging.next,
                    "prev" | "previous" => &mut paging.prev,
                    "first" => &mut paging.first,
                    "last" => &mut paging.last,
                    _ => continue,
                };
                if slot.is_none() {
                    *slot = Some(url);
                }
            }
        }

        paging
    }
}

/// Parse a `Link` header into `(url, rel)` pairs
///
/// Entries without a `rel` or with an unparseable URL are dropped. A single
/// entry with `rel="next last"` yields one pair per relation.
pub fn parse_link_header(value: &str) -> Vec<(String, String)> {
    let mut links = Vec::new();

    for entry in split_entries(value) {
        let mut parts = entry.split(';');
        let Some(target) = parts.next().map(str::trim) else {
            continue;
        };
        let Some(target) = target.strip_prefix('<').and_then(|t| t.strip_suffix('>')) else {
            continue;
        };
        if Url::parse(target).is_err() {
            continue;
        }

        for param in parts {
            let Some((key, val)) = param.split_once('=') else {
                continue;
            };
            if !key.trim().eq_ignore_ascii_case("rel") {
                continue;
            }
            for rel in val.trim().trim_matches('"').split_whitespace() {
                links.push((target.to_string(), rel.to_ascii_lowercase()));
            }
        }
    }

    links
}

/// Split on commas that are outside `<...>`
fn split_entries(value: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in value.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                entries.push(&value[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    entries.push(&value[start..]);

    entries
        .into_iter()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .collect()
}
