//! Search/fetch resolution against the lyrics site.
//!
//! A query is either a direct song URL (resolved by slug, one result) or
//! free text (sent to the wp-json search endpoint as-is; pre-slugifying the
//! query measurably degrades the site's relevance ranking). The legacy
//! HTML-page shape is kept as an alternate path. No retries happen here; a
//! failed attempt is terminal for the call.

use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION, DNT,
    UPGRADE_INSECURE_REQUESTS,
};
use scraper::{Html, Selector};
use serde_json::Value;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::Config;
use crate::core::patterns::URL_PATTERN;
use crate::core::query;
use crate::core::song::Song;
use crate::error::LookupError;

static ENTRY_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.post-inner div.entry").expect("valid entry selector"));
static NAME_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".name").expect("valid name selector"));

/// Per-call knobs forwarded into each constructed [`Song`].
#[derive(Debug, Clone, Copy)]
pub struct FindOptions {
    /// Maximum matches to request from search (1..=30).
    pub matches: u8,
    /// Blank-line insertion interval; 0 disables division.
    pub division_interval: usize,
    /// Strip instructional annotations from the lyrics.
    pub clean: bool,
}

/// How a query resolves: by slug (direct URL) or by search text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Direct { slug: String },
    Search { query: String },
}

/// Decide whether a query is a direct song link or a free-text search.
pub fn classify(query: &str) -> Lookup {
    match URL_PATTERN.captures(query) {
        Some(caps) => Lookup::Direct {
            slug: caps["slug"].to_string(),
        },
        None => Lookup::Search {
            query: query.to_string(),
        },
    }
}

/// Map raw wp-json post objects into song records. Malformed items are
/// dropped so one bad search hit cannot block the rest of the batch.
pub fn map_posts(posts: &[Value], options: &FindOptions) -> Vec<Song> {
    posts
        .iter()
        .filter_map(
            |post| match Song::from_post(post, options.division_interval, options.clean) {
                Ok(song) => Some(song),
                Err(err) => {
                    debug!("Skipping malformed result item: {err}");
                    None
                }
            },
        )
        .collect()
}

/// A successful lookup never yields an empty batch.
pub fn require_songs(songs: Vec<Song>) -> Result<Vec<Song>, LookupError> {
    if songs.is_empty() {
        Err(LookupError::NoSongs)
    } else {
        Ok(songs)
    }
}

pub struct Finder {
    client: reqwest::Client,
    host: String,
}

impl Finder {
    pub fn new(config: &Config) -> Self {
        let user_agent = format!("lwlyric v{}", env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(user_agent)
            .default_headers(courteous_headers())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            host: config.host.clone(),
        }
    }

    /// Resolve a query into one or more song records via the wp-json API.
    pub async fn find(&self, query: &str, options: &FindOptions) -> Result<Vec<Song>, LookupError> {
        let endpoint = format!("https://{}/wp-json/wp/v2/posts", self.host);
        let request = match classify(query) {
            Lookup::Direct { slug } => {
                info!("Whole song URL detected; fetching by slug");
                self.client.get(&endpoint).query(&[("slug", slug)])
            }
            Lookup::Search { query } => {
                debug!("Searching with raw query text");
                self.client.get(&endpoint).query(&[
                    ("per_page", options.matches.to_string()),
                    ("orderby", "relevance".to_string()),
                    ("search", query),
                ])
            }
        };

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status {
                code: status.as_u16(),
            });
        }

        let posts: Vec<Value> = response.json().await?;
        debug!("Received {} result item(s)", posts.len());
        require_songs(map_posts(&posts, options))
    }

    /// Fetch one song through the legacy HTML page shape: direct URLs go
    /// straight to their slug, free text is slug-normalized first.
    pub async fn scrape(&self, query: &str, options: &FindOptions) -> Result<Song, LookupError> {
        let slug = match classify(query) {
            Lookup::Direct { slug } => slug,
            Lookup::Search { query } => query::normalize(&query),
        };
        let url = format!("https://{}/{}/", self.host, slug);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status {
                code: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let document = Html::parse_document(&body);
        let title = document
            .select(&NAME_SELECTOR)
            .next()
            .ok_or(LookupError::MissingTitle)?
            .text()
            .collect::<String>()
            .trim()
            .to_string();
        let entry = document
            .select(&ENTRY_SELECTOR)
            .next()
            .ok_or(LookupError::MissingBody)?;

        Ok(Song::from_page(
            title,
            entry.inner_html(),
            options.division_interval,
            options.clean,
        ))
    }
}

/// Fixed header set for courteous scraping; values are an implementation
/// detail, not a contract.
fn courteous_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(DNT, HeaderValue::from_static("1"));
    headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    headers.insert(
        HeaderName::from_static("sec-gpc"),
        HeaderValue::from_static("1"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-dest"),
        HeaderValue::from_static("document"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-mode"),
        HeaderValue::from_static("navigate"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-site"),
        HeaderValue::from_static("same-origin"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-user"),
        HeaderValue::from_static("?1"),
    );
    headers.insert(
        HeaderName::from_static("priority"),
        HeaderValue::from_static("u=0, i"),
    );
    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options() -> FindOptions {
        FindOptions {
            matches: 5,
            division_interval: 0,
            clean: false,
        }
    }

    #[test]
    fn direct_urls_resolve_by_slug_not_search() {
        assert_eq!(
            classify("https://loveworldlyrics.com/abc-123/"),
            Lookup::Direct {
                slug: "abc-123".to_string()
            }
        );
        assert_eq!(
            classify("loveworldlyrics.com/abc-123"),
            Lookup::Direct {
                slug: "abc-123".to_string()
            }
        );
    }

    #[test]
    fn free_text_resolves_to_search_with_raw_query() {
        assert_eq!(
            classify("glory in the highest"),
            Lookup::Search {
                query: "glory in the highest".to_string()
            }
        );
    }

    #[test]
    fn malformed_items_are_dropped_not_fatal() {
        let posts = vec![
            json!({ "title": { "rendered": "Keep" }, "content": { "rendered": "<p>x</p>" } }),
            json!({ "title": { "rendered": "No content" } }),
            json!(42),
            json!({ "title": { "rendered": "Also keep" }, "content": { "rendered": "<p>y</p>" } }),
        ];
        let songs = map_posts(&posts, &options());
        let titles: Vec<&str> = songs.iter().map(Song::title).collect();
        assert_eq!(titles, vec!["Keep", "Also keep"]);
    }

    #[test]
    fn all_malformed_batch_is_a_lookup_error() {
        let posts = vec![json!({}), json!({ "content": { "rendered": "<p>x</p>" } })];
        let songs = map_posts(&posts, &options());
        assert!(matches!(
            require_songs(songs),
            Err(LookupError::NoSongs)
        ));
    }

    #[test]
    fn empty_response_is_a_lookup_error() {
        assert!(matches!(
            require_songs(map_posts(&[], &options())),
            Err(LookupError::NoSongs)
        ));
    }

    #[test]
    fn source_order_is_preserved() {
        let posts: Vec<Value> = (0..3)
            .map(|i| {
                json!({ "title": { "rendered": format!("song {i}") },
                        "content": { "rendered": "<p>x</p>" } })
            })
            .collect();
        let songs = map_posts(&posts, &options());
        let titles: Vec<&str> = songs.iter().map(Song::title).collect();
        assert_eq!(titles, vec!["song 0", "song 1", "song 2"]);
    }
}
