//! `AniList` GraphQL client.

use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use super::{FetchFailed, MediaSource};
use crate::state::{MediaItem, Page, PageInfo, QueryVariables};

/// Public `AniList` GraphQL endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://graphql.anilist.co";

/// Query for one page of anime, filtered by an optional search term.
pub const MEDIA_PAGE_QUERY: &str = "\
query ($search: String, $page: Int, $perPage: Int, $sort: [MediaSort]) {
  Page(page: $page, perPage: $perPage) {
    pageInfo { currentPage hasNextPage }
    media(search: $search, sort: $sort, type: ANIME) {
      id
      title { romaji english native }
      coverImage { large color }
      averageScore
      popularity
      format
      episodes
      season
      seasonYear
      genres
      status
    }
  }
}";

/// Request body: the query text plus its variables.
#[derive(Serialize)]
struct GraphQlRequest<'a> {
    query: &'static str,
    variables: &'a QueryVariables,
}

#[derive(Deserialize)]
struct GraphQlResponse {
    data: Option<ResponseData>,
    #[serde(default)]
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ResponseData {
    page: Option<RawPage>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPage {
    page_info: Option<PageInfo>,
    #[serde(default)]
    media: Option<Vec<Option<MediaItem>>>,
}

/// HTTP client bound to one GraphQL endpoint.
#[derive(Clone, Debug)]
pub struct AniListClient {
    http: reqwest::Client,
    endpoint: String,
}

impl AniListClient {
    /// What: Build a client for `endpoint`.
    ///
    /// Inputs:
    /// - `endpoint`: GraphQL URL (usually [`DEFAULT_ENDPOINT`]).
    /// - `timeout`: Overall per-request timeout.
    ///
    /// Output:
    /// - The client, or a [`FetchFailed`] when the HTTP stack cannot be initialised.
    ///
    /// # Errors
    /// - Returns `Err` when the underlying `reqwest` client fails to build.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, FetchFailed> {
        let http = reqwest::Client::builder()
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .timeout(timeout)
            .user_agent(format!("Anisea/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchFailed::new(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    /// Endpoint this client posts to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl MediaSource for AniListClient {
    async fn fetch_page(&self, vars: &QueryVariables) -> Result<Page, FetchFailed> {
        let body = GraphQlRequest {
            query: MEDIA_PAGE_QUERY,
            variables: vars,
        };
        let started = std::time::Instant::now();
        let resp = self
            .http
            .post(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await?;
        let status = resp.status();
        let text = resp.text().await?;
        tracing::debug!(
            endpoint = %self.endpoint,
            page = vars.page,
            search = ?vars.search,
            status = status.as_u16(),
            bytes = text.len(),
            elapsed_ms = started.elapsed().as_millis(),
            "catalog response"
        );
        decode_response(status, &text)
    }
}

/// What: Turn a GraphQL HTTP response into a [`Page`].
///
/// Inputs:
/// - `status`: HTTP status of the response.
/// - `body`: Raw response body.
///
/// Output:
/// - `Ok(Page)` with `null` media entries dropped, or `Err(FetchFailed)`.
///
/// Details:
/// - GraphQL `errors[]` win over everything else; their messages are joined with `"; "`.
/// - A non-success status without a GraphQL error body becomes `"HTTP <status>"`.
/// - A response without `data.Page` is reported as a failure rather than an empty page.
///
/// # Errors
/// - See details; every failure is a [`FetchFailed`] with a readable message.
pub fn decode_response(status: StatusCode, body: &str) -> Result<Page, FetchFailed> {
    let parsed: Result<GraphQlResponse, _> = serde_json::from_str(body);
    let parsed = match parsed {
        Ok(p) => p,
        Err(e) if status.is_success() => return Err(e.into()),
        Err(_) => return Err(FetchFailed::new(format!("HTTP {status}"))),
    };
    if let Some(errors) = parsed.errors.filter(|e| !e.is_empty()) {
        let message = errors
            .into_iter()
            .map(|e| e.message)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(FetchFailed::new(message));
    }
    if !status.is_success() {
        return Err(FetchFailed::new(format!("HTTP {status}")));
    }
    let raw = parsed
        .data
        .and_then(|d| d.page)
        .ok_or_else(|| FetchFailed::new("Catalog response contained no page"))?;
    let page_info = raw
        .page_info
        .ok_or_else(|| FetchFailed::new("Catalog response contained no page info"))?;
    let items = raw.media.unwrap_or_default().into_iter().flatten().collect();
    Ok(Page {
        items,
        page_info: PageInfo {
            current_page: page_info.current_page.max(1),
            ..page_info
        },
    })
}
