//! Blocking client for the comments endpoint.

use anyhow::Context;
use endless_core::CancelToken;
use endless_foundation::FetchOutcome;
use reqwest::blocking::Client;
use serde::Deserialize;

pub const BASE_URL: &str = "https://jsonplaceholder.typicode.com";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub post_id: u32,
    pub id: u32,
    pub name: String,
    pub email: String,
    pub body: String,
}

pub fn client() -> anyhow::Result<Client> {
    Client::builder()
        .user_agent("endless-comments-demo/0.1")
        .build()
        .context("failed to build HTTP client")
}

/// Page `n` holds the comments of post `n + 1`. Posts past the last one come
/// back as an empty list, which ends pagination.
pub fn comments_url(base: &str, page: u32) -> String {
    format!("{base}/comments?postId={}", page + 1)
}

pub fn parse_comments(body: &str) -> anyhow::Result<Vec<Comment>> {
    serde_json::from_str(body).context("malformed comments payload")
}

/// Fetches one page, mapping transport problems to a failure and non-2xx
/// responses to an error carrying the response body.
pub fn fetch_page(
    client: &Client,
    base: &str,
    page: u32,
    token: &CancelToken,
) -> FetchOutcome<Comment> {
    if token.is_cancelled() {
        return FetchOutcome::failure(anyhow::anyhow!("request cancelled"));
    }
    let url = comments_url(base, page);
    log::debug!("GET {url}");
    let response = match client.get(&url).send() {
        Ok(response) => response,
        Err(err) => return FetchOutcome::failure(err),
    };
    let status = response.status();
    if !status.is_success() {
        log::warn!("GET {url} returned {status}");
        return FetchOutcome::from_error_body(response.text().ok());
    }
    match response
        .text()
        .context("failed to read body")
        .and_then(|body| parse_comments(&body))
    {
        Ok(comments) => FetchOutcome::from_page(comments),
        Err(err) => FetchOutcome::failure(err),
    }
}
