//! GitHub releases API

use super::ReleaseRequest;
use crate::error::Result;
use reqwest::blocking::{Client, Response};
use reqwest::header::ACCEPT;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub(crate) struct CreateReleasePayload {
    pub tag_name: String,
    pub target_commitish: String,
    pub name: String,
    pub body: String,
    pub draft: bool,
    pub prerelease: bool,
}

impl From<&ReleaseRequest> for CreateReleasePayload {
    fn from(request: &ReleaseRequest) -> Self {
        CreateReleasePayload {
            tag_name: request.tag.release_name(),
            target_commitish: request.target_branch.clone(),
            name: request.effective_title(),
            body: request.notes.clone(),
            draft: false,
            prerelease: request.tag.is_prerelease(),
        }
    }
}

/// `POST {base}/repos/{owner}/{repo}/releases`
pub(crate) fn create_release(
    client: &Client,
    base_url: &str,
    token: &str,
    slug: &str,
    request: &ReleaseRequest,
) -> Result<Response> {
    let url = format!("{}/repos/{}/releases", base_url.trim_end_matches('/'), slug);

    let response = client
        .post(&url)
        .bearer_auth(token)
        .header(ACCEPT, "application/vnd.github+json")
        .json(&CreateReleasePayload::from(request))
        .send()?;

    Ok(response)
}
