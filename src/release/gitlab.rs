//! GitLab releases API

use super::ReleaseRequest;
use crate::error::Result;
use reqwest::blocking::{Client, Response};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub(crate) struct CreateReleasePayload {
    pub name: String,
    pub tag_name: String,
    pub description: String,
}

impl From<&ReleaseRequest> for CreateReleasePayload {
    fn from(request: &ReleaseRequest) -> Self {
        CreateReleasePayload {
            name: request.effective_title(),
            tag_name: request.tag.release_name(),
            description: request.notes.clone(),
        }
    }
}

/// `POST {base}/projects/{url-encoded path}/releases`
pub(crate) fn create_release(
    client: &Client,
    base_url: &str,
    token: &str,
    slug: &str,
    request: &ReleaseRequest,
) -> Result<Response> {
    let url = format!(
        "{}/projects/{}/releases",
        base_url.trim_end_matches('/'),
        urlencoding::encode(slug)
    );

    let response = client
        .post(&url)
        .header("PRIVATE-TOKEN", token)
        .json(&CreateReleasePayload::from(request))
        .send()?;

    Ok(response)
}
