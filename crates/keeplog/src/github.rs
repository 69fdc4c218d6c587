//! GitHub release publishing
//!
//! Thin blocking client over the GitHub REST API: enough to list
//! releases, clean up drafts and publish a release for the upcoming
//! version. Retry and credential handling are the caller's problem.

use reqwest::blocking::Client;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, info};

use keeplog_changelog::{release_notes, Changelog, UNRELEASED};
use keeplog_core::error::{GithubError, Result};

const API_ROOT: &str = "https://api.github.com";
const RELEASES_CHUNK_SIZE: usize = 100;

/// GitHub API client bound to one repository
pub struct GitHub {
    repository: String,
    token: String,
    client: Client,
}

impl GitHub {
    /// New client for `owner/repo`.
    pub fn new(repository: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent("keeplog")
            .build()
            .map_err(|err| GithubError::RequestFailed {
                url: API_ROOT.to_string(),
                method: "INIT".to_string(),
                reason: err.to_string(),
            })?;

        Ok(Self {
            repository: repository.into(),
            token: token.into(),
            client,
        })
    }

    fn request(&self, method: Method, api: &str, body: Option<Value>) -> Result<Option<Value>> {
        let url = format!("{}/repos/{}/{}", API_ROOT, self.repository, api);
        debug!(%url, %method, "GitHub request");

        let mut request = self
            .client
            .request(method.clone(), &url)
            .header("Accept", "application/vnd.github.v3+json")
            .header("Authorization", format!("token {}", self.token));

        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().map_err(|err| GithubError::RequestFailed {
            url: url.clone(),
            method: method.to_string(),
            reason: err.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GithubError::Api {
                status: status.as_u16(),
                url,
            }
            .into());
        }

        let text = response.text().map_err(|err| GithubError::RequestFailed {
            url: url.clone(),
            method: method.to_string(),
            reason: err.to_string(),
        })?;

        if text.is_empty() {
            return Ok(None);
        }

        let value = serde_json::from_str(&text)?;
        Ok(Some(value))
    }

    /// All releases of the repository, paged at 100 per request.
    pub fn releases(&self) -> Result<Vec<Value>> {
        let mut releases = Vec::new();
        let mut page = 1;

        loop {
            let api = format!(
                "releases?per_page={}&page={}",
                RELEASES_CHUNK_SIZE, page
            );
            let chunk = match self.request(Method::GET, &api, None)? {
                Some(Value::Array(chunk)) => chunk,
                _ => Vec::new(),
            };

            let chunk_len = chunk.len();
            releases.extend(chunk);

            if chunk_len < RELEASES_CHUNK_SIZE {
                break;
            }
            page += 1;
        }

        Ok(releases)
    }

    /// Delete every release marked as a draft.
    pub fn delete_draft_releases(&self) -> Result<()> {
        for release in self.releases()? {
            if release["draft"].as_bool() != Some(true) {
                continue;
            }

            if let Some(id) = release["id"].as_u64() {
                info!(id, "deleting draft release");
                self.request(Method::DELETE, &format!("releases/{id}"), None)?;
            }
        }

        Ok(())
    }

    /// Create a release for the upcoming version.
    ///
    /// The tag is the suggested future version with a `v` prefix; the body
    /// is the rendered release notes of the unreleased block.
    pub fn create_release(&self, changelog: &Changelog, draft: bool) -> Result<()> {
        let version = format!("v{}", changelog.suggest_future_version()?);
        let body = release_notes(changelog.get(UNRELEASED)?);

        info!(%version, draft, "creating GitHub release");
        self.request(
            Method::POST,
            "releases",
            Some(json!({
                "tag_name": version,
                "name": format!("Release {version}"),
                "draft": draft,
                "body": body,
            })),
        )?;

        Ok(())
    }
}
