//! Travis CI HTTP client.
//!
//! Wraps the Travis CI API v3 `builds` endpoint and implements
//! [`StatusProvider`] on top of it. Retries are left to the poller's next
//! tick; a failed request is reported once and the cache is not touched.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{BuildRecord, TravisConfig};
use crate::domain::ports::StatusProvider;

use super::models::TravisBuildsPage;

/// Header selecting the v3 API.
const API_VERSION: &str = "3";

const USER_AGENT: &str = "tilewatch";

/// Configuration for the Travis HTTP client
#[derive(Debug, Clone)]
pub struct TravisClientConfig {
    /// API root, e.g. `https://api.travis-ci.com`
    pub base_url: String,
    pub token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for TravisClientConfig {
    fn default() -> Self {
        Self::from(&TravisConfig::default())
    }
}

impl From<&TravisConfig> for TravisClientConfig {
    fn from(config: &TravisConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone().filter(|token| !token.is_empty()),
            timeout_secs: config.timeout_secs,
        }
    }
}

/// Client for the Travis CI API v3.
#[derive(Debug, Clone)]
pub struct TravisClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl TravisClient {
    pub fn new(config: TravisClientConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: config.base_url,
            token: config.token,
        })
    }

    /// `/repo/{group}%2F{repository}/builds`
    fn builds_url(&self, group: &str, repository: &str) -> String {
        format!("{}/repo/{}%2F{}/builds", self.base_url, group, repository)
    }
}

#[async_trait]
impl StatusProvider for TravisClient {
    #[tracing::instrument(skip(self), level = "debug")]
    async fn last_build(
        &self,
        group: &str,
        repository: &str,
        branch: &str,
    ) -> DomainResult<Option<BuildRecord>> {
        let mut request = self
            .http
            .get(self.builds_url(group, repository))
            .header("Travis-API-Version", API_VERSION)
            .query(&[
                ("branch.name", branch),
                ("limit", "1"),
                ("sort_by", "started_at:desc"),
                ("include", "build.created_by"),
            ]);
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("token {token}"));
        }

        let resp = request.send().await.map_err(|e| {
            DomainError::ProviderRequest(format!("Travis builds request failed: {e}"))
        })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => DomainError::ProviderAuth {
                    status: status.as_u16(),
                    body,
                },
                _ => DomainError::ProviderResponse {
                    status: status.as_u16(),
                    body,
                },
            });
        }

        let page = resp.json::<TravisBuildsPage>().await.map_err(|e| {
            DomainError::ProviderParse(format!("Travis builds parse failed: {e}"))
        })?;

        let build = page.builds.into_iter().next().map(BuildRecord::from);
        tracing::debug!(found = build.is_some(), "fetched latest build");
        Ok(build)
    }
}
