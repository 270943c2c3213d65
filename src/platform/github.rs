//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::{PAGE_SIZE, PlatformService};
use crate::types::{PrState, PullRequest, PullRequestDetails, RepoConfig, StatusEntry};
use async_trait::async_trait;
use octocrab::Octocrab;
use octocrab::params::{Direction, State, pulls::Sort};
use reqwest::Client;
use tracing::debug;

/// GitHub service using octocrab
pub struct GitHubService {
    client: Octocrab,
    config: RepoConfig,
    /// Token for raw HTTP requests (commit status feed)
    token: String,
    /// HTTP client for raw requests (commit status feed)
    http_client: Client,
    /// API base URL, without trailing slash
    api_base: String,
}

impl GitHubService {
    /// Create a new GitHub service for github.com or an Enterprise host
    pub fn new(token: &str, config: RepoConfig) -> Result<Self> {
        let api_base = config.host.as_ref().map_or_else(
            || "https://api.github.com".to_string(),
            |h| format!("https://{h}/api/v3"),
        );
        Self::with_api_base(token, config, &api_base)
    }

    /// Create a GitHub service talking to an explicit API base URL
    pub fn with_api_base(token: &str, config: RepoConfig, api_base: &str) -> Result<Self> {
        let api_base = api_base.trim_end_matches('/').to_string();

        let client = Octocrab::builder()
            .personal_token(token.to_string())
            .base_uri(api_base.as_str())
            .map_err(|e| Error::GitHubApi(e.to_string()))?
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        let http_client = Client::builder()
            .user_agent(concat!("pr-ci-watch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::GitHubApi(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config,
            token: token.to_string(),
            http_client,
            api_base,
        })
    }

    /// Fetch one page of the commit status feed
    async fn fetch_status_page(&self, ref_name: &str, page: u32) -> Result<Vec<StatusEntry>> {
        let url = format!(
            "{}/repos/{}/{}/commits/{}/statuses",
            self.api_base, self.config.owner, self.config.repo, ref_name
        );

        let response = self
            .http_client
            .get(&url)
            .query(&[("per_page", u32::from(PAGE_SIZE)), ("page", page)])
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to fetch commit statuses: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::GitHubApi(format!(
                "commit statuses for {ref_name} returned {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to parse commit statuses: {e}")))
    }
}

/// Helper to convert octocrab PR to our `PullRequest` type
///
/// Deleted ("ghost") authors come back without a user and map to an empty
/// login, which never matches a watched author.
fn pr_from_octocrab(pr: &octocrab::models::pulls::PullRequest) -> Result<PullRequest> {
    let created_at = pr
        .created_at
        .ok_or_else(|| Error::GitHubApi(format!("PR #{} has no creation time", pr.number)))?;
    Ok(PullRequest {
        number: pr.number,
        author: pr.user.as_ref().map(|u| u.login.clone()).unwrap_or_default(),
        created_at,
        head_sha: pr.head.sha.clone(),
        title: pr.title.as_deref().unwrap_or_default().to_string(),
        merged: pr.merged.unwrap_or(false) || pr.merged_at.is_some(),
    })
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn list_open_prs(&self, page: u32, per_page: u8) -> Result<Vec<PullRequest>> {
        debug!(page, per_page, "listing open PRs");

        let prs = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .list()
            .state(State::Open)
            .sort(Sort::Created)
            .direction(Direction::Descending)
            .per_page(per_page)
            .page(page)
            .send()
            .await?;

        let result = prs
            .items
            .iter()
            .map(pr_from_octocrab)
            .collect::<Result<Vec<_>>>()?;

        debug!(page, count = result.len(), "listed open PRs");
        Ok(result)
    }

    async fn get_pr_details(&self, pr_number: u64) -> Result<PullRequestDetails> {
        debug!(pr_number, "getting PR details");

        let pr = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .get(pr_number)
            .await?;

        let merged = pr.merged.unwrap_or(false) || pr.merged_at.is_some();
        let state = match pr.state {
            Some(octocrab::models::IssueState::Open) => PrState::Open,
            _ if merged => PrState::Merged,
            // IssueState is non-exhaustive, so use wildcard for Closed and any future variants
            Some(_) | None => PrState::Closed,
        };

        let details = PullRequestDetails {
            number: pr.number,
            title: pr.title.clone().unwrap_or_default(),
            state,
            merged,
            head_sha: pr.head.sha.clone(),
        };

        debug!(pr_number, state = %details.state, merged, "got PR details");
        Ok(details)
    }

    async fn list_commit_statuses(&self, ref_name: &str) -> Result<Vec<StatusEntry>> {
        debug!(ref_name, "listing commit statuses");

        let mut all = Vec::new();
        let mut page = 1;
        loop {
            let entries = self.fetch_status_page(ref_name, page).await?;
            let count = entries.len();
            all.extend(entries);
            if count < usize::from(PAGE_SIZE) {
                break;
            }
            page += 1;
        }

        debug!(ref_name, count = all.len(), "listed commit statuses");
        Ok(all)
    }

    fn config(&self) -> &RepoConfig {
        &self.config
    }
}
