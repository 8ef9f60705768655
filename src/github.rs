use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::json;
use tracing::warn;

use crate::{
    constants::{DEFAULT_GITHUB_API, DEFAULT_GITHUB_REST_API, DEFAULT_GITHUB_RETRY_DELAY_MS},
    error::ServiceError,
    models::{LangsUser, StatsUser, TopLanguages, UserStats},
};

const QUERY_USER_STATS: &str = r#"
query userInfo($login: String!, $includeMergedPullRequests: Boolean!, $includeDiscussions: Boolean!, $includeDiscussionsAnswers: Boolean!) {
  user(login: $login) {
    name
    login
    contributionsCollection {
      totalCommitContributions
      totalPullRequestReviewContributions
    }
    repositoriesContributedTo(first: 1, contributionTypes: [COMMIT, ISSUE, PULL_REQUEST, REPOSITORY]) {
      totalCount
    }
    pullRequests(first: 1) {
      totalCount
    }
    mergedPullRequests: pullRequests(states: MERGED, first: 1) @include(if: $includeMergedPullRequests) {
      totalCount
    }
    openIssues: issues(states: OPEN) {
      totalCount
    }
    closedIssues: issues(states: CLOSED) {
      totalCount
    }
    followers(first: 1) {
      totalCount
    }
    repositoryDiscussions @include(if: $includeDiscussions) {
      totalCount
    }
    repositoryDiscussionComments(onlyAnswers: true) @include(if: $includeDiscussionsAnswers) {
      totalCount
    }
    repositories(first: 100, ownerAffiliations: OWNER, orderBy: {direction: DESC, field: STARGAZERS}) {
      nodes {
        name
        stargazers {
          totalCount
        }
      }
    }
  }
}
"#;

const QUERY_TOP_LANGUAGES: &str = r#"
query userInfo($login: String!) {
  user(login: $login) {
    repositories(first: 100, ownerAffiliations: OWNER, isFork: false) {
      nodes {
        name
        languages(first: 10, orderBy: {field: SIZE, direction: DESC}) {
          edges {
            size
            node {
              color
              name
            }
          }
        }
      }
    }
  }
}
"#;

#[derive(Debug, Clone, Default)]
pub struct StatsFetchOptions {
    pub include_all_commits: bool,
    pub include_merged_prs: bool,
    pub include_discussions: bool,
    pub include_discussions_answers: bool,
}

#[derive(Clone)]
pub struct GithubClient {
    http_client: reqwest::Client,
    graphql_api: String,
    rest_api: String,
    tokens: Vec<String>,
}

impl GithubClient {
    pub fn new(
        graphql_api: Option<String>,
        rest_api: Option<String>,
        tokens: Vec<String>,
    ) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("github-readme-stats-rs"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .pool_max_idle_per_host(16)
            .pool_idle_timeout(Duration::from_secs(90))
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(20))
            .build()?;

        Ok(Self {
            http_client,
            graphql_api: graphql_api.unwrap_or_else(|| DEFAULT_GITHUB_API.to_string()),
            rest_api: rest_api.unwrap_or_else(|| DEFAULT_GITHUB_REST_API.to_string()),
            tokens,
        })
    }

    pub async fn fetch_stats(
        &self,
        username: &str,
        exclude_repo: &[String],
        options: &StatsFetchOptions,
    ) -> Result<UserStats, ServiceError> {
        require_username(username)?;

        let payload = json!({
            "query": QUERY_USER_STATS,
            "variables": {
                "login": username,
                "includeMergedPullRequests": options.include_merged_prs,
                "includeDiscussions": options.include_discussions,
                "includeDiscussionsAnswers": options.include_discussions_answers,
            }
        });

        let user: StatsUser = self.execute_payload(&payload).await?;

        // The contribution calendar only counts the last year; the search
        // API gives the lifetime total. A failure here degrades to the
        // calendar count instead of failing the card.
        let total_commits_override = if options.include_all_commits {
            match self.total_commits(username).await {
                Ok(count) => Some(count),
                Err(err) => {
                    warn!("total commit count fallback for username='{username}': {err}");
                    None
                }
            }
        } else {
            None
        };

        Ok(UserStats::from_parts(
            user,
            total_commits_override,
            exclude_repo,
            options.include_all_commits,
        ))
    }

    pub async fn fetch_top_languages(
        &self,
        username: &str,
        exclude_repo: &[String],
        size_weight: f64,
        count_weight: f64,
    ) -> Result<TopLanguages, ServiceError> {
        require_username(username)?;

        let payload = json!({
            "query": QUERY_TOP_LANGUAGES,
            "variables": {
                "login": username,
            }
        });

        let user: LangsUser = self.execute_payload(&payload).await?;

        Ok(TopLanguages::from_repositories(
            user,
            exclude_repo,
            size_weight,
            count_weight,
        ))
    }

    async fn total_commits(&self, username: &str) -> Result<i64, ServiceError> {
        let url = format!("{}/search/commits?q=author:{username}", self.rest_api);

        let mut request = self
            .http_client
            .get(&url)
            .header(ACCEPT, "application/vnd.github.cloak-preview+json");

        if let Some(token) = self.tokens.first() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let body: CommitSearchResponse = response.json().await?;

        Ok(body.total_count)
    }

    async fn execute_payload<T: DeserializeOwned>(
        &self,
        payload: &serde_json::Value,
    ) -> Result<T, ServiceError> {
        let attempts = self.tokens.len().max(1);
        let mut last_error = ServiceError::UserNotFound;

        for attempt in 0..attempts {
            let token = self
                .tokens
                .get(attempt)
                .map(String::as_str)
                .unwrap_or_default();

            match self.execute_query_once::<T>(payload, token).await {
                Ok(response) => return Ok(response),
                // A missing user will stay missing; rotating tokens only
                // helps against rate limits and transient failures.
                Err(err @ ServiceError::UserNotFound) => return Err(err),
                Err(err) => {
                    last_error = err;

                    if attempt + 1 < attempts {
                        tokio::time::sleep(Duration::from_millis(DEFAULT_GITHUB_RETRY_DELAY_MS))
                            .await;
                    }
                }
            }
        }

        Err(last_error)
    }

    async fn execute_query_once<T: DeserializeOwned>(
        &self,
        payload: &serde_json::Value,
        token: &str,
    ) -> Result<T, ServiceError> {
        let mut request = self.http_client.post(&self.graphql_api).json(payload);

        if !token.is_empty() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let body: GraphqlResponse<T> = response
            .json()
            .await
            .map_err(|err| ServiceError::Network(err.to_string()))?;

        if body.is_rate_limited() {
            return Err(ServiceError::RateLimit);
        }

        if let Some(data) = body.data
            && let Some(user) = data.user
        {
            return Ok(user);
        }

        match body.errors.into_iter().next() {
            Some(error) if error.r#type.eq_ignore_ascii_case("NOT_FOUND") => {
                Err(ServiceError::UserNotFound)
            }
            Some(error) => Err(ServiceError::Graphql(error.message)),
            None => Err(ServiceError::UserNotFound),
        }
    }
}

fn require_username(username: &str) -> Result<(), ServiceError> {
    if username.trim().is_empty() {
        return Err(ServiceError::MissingParam("username"));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse<T> {
    data: Option<GraphqlData<T>>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GraphqlData<T> {
    user: Option<T>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    #[serde(default)]
    r#type: String,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct CommitSearchResponse {
    total_count: i64,
}

impl<T> GraphqlResponse<T> {
    fn is_rate_limited(&self) -> bool {
        self.message
            .as_ref()
            .map(|message| message.to_ascii_lowercase().contains("rate limit"))
            .unwrap_or(false)
            || self.errors.iter().any(|error| {
                error.r#type.to_ascii_uppercase().contains("RATE_LIMIT")
                    || error.message.to_ascii_lowercase().contains("rate limit")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::{GraphqlError, GraphqlResponse, require_username};
    use crate::error::ServiceError;

    #[test]
    fn empty_username_fails_before_any_network_call() {
        assert!(matches!(
            require_username("  "),
            Err(ServiceError::MissingParam("username"))
        ));
        assert!(require_username("octocat").is_ok());
    }

    #[test]
    fn rate_limit_detection_covers_both_error_shapes() {
        let by_message: GraphqlResponse<()> = GraphqlResponse {
            data: None,
            errors: Vec::new(),
            message: Some("API rate limit exceeded".to_string()),
        };
        assert!(by_message.is_rate_limited());

        let by_error_type: GraphqlResponse<()> = GraphqlResponse {
            data: None,
            errors: vec![GraphqlError {
                r#type: "RATE_LIMITED".to_string(),
                message: String::new(),
            }],
            message: None,
        };
        assert!(by_error_type.is_rate_limited());
    }
}
