use std::collections::{HashMap, HashSet};

use serde::Deserialize;

use crate::rank::{Rank, calculate_rank};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalCount {
    pub total_count: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionsCollection {
    pub total_commit_contributions: i64,
    pub total_pull_request_review_contributions: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsUser {
    pub name: Option<String>,
    pub login: String,
    pub contributions_collection: ContributionsCollection,
    pub repositories_contributed_to: TotalCount,
    pub pull_requests: TotalCount,
    // Present only when the matching @include flag was set on the query.
    #[serde(default)]
    pub merged_pull_requests: Option<TotalCount>,
    pub open_issues: TotalCount,
    pub closed_issues: TotalCount,
    pub followers: TotalCount,
    #[serde(default)]
    pub repository_discussions: Option<TotalCount>,
    #[serde(default)]
    pub repository_discussion_comments: Option<TotalCount>,
    pub repositories: StatsRepositories,
}

#[derive(Debug, Deserialize)]
pub struct StatsRepositories {
    pub nodes: Vec<Option<StatsRepositoryNode>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsRepositoryNode {
    pub name: String,
    pub stargazers: TotalCount,
}

#[derive(Debug, Clone)]
pub struct UserStats {
    pub name: String,
    pub total_stars: i64,
    pub total_commits: i64,
    pub total_prs: i64,
    pub total_prs_merged: i64,
    pub merged_prs_percentage: f64,
    pub total_reviews: i64,
    pub total_issues: i64,
    pub total_discussions_started: i64,
    pub total_discussions_answered: i64,
    pub contributed_to: i64,
    pub rank: Rank,
}

impl UserStats {
    pub fn from_parts(
        user: StatsUser,
        total_commits_override: Option<i64>,
        exclude_repo: &[String],
        all_commits: bool,
    ) -> Self {
        let excluded: HashSet<&str> = exclude_repo.iter().map(String::as_str).collect();

        let total_stars = user
            .repositories
            .nodes
            .iter()
            .flatten()
            .filter(|repo| !excluded.contains(repo.name.as_str()))
            .map(|repo| repo.stargazers.total_count)
            .sum();

        let total_commits = total_commits_override
            .unwrap_or(user.contributions_collection.total_commit_contributions);

        let total_prs = user.pull_requests.total_count;
        let total_prs_merged = user
            .merged_pull_requests
            .map(|count| count.total_count)
            .unwrap_or(0);
        let merged_prs_percentage = if total_prs > 0 {
            total_prs_merged as f64 / total_prs as f64 * 100.0
        } else {
            0.0
        };

        let total_issues = user.open_issues.total_count + user.closed_issues.total_count;
        let total_reviews = user
            .contributions_collection
            .total_pull_request_review_contributions;
        let followers = user.followers.total_count;

        let rank = calculate_rank(
            all_commits,
            total_commits,
            total_prs,
            total_issues,
            total_reviews,
            total_stars,
            followers,
        );

        Self {
            name: user.name.unwrap_or(user.login),
            total_stars,
            total_commits,
            total_prs,
            total_prs_merged,
            merged_prs_percentage,
            total_reviews,
            total_issues,
            total_discussions_started: user
                .repository_discussions
                .map(|count| count.total_count)
                .unwrap_or(0),
            total_discussions_answered: user
                .repository_discussion_comments
                .map(|count| count.total_count)
                .unwrap_or(0),
            contributed_to: user.repositories_contributed_to.total_count,
            rank,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LangsUser {
    pub repositories: LangsRepositories,
}

#[derive(Debug, Deserialize)]
pub struct LangsRepositories {
    pub nodes: Vec<Option<LangsRepositoryNode>>,
}

#[derive(Debug, Deserialize)]
pub struct LangsRepositoryNode {
    pub name: String,
    pub languages: LanguageConnection,
}

#[derive(Debug, Deserialize)]
pub struct LanguageConnection {
    pub edges: Vec<LanguageEdge>,
}

#[derive(Debug, Deserialize)]
pub struct LanguageEdge {
    pub size: i64,
    pub node: LanguageNode,
}

#[derive(Debug, Deserialize)]
pub struct LanguageNode {
    pub name: String,
    pub color: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LanguageStat {
    pub name: String,
    pub color: Option<String>,
    pub size: f64,
}

#[derive(Debug, Clone)]
pub struct TopLanguages {
    pub langs: Vec<LanguageStat>,
}

impl TopLanguages {
    pub fn from_repositories(
        user: LangsUser,
        exclude_repo: &[String],
        size_weight: f64,
        count_weight: f64,
    ) -> Self {
        let excluded: HashSet<&str> = exclude_repo.iter().map(String::as_str).collect();
        let mut totals: HashMap<String, (f64, i64, Option<String>)> = HashMap::new();

        for repo in user.repositories.nodes.iter().flatten() {
            if excluded.contains(repo.name.as_str()) {
                continue;
            }

            for edge in &repo.languages.edges {
                let entry = totals
                    .entry(edge.node.name.clone())
                    .or_insert((0.0, 0, edge.node.color.clone()));
                entry.0 += edge.size as f64;
                entry.1 += 1;
            }
        }

        let mut langs: Vec<LanguageStat> = totals
            .into_iter()
            .map(|(name, (size, count, color))| LanguageStat {
                name,
                color,
                // Weighted ranking: byte size tempered against the number of
                // repositories the language appears in.
                size: size.powf(size_weight) * (count as f64).powf(count_weight),
            })
            .collect();

        langs.sort_by(|a, b| {
            b.size
                .partial_cmp(&a.size)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name))
        });

        Self { langs }
    }

}

#[cfg(test)]
mod tests {
    use super::{
        ContributionsCollection, LangsRepositories, LangsRepositoryNode, LanguageConnection,
        LanguageEdge, LanguageNode, LangsUser, StatsRepositories, StatsRepositoryNode, StatsUser,
        TopLanguages, TotalCount, UserStats,
    };

    fn repo(name: &str, stars: i64) -> Option<StatsRepositoryNode> {
        Some(StatsRepositoryNode {
            name: name.to_string(),
            stargazers: TotalCount { total_count: stars },
        })
    }

    fn stats_user() -> StatsUser {
        StatsUser {
            name: Some("The Octocat".to_string()),
            login: "octocat".to_string(),
            contributions_collection: ContributionsCollection {
                total_commit_contributions: 400,
                total_pull_request_review_contributions: 12,
            },
            repositories_contributed_to: TotalCount { total_count: 7 },
            pull_requests: TotalCount { total_count: 80 },
            merged_pull_requests: Some(TotalCount { total_count: 60 }),
            open_issues: TotalCount { total_count: 5 },
            closed_issues: TotalCount { total_count: 15 },
            followers: TotalCount { total_count: 300 },
            repository_discussions: None,
            repository_discussion_comments: None,
            repositories: StatsRepositories {
                nodes: vec![repo("hello-world", 100), repo("spoon-knife", 40), None],
            },
        }
    }

    #[test]
    fn stars_sum_skips_excluded_repositories() {
        let stats =
            UserStats::from_parts(stats_user(), None, &["spoon-knife".to_string()], false);
        assert_eq!(stats.total_stars, 100);
    }

    #[test]
    fn commit_override_replaces_contribution_count() {
        let stats = UserStats::from_parts(stats_user(), Some(12_345), &[], true);
        assert_eq!(stats.total_commits, 12_345);
    }

    #[test]
    fn merged_percentage_handles_zero_prs() {
        let mut user = stats_user();
        user.pull_requests = TotalCount { total_count: 0 };
        user.merged_pull_requests = None;
        let stats = UserStats::from_parts(user, None, &[], false);
        assert_eq!(stats.merged_prs_percentage, 0.0);
    }

    #[test]
    fn display_name_falls_back_to_login() {
        let mut user = stats_user();
        user.name = None;
        let stats = UserStats::from_parts(user, None, &[], false);
        assert_eq!(stats.name, "octocat");
    }

    fn lang_repo(name: &str, langs: &[(&str, i64)]) -> Option<LangsRepositoryNode> {
        Some(LangsRepositoryNode {
            name: name.to_string(),
            languages: LanguageConnection {
                edges: langs
                    .iter()
                    .map(|(lang, size)| LanguageEdge {
                        size: *size,
                        node: LanguageNode {
                            name: lang.to_string(),
                            color: Some("#123456".to_string()),
                        },
                    })
                    .collect(),
            },
        })
    }

    fn langs_user() -> LangsUser {
        LangsUser {
            repositories: LangsRepositories {
                nodes: vec![
                    lang_repo("a", &[("Rust", 9_000), ("Shell", 500)]),
                    lang_repo("b", &[("Rust", 1_000), ("Python", 4_000)]),
                    None,
                ],
            },
        }
    }

    #[test]
    fn languages_aggregate_and_sort_by_size() {
        let top = TopLanguages::from_repositories(langs_user(), &[], 1.0, 0.0);
        let names: Vec<&str> = top.langs.iter().map(|lang| lang.name.as_str()).collect();
        assert_eq!(names, vec!["Rust", "Python", "Shell"]);
        assert_eq!(top.langs[0].size, 10_000.0);
    }

    #[test]
    fn excluded_repository_does_not_contribute() {
        let top = TopLanguages::from_repositories(langs_user(), &["a".to_string()], 1.0, 0.0);
        let names: Vec<&str> = top.langs.iter().map(|lang| lang.name.as_str()).collect();
        assert_eq!(names, vec!["Python", "Rust"]);
    }

    #[test]
    fn count_weight_favors_recurring_languages() {
        // Pure count ranking: Rust appears in two repos, the others in one.
        let top = TopLanguages::from_repositories(langs_user(), &[], 0.0, 1.0);
        assert_eq!(top.langs[0].name, "Rust");
        assert_eq!(top.langs[0].size, 2.0);
    }
}
