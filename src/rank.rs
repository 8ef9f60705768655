// Percentile rank over six activity measures, weighted against fixed
// medians. Commit-like counts follow an exponential distribution, stars and
// followers a heavier-tailed log-normal approximation.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rank {
    pub level: &'static str,
    pub percentile: f64,
}

const COMMITS_WEIGHT: f64 = 2.0;
const PRS_WEIGHT: f64 = 3.0;
const ISSUES_WEIGHT: f64 = 1.0;
const REVIEWS_WEIGHT: f64 = 1.0;
const STARS_WEIGHT: f64 = 4.0;
const FOLLOWERS_WEIGHT: f64 = 1.0;

const PRS_MEDIAN: f64 = 50.0;
const ISSUES_MEDIAN: f64 = 25.0;
const REVIEWS_MEDIAN: f64 = 2.0;
const STARS_MEDIAN: f64 = 50.0;
const FOLLOWERS_MEDIAN: f64 = 10.0;

const THRESHOLDS: &[(f64, &str)] = &[
    (1.0, "S"),
    (12.5, "A+"),
    (25.0, "A"),
    (37.5, "A-"),
    (50.0, "B+"),
    (62.5, "B"),
    (75.0, "B-"),
    (87.5, "C+"),
    (100.0, "C"),
];

fn exponential_cdf(x: f64) -> f64 {
    1.0 - 2f64.powf(-x)
}

fn log_normal_cdf(x: f64) -> f64 {
    x / (1.0 + x)
}

#[allow(clippy::too_many_arguments)]
pub fn calculate_rank(
    all_commits: bool,
    commits: i64,
    prs: i64,
    issues: i64,
    reviews: i64,
    stars: i64,
    followers: i64,
) -> Rank {
    let commits_median = if all_commits { 1000.0 } else { 250.0 };
    let total_weight = COMMITS_WEIGHT
        + PRS_WEIGHT
        + ISSUES_WEIGHT
        + REVIEWS_WEIGHT
        + STARS_WEIGHT
        + FOLLOWERS_WEIGHT;

    let score = (COMMITS_WEIGHT * exponential_cdf(commits as f64 / commits_median)
        + PRS_WEIGHT * exponential_cdf(prs as f64 / PRS_MEDIAN)
        + ISSUES_WEIGHT * exponential_cdf(issues as f64 / ISSUES_MEDIAN)
        + REVIEWS_WEIGHT * exponential_cdf(reviews as f64 / REVIEWS_MEDIAN)
        + STARS_WEIGHT * log_normal_cdf(stars as f64 / STARS_MEDIAN)
        + FOLLOWERS_WEIGHT * log_normal_cdf(followers as f64 / FOLLOWERS_MEDIAN))
        / total_weight;

    let percentile = (1.0 - score) * 100.0;
    let level = THRESHOLDS
        .iter()
        .find(|(threshold, _)| percentile <= *threshold)
        .map(|(_, level)| *level)
        .unwrap_or("C");

    Rank { level, percentile }
}

#[cfg(test)]
mod tests {
    use super::calculate_rank;

    #[test]
    fn zero_activity_is_bottom_of_the_scale() {
        let rank = calculate_rank(false, 0, 0, 0, 0, 0, 0);
        assert_eq!(rank.level, "C");
        assert!((rank.percentile - 100.0).abs() < 1e-9);
    }

    #[test]
    fn heavy_activity_reaches_the_top_levels() {
        let rank = calculate_rank(false, 10_000, 1_000, 500, 100, 100_000, 10_000);
        assert!(rank.percentile < 12.5, "percentile {}", rank.percentile);
        assert!(matches!(rank.level, "S" | "A+"));
    }

    #[test]
    fn percentile_decreases_monotonically_with_activity() {
        let low = calculate_rank(false, 10, 1, 1, 0, 5, 2);
        let high = calculate_rank(false, 500, 100, 50, 10, 500, 100);
        assert!(high.percentile < low.percentile);
    }

    #[test]
    fn all_commits_mode_raises_the_commit_median() {
        let counted = calculate_rank(false, 500, 0, 0, 0, 0, 0);
        let all = calculate_rank(true, 500, 0, 0, 0, 0, 0);
        assert!(all.percentile > counted.percentile);
    }
}
