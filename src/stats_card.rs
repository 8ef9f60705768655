use std::f64::consts::PI;
use std::fmt::Write;

use chrono::{Datelike, Utc};

use crate::{
    card::{Card, k_formatter},
    locales::LocaleCatalog,
    models::UserStats,
    params::ParsedParams,
    themes::{ColorOverrides, card_colors},
};

const DEFAULT_LINE_HEIGHT: i32 = 25;
const RANK_CIRCLE_RADIUS: f64 = 40.0;

#[derive(Debug, Default, Clone)]
pub struct StatsCardOptions {
    pub hide: Vec<String>,
    pub show: Vec<String>,
    pub show_icons: bool,
    pub hide_title: bool,
    pub hide_border: bool,
    pub hide_rank: bool,
    pub include_all_commits: bool,
    pub card_width: Option<i32>,
    pub line_height: Option<i32>,
    pub text_bold: Option<bool>,
    pub custom_title: Option<String>,
    pub border_radius: Option<f64>,
    pub number_format: Option<String>,
    pub locale: Option<String>,
    pub disable_animations: bool,
    pub rank_icon: Option<String>,
    pub colors: ColorOverrides,
}

impl StatsCardOptions {
    pub fn from_params(params: &ParsedParams) -> Self {
        Self {
            hide: params.get_all_csv("hide"),
            show: params.get_all_csv("show"),
            show_icons: params.get_boolean_value("show_icons").unwrap_or(false),
            hide_title: params.get_boolean_value("hide_title").unwrap_or(false),
            hide_border: params.get_boolean_value("hide_border").unwrap_or(false),
            hide_rank: params.get_boolean_value("hide_rank").unwrap_or(false),
            include_all_commits: params
                .get_boolean_value("include_all_commits")
                .unwrap_or(false),
            card_width: params.get_number_value("card_width"),
            line_height: params.get_number_value("line_height"),
            text_bold: params.get_boolean_value("text_bold"),
            custom_title: params.get_optional_string("custom_title"),
            border_radius: params.get_float_value("border_radius"),
            number_format: params.get_optional_string("number_format"),
            locale: params.get_locale("locale"),
            disable_animations: params.get_boolean_value("disable_animations").unwrap_or(false),
            rank_icon: params.get_optional_string("rank_icon"),
            colors: ColorOverrides {
                title_color: params.get_optional_string("title_color"),
                ring_color: params.get_optional_string("ring_color"),
                icon_color: params.get_optional_string("icon_color"),
                text_color: params.get_optional_string("text_color"),
                bg_color: params.get_optional_string("bg_color"),
                border_color: params.get_optional_string("border_color"),
                theme: params.get_optional_string("theme"),
            },
        }
    }
}

struct StatRow {
    key: &'static str,
    label: String,
    value: String,
    icon: &'static str,
}

const ICON_STAR: &str = "M8 .25a.75.75 0 01.673.418l1.882 3.815 4.21.612a.75.75 0 01.416 1.279l-3.046 2.97.719 4.192a.75.75 0 01-1.088.791L8 12.347l-3.766 1.98a.75.75 0 01-1.088-.79l.72-4.194L.818 6.374a.75.75 0 01.416-1.28l4.21-.611L7.327.668A.75.75 0 018 .25z";
const ICON_COMMITS: &str = "M1.643 3.143L.427 1.927A.25.25 0 000 2.104V5.75c0 .138.112.25.25.25h3.646a.25.25 0 00.177-.427L2.715 4.215a6.5 6.5 0 11-1.18 4.458.75.75 0 10-1.493.154 8.001 8.001 0 101.6-5.684zM7.75 4a.75.75 0 01.75.75v2.992l2.028.812a.75.75 0 01-.557 1.392l-2.5-1A.75.75 0 017 8.25v-3.5A.75.75 0 017.75 4z";
const ICON_PRS: &str = "M7.177 3.073L9.573.677A.25.25 0 0110 .854v4.792a.25.25 0 01-.427.177L7.177 3.427a.25.25 0 010-.354zM3.75 2.5a.75.75 0 100 1.5.75.75 0 000-1.5zm-2.25.75a2.25 2.25 0 113 2.122v5.256a2.251 2.251 0 11-1.5 0V5.372A2.25 2.25 0 011.5 3.25zM11 2.5h-1V4h1a1 1 0 011 1v5.628a2.251 2.251 0 101.5 0V5A2.5 2.5 0 0011 2.5zm1 10.25a.75.75 0 111.5 0 .75.75 0 01-1.5 0zM3.75 12a.75.75 0 100 1.5.75.75 0 000-1.5z";
const ICON_ISSUES: &str = "M8 9.5a1.5 1.5 0 100-3 1.5 1.5 0 000 3zM8 0a8 8 0 100 16A8 8 0 008 0zM1.5 8a6.5 6.5 0 1113 0 6.5 6.5 0 01-13 0z";
const ICON_CONTRIBS: &str = "M1.5 8a6.5 6.5 0 0113 0 .75.75 0 001.5 0 8 8 0 10-8 8 .75.75 0 000-1.5A6.5 6.5 0 011.5 8zM8 6.5a1.5 1.5 0 100 3 1.5 1.5 0 000-3z";
const ICON_REVIEWS: &str = "M1.679 7.932c.412-.621 1.242-1.75 2.366-2.717C5.175 4.242 6.527 3.5 8 3.5c1.473 0 2.824.742 3.955 1.715 1.124.967 1.954 2.096 2.366 2.717a.119.119 0 010 .136c-.412.621-1.242 1.75-2.366 2.717C10.825 11.758 9.473 12.5 8 12.5c-1.473 0-2.824-.742-3.955-1.715C2.92 9.818 2.09 8.69 1.679 8.068a.119.119 0 010-.136z";
const ICON_DISCUSSIONS: &str = "M1.75 1A1.75 1.75 0 000 2.75v9.5C0 13.216.784 14 1.75 14h3v1.543a1.457 1.457 0 002.487 1.03L9.22 14h4.03A1.75 1.75 0 0015 12.25v-9.5A1.75 1.75 0 0013.25 1H1.75z";
const ICON_MERGE: &str = "M5.45 5.154A4.25 4.25 0 009.25 7.5h1.378a2.251 2.251 0 110 1.5H9.25A5.734 5.734 0 015 7.123v3.505a2.25 2.25 0 11-1.5 0V5.372a2.25 2.25 0 111.95-.218z";

fn format_count(value: i64, number_format: Option<&str>) -> String {
    if number_format == Some("long") {
        value.to_string()
    } else {
        k_formatter(value)
    }
}

fn build_rows(stats: &UserStats, options: &StatsCardOptions) -> Vec<StatRow> {
    let format = options.number_format.as_deref();
    let mut rows = vec![
        StatRow {
            key: "stars",
            label: "Total Stars Earned".to_string(),
            value: format_count(stats.total_stars, format),
            icon: ICON_STAR,
        },
        StatRow {
            key: "commits",
            label: if options.include_all_commits {
                "Total Commits".to_string()
            } else {
                format!("Total Commits ({})", Utc::now().year())
            },
            value: format_count(stats.total_commits, format),
            icon: ICON_COMMITS,
        },
        StatRow {
            key: "prs",
            label: "Total PRs".to_string(),
            value: format_count(stats.total_prs, format),
            icon: ICON_PRS,
        },
        StatRow {
            key: "issues",
            label: "Total Issues".to_string(),
            value: format_count(stats.total_issues, format),
            icon: ICON_ISSUES,
        },
        StatRow {
            key: "contribs",
            label: "Contributed to (last year)".to_string(),
            value: format_count(stats.contributed_to, format),
            icon: ICON_CONTRIBS,
        },
    ];

    for key in &options.show {
        let row = match key.as_str() {
            "prs_merged" => Some(StatRow {
                key: "prs_merged",
                label: "Total PRs Merged".to_string(),
                value: format_count(stats.total_prs_merged, format),
                icon: ICON_MERGE,
            }),
            "prs_merged_percentage" => Some(StatRow {
                key: "prs_merged_percentage",
                label: "Merged PRs Percentage".to_string(),
                value: format!("{:.2}%", stats.merged_prs_percentage),
                icon: ICON_MERGE,
            }),
            "reviews" => Some(StatRow {
                key: "reviews",
                label: "Total PRs Reviewed".to_string(),
                value: format_count(stats.total_reviews, format),
                icon: ICON_REVIEWS,
            }),
            "discussions_started" => Some(StatRow {
                key: "discussions_started",
                label: "Total Discussions Started".to_string(),
                value: format_count(stats.total_discussions_started, format),
                icon: ICON_DISCUSSIONS,
            }),
            "discussions_answered" => Some(StatRow {
                key: "discussions_answered",
                label: "Total Discussions Answered".to_string(),
                value: format_count(stats.total_discussions_answered, format),
                icon: ICON_DISCUSSIONS,
            }),
            _ => None,
        };

        if let Some(row) = row {
            rows.push(row);
        }
    }

    rows.retain(|row| !options.hide.iter().any(|hidden| hidden == row.key));
    rows
}

fn render_rank_circle(stats: &UserStats, options: &StatsCardOptions, x: i32, y: i32) -> String {
    let circumference = 2.0 * PI * RANK_CIRCLE_RADIUS;
    let target_offset = circumference * stats.rank.percentile / 100.0;

    let display = match options.rank_icon.as_deref() {
        Some("percentile") => format!(
            "<text x=\"-4\" y=\"3\" alignment-baseline=\"central\" dominant-baseline=\"central\" text-anchor=\"middle\" class=\"rank-text\">{:.0}<tspan class=\"rank-percentile-sign\">%</tspan></text>",
            stats.rank.percentile
        ),
        Some("github") => "<svg x=\"-14\" y=\"-14\" width=\"28\" height=\"28\" viewBox=\"0 0 16 16\"><path class=\"rank-github-icon\" d=\"M8 0c4.42 0 8 3.58 8 8a8.013 8.013 0 0 1-5.45 7.59c-.4.08-.55-.17-.55-.38 0-.27.01-1.13.01-2.2 0-.75-.25-1.23-.54-1.48 1.78-.2 3.65-.88 3.65-3.95 0-.88-.31-1.59-.82-2.15.08-.2.36-1.02-.08-2.12 0 0-.67-.22-2.2.82-.64-.18-1.32-.27-2-.27-.68 0-1.36.09-2 .27-1.53-1.03-2.2-.82-2.2-.82-.44 1.1-.16 1.92-.08 2.12-.51.56-.82 1.28-.82 2.15 0 3.06 1.86 3.75 3.64 3.95-.23.2-.44.55-.51 1.07-.46.21-1.61.55-2.33-.66-.15-.24-.6-.83-1.23-.82-.67.01-.27.38.01.53.34.19.73.9.82 1.13.16.45.68 1.31 2.69.94 0 .67.01 1.3.01 1.49 0 .21-.15.45-.55.38A7.995 7.995 0 0 1 0 8c0-4.42 3.58-8 8-8Z\"/></svg>".to_string(),
        _ => format!(
            "<text x=\"-5\" y=\"3\" alignment-baseline=\"central\" dominant-baseline=\"central\" text-anchor=\"middle\" class=\"rank-text\">{}</text>",
            stats.rank.level
        ),
    };

    format!(
        "<g transform=\"translate({x}, {y})\">\n      <circle class=\"rank-circle-rim\" cx=\"0\" cy=\"0\" r=\"{RANK_CIRCLE_RADIUS}\"/>\n      <circle class=\"rank-circle\" cx=\"0\" cy=\"0\" r=\"{RANK_CIRCLE_RADIUS}\" stroke-dasharray=\"{circumference:.2}\" stroke-dashoffset=\"{target_offset:.2}\"/>\n      {display}\n    </g>"
    )
}

pub fn render_stats_card(
    stats: &UserStats,
    options: &StatsCardOptions,
    locales: &LocaleCatalog,
) -> String {
    let rows = build_rows(stats, options);
    let line_height = options.line_height.unwrap_or(DEFAULT_LINE_HEIGHT).max(15);

    let width = options
        .card_width
        .unwrap_or(if options.hide_rank { 287 } else { 450 })
        .max(if options.hide_rank { 270 } else { 340 });
    let height = (45 + (rows.len() as i32 + 1) * line_height)
        .max(if options.hide_rank { 0 } else { 195 });

    let label_x = if options.show_icons { 25 } else { 0 };
    let bold_weight = if options.text_bold.unwrap_or(true) { 600 } else { 400 };

    let mut body = String::with_capacity(rows.len() * 400);
    body.push_str("<g transform=\"translate(25, 0)\">\n");

    for (index, row) in rows.iter().enumerate() {
        let icon = if options.show_icons {
            format!(
                "<svg class=\"icon\" viewBox=\"0 0 16 16\" width=\"16\" height=\"16\"><path fill-rule=\"evenodd\" d=\"{}\"/></svg>\n        ",
                row.icon
            )
        } else {
            String::new()
        };

        let _ = write!(
            body,
            "      <g class=\"stagger\" style=\"animation-delay: {delay}ms\" transform=\"translate(0, {offset})\">\n        {icon}<text class=\"stat\" x=\"{label_x}\" y=\"12.5\">{label}:</text>\n        <text class=\"stat bold\" x=\"190\" y=\"12.5\">{value}</text>\n      </g>\n",
            delay = (index + 3) * 150,
            offset = index as i32 * line_height,
            label = row.label,
            value = row.value,
        );
    }

    body.push_str("    </g>");

    if !options.hide_rank {
        let circle = render_rank_circle(stats, options, width - 95, height / 2 - 55);
        body.push_str("\n    ");
        body.push_str(&circle);
    }

    let colors = card_colors(&options.colors);
    let css = format!(
        ".stat {{ font: 600 14px 'Segoe UI', Ubuntu, Sans-Serif; fill: #{text_color} }}\n    .stat.bold {{ font-weight: {bold_weight} }}\n    .icon {{ fill: #{icon_color} }}\n    .stagger {{ opacity: 0; animation: fadeInAnimation 0.3s ease-in-out forwards }}\n    .rank-text {{ font: 800 24px 'Segoe UI', Ubuntu, Sans-Serif; fill: #{text_color} }}\n    .rank-percentile-sign {{ font-size: 14px }}\n    .rank-github-icon {{ fill: #{ring_color} }}\n    .rank-circle-rim {{ stroke: #{ring_color}; fill: none; stroke-width: 6; opacity: 0.2 }}\n    .rank-circle {{ stroke: #{ring_color}; fill: none; stroke-width: 6; stroke-linecap: round; opacity: 0.8; transform: rotate(-90deg); animation: rankAnimation 1s forwards ease-in-out }}\n    @keyframes rankAnimation {{ from {{ stroke-dashoffset: 251.33 }} }}",
        text_color = colors.text_color,
        icon_color = colors.icon_color,
        ring_color = colors.ring_color,
    );

    let title = options
        .custom_title
        .clone()
        .unwrap_or_else(|| locales.stats_card_title(options.locale.as_deref(), &stats.name));

    let mut card = Card::new(width, height, options.border_radius, colors, title);
    card.hide_border = options.hide_border;
    card.hide_title = options.hide_title;
    card.disable_animations = options.disable_animations;
    card.css = css;

    card.render(&body)
}

#[cfg(test)]
mod tests {
    use super::{StatsCardOptions, render_stats_card};
    use crate::{
        locales::LocaleCatalog,
        models::{
            ContributionsCollection, StatsRepositories, StatsUser, TotalCount, UserStats,
        },
        params::ParsedParams,
    };

    fn stats() -> UserStats {
        UserStats::from_parts(
            StatsUser {
                name: Some("The Octocat".to_string()),
                login: "octocat".to_string(),
                contributions_collection: ContributionsCollection {
                    total_commit_contributions: 1200,
                    total_pull_request_review_contributions: 20,
                },
                repositories_contributed_to: TotalCount { total_count: 5 },
                pull_requests: TotalCount { total_count: 150 },
                merged_pull_requests: Some(TotalCount { total_count: 120 }),
                open_issues: TotalCount { total_count: 10 },
                closed_issues: TotalCount { total_count: 40 },
                followers: TotalCount { total_count: 500 },
                repository_discussions: None,
                repository_discussion_comments: None,
                repositories: StatsRepositories {
                    nodes: Vec::new(),
                },
            },
            None,
            &[],
            false,
        )
    }

    #[test]
    fn options_normalize_from_query() {
        let params = ParsedParams::from_raw(Some(
            "hide=stars,issues&show_icons=TRUE&card_width=abc&locale=FR&theme=dark&text_bold=false",
        ));
        let options = StatsCardOptions::from_params(&params);
        assert_eq!(options.hide, vec!["stars", "issues"]);
        assert!(options.show_icons);
        assert_eq!(options.card_width, None);
        assert_eq!(options.locale.as_deref(), Some("fr"));
        assert_eq!(options.colors.theme.as_deref(), Some("dark"));
        assert_eq!(options.text_bold, Some(false));
    }

    #[test]
    fn default_title_is_localized() {
        let options = StatsCardOptions::default();
        let svg = render_stats_card(&stats(), &options, &LocaleCatalog::bundled());
        assert!(svg.contains("The Octocat&#39;s GitHub Stats"));
        assert!(svg.contains("Total Stars Earned"));
        assert!(svg.contains("Total Commits ("));
    }

    #[test]
    fn custom_title_wins_over_locale() {
        let options = StatsCardOptions {
            custom_title: Some("My Numbers".to_string()),
            locale: Some("es".to_string()),
            ..StatsCardOptions::default()
        };
        let svg = render_stats_card(&stats(), &options, &LocaleCatalog::bundled());
        assert!(svg.contains("My Numbers"));
        assert!(!svg.contains("Estadísticas"));
    }

    #[test]
    fn hidden_rows_are_absent() {
        let options = StatsCardOptions {
            hide: vec!["stars".to_string(), "contribs".to_string()],
            ..StatsCardOptions::default()
        };
        let svg = render_stats_card(&stats(), &options, &LocaleCatalog::bundled());
        assert!(!svg.contains("Total Stars Earned"));
        assert!(!svg.contains("Contributed to"));
        assert!(svg.contains("Total PRs"));
    }

    #[test]
    fn show_extends_the_row_set() {
        let options = StatsCardOptions {
            show: vec!["prs_merged_percentage".to_string(), "reviews".to_string()],
            ..StatsCardOptions::default()
        };
        let svg = render_stats_card(&stats(), &options, &LocaleCatalog::bundled());
        assert!(svg.contains("Merged PRs Percentage"));
        assert!(svg.contains("80.00%"));
        assert!(svg.contains("Total PRs Reviewed"));
    }

    #[test]
    fn hide_rank_drops_the_ring() {
        let shown = render_stats_card(&stats(), &StatsCardOptions::default(), &LocaleCatalog::bundled());
        assert!(shown.contains("class=\"rank-circle\""));

        let options = StatsCardOptions {
            hide_rank: true,
            ..StatsCardOptions::default()
        };
        let hidden = render_stats_card(&stats(), &options, &LocaleCatalog::bundled());
        assert!(!hidden.contains("class=\"rank-circle\""));
    }

    #[test]
    fn long_number_format_disables_abbreviation() {
        let options = StatsCardOptions {
            number_format: Some("long".to_string()),
            ..StatsCardOptions::default()
        };
        let svg = render_stats_card(&stats(), &options, &LocaleCatalog::bundled());
        assert!(svg.contains(">1200<"));

        let short = render_stats_card(&stats(), &StatsCardOptions::default(), &LocaleCatalog::bundled());
        assert!(short.contains(">1.2k<"));
    }

    #[test]
    fn icons_render_only_when_requested() {
        let without = render_stats_card(&stats(), &StatsCardOptions::default(), &LocaleCatalog::bundled());
        assert!(!without.contains("class=\"icon\""));

        let options = StatsCardOptions {
            show_icons: true,
            ..StatsCardOptions::default()
        };
        let with = render_stats_card(&stats(), &options, &LocaleCatalog::bundled());
        assert!(with.contains("class=\"icon\""));
    }

    #[test]
    fn percentile_rank_icon_shows_a_number() {
        let options = StatsCardOptions {
            rank_icon: Some("percentile".to_string()),
            ..StatsCardOptions::default()
        };
        let svg = render_stats_card(&stats(), &options, &LocaleCatalog::bundled());
        assert!(svg.contains("rank-percentile-sign"));
    }
}
