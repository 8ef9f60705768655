use std::f64::consts::PI;
use std::fmt::Write;

use crate::{
    card::{Card, encode_html},
    locales::LocaleCatalog,
    models::{LanguageStat, TopLanguages},
    params::ParsedParams,
    themes::{ColorOverrides, card_colors},
};

const DEFAULT_LANGS_COUNT: i32 = 5;
const MIN_LANGS_COUNT: i32 = 1;
const MAX_LANGS_COUNT: i32 = 20;
const DEFAULT_CARD_WIDTH: i32 = 300;
const MIN_CARD_WIDTH: i32 = 230;
const DEFAULT_LANG_COLOR: &str = "#858585";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Layout {
    #[default]
    Normal,
    Compact,
    Donut,
    DonutVertical,
    Pie,
}

impl Layout {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "normal" => Some(Self::Normal),
            "compact" => Some(Self::Compact),
            "donut" => Some(Self::Donut),
            "donut-vertical" => Some(Self::DonutVertical),
            "pie" => Some(Self::Pie),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct TopLangsOptions {
    pub hide: Vec<String>,
    pub hide_title: bool,
    pub hide_border: bool,
    pub hide_progress: bool,
    pub card_width: Option<i32>,
    pub layout: Layout,
    pub langs_count: Option<i32>,
    pub custom_title: Option<String>,
    pub locale: Option<String>,
    pub border_radius: Option<f64>,
    pub disable_animations: bool,
    pub colors: ColorOverrides,
}

impl TopLangsOptions {
    pub fn from_params(params: &ParsedParams) -> Self {
        Self {
            hide: params.get_all_csv("hide"),
            hide_title: params.get_boolean_value("hide_title").unwrap_or(false),
            hide_border: params.get_boolean_value("hide_border").unwrap_or(false),
            hide_progress: params.get_boolean_value("hide_progress").unwrap_or(false),
            card_width: params.get_number_value("card_width"),
            // Invalid values never reach here; the guard rejects them first.
            layout: params
                .get_optional_string("layout")
                .and_then(|value| Layout::parse(&value))
                .unwrap_or_default(),
            langs_count: params.get_number_value("langs_count"),
            custom_title: params.get_optional_string("custom_title"),
            locale: params.get_locale("locale"),
            border_radius: params.get_float_value("border_radius"),
            disable_animations: params.get_boolean_value("disable_animations").unwrap_or(false),
            colors: ColorOverrides {
                title_color: params.get_optional_string("title_color"),
                ring_color: None,
                icon_color: None,
                text_color: params.get_optional_string("text_color"),
                bg_color: params.get_optional_string("bg_color"),
                border_color: params.get_optional_string("border_color"),
                theme: params.get_optional_string("theme"),
            },
        }
    }
}

struct Slice<'a> {
    lang: &'a LanguageStat,
    percent: f64,
}

fn visible_slices<'a>(langs: &'a TopLanguages, options: &TopLangsOptions) -> Vec<Slice<'a>> {
    let hidden: Vec<String> = options
        .hide
        .iter()
        .map(|name| name.trim().to_lowercase())
        .collect();

    let count = options
        .langs_count
        .unwrap_or(DEFAULT_LANGS_COUNT)
        .clamp(MIN_LANGS_COUNT, MAX_LANGS_COUNT) as usize;

    let kept: Vec<&LanguageStat> = langs
        .langs
        .iter()
        .filter(|lang| !hidden.contains(&lang.name.to_lowercase()))
        .take(count)
        .collect();

    let total: f64 = kept.iter().map(|lang| lang.size).sum();

    kept.into_iter()
        .map(|lang| Slice {
            lang,
            percent: if total > 0.0 {
                lang.size / total * 100.0
            } else {
                0.0
            },
        })
        .collect()
}

fn lang_color(lang: &LanguageStat) -> &str {
    lang.color.as_deref().unwrap_or(DEFAULT_LANG_COLOR)
}

fn render_normal(slices: &[Slice<'_>], width: i32, hide_progress: bool) -> String {
    let bar_width = (width - 95) as f64;
    let mut body = String::new();

    for (index, slice) in slices.iter().enumerate() {
        let offset = index as i32 * 40;
        let name = encode_html(&slice.lang.name);

        if hide_progress {
            let _ = write!(
                body,
                "<g transform=\"translate(25, {offset})\">\n      <text class=\"lang-name\" x=\"2\" y=\"15\">{name}</text>\n    </g>\n    "
            );
        } else {
            let progress = bar_width * slice.percent / 100.0;
            let _ = write!(
                body,
                "<g transform=\"translate(25, {offset})\">\n      <text class=\"lang-name\" x=\"2\" y=\"15\">{name} {percent:.2}%</text>\n      <rect rx=\"5\" x=\"0\" y=\"25\" width=\"{bar_width}\" height=\"8\" fill=\"#ddd\"/>\n      <rect rx=\"5\" x=\"0\" y=\"25\" width=\"{progress:.2}\" height=\"8\" fill=\"{color}\"/>\n    </g>\n    ",
                percent = slice.percent,
                color = lang_color(slice.lang),
            );
        }
    }

    body
}

fn render_legend(
    slices: &[Slice<'_>],
    x: i32,
    y: i32,
    column_width: i32,
    columns: usize,
    hide_progress: bool,
) -> String {
    let mut body = String::new();
    let rows = slices.len().div_ceil(columns.max(1));

    for (index, slice) in slices.iter().enumerate() {
        let column = index / rows;
        let row = index % rows;
        let item_x = x + column as i32 * column_width;
        let item_y = y + row as i32 * 25;
        let label = if hide_progress {
            encode_html(&slice.lang.name)
        } else {
            format!("{} {:.2}%", encode_html(&slice.lang.name), slice.percent)
        };

        let _ = write!(
            body,
            "<g transform=\"translate({item_x}, {item_y})\">\n      <circle cx=\"5\" cy=\"6\" r=\"5\" fill=\"{color}\"/>\n      <text class=\"lang-name\" x=\"16\" y=\"10\">{label}</text>\n    </g>\n    ",
            color = lang_color(slice.lang),
        );
    }

    body
}

fn render_compact(slices: &[Slice<'_>], width: i32, hide_progress: bool) -> String {
    let bar_width = (width - 50) as f64;
    let mut body = String::new();

    if !hide_progress {
        let _ = write!(
            body,
            "<mask id=\"stats-mask\">\n      <rect x=\"25\" y=\"0\" width=\"{bar_width}\" height=\"8\" fill=\"white\" rx=\"5\"/>\n    </mask>\n    <g mask=\"url(#stats-mask)\">\n    "
        );

        let mut offset = 25.0;
        for slice in slices {
            let segment = bar_width * slice.percent / 100.0;
            let _ = write!(
                body,
                "  <rect x=\"{offset:.2}\" y=\"0\" width=\"{segment:.2}\" height=\"8\" fill=\"{color}\"/>\n    ",
                color = lang_color(slice.lang),
            );
            offset += segment;
        }

        body.push_str("</g>\n    ");
    }

    let legend_y = if hide_progress { 0 } else { 25 };
    body.push_str(&render_legend(
        slices,
        25,
        legend_y,
        (width - 50) / 2,
        2,
        hide_progress,
    ));

    body
}

fn render_donut_ring(slices: &[Slice<'_>], cx: i32, cy: i32, radius: f64) -> String {
    let circumference = 2.0 * PI * radius;
    let mut body = String::new();
    let mut consumed = 0.0;

    for slice in slices {
        let length = circumference * slice.percent / 100.0;
        let _ = write!(
            body,
            "<circle class=\"donut-ring\" cx=\"{cx}\" cy=\"{cy}\" r=\"{radius}\" fill=\"none\" stroke=\"{color}\" stroke-width=\"12\" stroke-dasharray=\"{length:.2} {rest:.2}\" stroke-dashoffset=\"{offset:.2}\"/>\n    ",
            color = lang_color(slice.lang),
            rest = circumference - length,
            // Dash offsets run clockwise from 3 o'clock; shift each slice
            // past everything already drawn.
            offset = -consumed,
        );
        consumed += length;
    }

    body
}

fn polar_point(cx: f64, cy: f64, radius: f64, angle_degrees: f64) -> (f64, f64) {
    let radians = (angle_degrees - 90.0) * PI / 180.0;
    (cx + radius * radians.cos(), cy + radius * radians.sin())
}

fn render_pie(slices: &[Slice<'_>], cx: f64, cy: f64, radius: f64) -> String {
    let mut body = String::new();

    // A single slice is a degenerate arc; draw the full disc instead.
    if let [slice] = slices {
        let _ = write!(
            body,
            "<circle class=\"pie-slice\" cx=\"{cx}\" cy=\"{cy}\" r=\"{radius}\" fill=\"{color}\"/>\n    ",
            color = lang_color(slice.lang),
        );
        return body;
    }

    let mut angle = 0.0;
    for slice in slices {
        let sweep = 360.0 * slice.percent / 100.0;
        let (start_x, start_y) = polar_point(cx, cy, radius, angle);
        let (end_x, end_y) = polar_point(cx, cy, radius, angle + sweep);
        let large_arc = if sweep > 180.0 { 1 } else { 0 };

        let _ = write!(
            body,
            "<path class=\"pie-slice\" d=\"M {cx:.2} {cy:.2} L {start_x:.2} {start_y:.2} A {radius:.2} {radius:.2} 0 {large_arc} 1 {end_x:.2} {end_y:.2} Z\" fill=\"{color}\"/>\n    ",
            color = lang_color(slice.lang),
        );
        angle += sweep;
    }

    body
}

pub fn render_top_languages(
    langs: &TopLanguages,
    options: &TopLangsOptions,
    locales: &LocaleCatalog,
) -> String {
    let slices = visible_slices(langs, options);
    let width = options.card_width.unwrap_or(DEFAULT_CARD_WIDTH).max(MIN_CARD_WIDTH);
    let legend_rows = slices.len().div_ceil(2) as i32;

    let (height, body) = match options.layout {
        Layout::Normal => (
            45 + (slices.len() as i32 + 1) * 40,
            render_normal(&slices, width, options.hide_progress),
        ),
        Layout::Compact => (
            90 + legend_rows * 25,
            render_compact(&slices, width, options.hide_progress),
        ),
        Layout::Donut => {
            let legend = render_legend(&slices, 25, 0, 0, 1, options.hide_progress);
            let ring = render_donut_ring(&slices, width - 80, 60, 50.0);
            ((45 + slices.len() as i32 * 32).max(215), format!("{legend}{ring}"))
        }
        Layout::DonutVertical => {
            let ring = render_donut_ring(&slices, width / 2, 80, 60.0);
            let legend =
                render_legend(&slices, 25, 170, (width - 50) / 2, 2, options.hide_progress);
            (230 + legend_rows * 25, format!("{ring}{legend}"))
        }
        Layout::Pie => {
            let pie = render_pie(&slices, f64::from(width) / 2.0, 90.0, 75.0);
            let legend =
                render_legend(&slices, 25, 190, (width - 50) / 2, 2, options.hide_progress);
            (250 + legend_rows * 25, format!("{pie}{legend}"))
        }
    };

    let colors = card_colors(&options.colors);
    let css = format!(
        ".lang-name {{ font: 400 11px 'Segoe UI', Ubuntu, Sans-Serif; fill: #{text_color} }}",
        text_color = colors.text_color,
    );

    let title = options
        .custom_title
        .clone()
        .unwrap_or_else(|| locales.top_langs_title(options.locale.as_deref()));

    let mut card = Card::new(width, height, options.border_radius, colors, title);
    card.hide_border = options.hide_border;
    card.hide_title = options.hide_title;
    card.disable_animations = options.disable_animations;
    card.css = css;

    card.render(&body)
}

#[cfg(test)]
mod tests {
    use super::{Layout, TopLangsOptions, render_top_languages};
    use crate::{
        locales::LocaleCatalog,
        models::{LanguageStat, TopLanguages},
        params::ParsedParams,
    };

    fn langs() -> TopLanguages {
        TopLanguages {
            langs: vec![
                LanguageStat {
                    name: "Rust".to_string(),
                    color: Some("#dea584".to_string()),
                    size: 6000.0,
                },
                LanguageStat {
                    name: "Python".to_string(),
                    color: Some("#3572A5".to_string()),
                    size: 3000.0,
                },
                LanguageStat {
                    name: "Shell".to_string(),
                    color: None,
                    size: 1000.0,
                },
            ],
        }
    }

    #[test]
    fn layout_parse_accepts_exactly_the_five_members() {
        assert_eq!(Layout::parse("compact"), Some(Layout::Compact));
        assert_eq!(Layout::parse("donut-vertical"), Some(Layout::DonutVertical));
        assert_eq!(Layout::parse("Normal"), None);
        assert_eq!(Layout::parse("bar"), None);
    }

    #[test]
    fn options_normalize_from_query() {
        let params = ParsedParams::from_raw(Some(
            "layout=compact&langs_count=oops&hide=shell&hide_progress=TRUE",
        ));
        let options = TopLangsOptions::from_params(&params);
        assert_eq!(options.layout, Layout::Compact);
        assert_eq!(options.langs_count, None);
        assert!(options.hide_progress);
    }

    #[test]
    fn normal_layout_shows_percentages_and_bars() {
        let svg = render_top_languages(&langs(), &TopLangsOptions::default(), &LocaleCatalog::bundled());
        assert!(svg.contains("Most Used Languages"));
        assert!(svg.contains("Rust 60.00%"));
        assert!(svg.contains("fill=\"#dea584\""));
        // Colorless languages fall back to gray.
        assert!(svg.contains("fill=\"#858585\""));
    }

    #[test]
    fn hide_filter_is_case_insensitive() {
        let options = TopLangsOptions {
            hide: vec!["RUST".to_string()],
            ..TopLangsOptions::default()
        };
        let svg = render_top_languages(&langs(), &options, &LocaleCatalog::bundled());
        assert!(!svg.contains("Rust"));
        assert!(svg.contains("Python 75.00%"));
    }

    #[test]
    fn langs_count_limits_and_renormalizes() {
        let options = TopLangsOptions {
            langs_count: Some(1),
            ..TopLangsOptions::default()
        };
        let svg = render_top_languages(&langs(), &options, &LocaleCatalog::bundled());
        assert!(svg.contains("Rust 100.00%"));
        assert!(!svg.contains("Python"));
    }

    #[test]
    fn langs_count_sentinel_falls_back_to_default() {
        let options = TopLangsOptions {
            langs_count: None,
            ..TopLangsOptions::default()
        };
        let svg = render_top_languages(&langs(), &options, &LocaleCatalog::bundled());
        assert!(svg.contains("Rust"));
        assert!(svg.contains("Shell"));
    }

    #[test]
    fn compact_layout_stacks_a_single_bar() {
        let options = TopLangsOptions {
            layout: Layout::Compact,
            ..TopLangsOptions::default()
        };
        let svg = render_top_languages(&langs(), &options, &LocaleCatalog::bundled());
        assert!(svg.contains("stats-mask"));
        assert!(svg.contains("Rust 60.00%"));
    }

    #[test]
    fn compact_hide_progress_drops_bar_and_percentages() {
        let options = TopLangsOptions {
            layout: Layout::Compact,
            hide_progress: true,
            ..TopLangsOptions::default()
        };
        let svg = render_top_languages(&langs(), &options, &LocaleCatalog::bundled());
        assert!(!svg.contains("stats-mask"));
        assert!(!svg.contains("%"));
        assert!(svg.contains("Rust"));
    }

    #[test]
    fn donut_layouts_draw_ring_segments() {
        for layout in [Layout::Donut, Layout::DonutVertical] {
            let options = TopLangsOptions {
                layout,
                ..TopLangsOptions::default()
            };
            let svg = render_top_languages(&langs(), &options, &LocaleCatalog::bundled());
            assert_eq!(svg.matches("donut-ring").count(), 3);
        }
    }

    #[test]
    fn pie_layout_draws_one_slice_per_language() {
        let options = TopLangsOptions {
            layout: Layout::Pie,
            ..TopLangsOptions::default()
        };
        let svg = render_top_languages(&langs(), &options, &LocaleCatalog::bundled());
        assert_eq!(svg.matches("pie-slice").count(), 3);
    }

    #[test]
    fn single_language_pie_is_a_full_disc() {
        let options = TopLangsOptions {
            layout: Layout::Pie,
            langs_count: Some(1),
            ..TopLangsOptions::default()
        };
        let svg = render_top_languages(&langs(), &options, &LocaleCatalog::bundled());
        assert!(svg.contains("<circle class=\"pie-slice\""));
    }

    #[test]
    fn custom_title_wins() {
        let options = TopLangsOptions {
            custom_title: Some("Languages I Break".to_string()),
            ..TopLangsOptions::default()
        };
        let svg = render_top_languages(&langs(), &options, &LocaleCatalog::bundled());
        assert!(svg.contains("Languages I Break"));
        assert!(!svg.contains("Most Used Languages"));
    }
}
