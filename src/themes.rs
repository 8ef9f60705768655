// Colors are opaque style tokens (hex without the leading '#'); they are
// forwarded to the SVG untouched and never validated.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub title_color: &'static str,
    pub icon_color: &'static str,
    pub text_color: &'static str,
    pub bg_color: &'static str,
    pub border_color: &'static str,
}

pub const DEFAULT_THEME: Theme = Theme {
    title_color: "2f80ed",
    icon_color: "4c71f2",
    text_color: "434d58",
    bg_color: "fffefe",
    border_color: "e4e2e2",
};

const THEMES: &[(&str, Theme)] = &[
    ("default", DEFAULT_THEME),
    (
        "dark",
        Theme {
            title_color: "fff",
            icon_color: "79ff97",
            text_color: "9f9f9f",
            bg_color: "151515",
            border_color: "e4e2e2",
        },
    ),
    (
        "radical",
        Theme {
            title_color: "fe428e",
            icon_color: "f8d847",
            text_color: "a9fef7",
            bg_color: "141321",
            border_color: "e4e2e2",
        },
    ),
    (
        "merko",
        Theme {
            title_color: "abd200",
            icon_color: "b7d364",
            text_color: "68b587",
            bg_color: "0a0f0b",
            border_color: "e4e2e2",
        },
    ),
    (
        "gruvbox",
        Theme {
            title_color: "fabd2f",
            icon_color: "fe8019",
            text_color: "8ec07c",
            bg_color: "282828",
            border_color: "e4e2e2",
        },
    ),
    (
        "tokyonight",
        Theme {
            title_color: "70a5fd",
            icon_color: "bf91f3",
            text_color: "38bdae",
            bg_color: "1a1b27",
            border_color: "e4e2e2",
        },
    ),
    (
        "onedark",
        Theme {
            title_color: "e4bf7a",
            icon_color: "8eb573",
            text_color: "df6d74",
            bg_color: "282c34",
            border_color: "e4e2e2",
        },
    ),
    (
        "cobalt",
        Theme {
            title_color: "e683d9",
            icon_color: "0480ef",
            text_color: "75eeb2",
            bg_color: "193549",
            border_color: "e4e2e2",
        },
    ),
    (
        "synthwave",
        Theme {
            title_color: "e2e9ec",
            icon_color: "ef8539",
            text_color: "e5289e",
            bg_color: "2b213a",
            border_color: "e4e2e2",
        },
    ),
    (
        "highcontrast",
        Theme {
            title_color: "e7f216",
            icon_color: "00ffff",
            text_color: "fff",
            bg_color: "000",
            border_color: "e4e2e2",
        },
    ),
    (
        "dracula",
        Theme {
            title_color: "ff6e96",
            icon_color: "79dafa",
            text_color: "f8f8f2",
            bg_color: "282a36",
            border_color: "e4e2e2",
        },
    ),
    (
        "transparent",
        Theme {
            title_color: "006aff",
            icon_color: "0579c3",
            text_color: "417e87",
            bg_color: "ffffff00",
            border_color: "e4e2e2",
        },
    ),
];

pub fn resolve_theme(name: &str) -> &'static Theme {
    THEMES
        .iter()
        .find(|(theme_name, _)| *theme_name == name)
        .map(|(_, theme)| theme)
        .unwrap_or(&DEFAULT_THEME)
}

// Per-field query overrides win over the named theme, which wins over the
// default theme.
#[derive(Debug, Default, Clone)]
pub struct ColorOverrides {
    pub title_color: Option<String>,
    pub ring_color: Option<String>,
    pub icon_color: Option<String>,
    pub text_color: Option<String>,
    pub bg_color: Option<String>,
    pub border_color: Option<String>,
    pub theme: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CardColors {
    pub title_color: String,
    pub ring_color: String,
    pub icon_color: String,
    pub text_color: String,
    pub bg_color: String,
    pub border_color: String,
}

pub fn card_colors(overrides: &ColorOverrides) -> CardColors {
    let theme = overrides
        .theme
        .as_deref()
        .map(resolve_theme)
        .unwrap_or(&DEFAULT_THEME);

    let pick = |value: &Option<String>, fallback: &str| {
        value.clone().unwrap_or_else(|| fallback.to_string())
    };

    let title_color = pick(&overrides.title_color, theme.title_color);
    let ring_color = pick(&overrides.ring_color, &title_color);

    CardColors {
        ring_color,
        icon_color: pick(&overrides.icon_color, theme.icon_color),
        text_color: pick(&overrides.text_color, theme.text_color),
        bg_color: pick(&overrides.bg_color, theme.bg_color),
        border_color: pick(&overrides.border_color, theme.border_color),
        title_color,
    }
}
