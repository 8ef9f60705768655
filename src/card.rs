use std::fmt::Write;

use crate::themes::{CardColors, ColorOverrides, card_colors};

const FONT_FAMILY: &str = "'Segoe UI', Ubuntu, Sans-Serif";

pub struct Card {
    pub width: i32,
    pub height: i32,
    pub border_radius: f64,
    pub colors: CardColors,
    pub title: String,
    pub hide_border: bool,
    pub hide_title: bool,
    pub disable_animations: bool,
    pub css: String,
}

impl Card {
    pub fn new(
        width: i32,
        height: i32,
        border_radius: Option<f64>,
        colors: CardColors,
        title: String,
    ) -> Self {
        Self {
            width,
            height,
            border_radius: border_radius.unwrap_or(4.5),
            colors,
            title,
            hide_border: false,
            hide_title: false,
            disable_animations: false,
            css: String::new(),
        }
    }

    pub fn render(&self, body: &str) -> String {
        let height = if self.hide_title {
            self.height - 30
        } else {
            self.height
        };

        let animations = if self.disable_animations {
            "* { animation-duration: 0s !important; animation-delay: 0s !important; }"
        } else {
            ""
        };

        let title_element = if self.hide_title {
            String::new()
        } else {
            format!(
                "\n      <g transform=\"translate(25, 35)\">\n        <text x=\"0\" y=\"0\" class=\"header\">{}</text>\n      </g>",
                encode_html(&self.title)
            )
        };

        let body_offset = if self.hide_title { 25 } else { 55 };
        let border_opacity = if self.hide_border { 0 } else { 1 };

        let mut output = String::with_capacity(body.len() + 2_000);
        let _ = write!(
            output,
            "<svg width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\" fill=\"none\" xmlns=\"http://www.w3.org/2000/svg\" role=\"img\">\n  <style>\n    .header {{\n      font: 600 18px {FONT_FAMILY};\n      fill: #{title_color};\n      animation: fadeInAnimation 0.8s ease-in-out forwards;\n    }}\n    @keyframes fadeInAnimation {{\n      from {{ opacity: 0; }}\n      to {{ opacity: 1; }}\n    }}\n    {css}\n    {animations}\n  </style>\n  <rect x=\"0.5\" y=\"0.5\" rx=\"{border_radius}\" width=\"{rect_width}\" height=\"{rect_height}\" stroke=\"#{border_color}\" fill=\"#{bg_color}\" stroke-opacity=\"{border_opacity}\"/>{title_element}\n  <g transform=\"translate(0, {body_offset})\">\n    {body}\n  </g>\n</svg>",
            width = self.width,
            title_color = self.colors.title_color,
            css = self.css,
            border_radius = self.border_radius,
            rect_width = self.width - 1,
            rect_height = height - 1,
            border_color = self.colors.border_color,
            bg_color = self.colors.bg_color,
        );

        output
    }
}

pub fn render_error(message: &str, secondary_message: &str, overrides: &ColorOverrides) -> String {
    let colors = card_colors(overrides);

    format!(
        "<svg width=\"576\" height=\"120\" viewBox=\"0 0 576 120\" fill=\"none\" xmlns=\"http://www.w3.org/2000/svg\">\n  <style>\n    .text {{ font: 600 16px {FONT_FAMILY}; fill: #{title_color} }}\n    .small {{ font: 600 12px {FONT_FAMILY}; fill: #{text_color} }}\n    .gray {{ fill: #858585 }}\n  </style>\n  <rect x=\"0.5\" y=\"0.5\" width=\"575\" height=\"119\" rx=\"4.5\" fill=\"#{bg_color}\" stroke=\"#{border_color}\"/>\n  <text x=\"25\" y=\"45\" class=\"text\">Something went wrong!</text>\n  <text x=\"25\" y=\"55\" class=\"text small\">\n    <tspan x=\"25\" dy=\"18\">{message}</tspan>\n    <tspan x=\"25\" dy=\"18\" class=\"gray\">{secondary}</tspan>\n  </text>\n</svg>",
        title_color = colors.title_color,
        text_color = colors.text_color,
        bg_color = colors.bg_color,
        border_color = colors.border_color,
        message = encode_html(message),
        secondary = encode_html(secondary_message),
    )
}

pub fn encode_html(input: &str) -> String {
    let mut output = String::with_capacity(input.len());

    for character in input.chars() {
        match character {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#39;"),
            _ => output.push(character),
        }
    }

    output
}

// 6120 -> "6.1k"; values below a thousand stay verbatim.
pub fn k_formatter(value: i64) -> String {
    if value.abs() > 999 {
        format!("{:.1}k", value as f64 / 1000.0)
    } else {
        value.to_string()
    }
}
