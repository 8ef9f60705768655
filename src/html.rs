use std::fmt::Write;

// Locale options offered by the preview pages. The stats preview switches
// locale with a full page reload; the top-languages page only retitles the
// embedded SVG client-side, from its own fixed table below.
const STATS_LOCALE_OPTIONS: &[(&str, &str)] = &[
    ("en", "English"),
    ("pt-br", "Português"),
    ("fr", "Français"),
    ("es", "Español"),
    ("de", "Deutsch"),
    ("pl", "Polski"),
    ("ru", "Русский"),
    ("ar", "العربية"),
    ("ja", "日本語"),
    ("cn", "中文"),
    ("np", "नेपाली"),
];

const LANGS_LOCALE_OPTIONS: &[(&str, &str)] = &[
    ("en", "English"),
    ("pt", "Português"),
    ("fr", "Français"),
    ("es", "Español"),
    ("de", "Deutsch"),
    ("pl", "Polski"),
    ("ru", "Русский"),
    ("ar", "العربية"),
    ("ja", "日本語"),
    ("cn", "中文"),
    ("np", "नेपाली"),
];

// Rewrites the `locale` query parameter and navigates, so the server
// re-renders the card in the chosen language.
const STATS_LOCALE_SCRIPT: &str = r#"<script>
    function updateLocale() {
      const languageOption = document.getElementById('languageSelector').value;
      const urlParams = new URLSearchParams(window.location.search);
      urlParams.set('locale', languageOption);
      window.location.search = urlParams.toString();
    }

    document.getElementById('languageSelector').addEventListener('change', updateLocale);
  </script>"#;

// Retitles the first <text> node of the embedded SVG in place. Runs on
// change and once on load; it never talks to the server and is independent
// of the `locale` query parameter.
const LANGS_TITLE_SCRIPT: &str = r#"<script>
    const titles = {
      en: 'Most Used Languages',
      pt: 'Linguagens Mais Usadas',
      fr: 'Langages les plus utilisés',
      es: 'Lenguajes más usados',
      de: 'Meist verwendete Sprachen',
      pl: 'Najczęściej używane języki',
      ru: 'Наиболее часто используемые языки',
      ar: 'أكثر اللغات إستخداماً',
      ja: '最もよく使っている言語',
      cn: '最常用的语言',
      np: 'अधिक प्रयोग गरिएको भाषाहरू',
    };

    function updateCardTitle() {
      const svg = document.querySelector('svg');
      const title = svg.querySelector('text');
      const languageOption = document.getElementById('languageSelector').value;

      if (titles[languageOption]) {
        title.textContent = titles[languageOption];
      }
    }

    document.getElementById('languageSelector').addEventListener('change', updateCardTitle);
    updateCardTitle();
  </script>"#;

fn locale_select(options: &[(&str, &str)], selected: Option<&str>) -> String {
    let mut output = String::from("<select id=\"languageSelector\">");

    for (value, label) in options {
        let marker = if selected == Some(*value) { " selected" } else { "" };
        let _ = write!(
            output,
            "\n        <option value=\"{value}\"{marker}>{label}</option>"
        );
    }

    output.push_str("\n      </select>");
    output
}

// The stats preview intentionally does not embed the card; it is an
// instructional shell around the locale picker.
pub fn stats_preview_page(locale: &str) -> String {
    let select = locale_select(STATS_LOCALE_OPTIONS, Some(locale));

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>GitHub Stats Card</title>
  <style>
    body {{ font-family: Arial, sans-serif; margin: 0; background: #f4f4f4; color: #222; }}
    section {{ width: min(760px, 92vw); margin: 48px auto; }}
    .card {{ background: #fff; border-radius: 8px; padding: 24px; box-shadow: 0 4px 24px rgba(0, 0, 0, 0.08); }}
    select {{ padding: 8px 10px; border: 1px solid #d0d7de; border-radius: 6px; }}
  </style>
</head>
<body>
  <section>
    <div class="card">
      <h1>GitHub Stats Card</h1>
      <p>Pick a language for the card, or request it with <code>render_type=svg</code> to embed the SVG directly.</p>
      <label for="languageSelector">Language:</label>
      {select}
    </div>
  </section>
  {STATS_LOCALE_SCRIPT}
</body>
</html>"#
    )
}

pub fn top_langs_page(card_svg: &str) -> String {
    let select = locale_select(LANGS_LOCALE_OPTIONS, None);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Top Languages Card</title>
  <style>
    body {{ font-family: Arial, sans-serif; margin: 0; background: #f4f4f4; color: #222; }}
    section {{ width: min(760px, 92vw); margin: 48px auto; }}
    .card {{ background: #fff; border-radius: 8px; padding: 24px; box-shadow: 0 4px 24px rgba(0, 0, 0, 0.08); }}
    select {{ padding: 8px 10px; border: 1px solid #d0d7de; border-radius: 6px; margin-top: 16px; }}
  </style>
</head>
<body>
  <section>
    <div class="card">
      {card_svg}
      <br />
      <label for="languageSelector">Language:</label>
      {select}
    </div>
  </section>
  {LANGS_TITLE_SCRIPT}
</body>
</html>"#
    )
}

pub fn wrap_error_card(card_svg: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <title>Something went wrong</title>
</head>
<body>
  {card_svg}
</body>
</html>"#
    )
}
