struct Translation {
    code: &'static str,
    // `{name}` placeholder is replaced with the user's display name.
    stats_title: &'static str,
    langs_title: &'static str,
}

const TRANSLATIONS: &[Translation] = &[
    Translation {
        code: "en",
        stats_title: "{name}'s GitHub Stats",
        langs_title: "Most Used Languages",
    },
    Translation {
        code: "ar",
        stats_title: "إحصائيات غيت هاب الخاصة بـ {name}",
        langs_title: "أكثر اللغات إستخداماً",
    },
    Translation {
        code: "cn",
        stats_title: "{name} 的 GitHub 统计数据",
        langs_title: "最常用的语言",
    },
    Translation {
        code: "de",
        stats_title: "{name}s GitHub-Statistiken",
        langs_title: "Meist verwendete Sprachen",
    },
    Translation {
        code: "es",
        stats_title: "Estadísticas de GitHub de {name}",
        langs_title: "Lenguajes más usados",
    },
    Translation {
        code: "fr",
        stats_title: "Statistiques GitHub de {name}",
        langs_title: "Langages les plus utilisés",
    },
    Translation {
        code: "id",
        stats_title: "Statistik GitHub {name}",
        langs_title: "Bahasa Yang Paling Banyak Digunakan",
    },
    Translation {
        code: "it",
        stats_title: "Statistiche GitHub di {name}",
        langs_title: "Linguaggi più utilizzati",
    },
    Translation {
        code: "ja",
        stats_title: "{name} の GitHub 統計",
        langs_title: "最もよく使っている言語",
    },
    Translation {
        code: "ko",
        stats_title: "{name}의 GitHub 통계",
        langs_title: "가장 많이 사용된 언어",
    },
    Translation {
        code: "nl",
        stats_title: "{name}'s GitHub-statistieken",
        langs_title: "Meest gebruikte talen",
    },
    Translation {
        code: "np",
        stats_title: "{name} को GitHub तथ्याङ्क",
        langs_title: "अधिक प्रयोग गरिएको भाषाहरू",
    },
    Translation {
        code: "pl",
        stats_title: "Statystyki GitHub użytkownika {name}",
        langs_title: "Najczęściej używane języki",
    },
    Translation {
        code: "pt-br",
        stats_title: "Estatísticas do GitHub de {name}",
        langs_title: "Linguagens mais usadas",
    },
    Translation {
        code: "ru",
        stats_title: "Статистика GitHub пользователя {name}",
        langs_title: "Наиболее часто используемые языки",
    },
    Translation {
        code: "tr",
        stats_title: "{name} Hesabının GitHub İstatistikleri",
        langs_title: "En Çok Kullanılan Diller",
    },
    Translation {
        code: "uk-ua",
        stats_title: "Статистика GitHub користувача {name}",
        langs_title: "Найчастіше використовувані мови",
    },
    Translation {
        code: "vi",
        stats_title: "Thống Kê GitHub {name}",
        langs_title: "Ngôn Ngữ Dùng Nhiều Nhất",
    },
];

// Read-only after startup; injected into the guard and the renderers so
// tests can substitute a smaller catalog.
#[derive(Debug, Default, Clone)]
pub struct LocaleCatalog;

impl LocaleCatalog {
    pub fn bundled() -> Self {
        Self
    }

    pub fn is_available(&self, code: &str) -> bool {
        let code = code.to_lowercase();
        TRANSLATIONS.iter().any(|entry| entry.code == code)
    }

    pub fn stats_card_title(&self, locale: Option<&str>, name: &str) -> String {
        self.lookup(locale).stats_title.replace("{name}", name)
    }

    pub fn top_langs_title(&self, locale: Option<&str>) -> String {
        self.lookup(locale).langs_title.to_string()
    }

    fn lookup(&self, locale: Option<&str>) -> &'static Translation {
        locale
            .map(str::to_lowercase)
            .and_then(|code| TRANSLATIONS.iter().find(|entry| entry.code == code))
            .unwrap_or(&TRANSLATIONS[0])
    }
}
