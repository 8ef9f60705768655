use std::collections::HashSet;

use crate::{langs_card::Layout, locales::LocaleCatalog};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Blacklisted,
    UnknownLocale,
    InvalidLayout,
}

impl Rejection {
    pub fn message(&self) -> &'static str {
        "Something went wrong"
    }

    pub fn secondary_message(&self) -> &'static str {
        match self {
            Self::Blacklisted => "This username is blacklisted",
            Self::UnknownLocale => "Locale not found",
            Self::InvalidLayout => "Incorrect layout input",
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Blacklisted => "blacklisted",
            Self::UnknownLocale => "locale",
            Self::InvalidLayout => "layout",
        }
    }
}

// Pre-fetch validation gate. All checks are synchronous and must run before
// the GitHub client is invoked, so requests guaranteed to fail never cost an
// upstream call.
pub struct AccessGuard {
    blacklist: HashSet<String>,
    locales: LocaleCatalog,
}

impl AccessGuard {
    pub fn new(blacklist: impl IntoIterator<Item = String>, locales: LocaleCatalog) -> Self {
        Self {
            blacklist: blacklist.into_iter().collect(),
            locales,
        }
    }

    pub fn check_stats(
        &self,
        username: Option<&str>,
        locale: Option<&str>,
    ) -> Result<(), Rejection> {
        self.check_common(username, locale)
    }

    pub fn check_top_langs(
        &self,
        username: Option<&str>,
        locale: Option<&str>,
        layout: Option<&str>,
    ) -> Result<(), Rejection> {
        self.check_common(username, locale)?;

        if let Some(layout) = layout
            && Layout::parse(layout).is_none()
        {
            return Err(Rejection::InvalidLayout);
        }

        Ok(())
    }

    fn check_common(&self, username: Option<&str>, locale: Option<&str>) -> Result<(), Rejection> {
        // Exact, case-sensitive membership.
        if let Some(username) = username
            && self.blacklist.contains(username)
        {
            return Err(Rejection::Blacklisted);
        }

        if let Some(locale) = locale
            && !self.locales.is_available(locale)
        {
            return Err(Rejection::UnknownLocale);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{AccessGuard, Rejection};
    use crate::locales::LocaleCatalog;

    fn guard() -> AccessGuard {
        AccessGuard::new(
            ["blacklisted_user".to_string()],
            LocaleCatalog::bundled(),
        )
    }

    #[test]
    fn blacklisted_username_is_rejected() {
        assert_eq!(
            guard().check_stats(Some("blacklisted_user"), Some("en")),
            Err(Rejection::Blacklisted)
        );
    }

    #[test]
    fn blacklist_membership_is_case_sensitive() {
        assert_eq!(guard().check_stats(Some("Blacklisted_User"), Some("en")), Ok(()));
    }

    #[test]
    fn missing_username_is_not_blacklisted() {
        assert_eq!(guard().check_stats(None, Some("en")), Ok(()));
    }

    #[test]
    fn unknown_locale_is_rejected() {
        assert_eq!(
            guard().check_stats(Some("octocat"), Some("klingon")),
            Err(Rejection::UnknownLocale)
        );
    }

    #[test]
    fn absent_locale_passes() {
        assert_eq!(guard().check_top_langs(Some("octocat"), None, None), Ok(()));
    }

    #[test]
    fn invalid_layout_is_rejected() {
        assert_eq!(
            guard().check_top_langs(Some("octocat"), None, Some("diagonal")),
            Err(Rejection::InvalidLayout)
        );
    }

    #[test]
    fn all_five_layouts_pass() {
        for layout in ["compact", "normal", "donut", "donut-vertical", "pie"] {
            assert_eq!(
                guard().check_top_langs(Some("octocat"), None, Some(layout)),
                Ok(()),
                "layout {layout} should be accepted"
            );
        }
    }

    #[test]
    fn blacklist_wins_over_locale() {
        assert_eq!(
            guard().check_stats(Some("blacklisted_user"), Some("klingon")),
            Err(Rejection::Blacklisted)
        );
    }
}
