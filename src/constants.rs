pub const TEN_MINUTES: u32 = 600;
pub const SIX_HOURS: u32 = 21_600;
pub const ONE_DAY: u32 = 86_400;

pub const CARD_CACHE_SECONDS: u32 = SIX_HOURS;
pub const ERROR_CACHE_SECONDS: u32 = TEN_MINUTES;

pub const DEFAULT_GITHUB_API: &str = "https://api.github.com/graphql";
pub const DEFAULT_GITHUB_REST_API: &str = "https://api.github.com";
pub const DEFAULT_GITHUB_RETRY_DELAY_MS: u64 = 500;

pub const STATS_CACHE_TTL_SECS: u64 = 60 * 30;
pub const LANGS_CACHE_TTL_SECS: u64 = 60 * 60;

pub const DEFAULT_LOCALE: &str = "en";

pub const DEFAULT_BLACKLIST: &[&str] = &["renovate-bot", "technote-space", "sw-yx"];
