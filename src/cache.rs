use crate::constants::{CARD_CACHE_SECONDS, ERROR_CACHE_SECONDS, ONE_DAY, SIX_HOURS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    pub max_age: u32,
    pub s_max_age: u32,
    pub stale_while_revalidate: u32,
}

impl CachePolicy {
    // The env override replaces the clamped value without re-clamping; it is
    // the operator escape hatch and already filtered at startup.
    pub fn success(requested_seconds: Option<i32>, override_seconds: Option<u32>) -> Self {
        let clamped = i64::from(requested_seconds.unwrap_or(CARD_CACHE_SECONDS as i32))
            .clamp(i64::from(SIX_HOURS), i64::from(ONE_DAY)) as u32;
        let cache_seconds = override_seconds.unwrap_or(clamped);

        Self {
            max_age: cache_seconds / 2,
            s_max_age: cache_seconds,
            stale_while_revalidate: ONE_DAY,
        }
    }

    // Shorter than the success-path minimum so caches retry failures sooner.
    pub fn error() -> Self {
        Self {
            max_age: ERROR_CACHE_SECONDS / 2,
            s_max_age: ERROR_CACHE_SECONDS,
            stale_while_revalidate: ONE_DAY,
        }
    }

    pub fn header_value(&self) -> String {
        format!(
            "max-age={}, s-maxage={}, stale-while-revalidate={}",
            self.max_age, self.s_max_age, self.stale_while_revalidate
        )
    }
}
