mod cache;
mod card;
mod constants;
mod error;
mod github;
mod guard;
mod html;
mod langs_card;
mod locales;
mod models;
mod params;
mod rank;
mod stats_card;
mod themes;

use std::{env, sync::Arc, time::Duration};

use axum::{
    Router,
    body::Body,
    extract::{RawQuery, State},
    http::{HeaderName, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use moka::future::Cache;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};

use cache::CachePolicy;
use constants::{DEFAULT_BLACKLIST, DEFAULT_LOCALE, LANGS_CACHE_TTL_SECS, STATS_CACHE_TTL_SECS};
use error::ServiceError;
use github::{GithubClient, StatsFetchOptions};
use guard::{AccessGuard, Rejection};
use langs_card::{TopLangsOptions, render_top_languages};
use locales::LocaleCatalog;
use models::{TopLanguages, UserStats};
use params::ParsedParams;
use stats_card::{StatsCardOptions, render_stats_card};
use themes::ColorOverrides;

// Logical failures keep a 2xx status so <img> embeds still render the error
// card; this header is the machine-readable failure signal instead.
const ERROR_HEADER: &str = "x-stats-error";

#[derive(Clone)]
struct AppState {
    github: Arc<GithubClient>,
    guard: Arc<AccessGuard>,
    locales: LocaleCatalog,
    stats_cache: Cache<String, Arc<UserStats>>,
    langs_cache: Cache<String, Arc<TopLanguages>>,
    cache_seconds_override: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResponseMode {
    Svg,
    Html,
}

impl ResponseMode {
    // Only the exact flag value selects raw SVG; anything else is the
    // HTML preview.
    fn from_params(params: &ParsedParams) -> Self {
        if params.get_optional_string("render_type").as_deref() == Some("svg") {
            Self::Svg
        } else {
            Self::Html
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "github_readme_stats_rs=info,tower_http=info".into()),
        )
        .compact()
        .init();

    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);

    let github_api = env::var("GITHUB_API").ok();
    let github_rest_api = env::var("GITHUB_REST_API").ok();
    let mut tokens = vec![
        env::var("GITHUB_TOKEN1").ok(),
        env::var("GITHUB_TOKEN2").ok(),
    ]
    .into_iter()
    .flatten()
    .filter(|token| !token.trim().is_empty())
    .collect::<Vec<_>>();

    if let Ok(token) = env::var("GITHUB_TOKEN")
        && !token.trim().is_empty()
    {
        tokens.push(token);
    }

    if tokens.is_empty() {
        warn!(
            "No GitHub token found. Set GITHUB_TOKEN1/GITHUB_TOKEN2 (or GITHUB_TOKEN) to avoid GraphQL auth failures."
        );
    }

    // Zero or garbage behaves as unset, mirroring `parseInt(env) || clamped`.
    let cache_seconds_override = env::var("CACHE_SECONDS")
        .ok()
        .and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| *value != 0);

    if let Some(seconds) = cache_seconds_override {
        info!("cache override enabled: {seconds}s (unclamped)");
    }

    let github = Arc::new(GithubClient::new(github_api, github_rest_api, tokens)?);
    let locales = LocaleCatalog::bundled();
    let guard = Arc::new(AccessGuard::new(
        DEFAULT_BLACKLIST.iter().map(|name| name.to_string()),
        locales.clone(),
    ));

    let stats_cache = Cache::builder()
        .max_capacity(20_000)
        .time_to_live(Duration::from_secs(STATS_CACHE_TTL_SECS))
        .build();

    let langs_cache = Cache::builder()
        .max_capacity(20_000)
        .time_to_live(Duration::from_secs(LANGS_CACHE_TTL_SECS))
        .build();

    let state = AppState {
        github,
        guard,
        locales,
        stats_cache,
        langs_cache,
        cache_seconds_override,
    };

    let listener = tokio::net::TcpListener::bind((std::net::Ipv4Addr::UNSPECIFIED, port)).await?;
    info!("listening on 0.0.0.0:{port}");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/api", get(stats_handler))
        .route("/api/top-langs", get(top_langs_handler))
        .route("/healthz", get(health_handler))
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}

async fn stats_handler(State(state): State<AppState>, RawQuery(raw_query): RawQuery) -> Response {
    let params = ParsedParams::from_raw(raw_query.as_deref());
    let options = StatsCardOptions::from_params(&params);
    let mode = ResponseMode::from_params(&params);
    let username = params.get_optional_string("username");
    // This endpoint defaults the locale to English before validation.
    let locale = params
        .get_optional_string("locale")
        .unwrap_or_else(|| DEFAULT_LOCALE.to_string());

    if let Err(rejection) = state.guard.check_stats(username.as_deref(), Some(&locale)) {
        return rejection_response(&rejection, &options.colors, mode);
    }

    let username = username.unwrap_or_default();
    let exclude_repo = params.get_all_csv("exclude_repo");
    let fetch_options = StatsFetchOptions {
        include_all_commits: options.include_all_commits,
        include_merged_prs: options
            .show
            .iter()
            .any(|key| key == "prs_merged" || key == "prs_merged_percentage"),
        include_discussions: options.show.iter().any(|key| key == "discussions_started"),
        include_discussions_answers: options
            .show
            .iter()
            .any(|key| key == "discussions_answered"),
    };

    let stats = match fetch_stats_cached(&state, &username, &exclude_repo, &fetch_options).await {
        Ok(stats) => stats,
        Err(err) => {
            error!("stats fetch failed for username='{username}': {err}");
            return upstream_error_response(&err, &options.colors, mode);
        }
    };

    let policy = CachePolicy::success(
        params.get_number_value("cache_seconds"),
        state.cache_seconds_override,
    );

    match mode {
        ResponseMode::Svg => {
            svg_response(render_stats_card(&stats, &options, &state.locales), policy)
        }
        ResponseMode::Html => {
            html_response(html::stats_preview_page(&locale.to_lowercase()), policy)
        }
    }
}

async fn top_langs_handler(
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Response {
    let params = ParsedParams::from_raw(raw_query.as_deref());
    let options = TopLangsOptions::from_params(&params);
    let username = params.get_optional_string("username");
    // No locale default here; absence lets the renderer fall back.
    let locale = params.get_optional_string("locale");
    let layout = params.get_optional_string("layout");

    if let Err(rejection) =
        state
            .guard
            .check_top_langs(username.as_deref(), locale.as_deref(), layout.as_deref())
    {
        return rejection_response(&rejection, &options.colors, ResponseMode::Html);
    }

    let username = username.unwrap_or_default();
    let exclude_repo = params.get_all_csv("exclude_repo");
    let size_weight = params.get_float_value("size_weight").unwrap_or(1.0);
    let count_weight = params.get_float_value("count_weight").unwrap_or(0.0);

    let langs = match fetch_langs_cached(&state, &username, &exclude_repo, size_weight, count_weight)
        .await
    {
        Ok(langs) => langs,
        Err(err) => {
            error!("top languages fetch failed for username='{username}': {err}");
            return upstream_error_response(&err, &options.colors, ResponseMode::Html);
        }
    };

    let policy = CachePolicy::success(
        params.get_number_value("cache_seconds"),
        state.cache_seconds_override,
    );

    let card = render_top_languages(&langs, &options, &state.locales);
    html_response(html::top_langs_page(&card), policy)
}

async fn health_handler() -> impl IntoResponse {
    "ok"
}

async fn fetch_stats_cached(
    state: &AppState,
    username: &str,
    exclude_repo: &[String],
    options: &StatsFetchOptions,
) -> Result<Arc<UserStats>, ServiceError> {
    let key = format!(
        "stats:v1:{username}:all={}:merged={}:disc={}:answers={}:exclude={}",
        options.include_all_commits,
        options.include_merged_prs,
        options.include_discussions,
        options.include_discussions_answers,
        exclude_repo.join(",")
    );

    if let Some(cached) = state.stats_cache.get(&key).await {
        return Ok(cached);
    }

    let stats = Arc::new(
        state
            .github
            .fetch_stats(username, exclude_repo, options)
            .await?,
    );
    state.stats_cache.insert(key, stats.clone()).await;

    Ok(stats)
}

async fn fetch_langs_cached(
    state: &AppState,
    username: &str,
    exclude_repo: &[String],
    size_weight: f64,
    count_weight: f64,
) -> Result<Arc<TopLanguages>, ServiceError> {
    let key = format!(
        "langs:v1:{username}:size={size_weight}:count={count_weight}:exclude={}",
        exclude_repo.join(",")
    );

    if let Some(cached) = state.langs_cache.get(&key).await {
        return Ok(cached);
    }

    let langs = Arc::new(
        state
            .github
            .fetch_top_languages(username, exclude_repo, size_weight, count_weight)
            .await?,
    );
    state.langs_cache.insert(key, langs.clone()).await;

    Ok(langs)
}

fn svg_response(body: String, policy: CachePolicy) -> Response {
    respond("image/svg+xml", body, policy)
}

fn html_response(body: String, policy: CachePolicy) -> Response {
    respond("text/html", body, policy)
}

fn respond(content_type: &'static str, body: String, policy: CachePolicy) -> Response {
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = StatusCode::OK;

    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    if let Ok(value) = HeaderValue::from_str(&policy.header_value()) {
        headers.insert(header::CACHE_CONTROL, value);
    }

    response
}

fn rejection_response(
    rejection: &Rejection,
    colors: &ColorOverrides,
    mode: ResponseMode,
) -> Response {
    let card = card::render_error(rejection.message(), rejection.secondary_message(), colors);
    error_card_response(card, rejection.kind(), mode)
}

fn upstream_error_response(
    error: &ServiceError,
    colors: &ColorOverrides,
    mode: ResponseMode,
) -> Response {
    let card = card::render_error(&error.message(), &error.secondary_message(), colors);
    error_card_response(card, error.kind(), mode)
}

fn error_card_response(card: String, kind: &'static str, mode: ResponseMode) -> Response {
    let policy = CachePolicy::error();
    let mut response = match mode {
        ResponseMode::Svg => svg_response(card, policy),
        ResponseMode::Html => html_response(html::wrap_error_card(&card), policy),
    };

    response
        .headers_mut()
        .insert(HeaderName::from_static(ERROR_HEADER), HeaderValue::from_static(kind));

    response
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("failed to install Ctrl+C handler: {err}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        if let Ok(mut sigterm) = signal(SignalKind::terminate()) {
            sigterm.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
