use axum::{extract::State, http::StatusCode, Json};
use reqwest::Client;
use url::Url;

use crate::error::Error;
use crate::fetch;
use crate::parse::{self, MenuItem};

/// Fixed message for the non-200 upstream case; the real status code rides
/// alongside it in `MenuResponse::Fail`.
static UPSTREAM_FAIL_MESSAGE: &str = "menu server returned an error";

/// Per-process request context: the one relaxed-TLS client and the upstream
/// base URL. Cloning shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct AppContext {
    client: Client,
    base_url: Url,
}

impl AppContext {
    pub fn new() -> Self {
        Self::with_base_url(fetch::BASE_URL.parse().expect("base url should be valid"))
    }

    pub fn with_base_url(base_url: Url) -> Self {
        Self {
            client: fetch::make_client(),
            base_url,
        }
    }
}

/// The one JSON body this service produces, tagged by `status`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum MenuResponse {
    Success {
        date: String,
        count: usize,
        data: Vec<MenuItem>,
    },
    Fail {
        code: u16,
        message: String,
    },
    Error {
        message: String,
    },
}

/// Axum entry point; every route lands here.
pub async fn menu(State(ctx): State<AppContext>) -> (StatusCode, Json<MenuResponse>) {
    let (status, body) = todays_menu(&ctx).await;
    (status, Json(body))
}

/// Runs the full pipeline for today's menu and maps the outcome onto exactly
/// one of the three terminal states. Holds no state across calls.
pub async fn todays_menu(ctx: &AppContext) -> (StatusCode, MenuResponse) {
    let date = fetch::kst_today();
    let url = fetch::menu_url(&ctx.base_url, date);
    match fetch::menu_page(&ctx.client, url).await {
        Ok(html) => {
            let data = parse::menu_items(&html);
            (
                StatusCode::OK,
                MenuResponse::Success {
                    date: date.format("%Y-%m-%d").to_string(),
                    count: data.len(),
                    data,
                },
            )
        }
        Err(Error::Upstream(code)) => {
            log::warn!("menu host answered {code}");
            (
                StatusCode::BAD_GATEWAY,
                MenuResponse::Fail {
                    code,
                    message: UPSTREAM_FAIL_MESSAGE.to_owned(),
                },
            )
        }
        Err(Error::Request(e)) => {
            log::warn!("menu fetch failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                MenuResponse::Error {
                    message: e.to_string(),
                },
            )
        }
    }
}
