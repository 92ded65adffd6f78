mod tls;

pub use tls::LegacyTlsPolicy;

use std::time::Duration;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc};
use reqwest::Client;
use tracing::{instrument, Level};
use url::Url;

use crate::error::{Error, Result};

/// Menu board of the cafeteria operator. The double slash is part of the
/// published path.
pub static BASE_URL: &str = "https://m.poswel.co.kr/fmenu//index.php";

/// The host's bot filter rejects the default library user agent.
static USER_AGENT: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 16_0 like Mac OS X) \
     AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.0 Mobile/15E148 Safari/604.1";

/// Hosting platforms commonly kill the inbound request at 10 seconds; the
/// upstream fetch must give up before that.
static UPSTREAM_TIMEOUT: Duration = Duration::from_secs(9);

/// Cafeteria section shown by this service, in the upstream's own language.
static MENU_SECTION: &str = "점심";

static KST_SECONDS_EAST: i32 = 9 * 3600;

/// Client for the legacy menu host, built from the default
/// [`LegacyTlsPolicy`]. A rejected widened-cipher config degrades to the
/// library's default cipher set with certificate checks still disabled.
pub fn make_client() -> Client {
    let builder = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(UPSTREAM_TIMEOUT)
        .gzip(true);
    let builder = match LegacyTlsPolicy::default().client_config() {
        Ok(tls_config) => builder.use_preconfigured_tls(tls_config),
        Err(e) => {
            log::warn!("legacy TLS config rejected ({e}), using default ciphers");
            builder.danger_accept_invalid_certs(true)
        }
    };
    builder.build().expect("client creation should succeed")
}

/// Calendar date of `now` in KST. The menu board rolls over at midnight
/// Seoul time no matter where this process runs.
pub fn menu_date(now: DateTime<Utc>) -> NaiveDate {
    let kst = FixedOffset::east_opt(KST_SECONDS_EAST).expect("KST offset should be valid");
    now.with_timezone(&kst).date_naive()
}

pub fn kst_today() -> NaiveDate {
    menu_date(Utc::now())
}

/// Target URL for one day's menu of the configured section.
pub fn menu_url(base: &Url, date: NaiveDate) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut()
        .append_pair("s_area", "C")
        .append_pair("s_uid", "13")
        .append_pair("section", MENU_SECTION)
        .append_pair("s_date_y", &format!("{:04}", date.year()))
        .append_pair("s_date_m", &format!("{:02}", date.month()))
        .append_pair("s_date_d", &format!("{:02}", date.day()))
        .finish();
    url
}

/// One GET against the menu host. Returns the body only for HTTP 200; any
/// other status is [`Error::Upstream`], anything below HTTP is
/// [`Error::Request`]. No retries at this layer.
///
/// The body is decoded as UTF-8 regardless of upstream charset headers —
/// the host labels its pages inconsistently but serves UTF-8.
#[instrument(skip(client), level = Level::DEBUG)]
pub async fn menu_page(client: &Client, url: Url) -> Result<String> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if status != reqwest::StatusCode::OK {
        return Err(Error::Upstream(status.as_u16()));
    }
    let body = response.bytes().await?;
    Ok(String::from_utf8_lossy(&body).into_owned())
}
