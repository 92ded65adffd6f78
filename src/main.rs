#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

mod error;
mod fetch;
mod handler;
mod parse;

use std::{env, net::SocketAddr, str::FromStr};

use axum::{http::Method, routing::any, Router};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::compression::CompressionLayer;

use handler::AppContext;

pub use error::Result;

#[cfg(all(target_env = "musl", target_pointer_width = "64"))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// One-time logging setup. The default filter silences rustls: with
/// verification intentionally off it logs every handshake as suspicious,
/// which would drown the request log. `RUST_LOG` still overrides.
fn init_logging() {
    pretty_env_logger::formatted_builder()
        .parse_filters(&env::var("RUST_LOG").unwrap_or_else(|_| "info,rustls=error".to_owned()))
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> core::result::Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let ctx = AppContext::new();
    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = SocketAddr::from_str(format!("{host}:{port}").as_str())?;
    let compression_layer: CompressionLayer = CompressionLayer::new()
        .br(true)
        .deflate(true)
        .gzip(true)
        .zstd(true);
    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_origin(Any);

    // the board has a single document; every path serves it
    let app = Router::new()
        .route("/", any(handler::menu))
        .fallback(handler::menu)
        .with_state(ctx)
        .layer(cors_layer)
        .layer(compression_layer);
    let listener = TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("failed to listen on {addr}: {e}"));
    log::info!("listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
