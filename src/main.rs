mod core;
mod features;
mod gateway;
mod shared;

use std::sync::Arc;

use axum::{middleware::from_fn_with_state, Router};
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::core::config::Config;
use crate::core::state::AppState;
use crate::core::middleware;
use crate::features::discussions::ui::DiscussionUiRegistry;
use crate::features::session::{
    session_middleware, FileSessionStorage, SessionService, SessionStore,
};
use crate::features::{
    admin, auth_pages, dashboard, discussions, home, listing, profile, wishlist,
};
use crate::gateway::ApiClient;

fn main() -> anyhow::Result<()> {
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

async fn async_main() -> anyhow::Result<()> {
    // Load .env BEFORE initializing the logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(Config::from_env().map_err(|e| anyhow::anyhow!(e))?);
    tracing::info!("Configuration loaded successfully");

    let storage = Arc::new(FileSessionStorage::new(config.session.store_path.clone()));
    let sessions = Arc::new(SessionStore::restore(storage).await?);
    tracing::info!("Session store restored");

    let api = Arc::new(ApiClient::new(&config.backend, Arc::clone(&sessions)));
    tracing::info!("Backend gateway at {}", api.base_url());

    let auth = Arc::new(SessionService::new(Arc::clone(&api), Arc::clone(&sessions)));
    let discussion_ui = Arc::new(DiscussionUiRegistry::default());

    let state = AppState {
        config: Arc::clone(&config),
        sessions,
        api,
        auth,
        discussion_ui,
    };

    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    let cookie_name = Arc::new(config.session.cookie_name.clone());

    let app = Router::new()
        .merge(home::routes::routes())
        .merge(auth_pages::routes::routes())
        .merge(listing::routes::routes())
        .merge(profile::routes::routes())
        .merge(discussions::routes::routes())
        .merge(wishlist::routes::routes())
        .merge(dashboard::routes::routes())
        .merge(admin::routes::routes())
        .layer(from_fn_with_state(cookie_name, session_middleware))
        .with_state(state)
        .merge(health_route)
        .nest_service("/static", ServeDir::new("static"))
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;
    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
