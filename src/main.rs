mod core;
mod features;
mod modules;
mod shared;

use std::sync::Arc;

use axum::Router;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::core::config::Config;
use crate::core::middleware;
use crate::core::openapi::serve_openapi;
use crate::features::feed::routes as feed_routes;
use crate::features::feed::services::{CollectionReportSource, FeedAggregator};
use crate::features::media::services::MediaUploadService;
use crate::features::notifications::routes as notifications_routes;
use crate::features::notifications::services::{LogNotificationGateway, NotificationService};
use crate::features::pets::routes as pets_routes;
use crate::features::pets::services::PetService;
use crate::features::reports::routes as reports_routes;
use crate::features::reports::services::{ReportLifecycleService, SubmissionService};
use crate::features::users::services::{IdentityResolver, StoreUserDirectory};
use crate::modules::storage::{HttpMediaHost, MediaHost};
use crate::modules::store::DocumentCollection;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
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
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    let available_cpus = std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1);
    tracing::info!(
        "System info: available_cpus={}, tokio_worker_threads={}, pid={}",
        available_cpus,
        worker_threads,
        std::process::id()
    );
    tracing::info!("Configuration loaded successfully");

    // Document store collections (external store consumed at its interface)
    let lost_reports = Arc::new(DocumentCollection::new());
    let found_reports = Arc::new(DocumentCollection::new());
    let sightings = Arc::new(DocumentCollection::new());
    let claims = Arc::new(DocumentCollection::new());
    let pets = Arc::new(DocumentCollection::new());
    let users = Arc::new(DocumentCollection::new());
    let notifications = Arc::new(DocumentCollection::new());
    tracing::info!("Document store collections initialized");

    // Media host client
    let media_host = Arc::new(
        HttpMediaHost::new(config.media.clone())
            .map_err(|e| anyhow::anyhow!("Failed to initialize media host client: {}", e))?,
    ) as Arc<dyn MediaHost>;
    let upload_service = Arc::new(MediaUploadService::new(media_host));
    tracing::info!("Media upload service initialized");

    // Notifications
    let notification_service = Arc::new(NotificationService::new(
        Arc::clone(&notifications),
        Arc::new(LogNotificationGateway),
    ));
    tracing::info!("Notification service initialized");

    // Report lifecycle + submission pipeline
    let lifecycle_service = Arc::new(ReportLifecycleService::new(
        Arc::clone(&lost_reports),
        Arc::clone(&found_reports),
        Arc::clone(&sightings),
        Arc::clone(&claims),
        Arc::clone(&notification_service),
    ));
    let submission_service = Arc::new(SubmissionService::new(
        Arc::clone(&lifecycle_service),
        Arc::clone(&upload_service),
    ));
    tracing::info!("Report services initialized");

    // Feed aggregation over the two live report collections
    let identity_resolver = Arc::new(IdentityResolver::new(Arc::new(StoreUserDirectory::new(
        Arc::clone(&users),
    ))));
    let feed_aggregator = Arc::new(FeedAggregator::new(
        Arc::new(CollectionReportSource::new(Arc::clone(&lost_reports))),
        Arc::new(CollectionReportSource::new(Arc::clone(&found_reports))),
        Arc::clone(&identity_resolver),
    ));
    tracing::info!("Feed aggregator initialized");

    // Pets
    let pet_service = Arc::new(PetService::new(Arc::clone(&pets)));
    tracing::info!("Pet service initialized");

    // Protected routes (require upstream identity headers)
    let protected_routes = Router::new()
        .merge(reports_routes::routes(
            Arc::clone(&submission_service),
            Arc::clone(&lifecycle_service),
        ))
        .merge(feed_routes::routes(Arc::clone(&feed_aggregator)))
        .merge(notifications_routes::routes(Arc::clone(
            &notification_service,
        )))
        .merge(pets_routes::routes(Arc::clone(&pet_service)))
        .route_layer(axum::middleware::from_fn(middleware::identity_middleware));

    // Health check endpoint (no auth required)
    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let public_routes = Router::new()
        .route("/health", axum::routing::get(health_check))
        .route("/api-docs/openapi.json", axum::routing::get(serve_openapi));

    let app = Router::new()
        .merge(protected_routes)
        .merge(public_routes)
        // Baseline body limit; multipart submission routes set their own
        .layer(axum::extract::DefaultBodyLimit::max(
            config.app.max_request_body_size,
        ))
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;

    socket.set_recv_buffer_size(256 * 1024)?;
    socket.set_send_buffer_size(256 * 1024)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(65535)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));

    axum::serve(listener, app).await?;

    Ok(())
}
