use std::{io, sync::OnceLock};

use application::{router, server::GRAPHQL_PATH, Args, Config};
use service::{
    infra::{postgres, Postgres},
    Service,
};
use tokio::net::TcpListener;
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

/// Levels written to stderr rather than stdout.
const STDERR_LEVELS: &[log::Level] = &[log::Level::WARN, log::Level::ERROR];

/// Maximum level of the written logs, once [`Config`] is loaded.
static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

postgres::embed_migrations!("../migrations");

#[tokio::main]
async fn main() {
    init_logging();

    _ = start().await;
}

/// Installs the [`tracing`] subscriber writing warnings and errors to stderr
/// and everything else to stdout.
fn init_logging() {
    let is_written = |meta: &log::Metadata<'_>, to_stderr: bool| {
        let max = LOG_LEVEL.get().copied().unwrap_or(log::Level::INFO);
        meta.is_span()
            || (STDERR_LEVELS.contains(meta.level()) == to_stderr
                && max >= *meta.level())
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_thread_names(true)
                .with_writer(io::stdout)
                .with_filter(filter_fn(move |m| is_written(m, false))),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_thread_names(true)
                .with_writer(io::stderr)
                .with_filter(filter_fn(move |m| is_written(m, true))),
        )
        .init();
}

/// Connects to the lease storage, applying pending migrations if the
/// [`Config`] says so.
async fn connect(db: &application::config::Database) -> Result<Postgres, ()> {
    let mut postgres = Postgres::new(&db.into()).map_err(|e| {
        log::error!("failed to initialize `Postgres` client: {e}");
    })?;

    if db.migrate {
        let report = migrations::runner()
            .run_async(&mut postgres)
            .await
            .map_err(|e| {
                log::error!("failed to run database migrations: {e}");
            })?;
        log::info!(
            "applied {} migration(s) to `{}` database",
            report.applied_migrations().len(),
            db.name,
        );
    }

    Ok(postgres)
}

/// Starts the lease schedule engine until its HTTP server fails.
async fn start() -> Result<(), ()> {
    let Args { config } = Args::parse().map_err(|e| {
        log::error!("failed to parse command line arguments: {e}");
    })?;

    let Config {
        server,
        database,
        log,
    } = Config::new(&config).map_err(|e| {
        log::error!("failed to load `Config` from `{config}`: {e}");
    })?;

    LOG_LEVEL
        .set(log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let service = Service::new(connect(&database).await?);

    let app = router(service, &server.allowed_origins).map_err(|e| {
        log::error!("invalid `server.allowed_origins`: {e}");
    })?;

    let addr = (server.host.clone(), server.port);
    let listener = TcpListener::bind(addr).await.map_err(|e| {
        log::error!(
            "failed to listen on `{}:{}`: {e}",
            server.host,
            server.port,
        );
    })?;

    log::info!(
        "serving lease schedules on `http://{}:{}{GRAPHQL_PATH}`",
        server.host,
        server.port,
    );

    axum::serve(listener, app)
        .await
        .map_err(|e| log::error!("HTTP server failed: {e}"))
}
