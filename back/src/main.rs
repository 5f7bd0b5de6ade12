use std::{env, net::SocketAddr, sync::Arc};

use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use back::{
    migration::{Migrator, MigratorTrait},
    store::TodoStore,
    v1, AppState,
};
use clap::Parser;
use sea_orm::Database;

const DEFAULT_DATABASE_URL: &str = "sqlite://tally.db";

#[derive(Parser)]
struct Args {
    /// Port to listen on.
    #[arg(long, default_value_t = 7890)]
    port: u16,

    /// Database connection string; falls back to DATABASE_URL.
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt::init();
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let url = args
        .database_url
        .or_else(|| env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| String::from(DEFAULT_DATABASE_URL));

    let db = Database::connect(normalize_sqlite_url(&url)).await?;
    Migrator::up(&db, None).await?;

    let state = Arc::new(AppState {
        store: TodoStore::new(db),
    });

    let app = Router::new()
        .nest("/api/v1", v1::router())
        .with_state(state);

    let addr = SocketAddr::from(([0; 4], args.port));
    tracing::info!("listening on {addr}");

    // Serve over TLS when a certificate is configured, plain HTTP otherwise.
    match (env::var("SSL_CERT"), env::var("SSL_KEY")) {
        (Ok(cert), Ok(key)) => {
            let config = RustlsConfig::from_pem_file(cert, key).await?;

            axum_server::bind_rustls(addr, config)
                .serve(app.into_make_service())
                .await?;
        }
        _ => {
            axum_server::bind(addr)
                .serve(app.into_make_service())
                .await?;
        }
    }

    Ok(())
}

/// Sqlite refuses to open a missing file unless the URL asks for create
/// mode.
fn normalize_sqlite_url(url: &str) -> String {
    let Some(path) = url.strip_prefix("sqlite://") else {
        return url.to_string();
    };

    if path.starts_with(":memory:") {
        return url.to_string();
    }

    format!("sqlite:{path}?mode=rwc")
}
