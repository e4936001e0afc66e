//! tally-server binary entry point.

use anyhow::Context;
use std::sync::Arc;
use tally::{
    api,
    auth::jwt::AuthService,
    cli::{output::Output, Cli, Commands},
    utils::config::TallyConfig,
    AppState, StoreProvider,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse_args();
    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    if let Some(Commands::Init { path, force }) = &cli.command {
        return match tally::cli::init::run(path, *force, &output) {
            tally::cli::init::InitResult::Success
            | tally::cli::init::InitResult::AlreadyExists => Ok(()),
            tally::cli::init::InitResult::Error(e) => Err(anyhow::anyhow!(e)),
        };
    }

    let config_missing = !cli.config.exists();
    let config = TallyConfig::load(&cli.config)?;

    init_tracing(&config, cli.verbose);

    if config_missing {
        tracing::warn!(
            "config file {} not found, using defaults",
            cli.config.display()
        );
    }

    // Explicit startup sequence: secret, store, services, listener
    let jwt_secret = config
        .resolve_jwt_secret()
        .context("JWT signing secret is required")?;
    let auth_service = Arc::new(AuthService::new(jwt_secret, config.auth.token_expiry));

    let store = StoreProvider::from_url(&config.database.url)
        .create_store()
        .await
        .context("failed to open the database")?;
    tracing::info!(url = %config.database.url, "store ready");

    let state = AppState {
        config: Arc::new(config.clone()),
        store: Arc::new(store),
        auth_service,
    };

    let router = api::app(state);

    #[cfg(feature = "swagger-ui")]
    let router = {
        use utoipa::OpenApi;
        router.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", api::ApiDoc::openapi()),
        )
    };

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("shutdown complete");

    Ok(())
}

fn init_tracing(config: &TallyConfig, verbose: bool) {
    let default_level = if verbose {
        "debug".to_string()
    } else {
        config.server.log_level.clone()
    };

    // RUST_LOG wins over the configured level
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install ctrl-c handler: {}", e);
    }
}
