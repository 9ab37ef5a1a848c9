use std::fs::create_dir_all;

use axum::{http, Router};
use mentorship_database::basic_db::{InnerDatabase, SafeDatabase};
use mentorship_service::remote::http_client;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::account::{create_user, login, read_users, read_users_me};
use crate::config::{BackendConfig, GamesConfig, MatcherConfig};
use crate::games::save_score;
use crate::interests::list_interests;
use crate::matching::match_mentors;
use crate::profile::{create_mentee, create_mentor};
use crate::recommendation::get_recommendations;
use crate::router::*;
use crate::state::{BackendState, GamesState, MatcherState};
use crate::video::{create_connection, create_session, get_token};
use crate::{account, games, matching};

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] libmdbx::Error),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            http::Method::GET,
            http::Method::POST,
            http::Method::OPTIONS,
        ])
        .allow_headers(Any)
        .allow_credentials(false)
}

fn finish(app: Router) -> Router {
    app.layer(cors()).layer(TraceLayer::new_for_http())
}

pub fn backend_app<T: SafeDatabase>(state: BackendState<T>) -> Router {
    finish(main_router(backend_components::<T>(), state))
}

pub fn matcher_app(state: MatcherState) -> Router {
    let components = vec![
        get_router_builder("/", matching::root),
        post_router_builder("/match", match_mentors),
    ];

    finish(main_router(components, state))
}

pub fn games_app(state: GamesState) -> Router {
    let components = vec![
        get_router_builder("/", games::root),
        post_router_builder("/games/score", save_score),
    ];

    finish(main_router(components, state))
}

fn backend_components<T: SafeDatabase>() -> Vec<(String, Router<BackendState<T>>)> {
    vec![
        get_router_builder("/", account::root),
        // Accounts
        post_router_builder("/login/", login::<T>),
        post_router_builder("/users/", create_user::<T>),
        get_router_builder("/users/", read_users::<T>),
        get_router_builder("/users/me/", read_users_me::<T>),
        get_router_builder("/interests/", list_interests),
        // Profiles and matching
        post_router_builder("/mentors/", create_mentor::<T>),
        post_router_builder("/mentees/", create_mentee::<T>),
        get_router_builder("/recommendations/", get_recommendations::<T>),
        // Video sessions
        post_router_builder("/sessions/get-token", get_token::<T>),
        post_router_builder("/api/sessions", create_session::<T>),
        post_router_builder("/api/sessions/{id}/connections", create_connection::<T>),
    ]
}

pub async fn build_backend_server(config: BackendConfig) -> Result<(), ServerError> {
    info!("Opening database at {}", config.database_path.display());
    create_dir_all(&config.database_path)?;
    let database = InnerDatabase::new(&config.database_path)?;

    let state = BackendState::new(database, &config, http_client(config.http_timeout)?);
    serve(backend_app(state), config.port).await
}

pub async fn build_matcher_server(config: MatcherConfig) -> Result<(), ServerError> {
    let state = MatcherState::new(&config, http_client(config.http_timeout)?);
    serve(matcher_app(state), config.port).await
}

pub async fn build_games_server(config: GamesConfig) -> Result<(), ServerError> {
    let state = GamesState::new(&config);
    serve(games_app(state), config.port).await
}

async fn serve(app: Router, port: u16) -> Result<(), ServerError> {
    let address = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
