use axum::{
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    serve::Serve,
    Json, Router,
};

use color_eyre::eyre::{Result, WrapErr};
use redis::{Client, RedisResult};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::error::Error;
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::Level;

use domain::{AuthAPIError, ProjectAPIError};
pub mod routes;
use crate::utils::{constants::APP_SERVICE_EXTERNAL_ADDRESS, tracing::*};
use routes::{applications, auth, projects, roles};
pub mod app_state;
pub mod domain;
pub mod services;
use app_state::AppState;
pub mod utils;
pub mod workflows;

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl AuthAPIError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AuthAPIError::MissingToken => {
                log_error_chain(self, Level::DEBUG);
                (StatusCode::BAD_REQUEST, "Missing token".to_string())
            }
            AuthAPIError::InvalidToken => {
                log_error_chain(self, Level::DEBUG);
                (StatusCode::UNAUTHORIZED, "Invalid token".to_string())
            }
            AuthAPIError::UnexpectedError(_) => {
                log_error_chain(self, Level::ERROR);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Unexpected error".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AuthAPIError {
    fn into_response(self) -> Response {
        let (status, error_message) = self.status_and_message();
        let body = Json(ErrorResponse {
            error: error_message,
        });
        (status, body).into_response()
    }
}

impl IntoResponse for ProjectAPIError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            ProjectAPIError::AuthenticationError(auth_error) => {
                auth_error.status_and_message()
            }
            ProjectAPIError::Conflict(message) => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::CONFLICT, message.clone())
            }
            ProjectAPIError::Forbidden(message) => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::FORBIDDEN, message.clone())
            }
            ProjectAPIError::IDNotFoundError(id) => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::NOT_FOUND, format!("{id}"))
            }
            ProjectAPIError::InvalidTransition(transition_error) => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::CONFLICT, format!("{transition_error}"))
            }
            ProjectAPIError::WriteRejected(message) => {
                log_error_chain(&self, Level::WARN);
                (StatusCode::FORBIDDEN, message.clone())
            }
            ProjectAPIError::UnexpectedError(_) => {
                log_error_chain(&self, Level::ERROR);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Unexpected error".to_string(),
                )
            }
            ProjectAPIError::ValidationError(message) => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::BAD_REQUEST, message.as_ref().to_owned())
            }
        };
        let body = Json(ErrorResponse {
            error: error_message,
        });
        (status, body).into_response()
    }
}

fn log_error_chain(e: &(dyn Error + 'static), level: Level) {
    let separator =
        "\n-----------------------------------------------------------------------------------\n";
    let mut report = format!("{}{:?}\n", separator, e);
    let mut current = e.source();
    while let Some(cause) = current {
        report = format!("{}\nCaused by:\n\n{:?}", report, cause);
        current = cause.source();
    }
    report = format!("{}\n{}", report, separator);
    match level {
        Level::ERROR => tracing::error!("{}", report),
        Level::WARN => tracing::warn!("{}", report),
        Level::INFO => tracing::info!("{}", report),
        Level::DEBUG => tracing::debug!("{}", report),
        Level::TRACE => tracing::trace!("{}", report),
    }
}

pub struct Application {
    server: Serve<Router, Router>,
    pub address: String,
}

impl Application {
    pub async fn build(app_state: AppState, address: &str) -> Result<Self> {
        let mut allowed_origins: Vec<HeaderValue> = vec![
            "http://localhost:3000".parse()?,
            "http://127.0.0.1:3000".parse()?,
        ];
        let external: HeaderValue = APP_SERVICE_EXTERNAL_ADDRESS
            .parse()
            .wrap_err("APP_SERVICE_EXTERNAL_ADDRESS is not a valid origin")?;
        if !allowed_origins.contains(&external) {
            allowed_origins.push(external);
        }

        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_credentials(true)
            .allow_origin(allowed_origins);

        let router = Router::new()
            .route("/auth/logout", post(auth::logout))
            .route("/auth/verify-token", post(auth::verify_token))
            .route("/auth/session", get(auth::get_current_session))
            .route("/projects/new", post(projects::new_project))
            .route("/projects/list", get(projects::get_project_list))
            .route("/projects/project", get(projects::get_project))
            .route(
                "/projects/roles",
                post(projects::create_role).get(projects::get_roles),
            )
            .route("/roles/details", put(roles::update_details))
            .route("/roles/publish", post(roles::publish))
            .route("/roles/unpublish", post(roles::unpublish))
            .route("/roles/role", delete(roles::remove_role))
            .route("/roles/candidates", get(roles::search_candidates))
            .route("/roles/assign", post(roles::assign))
            .route("/roles/remove-assignment", post(roles::unassign))
            .route("/roles/invitation", post(roles::respond_invitation))
            .route("/roles/apply", post(roles::apply))
            .route("/roles/applications", get(roles::get_applications))
            .route("/applications/mine", get(applications::get_my_applications))
            .route("/applications/accept", post(applications::accept))
            .route("/applications/reject", post(applications::reject))
            .route("/applications/application", delete(applications::withdraw))
            .with_state(app_state)
            .layer(cors)
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(make_span_with_request_id)
                    .on_request(on_request)
                    .on_response(on_response),
            );

        let listener = tokio::net::TcpListener::bind(address).await?;
        let address = listener.local_addr()?.to_string();
        let server = axum::serve(listener, router);

        Ok(Application { server, address })
    }

    pub async fn run(self) -> Result<(), std::io::Error> {
        tracing::info!("listening on {}", &self.address);
        self.server.with_graceful_shutdown(shutdown_signal()).await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install signal handler: {e}");
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
    tracing::info!("shutting down");
}

pub async fn get_postgres_pool(
    url: &Secret<String>,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .connect(url.expose_secret())
        .await
}

pub fn get_redis_client(redis_hostname: String) -> RedisResult<Client> {
    let redis_url = format!("redis://{}/", redis_hostname);
    redis::Client::open(redis_url)
}
