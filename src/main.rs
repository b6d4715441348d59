use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr};
use reqwest::Client;
use tokio::sync::RwLock;

use tita::{
    app_state::AppState,
    get_postgres_pool, get_redis_client,
    services::{
        data_stores::{
            PostgresProfileStore, PostgresProjectStore, RedisBannedTokenStore,
        },
        http_notification_client::HttpNotificationClient,
    },
    utils::{
        constants::{
            prod, DATABASE_URL, NOTIFICATION_AUTH_TOKEN,
            NOTIFICATION_GATEWAY_URL, REDIS_HOST_NAME,
        },
        tracing::init_tracing,
    },
    Application,
};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let pg_pool = get_postgres_pool(&DATABASE_URL)
        .await
        .wrap_err("Failed to create Postgres connection pool")?;
    sqlx::migrate!()
        .run(&pg_pool)
        .await
        .wrap_err("Failed to run migrations")?;

    let redis_connection = get_redis_client(REDIS_HOST_NAME.to_owned())
        .wrap_err("Failed to get Redis client")?
        .get_connection()
        .wrap_err("Failed to get Redis connection")?;
    let banned_token_store = Arc::new(RwLock::new(RedisBannedTokenStore::new(
        Arc::new(RwLock::new(redis_connection)),
    )));

    let http_client = Client::builder()
        .timeout(prod::notification_client::TIMEOUT)
        .build()?;
    let notification_client = Arc::new(HttpNotificationClient::new(
        NOTIFICATION_GATEWAY_URL.to_owned(),
        NOTIFICATION_AUTH_TOKEN.clone(),
        http_client,
    ));

    let app_state = AppState::new(
        banned_token_store,
        notification_client,
        Arc::new(RwLock::new(PostgresProfileStore::new(pg_pool.clone()))),
        Arc::new(RwLock::new(PostgresProjectStore::new(pg_pool))),
    );

    let app = Application::build(app_state, prod::APP_ADDRESS)
        .await
        .wrap_err("Failed to build app")?;

    app.run().await.wrap_err("Failed to run app")?;
    Ok(())
}
