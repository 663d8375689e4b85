use sea_orm::Database;
use tracing::info;

use sweetshop_core::tracing::init_tracing;
use sweetshop_shop::config::ShopConfig;
use sweetshop_shop::infra::password::Argon2Hasher;
use sweetshop_shop::router::build_router;
use sweetshop_shop::state::AppState;
use sweetshop_shop_migration::{Migrator, MigratorTrait};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    init_tracing();

    let config = ShopConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");
    Migrator::up(&db, None)
        .await
        .expect("failed to run migrations");

    let state = AppState {
        db,
        hasher: Argon2Hasher::default(),
        jwt_secret: config.jwt_secret,
        jwt_expires_in: config.jwt_expires_in,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!(environment = %config.environment, "shop service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
