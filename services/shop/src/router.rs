use axum::{
    Router,
    routing::{get, post, put},
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use sweetshop_core::health::health;
use sweetshop_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    auth::{login, register, register_admin},
    inventory::{purchase_sweet, restock_sweet},
    sweet::{create_sweet, delete_sweet, list_sweets, search_sweets, update_sweet},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/health", get(health))
        // Auth
        .route("/api/auth/register", post(register))
        .route("/api/auth/register-admin", post(register_admin))
        .route("/api/auth/login", post(login))
        // Catalog
        .route("/api/sweets", get(list_sweets).post(create_sweet))
        .route("/api/sweets/search", get(search_sweets))
        .route("/api/sweets/{id}", put(update_sweet).delete(delete_sweet))
        // Inventory
        .route("/api/sweets/{id}/purchase", post(purchase_sweet))
        .route("/api/sweets/{id}/restock", post(restock_sweet))
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
