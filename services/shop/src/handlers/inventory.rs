use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use sweetshop_auth_types::identity::{AdminIdentity, Identity};
use sweetshop_core::json::ApiJson;

use crate::error::ShopError;
use crate::handlers::parse_sweet_id;
use crate::handlers::sweet::MessageResponse;
use crate::state::AppState;
use crate::usecase::inventory::{PurchaseUseCase, RestockUseCase};

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RestockRequest {
    pub quantity: Option<i32>,
}

// ── POST /api/sweets/{id}/purchase ───────────────────────────────────────────

pub async fn purchase_sweet(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ShopError> {
    let id = parse_sweet_id(&id)?;
    let usecase = PurchaseUseCase {
        repo: state.inventory_repo(),
    };
    usecase.execute(id, identity.user_id).await?;
    Ok(Json(MessageResponse {
        message: "Purchase successful",
    }))
}

// ── POST /api/sweets/{id}/restock ────────────────────────────────────────────

pub async fn restock_sweet(
    _admin: AdminIdentity,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<RestockRequest>,
) -> Result<Json<MessageResponse>, ShopError> {
    let id = parse_sweet_id(&id)?;
    let usecase = RestockUseCase {
        repo: state.inventory_repo(),
    };
    usecase.execute(id, body.quantity).await?;
    Ok(Json(MessageResponse {
        message: "Restock successful",
    }))
}
