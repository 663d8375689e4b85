use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use sweetshop_auth_types::identity::{AdminIdentity, Identity};
use sweetshop_core::json::ApiJson;
use sweetshop_domain::sweet::Sweet;

use crate::domain::types::SweetPatch;
use crate::error::ShopError;
use crate::handlers::parse_sweet_id;
use crate::state::AppState;
use crate::usecase::catalog::{
    CreateSweetInput, CreateSweetUseCase, DeleteSweetUseCase, ListSweetsUseCase,
    SearchSweetsInput, SearchSweetsUseCase, UpdateSweetUseCase,
};

// ── Request / response types ─────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SweetRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i32>,
}

#[derive(Serialize)]
pub struct SweetResponse {
    pub sweet: Sweet,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub name: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
}

// ── GET /api/sweets ──────────────────────────────────────────────────────────

pub async fn list_sweets(
    _identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<Sweet>>, ShopError> {
    let usecase = ListSweetsUseCase {
        repo: state.sweet_repo(),
    };
    Ok(Json(usecase.execute().await?))
}

// ── GET /api/sweets/search ───────────────────────────────────────────────────

pub async fn search_sweets(
    _identity: Identity,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Vec<Sweet>>, ShopError> {
    let query: SearchQuery = raw_query
        .as_deref()
        .map(serde_qs::from_str)
        .transpose()
        .map_err(|_| ShopError::InvalidQuery)?
        .unwrap_or_default();

    let usecase = SearchSweetsUseCase {
        repo: state.sweet_repo(),
    };
    let sweets = usecase
        .execute(SearchSweetsInput {
            name: query.name,
            category: query.category,
            min_price: query.min_price,
            max_price: query.max_price,
        })
        .await?;
    Ok(Json(sweets))
}

// ── POST /api/sweets ─────────────────────────────────────────────────────────

pub async fn create_sweet(
    _admin: AdminIdentity,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<SweetRequest>,
) -> Result<(StatusCode, Json<SweetResponse>), ShopError> {
    let usecase = CreateSweetUseCase {
        repo: state.sweet_repo(),
    };
    let sweet = usecase
        .execute(CreateSweetInput {
            name: body.name,
            category: body.category,
            price: body.price,
            quantity: body.quantity,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(SweetResponse { sweet })))
}

// ── PUT /api/sweets/{id} ─────────────────────────────────────────────────────

pub async fn update_sweet(
    _admin: AdminIdentity,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<SweetRequest>,
) -> Result<Json<SweetResponse>, ShopError> {
    let id = parse_sweet_id(&id)?;
    let usecase = UpdateSweetUseCase {
        repo: state.sweet_repo(),
    };
    let sweet = usecase
        .execute(
            id,
            SweetPatch {
                name: body.name,
                category: body.category,
                price: body.price,
                quantity: body.quantity,
            },
        )
        .await?;
    Ok(Json(SweetResponse { sweet }))
}

// ── DELETE /api/sweets/{id} ──────────────────────────────────────────────────

pub async fn delete_sweet(
    _admin: AdminIdentity,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ShopError> {
    let id = parse_sweet_id(&id)?;
    let usecase = DeleteSweetUseCase {
        repo: state.sweet_repo(),
    };
    usecase.execute(id).await?;
    Ok(Json(MessageResponse {
        message: "Sweet deleted",
    }))
}
