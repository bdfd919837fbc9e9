use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use service::wishlist::domain::{coerce_list_id, items_from_value};

use crate::errors::ApiError;
use crate::extract::JsonBody;
use crate::routes::AppState;

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub ok: bool,
    pub list_id: String,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct ItemsResponse {
    pub ok: bool,
    pub list_id: String,
    pub items: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub struct GetParams {
    pub list_id: Option<String>,
}

fn list_id_of(body: &JsonBody) -> String {
    body.field("list_id").map(coerce_list_id).unwrap_or_default()
}

/// POST /api/wishlist/save: overwrite the list with `items`.
pub async fn save(
    State(state): State<AppState>,
    mut body: JsonBody,
) -> Result<Json<CountResponse>, ApiError> {
    let list_id = list_id_of(&body);
    let items = items_from_value(body.take("items"));
    let saved = state
        .wishlist
        .save(&list_id, items)
        .await
        .map_err(|e| ApiError::from_service("save", e))?;
    Ok(Json(CountResponse { ok: true, list_id: saved.list_id.into_inner(), count: saved.count }))
}

/// GET /api/wishlist/get?list_id=
pub async fn get(
    State(state): State<AppState>,
    params: Option<Query<GetParams>>,
) -> Result<Json<ItemsResponse>, ApiError> {
    let list_id = params.and_then(|Query(p)| p.list_id).unwrap_or_default();
    let found = state
        .wishlist
        .get(&list_id)
        .await
        .map_err(|e| ApiError::from_service("get", e))?;
    Ok(Json(ItemsResponse { ok: true, list_id: found.list_id.into_inner(), items: found.items }))
}

/// POST /api/wishlist/clear: drop the list; clearing an unknown list succeeds.
pub async fn clear(
    State(state): State<AppState>,
    body: JsonBody,
) -> Result<Json<CountResponse>, ApiError> {
    let list_id = list_id_of(&body);
    let cleared = state
        .wishlist
        .clear(&list_id)
        .await
        .map_err(|e| ApiError::from_service("clear", e))?;
    Ok(Json(CountResponse { ok: true, list_id: cleared.list_id.into_inner(), count: cleared.count }))
}
