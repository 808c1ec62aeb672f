//! Record CRUD routes, one router per record kind.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use serde::de::DeserializeOwned;

use finagent_common::error::AppError;
use finagent_common::types::{Asset, Expense, Goal, Liability};
use finagent_engine::{RecordService, Stored};

use crate::middleware::owner::Owner;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(resource::<Asset>("/api/assets"))
        .merge(resource::<Liability>("/api/liabilities"))
        .merge(resource::<Expense>("/api/expenses"))
        .merge(resource::<Goal>("/api/goals"))
}

/// Collection and item routes for one record kind under `base`.
fn resource<T>(base: &str) -> Router<AppState>
where
    T: Stored + Serialize,
    T::Input: DeserializeOwned,
{
    Router::new()
        .route(base, get(list_records::<T>).post(create_record::<T>))
        .route(
            &format!("{base}/{{id}}"),
            get(get_record::<T>)
                .put(update_record::<T>)
                .delete(delete_record::<T>),
        )
}

/// GET /api/{kind} — All records of this kind for the owner.
async fn list_records<T>(
    State(state): State<AppState>,
    owner: Owner,
) -> Result<Json<Vec<T>>, AppError>
where
    T: Stored + Serialize,
{
    let records = RecordService::list::<T>(&state.stores, owner.owner_id).await?;
    Ok(Json(records))
}

/// GET /api/{kind}/{id}
async fn get_record<T>(
    State(state): State<AppState>,
    owner: Owner,
    Path(id): Path<i64>,
) -> Result<Json<T>, AppError>
where
    T: Stored + Serialize,
{
    let record = RecordService::get::<T>(&state.stores, owner.owner_id, id).await?;
    Ok(Json(record))
}

/// POST /api/{kind} — Create a record; responds 201 with the stored record.
async fn create_record<T>(
    State(state): State<AppState>,
    owner: Owner,
    payload: Result<Json<T::Input>, JsonRejection>,
) -> Result<(StatusCode, Json<T>), AppError>
where
    T: Stored + Serialize,
    T::Input: DeserializeOwned,
{
    let Json(input) = payload?;
    let record = RecordService::create::<T>(&state.stores, owner.owner_id, input).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// PUT /api/{kind}/{id} — Replace every editable field.
async fn update_record<T>(
    State(state): State<AppState>,
    owner: Owner,
    Path(id): Path<i64>,
    payload: Result<Json<T::Input>, JsonRejection>,
) -> Result<Json<T>, AppError>
where
    T: Stored + Serialize,
    T::Input: DeserializeOwned,
{
    let Json(input) = payload?;
    let record = RecordService::update::<T>(&state.stores, owner.owner_id, id, input).await?;
    Ok(Json(record))
}

/// DELETE /api/{kind}/{id} — Responds 204 on success.
async fn delete_record<T>(
    State(state): State<AppState>,
    owner: Owner,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError>
where
    T: Stored,
{
    RecordService::delete::<T>(&state.stores, owner.owner_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
