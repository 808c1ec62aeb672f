//! FI status route.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;

use finagent_common::error::AppError;
use finagent_common::types::{FinancialIndependenceResult, FpAssetClass, UserFiParameters};
use finagent_engine::FiService;

use crate::middleware::owner::Owner;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/fi/calculate-status", post(calculate_status))
}

/// Request body: `{ "user_fi_parameters": { ... } }`.
#[derive(Debug, Clone, Deserialize)]
pub struct FiStatusRequest {
    pub user_fi_parameters: FiParametersPayload,
}

/// `UserFiParameters` as sent over the wire; `swr_percentage` may be omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct FiParametersPayload {
    pub desired_annual_fi_expenses: f64,
    #[serde(default)]
    pub swr_percentage: Option<f64>,
    #[serde(default)]
    pub emergency_fund_to_exclude: f64,
    #[serde(default)]
    pub primary_residence_equity_to_exclude: f64,
    #[serde(default)]
    pub fp_asset_classes_for_investable: Option<Vec<FpAssetClass>>,
}

impl FiParametersPayload {
    pub fn into_parameters(self, default_swr_percentage: f64) -> UserFiParameters {
        let mut params = UserFiParameters::new(
            self.desired_annual_fi_expenses,
            self.swr_percentage.unwrap_or(default_swr_percentage),
        );
        params.emergency_fund_to_exclude = self.emergency_fund_to_exclude;
        params.primary_residence_equity_to_exclude = self.primary_residence_equity_to_exclude;
        if let Some(classes) = self.fp_asset_classes_for_investable {
            params.fp_asset_classes_for_investable = classes;
        }
        params
    }
}

/// POST /fi/calculate-status — FI status for the owner's current records.
async fn calculate_status(
    State(state): State<AppState>,
    owner: Owner,
    payload: Result<Json<FiStatusRequest>, JsonRejection>,
) -> Result<Json<FinancialIndependenceResult>, AppError> {
    let Json(request) = payload?;
    let params = request
        .user_fi_parameters
        .into_parameters(state.config.default_swr_percentage);

    let result =
        FiService::calculate(&state.stores, owner.owner_id, params, state.goals_reserve).await?;
    Ok(Json(result))
}
