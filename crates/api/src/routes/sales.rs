//! Sale entry route.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    routing::post,
};
use chrono::{DateTime, Utc};
use salesdash_core::facts::{NewSale, SaleEvent};
use salesdash_shared::types::{ProductId, ProvinceId, UserId};
use salesdash_shared::{AppError, ProvinceScope};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::{
    AppState,
    error::ApiError,
    middleware::AuthUser,
    response::{ApiResponse, with_status},
};

/// Creates the sale routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/sales", post(create_sale))
}

/// Body of `POST /sales`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSaleRequest {
    /// Province the sale belongs to.
    pub province_uuid: Uuid,
    /// Product sold.
    pub product_uuid: Uuid,
    /// Quantity sold.
    #[validate(range(min = 0, message = "quantity must not be negative"))]
    pub quantity: i64,
    /// When the sale happened; now when omitted.
    pub occurred_at: Option<DateTime<Utc>>,
}

/// POST /sales
async fn create_sale(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<CreateSaleRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<SaleEvent>>), ApiError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let province_id = ProvinceId::from_uuid(request.province_uuid);
    let scope = auth.scope(&state.reporting, ProvinceScope::single(province_id))?;
    if !scope.contains(province_id) {
        return Err(AppError::Forbidden(format!(
            "role '{}' may only record sales for its own province",
            auth.role()
        ))
        .into());
    }

    let event = state
        .sales
        .record_sale(NewSale {
            province_id,
            product_id: ProductId::from_uuid(request.product_uuid),
            user_id: UserId::from_uuid(auth.user_id()),
            quantity: request.quantity,
            occurred_at: request.occurred_at.unwrap_or_else(Utc::now),
        })
        .await?;

    // Memoised reports no longer reflect the store.
    state.dashboard.cache().invalidate_all();
    info!(sale_id = %event.id, province_id = %event.province_id, "Sale entered");

    Ok(with_status(
        StatusCode::CREATED,
        "Sale recorded successfully",
        event,
    ))
}
