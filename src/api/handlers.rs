use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::order::errors::OrderError;
use crate::domain::order::status::StatusUpdate;
use crate::domain::order::timeline;
use crate::domain::order::workflow::PlaceOrderRequest;

use super::{auth::authenticate, ApiError, AppState};

// ============================================================================
// Request Handlers
// ============================================================================

pub async fn place_order(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<PlaceOrderRequest>,
) -> Result<HttpResponse, ApiError> {
    let session = authenticate(&req, state.sessions.as_ref()).await?;
    let placed = state.workflow.place_order(&session, body.into_inner()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "order_id": placed.order_id,
        "order_number": placed.order_number,
        "message": "Order placed successfully",
    })))
}

pub async fn update_status(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<StatusUpdate>,
) -> Result<HttpResponse, ApiError> {
    let session = authenticate(&req, state.sessions.as_ref()).await?;
    let order = state.controller.update_status(&session, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(order))
}

pub async fn cancel_order(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let session = authenticate(&req, state.sessions.as_ref()).await?;
    let order = state.controller.cancel_order(&session, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(order))
}

#[derive(Debug, Default, Deserialize)]
pub struct RefundRequest {
    #[serde(default)]
    pub reason: Option<String>,
}

pub async fn request_refund(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<RefundRequest>,
) -> Result<HttpResponse, ApiError> {
    let session = authenticate(&req, state.sessions.as_ref()).await?;
    state
        .controller
        .request_refund(&session, path.into_inner(), body.into_inner().reason)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Refund request recorded",
    })))
}

pub async fn timeline(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let session = authenticate(&req, state.sessions.as_ref()).await?;
    let order_id = path.into_inner();

    let order = state
        .orders
        .get_order(order_id)
        .await
        .map_err(OrderError::from)?
        .ok_or(OrderError::NotFound(order_id))?;

    if order.user_id != session.user_id && !session.role.is_staff() {
        return Err(ApiError(OrderError::Forbidden));
    }

    let entries = state
        .orders
        .tracking_for_order(order_id)
        .await
        .map_err(OrderError::from)?;
    let projection = timeline::project(order.status.as_str(), &entries);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "order_id": order.id,
        "order_number": order.order_number,
        "status": order.status,
        "timeline": projection,
    })))
}

// ============================================================================
// Endpoint Tests
// ============================================================================
