use std::fmt;
use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, Responder, ResponseError};

use crate::domain::catalog::StockLedger;
use crate::domain::order::errors::OrderError;
use crate::domain::order::status::OrderStatusController;
use crate::domain::order::workflow::OrderWorkflowEngine;
use crate::metrics::Metrics;
use crate::notify::Mailer;
use crate::store::{CartBackend, OrderStore, ProductStore, SessionStore};

pub mod auth;
pub mod handlers;

// ============================================================================
// HTTP Surface
// ============================================================================
//
// Bearer-token authorization against the session store, JSON request/response
// bodies, and a uniform error envelope: every failure returns a short
// human-readable reason with no internal store detail.
//
// ============================================================================

pub struct AppState {
    pub workflow: OrderWorkflowEngine,
    pub controller: OrderStatusController,
    pub orders: Arc<dyn OrderStore>,
    pub sessions: Arc<dyn SessionStore>,
}

impl AppState {
    pub fn new(
        orders: Arc<dyn OrderStore>,
        products: Arc<dyn ProductStore>,
        carts: Arc<dyn CartBackend>,
        sessions: Arc<dyn SessionStore>,
        mailer: Arc<dyn Mailer>,
        metrics: Arc<Metrics>,
    ) -> Self {
        let workflow = OrderWorkflowEngine::new(
            orders.clone(),
            StockLedger::new(products),
            carts,
            mailer,
            metrics.clone(),
        );
        let controller = OrderStatusController::new(orders.clone(), metrics);
        Self {
            workflow,
            controller,
            orders,
            sessions,
        }
    }
}

/// Wraps domain errors for actix response mapping.
#[derive(Debug)]
pub struct ApiError(pub OrderError);

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        Self(err)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.0 {
            OrderError::MissingAuthorization | OrderError::InvalidAuthorization => {
                StatusCode::UNAUTHORIZED
            }
            OrderError::Forbidden => StatusCode::FORBIDDEN,
            OrderError::NotFound(_) => StatusCode::NOT_FOUND,
            OrderError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "success": false,
            "message": self.0.to_string(),
        }))
    }
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/orders", web::post().to(handlers::place_order))
            .route("/orders/status", web::post().to(handlers::update_status))
            .route("/orders/{id}/cancel", web::post().to(handlers::cancel_order))
            .route("/orders/{id}/refund-request", web::post().to(handlers::request_refund))
            .route("/orders/{id}/timeline", web::get().to(handlers::timeline)),
    );
}

pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "bloomcart",
    }))
}
