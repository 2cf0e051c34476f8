use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use rust_decimal::Decimal;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

mod api;
mod config;
mod domain;
mod metrics;
mod notify;
mod store;

use domain::catalog::Product;
use domain::order::value_objects::Role;
use notify::LogMailer;
use store::{MemoryBackend, ProductStore, Session, SessionStore};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Structured logging, INFO by default, RUST_LOG overrides.
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,bloomcart=debug")))
        .init();

    let config = config::Config::from_env();
    tracing::info!(host = %config.host, port = config.port, "🌸 Starting bloomcart order service");

    let backend = Arc::new(MemoryBackend::new());
    seed_demo_data(backend.as_ref()).await?;

    let metrics = Arc::new(metrics::Metrics::new()?);

    let state = web::Data::new(api::AppState::new(
        backend.clone(),
        backend.clone(),
        backend.clone(),
        backend.clone(),
        Arc::new(LogMailer),
        metrics.clone(),
    ));
    let metrics_data = web::Data::new(metrics);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(metrics_data.clone())
            .configure(api::routes)
            .route("/metrics", web::get().to(metrics::metrics_handler))
            .route("/health", web::get().to(api::health))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}

/// Seed a handful of products and demo sessions so the service is usable out
/// of the box. Tokens are generated per run and logged at startup.
async fn seed_demo_data(backend: &MemoryBackend) -> anyhow::Result<()> {
    let catalog = [
        ("Red Rose Bouquet", "29.99", "roses", 25u32),
        ("Sunflower Bunch", "18.00", "sunflowers", 40),
        ("White Lily Arrangement", "34.50", "lilies", 12),
        ("Peony Bundle", "32.00", "peonies", 8),
    ];
    for (name, price, category, stock) in catalog {
        let price: Decimal = price.parse()?;
        backend.insert_product(Product::new(name, price, category, stock)).await?;
    }

    for (label, role) in [
        ("customer", Role::Customer),
        ("florist", Role::Florist),
        ("admin", Role::Admin),
    ] {
        let token = Uuid::new_v4().to_string();
        backend
            .register(
                &token,
                Session {
                    user_id: Uuid::new_v4(),
                    role,
                },
            )
            .await?;
        tracing::info!(role = label, token = %token, "Seeded demo session");
    }

    tracing::info!(products = catalog.len(), "Seeded demo catalog");
    Ok(())
}
