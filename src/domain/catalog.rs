use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::ProductStore;

// ============================================================================
// Catalog - Products and the Stock Ledger
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
    /// Pre-discount price, shown struck through when present.
    pub original_price: Option<Decimal>,
    pub category: String,
    pub stock_quantity: u32,
    pub active: bool,
    /// Derived from reviews; recomputed by the review aggregator.
    pub rating: Decimal,
    pub review_count: u32,
}

impl Product {
    pub fn new(name: impl Into<String>, price: Decimal, category: impl Into<String>, stock: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            price,
            original_price: None,
            category: category.into(),
            stock_quantity: stock,
            active: true,
            rating: Decimal::ZERO,
            review_count: 0,
        }
    }
}

/// Reads and writes product stock on behalf of the order workflow.
///
/// No compare-and-swap: two concurrent orders can both pass the availability
/// check and both decrement. The zero floor keeps displayed stock
/// non-negative but does not prevent overselling under concurrent load.
#[derive(Clone)]
pub struct StockLedger {
    products: Arc<dyn ProductStore>,
}

impl StockLedger {
    pub fn new(products: Arc<dyn ProductStore>) -> Self {
        Self { products }
    }

    /// Batch-fetch identity and current stock for a set of product ids.
    /// Ids with no matching product are simply absent from the result map.
    pub async fn fetch(&self, ids: &[Uuid]) -> anyhow::Result<HashMap<Uuid, Product>> {
        let products = self.products.products_by_ids(ids).await?;
        Ok(products.into_iter().map(|p| (p.id, p)).collect())
    }

    /// Apply a single non-negative decrement, floored at zero.
    pub async fn decrement(&self, product_id: Uuid, by: u32) -> anyhow::Result<()> {
        self.products.decrement_stock(product_id, by).await
    }
}
