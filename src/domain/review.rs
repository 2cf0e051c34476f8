use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::{ProductStore, ReviewStore};

// ============================================================================
// Review Aggregator
// ============================================================================
//
// Create/update/delete a user's review of a product and recompute the
// product's derived rating and review count after every mutation.
//
// One-review-per-user-per-product is NOT enforced, and helpful votes are
// NOT deduplicated per user; both are preserved permissive behaviors.
//
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub product_id: Uuid,
    pub user_id: Uuid,
    /// 1-5 inclusive.
    pub rating: u8,
    pub comment: String,
    pub verified_purchase: bool,
    pub helpful_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),

    #[error("Review not found: {0}")]
    NotFound(Uuid),

    #[error("Only the review's author may modify it")]
    Forbidden,

    #[error("Storage operation failed: {0}")]
    Persistence(String),
}

impl From<anyhow::Error> for ReviewError {
    fn from(err: anyhow::Error) -> Self {
        ReviewError::Persistence(err.to_string())
    }
}

pub struct ReviewAggregator {
    reviews: Arc<dyn ReviewStore>,
    products: Arc<dyn ProductStore>,
}

impl ReviewAggregator {
    pub fn new(reviews: Arc<dyn ReviewStore>, products: Arc<dyn ProductStore>) -> Self {
        Self { reviews, products }
    }

    pub async fn create_review(
        &self,
        user_id: Uuid,
        product_id: Uuid,
        rating: u8,
        comment: impl Into<String>,
        verified_purchase: bool,
    ) -> Result<Review, ReviewError> {
        if !(1..=5).contains(&rating) {
            return Err(ReviewError::InvalidRating(rating));
        }

        let now = Utc::now();
        let review = Review {
            id: Uuid::new_v4(),
            product_id,
            user_id,
            rating,
            comment: comment.into(),
            verified_purchase,
            helpful_count: 0,
            created_at: now,
            updated_at: now,
        };

        self.reviews.insert_review(review.clone()).await?;
        self.recompute_product(product_id).await?;

        tracing::info!(review_id = %review.id, product_id = %product_id, rating, "Review created");
        Ok(review)
    }

    pub async fn update_review(
        &self,
        user_id: Uuid,
        review_id: Uuid,
        rating: u8,
        comment: impl Into<String>,
    ) -> Result<Review, ReviewError> {
        if !(1..=5).contains(&rating) {
            return Err(ReviewError::InvalidRating(rating));
        }

        let mut review = self
            .reviews
            .get_review(review_id)
            .await?
            .ok_or(ReviewError::NotFound(review_id))?;

        if review.user_id != user_id {
            return Err(ReviewError::Forbidden);
        }

        review.rating = rating;
        review.comment = comment.into();
        review.updated_at = Utc::now();

        self.reviews.update_review(review.clone()).await?;
        self.recompute_product(review.product_id).await?;
        Ok(review)
    }

    pub async fn delete_review(&self, user_id: Uuid, review_id: Uuid) -> Result<(), ReviewError> {
        let review = self
            .reviews
            .get_review(review_id)
            .await?
            .ok_or(ReviewError::NotFound(review_id))?;

        if review.user_id != user_id {
            return Err(ReviewError::Forbidden);
        }

        self.reviews.delete_review(review_id).await?;
        self.recompute_product(review.product_id).await?;
        Ok(())
    }

    /// Adjust the helpful counter up or down, floored at zero. Votes are not
    /// deduplicated per user.
    pub async fn mark_helpful(&self, review_id: Uuid, helpful: bool) -> Result<u32, ReviewError> {
        let review = self
            .reviews
            .get_review(review_id)
            .await?
            .ok_or(ReviewError::NotFound(review_id))?;

        let count = if helpful {
            review.helpful_count + 1
        } else {
            review.helpful_count.saturating_sub(1)
        };

        self.reviews.set_helpful_count(review_id, count).await?;
        Ok(count)
    }

    /// Recompute the product's mean rating (one decimal) and review count
    /// from all remaining reviews and persist both.
    async fn recompute_product(&self, product_id: Uuid) -> Result<(), ReviewError> {
        let reviews = self.reviews.reviews_for_product(product_id).await?;
        let count = reviews.len() as u32;

        let rating = if count == 0 {
            Decimal::ZERO
        } else {
            let sum: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
            (Decimal::from(sum) / Decimal::from(count)).round_dp(1)
        };

        self.products.set_rating(product_id, rating, count).await?;
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
