//! Review client methods

use super::{ApiRequest, MaidEaseClient};
use crate::error::ClientError;
use maidease_core::{Review, ReviewCheck, ReviewCreate};
use uuid::Uuid;

impl MaidEaseClient {
    /// Review a completed booking
    pub async fn create_review(&self, review: &ReviewCreate) -> Result<Review, ClientError> {
        let review =
            ReviewCreate::new(review.booking_id, review.rating, review.comment.as_deref())?;
        let request = ApiRequest::post("/reviews").json(&review)?;
        self.execute(request).await
    }

    pub async fn maid_reviews(&self, maid_id: Uuid) -> Result<Vec<Review>, ClientError> {
        self.execute(ApiRequest::get(format!("/reviews/maid/{maid_id}"))).await
    }

    /// The review left for a booking; `NotFound` when there is none
    pub async fn booking_review(&self, booking_id: Uuid) -> Result<Review, ClientError> {
        self.execute(ApiRequest::get(format!("/reviews/booking/{booking_id}"))).await
    }

    pub async fn review_exists(&self, booking_id: Uuid) -> Result<bool, ClientError> {
        let check: ReviewCheck = self
            .execute(ApiRequest::get(format!("/reviews/check/{booking_id}")))
            .await?;
        Ok(check.exists)
    }
}
