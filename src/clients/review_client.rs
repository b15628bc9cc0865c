use tracing::{debug, error, info, instrument};
use crate::domain::Review;
use crate::review_actor::{ReviewCreate, ReviewError};
use crate::product_actor::ProductError;
use crate::actor_framework::{FrameworkError, ResourceClient};
use crate::clients::ProductClient;

/// Client for the Review actor. Posting a review refreshes the product's
/// aggregate rating.
#[derive(Clone)]
pub struct ReviewClient {
    inner: ResourceClient<Review>,
    product_client: ProductClient,
}

impl_client_methods!(ReviewClient, Review, ReviewError, review);

fn product_failure(err: ProductError) -> ReviewError {
    match err {
        ProductError::NotFound(id) => ReviewError::ProductNotFound(id),
        other => ReviewError::ActorCommunicationError(other.to_string()),
    }
}

impl ReviewClient {
    pub fn new(inner: ResourceClient<Review>, product_client: ProductClient) -> Self {
        Self { inner, product_client }
    }

    /// Reviews for one product, newest first.
    #[instrument(skip(self))]
    pub async fn reviews_for_product(&self, product_id: String) -> Result<Vec<Review>, ReviewError> {
        let mut reviews = self.list_reviews().await?;
        reviews.retain(|review| review.product_id == product_id);
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        debug!(count = reviews.len(), "Reviews listed");
        Ok(reviews)
    }

    #[instrument(fields(product_id = %payload.product_id, rating = payload.rating), skip(self, payload))]
    pub async fn add_review(&self, payload: ReviewCreate) -> Result<Review, ReviewError> {
        let product_id = payload.product_id.clone();
        if self.product_client.get_product(product_id.clone()).await.map_err(product_failure)?.is_none() {
            error!("Product not found");
            return Err(ReviewError::ProductNotFound(product_id));
        }

        let id = self.inner.create(payload).await.map_err(FrameworkError::into_entity_error)?;
        let review = self
            .get_review(id.clone())
            .await?
            .ok_or(ReviewError::NotFound(id))?;

        let (average, count) = self
            .product_client
            .add_rating(product_id, review.rating)
            .await
            .map_err(product_failure)?;

        info!(review_id = %review.id, average, count, "Review added");
        Ok(review)
    }
}
