use tracing::{debug, info, instrument};
use crate::domain::{wishlist_key, WishlistItem};
use crate::product_actor::ProductError;
use crate::wishlist_actor::{WishlistCreate, WishlistError};
use crate::actor_framework::{FrameworkError, ResourceClient};
use crate::clients::ProductClient;

/// Client for the per-user wishlist.
#[derive(Clone)]
pub struct WishlistClient {
    inner: ResourceClient<WishlistItem>,
    product_client: ProductClient,
}

impl_client_methods!(WishlistClient, WishlistItem, WishlistError, wishlist_item);

impl WishlistClient {
    pub fn new(inner: ResourceClient<WishlistItem>, product_client: ProductClient) -> Self {
        Self { inner, product_client }
    }

    #[instrument(skip(self))]
    pub async fn items_for_user(&self, user_id: String) -> Result<Vec<WishlistItem>, WishlistError> {
        let mut items = self.list_wishlist_items().await?;
        items.retain(|item| item.user_id == user_id);
        items.sort_by(|a, b| b.added_at.cmp(&a.added_at));
        debug!(count = items.len(), "Wishlist listed");
        Ok(items)
    }

    /// Saves a product snapshot for `user_id`. Saving the same product twice
    /// is a conflict.
    #[instrument(skip(self))]
    pub async fn add(&self, user_id: String, product_id: String) -> Result<WishlistItem, WishlistError> {
        let product = self
            .product_client
            .get_product(product_id.clone())
            .await
            .map_err(|e: ProductError| WishlistError::ActorCommunicationError(e.to_string()))?
            .ok_or_else(|| WishlistError::ProductNotFound(product_id.clone()))?;

        let payload = WishlistCreate {
            user_id,
            product_id,
            product_name: product.name.clone(),
            price: product.price,
            image: product.primary_image(),
        };
        let id = self.inner.create(payload).await.map_err(FrameworkError::into_entity_error)?;
        let item = self.get_wishlist_item(id.clone()).await?.ok_or(WishlistError::NotFound(id))?;
        info!(wishlist_id = %item.id, "Wishlist item added");
        Ok(item)
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, user_id: String, product_id: String) -> Result<(), WishlistError> {
        let key = wishlist_key(&user_id, &product_id);
        match self.get_wishlist_item(key.clone()).await? {
            Some(item) if item.user_id == user_id && item.product_id == product_id => {}
            _ => return Err(WishlistError::NotFound(key)),
        }
        self.delete_wishlist_item(key).await?;
        info!("Wishlist item removed");
        Ok(())
    }
}
