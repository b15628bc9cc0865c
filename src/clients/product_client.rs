use tracing::{debug, info, instrument};
use crate::domain::Product;
use crate::domain::search::{search, Page, SearchQuery};
use crate::product_actor::{ProductAction, ProductActionResult, ProductCreate, ProductError, ProductPatch};
use crate::actor_framework::{FrameworkError, ResourceClient};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl_basic_client!(ProductClient, Product, ProductError, product);

fn unexpected(result: ProductActionResult) -> ProductError {
    ProductError::ActorCommunicationError(format!("Unexpected result: {result:?}"))
}

impl ProductClient {
    #[instrument(fields(name = %payload.name, category = %payload.category), skip(self, payload))]
    pub async fn create_product(&self, payload: ProductCreate) -> Result<String, ProductError> {
        debug!("Sending request");
        let id = self.inner.create(payload).await.map_err(FrameworkError::into_entity_error)?;
        info!(product_id = %id, "Product created");
        Ok(id)
    }

    #[instrument(skip(self, patch))]
    pub async fn update_product(&self, id: String, patch: ProductPatch) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, patch).await.map_err(FrameworkError::into_entity_error)
    }

    /// Active products in catalog order.
    #[instrument(skip(self))]
    pub async fn list_active_products(&self) -> Result<Vec<Product>, ProductError> {
        let mut products = self.list_products().await?;
        products.retain(|product| product.is_active);
        products.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.name.cmp(&b.name)));
        Ok(products)
    }

    #[instrument(skip(self))]
    pub async fn search_products(&self, query: SearchQuery) -> Result<Page<Product>, ProductError> {
        let page = search(self.list_products().await?, &query);
        info!(total = page.pagination.total, "Search completed");
        Ok(page)
    }

    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: String) -> Result<u32, ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::CheckStock).await {
            Ok(ProductActionResult::StockLevel(level)) => Ok(level),
            Ok(other) => Err(unexpected(other)),
            Err(e) => Err(e.into_entity_error()),
        }
    }

    #[instrument(skip(self))]
    pub async fn reserve_stock(&self, id: String, quantity: u32) -> Result<u32, ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::ReserveStock(quantity)).await {
            Ok(ProductActionResult::Reserved { remaining }) => Ok(remaining),
            Ok(other) => Err(unexpected(other)),
            Err(e) => Err(e.into_entity_error()),
        }
    }

    #[instrument(skip(self))]
    pub async fn release_stock(&self, id: String, quantity: u32) -> Result<u32, ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::ReleaseStock(quantity)).await {
            Ok(ProductActionResult::Released { available }) => Ok(available),
            Ok(other) => Err(unexpected(other)),
            Err(e) => Err(e.into_entity_error()),
        }
    }

    #[instrument(skip(self))]
    pub async fn add_rating(&self, id: String, rating: u8) -> Result<(f32, u32), ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::AddRating(rating)).await {
            Ok(ProductActionResult::Rated { average, count }) => Ok((average, count)),
            Ok(other) => Err(unexpected(other)),
            Err(e) => Err(e.into_entity_error()),
        }
    }
}
