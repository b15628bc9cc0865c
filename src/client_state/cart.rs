use tokio::sync::watch;
use tracing::debug;

use crate::domain::{compute_totals, CartItem, Coupon, DeliveryPolicy, PricingError, Product, Totals};
use super::{CartRepository, ClientStateError};

/// The shopping cart.
///
/// Every mutation is saved through the repository before it becomes visible,
/// then the new snapshot is published to subscribers.
pub struct CartStore<R: CartRepository> {
    repository: R,
    items: Vec<CartItem>,
    changes: watch::Sender<Vec<CartItem>>,
}

impl<R: CartRepository> CartStore<R> {
    /// Loads whatever the repository holds.
    pub fn init(repository: R) -> Result<Self, ClientStateError> {
        let items = repository.load()?;
        let (changes, _) = watch::channel(items.clone());
        debug!(lines = items.len(), "Cart loaded");
        Ok(Self { repository, items, changes })
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<CartItem>> {
        self.changes.subscribe()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn item_count(&self) -> u32 {
        self.items.iter().fold(0u32, |total, item| total.saturating_add(item.quantity))
    }

    fn commit(&mut self, items: Vec<CartItem>) -> Result<(), ClientStateError> {
        self.repository.save(&items)?;
        self.items = items;
        self.changes.send_replace(self.items.clone());
        Ok(())
    }

    /// Adds `quantity` of `product`, merging with an existing line.
    pub fn add_item(&mut self, product: &Product, quantity: u32) -> Result<(), ClientStateError> {
        if quantity == 0 {
            return Err(ClientStateError::InvalidQuantity(quantity));
        }
        let mut items = self.items.clone();
        match items.iter_mut().find(|item| item.product_id == product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => items.push(CartItem::from_product(product, quantity)),
        }
        debug!(product_id = %product.id, quantity, "Cart item added");
        self.commit(items)
    }

    /// Sets the quantity of a line; zero or less removes it.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> Result<(), ClientStateError> {
        let Ok(quantity) = u32::try_from(quantity) else {
            return if quantity <= 0 {
                self.remove_item(product_id)
            } else {
                Err(ClientStateError::InvalidQuantity(u32::MAX))
            };
        };
        if quantity == 0 {
            return self.remove_item(product_id);
        }
        let mut items = self.items.clone();
        if let Some(line) = items.iter_mut().find(|item| item.product_id == product_id) {
            line.quantity = quantity;
        }
        self.commit(items)
    }

    pub fn remove_item(&mut self, product_id: &str) -> Result<(), ClientStateError> {
        let items = self
            .items
            .iter()
            .filter(|item| item.product_id != product_id)
            .cloned()
            .collect();
        debug!(product_id, "Cart item removed");
        self.commit(items)
    }

    pub fn clear(&mut self) -> Result<(), ClientStateError> {
        debug!("Cart cleared");
        self.commit(Vec::new())
    }

    /// Local estimate for display. Checkout prices the cart again server-side.
    pub fn estimate(&self, coupon: Option<&Coupon>, delivery: &DeliveryPolicy) -> Result<Totals, PricingError> {
        compute_totals(&self.items, coupon, delivery)
    }
}
