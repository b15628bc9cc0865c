use chrono::Utc;

use crate::actor_framework::Entity;
use crate::domain::{average_rating, Product, MAX_REVIEW_RATING, MIN_REVIEW_RATING};
use super::actions::{ProductAction, ProductActionResult};
use super::dtos::{ProductCreate, ProductPatch};
use super::error::ProductError;

fn require_text(field: &str, value: &str) -> Result<(), ProductError> {
    if value.trim().is_empty() {
        return Err(ProductError::ValidationError(format!("{field} is required")));
    }
    Ok(())
}

impl Entity for Product {
    type Id = String;
    type CreatePayload = ProductCreate;
    type Patch = ProductPatch;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Error = ProductError;

    fn id(&self) -> &String { &self.id }

    /// Creates a new Product from creation parameters.
    ///
    /// Name and category are required; images and specs default to empty.
    /// New products start active with no reviews.
    fn from_create(id: String, payload: ProductCreate) -> Result<Self, ProductError> {
        require_text("name", &payload.name)?;
        require_text("category", &payload.category)?;
        let now = Utc::now();
        Ok(Self {
            id,
            name: payload.name.trim().to_string(),
            description: payload.description,
            category: payload.category.trim().to_string(),
            price: payload.price,
            original_price: payload.original_price,
            discount: payload.discount.min(100),
            stock: payload.stock,
            rating: 0.0,
            reviews: 0,
            rating_total: 0,
            images: payload.images,
            specs: payload.specs,
            is_active: true,
            order: payload.order,
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies an admin patch. `is_active = false` soft-deactivates the product.
    fn on_update(&mut self, patch: ProductPatch) -> Result<(), ProductError> {
        if let Some(name) = patch.name {
            require_text("name", &name)?;
            self.name = name.trim().to_string();
        }
        if let Some(category) = patch.category {
            require_text("category", &category)?;
            self.category = category.trim().to_string();
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(original_price) = patch.original_price {
            self.original_price = Some(original_price);
        }
        if let Some(discount) = patch.discount {
            self.discount = discount.min(100);
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        if let Some(images) = patch.images {
            self.images = images;
        }
        if let Some(specs) = patch.specs {
            self.specs = specs;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
        if let Some(order) = patch.order {
            self.order = order;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Handles product-specific actions.
    ///
    /// # Errors
    /// Reserving fails on a zero quantity, an inactive product, or when more
    /// stock is requested than available.
    fn handle_action(&mut self, action: ProductAction) -> Result<ProductActionResult, ProductError> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::StockLevel(self.stock)),
            ProductAction::ReserveStock(amount) => {
                if amount == 0 {
                    return Err(ProductError::InvalidQuantity(amount));
                }
                if !self.is_active {
                    return Err(ProductError::Inactive(self.id.clone()));
                }
                if self.stock < amount {
                    return Err(ProductError::InsufficientStock {
                        product_id: self.id.clone(),
                        requested: amount,
                        available: self.stock,
                    });
                }
                self.stock -= amount;
                Ok(ProductActionResult::Reserved { remaining: self.stock })
            }
            ProductAction::ReleaseStock(amount) => {
                self.stock = self.stock.saturating_add(amount);
                Ok(ProductActionResult::Released { available: self.stock })
            }
            ProductAction::AddRating(rating) => {
                if !(MIN_REVIEW_RATING..=MAX_REVIEW_RATING).contains(&rating) {
                    return Err(ProductError::ValidationError(format!("rating {rating} is out of range")));
                }
                self.rating_total = self.rating_total.saturating_add(u64::from(rating));
                self.reviews = self.reviews.saturating_add(1);
                self.rating = average_rating(self.rating_total, self.reviews);
                Ok(ProductActionResult::Rated { average: self.rating, count: self.reviews })
            }
        }
    }
}
