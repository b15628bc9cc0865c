use serde::{Deserialize, Serialize};

use super::{Paise, Product};

/// One product entry in a cart or an order snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: String,
    pub name: String,
    /// Unit price at the time the line was captured.
    pub price: Paise,
    pub quantity: u32,
    #[serde(default)]
    pub image: Option<String>,
}

impl CartItem {
    pub fn new(product_id: impl Into<String>, name: impl Into<String>, price: Paise, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            price,
            quantity,
            image: None,
        }
    }

    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            quantity,
            image: product.primary_image(),
        }
    }

    pub fn line_total(&self) -> Paise {
        self.price.saturating_mul(Paise::from(self.quantity))
    }
}
