use std::collections::BTreeMap;

use serde::Deserialize;

use crate::domain::Paise;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub price: Paise,
    pub original_price: Option<Paise>,
    #[serde(default)]
    pub discount: u8,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub specs: BTreeMap<String, String>,
    #[serde(default)]
    pub order: i32,
}

impl ProductCreate {
    pub fn new(name: impl Into<String>, category: impl Into<String>, price: Paise, stock: u32) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            category: category.into(),
            price,
            original_price: None,
            discount: 0,
            stock,
            images: Vec::new(),
            specs: BTreeMap::new(),
            order: 0,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<Paise>,
    pub original_price: Option<Paise>,
    pub discount: Option<u8>,
    pub stock: Option<u32>,
    pub images: Option<Vec<String>>,
    pub specs: Option<BTreeMap<String, String>>,
    pub is_active: Option<bool>,
    pub order: Option<i32>,
}
