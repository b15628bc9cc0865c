use serde::{Deserialize, Serialize};

use super::{Paise, Product};

pub const DEFAULT_PAGE_SIZE: u32 = 12;
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub q: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<Paise>,
    pub max_price: Option<Paise>,
    pub min_rating: Option<f32>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub pages: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl SearchQuery {
    fn accepts(&self, product: &Product, needle: &str) -> bool {
        product.is_active
            && product.matches_text(needle)
            && self
                .category
                .as_deref()
                .map_or(true, |category| product.category.eq_ignore_ascii_case(category))
            && self.min_price.map_or(true, |min| product.price >= min)
            && self.max_price.map_or(true, |max| product.price <= max)
            && self.min_rating.map_or(true, |min| product.rating >= min)
    }
}

/// Filters active products and returns the requested page, best rated first
/// within catalog order.
pub fn search(mut products: Vec<Product>, query: &SearchQuery) -> Page<Product> {
    let needle = query.q.as_deref().unwrap_or("").trim().to_lowercase();
    products.retain(|product| query.accepts(product, &needle));
    products.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| b.rating.total_cmp(&a.rating)));

    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let page = query.page.unwrap_or(1).max(1);
    let total = products.len() as u64;
    let pages = total.div_ceil(u64::from(limit));
    let skip = (page as usize - 1).saturating_mul(limit as usize);

    Page {
        items: products.into_iter().skip(skip).take(limit as usize).collect(),
        pagination: Pagination { page, limit, total, pages },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Product> {
        let mut survey = Product::new("p1", "Survey Hawk", "Mapping", 150_000, 5);
        survey.rating = 4.6;
        let mut sprayer = Product::new("p2", "Agri Sprayer", "Agriculture", 450_000, 2);
        sprayer.rating = 3.9;
        sprayer.order = 1;
        let mut retired = Product::new("p3", "Old Hawk", "Mapping", 90_000, 0);
        retired.is_active = false;
        vec![survey, sprayer, retired]
    }

    #[test]
    fn test_text_and_filters() {
        let query = SearchQuery { q: Some("HAWK".into()), ..Default::default() };
        let page = search(catalog(), &query);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, "p1");

        let query = SearchQuery { min_price: Some(200_000), ..Default::default() };
        assert_eq!(search(catalog(), &query).items[0].id, "p2");

        let query = SearchQuery { min_rating: Some(4.0), category: Some("mapping".into()), ..Default::default() };
        assert_eq!(search(catalog(), &query).pagination.total, 1);
    }

    #[test]
    fn test_pagination() {
        let query = SearchQuery { page: Some(2), limit: Some(1), ..Default::default() };
        let page = search(catalog(), &query);
        assert_eq!(page.pagination, Pagination { page: 2, limit: 1, total: 2, pages: 2 });
        assert_eq!(page.items[0].id, "p2");

        let beyond = SearchQuery { page: Some(9), limit: Some(500), ..Default::default() };
        let page = search(catalog(), &beyond);
        assert!(page.items.is_empty());
        assert_eq!(page.pagination.limit, MAX_PAGE_SIZE);
    }
}
