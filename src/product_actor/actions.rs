/// Custom actions for Product entities.
///
/// These actions represent domain-specific operations that can be performed
/// on a product beyond standard CRUD operations.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Checks the current stock level without modifying it.
    CheckStock,
    /// Reserves a specified amount of stock.
    ///
    /// # Errors
    /// Will fail if the requested amount exceeds available stock.
    ReserveStock(u32),
    /// Returns previously reserved stock, e.g. when a checkout is abandoned.
    ReleaseStock(u32),
    /// Folds one review rating (1..=5) into the aggregate.
    AddRating(u8),
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone, PartialEq)]
pub enum ProductActionResult {
    StockLevel(u32),
    Reserved { remaining: u32 },
    Released { available: u32 },
    Rated { average: f32, count: u32 },
}
