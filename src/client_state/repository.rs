use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::domain::CartItem;
use super::ClientStateError;

/// Persistent home of the cart line items.
pub trait CartRepository {
    fn load(&self) -> Result<Vec<CartItem>, ClientStateError>;
    fn save(&self, items: &[CartItem]) -> Result<(), ClientStateError>;
}

#[derive(Debug, Default)]
pub struct InMemoryCartRepository {
    items: Mutex<Vec<CartItem>>,
}

fn poisoned<T>(_: T) -> ClientStateError {
    ClientStateError::Persistence("cart storage lock poisoned".to_string())
}

impl CartRepository for InMemoryCartRepository {
    fn load(&self) -> Result<Vec<CartItem>, ClientStateError> {
        Ok(self.items.lock().map_err(poisoned)?.clone())
    }

    fn save(&self, items: &[CartItem]) -> Result<(), ClientStateError> {
        *self.items.lock().map_err(poisoned)? = items.to_vec();
        Ok(())
    }
}

/// Cart stored as a JSON array in a single file. A missing file is an empty cart.
#[derive(Debug, Clone)]
pub struct JsonFileCartRepository {
    path: PathBuf,
}

impl JsonFileCartRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CartRepository for JsonFileCartRepository {
    fn load(&self) -> Result<Vec<CartItem>, ClientStateError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path)
            .map_err(|e| ClientStateError::Persistence(format!("{}: {e}", self.path.display())))?;
        serde_json::from_str(&raw)
            .map_err(|e| ClientStateError::Persistence(format!("{}: {e}", self.path.display())))
    }

    fn save(&self, items: &[CartItem]) -> Result<(), ClientStateError> {
        let raw = serde_json::to_string_pretty(items)
            .map_err(|e| ClientStateError::Persistence(e.to_string()))?;
        fs::write(&self.path, raw)
            .map_err(|e| ClientStateError::Persistence(format!("{}: {e}", self.path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_file_round_trip_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileCartRepository::new(dir.path().join("cart.json"));
        assert!(repo.load().unwrap().is_empty());

        let items = vec![CartItem::new("p1", "Falcon", 100_000, 2)];
        repo.save(&items).unwrap();
        assert_eq!(repo.load().unwrap(), items);
    }

    #[test]
    fn test_corrupt_file_is_a_persistence_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");
        fs::write(&path, "{not json").unwrap();
        let repo = JsonFileCartRepository::new(path);
        assert!(matches!(repo.load(), Err(ClientStateError::Persistence(_))));
    }
}
