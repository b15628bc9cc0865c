use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{CartRepository, CartStore, ClientStateError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSession {
    pub username: String,
    pub token: String,
    pub issued_at: DateTime<Utc>,
}

pub trait SessionStore {
    fn load(&self) -> Result<Option<AdminSession>, ClientStateError>;
    fn save(&self, session: &AdminSession) -> Result<(), ClientStateError>;
    fn clear(&self) -> Result<(), ClientStateError>;
}

#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    session: Mutex<Option<AdminSession>>,
}

fn poisoned<T>(_: T) -> ClientStateError {
    ClientStateError::Persistence("session storage lock poisoned".to_string())
}

impl SessionStore for InMemorySessionStore {
    fn load(&self) -> Result<Option<AdminSession>, ClientStateError> {
        Ok(self.session.lock().map_err(poisoned)?.clone())
    }

    fn save(&self, session: &AdminSession) -> Result<(), ClientStateError> {
        *self.session.lock().map_err(poisoned)? = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientStateError> {
        *self.session.lock().map_err(poisoned)? = None;
        Ok(())
    }
}

/// Storefront state for one browser: the cart plus an optional admin session.
///
/// Created once at start-up; logging out drops the session, completing a
/// checkout empties the cart.
pub struct ClientSession<R: CartRepository, S: SessionStore> {
    pub cart: CartStore<R>,
    sessions: S,
}

impl<R: CartRepository, S: SessionStore> ClientSession<R, S> {
    pub fn start(cart_repository: R, sessions: S) -> Result<Self, ClientStateError> {
        Ok(Self { cart: CartStore::init(cart_repository)?, sessions })
    }

    pub fn sign_in(&self, username: &str, token: &str, now: DateTime<Utc>) -> Result<AdminSession, ClientStateError> {
        let session = AdminSession {
            username: username.to_string(),
            token: token.to_string(),
            issued_at: now,
        };
        self.sessions.save(&session)?;
        info!(username, "Admin signed in");
        Ok(session)
    }

    pub fn current_admin(&self) -> Result<Option<AdminSession>, ClientStateError> {
        self.sessions.load()
    }

    pub fn logout(&self) -> Result<(), ClientStateError> {
        self.sessions.clear()
    }

    pub fn complete_checkout(&mut self, order_id: &str) -> Result<(), ClientStateError> {
        info!(order_id, "Order placed, clearing cart");
        self.cart.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client_state::InMemoryCartRepository;
    use crate::domain::Product;

    #[test]
    fn test_session_lifecycle() {
        let mut client = ClientSession::start(InMemoryCartRepository::default(), InMemorySessionStore::default()).unwrap();
        assert_eq!(client.current_admin().unwrap(), None);

        let session = client.sign_in("ops", "tok-123", Utc::now()).unwrap();
        assert_eq!(client.current_admin().unwrap(), Some(session));

        client.cart.add_item(&Product::new("p1", "Falcon", "Survey", 1_000, 1), 1).unwrap();
        client.complete_checkout("ORD-1-AAAAAAAAA").unwrap();
        assert!(client.cart.items().is_empty());

        client.logout().unwrap();
        assert_eq!(client.current_admin().unwrap(), None);
    }
}
